//! Sorting shifts for display and for the reminder pass.
//!
//! Every shift lands in exactly one [`ShiftStatus`] bucket. `Today` wins over
//! `Past`: a shift that started earlier today stays in the first bucket so it
//! keeps top billing until the date rolls over.

use crate::types::ShiftEntry;

use std::cmp::Ordering;
use time::{OffsetDateTime, UtcOffset};

/// True once the shift's start instant is at or before `now`.
pub fn has_started(start: OffsetDateTime, now: OffsetDateTime) -> bool {
    start <= now
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShiftStatus {
    Today,
    Upcoming,
    Past,
}

impl ShiftStatus {
    pub fn label(self) -> &'static str {
        match self {
            ShiftStatus::Today => "today",
            ShiftStatus::Upcoming => "upcoming",
            ShiftStatus::Past => "past",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedShift {
    pub shift: ShiftEntry,
    pub start: OffsetDateTime,
    pub is_today: bool,
    pub is_past: bool,
}

impl ClassifiedShift {
    pub fn status(&self) -> ShiftStatus {
        match (self.is_today, self.is_past) {
            (true, _) => ShiftStatus::Today,
            (false, false) => ShiftStatus::Upcoming,
            (false, true) => ShiftStatus::Past,
        }
    }
}

/// Bucket first (today, upcoming, past), then start instant ascending.
pub fn display_order(a: &ClassifiedShift, b: &ClassifiedShift) -> Ordering {
    a.status()
        .cmp(&b.status())
        .then_with(|| a.start.cmp(&b.start))
}

/// Classifies `shifts` against `now`, with local dates taken at `offset`.
/// Entries whose date or time do not parse are left out.
pub fn classify(shifts: &[ShiftEntry], now: OffsetDateTime, offset: UtcOffset) -> Vec<ClassifiedShift> {
    let today = now.to_offset(offset).date();
    let mut classified: Vec<ClassifiedShift> = shifts
        .iter()
        .filter_map(|shift| match shift.start_at(offset) {
            Ok(start) => Some(ClassifiedShift {
                shift: shift.clone(),
                start,
                is_today: start.date() == today,
                is_past: has_started(start, now),
            }),
            Err(err) => {
                tracing::warn!(error = %err, key = %shift.key(), "ignoring unparseable shift");
                None
            }
        })
        .collect();
    classified.sort_by(display_order);
    classified
}
