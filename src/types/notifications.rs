use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::InvalidShift;
use crate::types::roster::ShiftKey;

/// Opaque identifier handed out by the notification platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationHandle(pub String);

impl std::fmt::Display for NotificationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live, platform-registered reminder bound to one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTicket {
    pub shift_key: ShiftKey,
    pub handle: NotificationHandle,
    pub fire_at: OffsetDateTime,
}

/// What the scheduler asks the platform to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub shift_key: ShiftKey,
    pub delay_seconds: u64,
    pub fire_at: OffsetDateTime,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyPassed { weekday: String, date: String, start_time: String },
    Invalid(InvalidShift),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::AlreadyPassed {
                weekday,
                date,
                start_time,
            } => write!(
                f,
                "shift already passed ({weekday}, {date} at {start_time})"
            ),
            SkipReason::Invalid(err) => write!(f, "shift is not schedulable: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled {
        ticket: NotificationTicket,
        fire_delay_seconds: u64,
    },
    Skipped(SkipReason),
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub scheduled: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ScheduleSummary {
    pub(crate) fn record(&mut self, outcome: &ScheduleOutcome) {
        match outcome {
            ScheduleOutcome::Scheduled { .. } => self.scheduled += 1,
            ScheduleOutcome::Skipped(_) => self.skipped += 1,
            ScheduleOutcome::Failed(_) => self.failed += 1,
        }
    }
}
