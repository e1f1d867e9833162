use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::error::InvalidShift;

/// Roster payload as published by the remote endpoint.
///
/// Field names on the wire are the Indonesian keys used by the published
/// JSON; the Rust side uses descriptive names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    #[serde(rename = "instansi")]
    pub institution_name: String,
    #[serde(rename = "bulan")]
    pub period_label: String,
    #[serde(rename = "tahun")]
    pub year: i32,
    #[serde(rename = "petugas")]
    pub staff: Vec<StaffRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: u32,
    #[serde(rename = "nama")]
    pub full_name: String,
    #[serde(rename = "jabatan")]
    pub role: String,
    #[serde(rename = "jadwal", default)]
    pub shifts: Vec<ShiftEntry>,
}

/// One duty slot. Dates and times stay in their published string form and
/// are parsed on demand, so a single bad entry never rejects the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEntry {
    #[serde(rename = "tanggal")]
    pub date: String,
    #[serde(rename = "hari")]
    pub weekday_label: String,
    #[serde(rename = "jam_mulai")]
    pub start_time: String,
    #[serde(rename = "jam_selesai")]
    pub end_time: String,
    #[serde(rename = "keterangan", default)]
    pub note: String,
}

/// Temporal identity of a shift: `(date, startTime)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShiftKey {
    pub date: String,
    pub start_time: String,
}

impl std::fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.date, self.start_time)
    }
}

impl ShiftEntry {
    pub fn key(&self) -> ShiftKey {
        ShiftKey {
            date: self.date.trim().to_string(),
            start_time: self.start_time.trim().to_string(),
        }
    }

    pub fn calendar_date(&self) -> Result<Date, InvalidShift> {
        parse_date(&self.date)
    }

    /// Start of the shift as an absolute instant, reading the published
    /// date and start time as wall-clock time at `offset`. A malformed end
    /// time rejects the whole entry as well.
    pub fn start_at(&self, offset: UtcOffset) -> Result<OffsetDateTime, InvalidShift> {
        let date = parse_date(&self.date)?;
        let start = parse_clock(&self.start_time, "start time")?;
        parse_clock(&self.end_time, "end time")?;
        Ok(PrimitiveDateTime::new(date, start).assume_offset(offset))
    }
}

fn parse_date(raw: &str) -> Result<Date, InvalidShift> {
    let invalid = || InvalidShift::new("date", raw);
    let mut parts = raw.trim().splitn(3, '-');
    let year: i32 = parse_part(parts.next()).ok_or_else(invalid)?;
    let month: u8 = parse_part(parts.next()).ok_or_else(invalid)?;
    let day: u8 = parse_part(parts.next()).ok_or_else(invalid)?;
    let month = Month::try_from(month).map_err(|_| invalid())?;
    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

fn parse_clock(raw: &str, field: &'static str) -> Result<Time, InvalidShift> {
    let invalid = || InvalidShift::new(field, raw);
    let (hour, minute) = raw.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u8 = parse_part(Some(hour)).ok_or_else(invalid)?;
    let minute: u8 = parse_part(Some(minute)).ok_or_else(invalid)?;
    Time::from_hms(hour, minute, 0).map_err(|_| invalid())
}

fn parse_part<N: std::str::FromStr>(part: Option<&str>) -> Option<N> {
    let part = part?;
    if part.is_empty() || !part.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
