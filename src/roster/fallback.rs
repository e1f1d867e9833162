use crate::types::{RosterSnapshot, ShiftEntry, StaffRecord};

// (id, name, role, date, weekday, start, end, note)
type FallbackRow = (
    u32,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const FALLBACK_ROWS: [FallbackRow; 10] = [
    (1, "Fabio", "Jaksa Fungsional", "2026-01-19", "Senin", "09:07", "17:00", "KASI BB"),
    (2, "Azaria", "Staf TU", "2026-01-19", "Senin", "09:07", "17:00", "KASI BB"),
    (3, "Yeli", "Jaksa Fungsional", "2026-01-20", "Selasa", "08:00", "17:00", "KASUBAG"),
    (4, "Larosa", "Staf TU", "2026-01-20", "Selasa", "08:00", "17:00", "KASUBAG"),
    (5, "Satya", "Jaksa Fungsional", "2026-01-21", "Rabu", "08:00", "17:00", "KASTEL"),
    (6, "Tika", "Jaksa Fungsional", "2026-01-21", "Rabu", "08:00", "17:00", "KASTEL"),
    (7, "Dzikrul", "Staf TU", "2026-01-22", "Kamis", "08:00", "17:00", "KASDUM"),
    (8, "Winda", "Jaksa Fungsional", "2026-01-22", "Kamis", "08:00", "17:00", "KASDUM"),
    (9, "Mutiara", "Jaksa Fungsional", "2026-01-23", "Jumat", "08:00", "17:00", "KASTUN"),
    (10, "Indah", "Staf TU", "2026-01-23", "Jumat", "08:00", "17:00", "KASTUN"),
];

/// Roster bundled with the binary, served whenever the remote source fails.
pub fn fallback_snapshot() -> RosterSnapshot {
    let staff = FALLBACK_ROWS
        .iter()
        .map(
            |&(id, name, role, date, weekday, start, end, note)| StaffRecord {
                id,
                full_name: name.to_string(),
                role: role.to_string(),
                shifts: vec![ShiftEntry {
                    date: date.to_string(),
                    weekday_label: weekday.to_string(),
                    start_time: start.to_string(),
                    end_time: end.to_string(),
                    note: note.to_string(),
                }],
            },
        )
        .collect();

    RosterSnapshot {
        institution_name: "Kejaksaan Negeri Agam".to_string(),
        period_label: "Februari".to_string(),
        year: 2026,
        staff,
    }
}
