use crate::types::ShiftEntry;

mod scheduler;

pub use scheduler::{NotificationScheduler, fire_delay_seconds};

pub(crate) fn reminder_body(shift: &ShiftEntry) -> String {
    let mut body = format!(
        "You are on duty {}, {} at {}",
        shift.weekday_label.trim(),
        shift.date.trim(),
        shift.start_time.trim()
    );
    let note = shift.note.trim();
    if !note.is_empty() {
        body.push_str(&format!(" ({note})"));
    }
    body.push_str(". Don't forget to attend!");
    body
}
