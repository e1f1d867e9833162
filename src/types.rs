pub mod notifications;
pub mod roster;

pub use notifications::{
    NotificationHandle, NotificationRequest, NotificationTicket, PermissionStatus,
    ScheduleOutcome, ScheduleSummary, SkipReason,
};
pub use roster::{RosterSnapshot, ShiftEntry, ShiftKey, StaffRecord};
