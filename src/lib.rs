//! Duty-roster ("piket") reminder engine.
//!
//! Fetches the office roster, binds the user to a staff entry by name,
//! orders their shifts for display and registers one local reminder per
//! upcoming shift. Every device facility sits behind a trait in [`ports`];
//! [`adapters`] holds the implementations used by the `piket` binary.

pub mod adapters;
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod notify;
pub mod permission;
pub mod ports;
pub mod profile;
pub mod roster;
pub mod schedule;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{EngineSettings, EngineStatus, ReminderEngine, ReminderStatus};
pub use identity::{NotFound, ResolvedIdentity};
pub use roster::{FetchedRoster, RosterOrigin};
pub use schedule::{ClassifiedShift, ShiftStatus};
