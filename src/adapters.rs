use std::time::Duration;

use time::OffsetDateTime;

use crate::ports;

mod file_store;
mod http;
mod local_notifications;

pub use file_store::FileStore;
pub use http::HttpRosterSource;
pub use local_notifications::{DeliveredReminder, LocalNotificationPlatform};

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimeProvider;

impl ports::TimeProvider for TokioTimeProvider {
    type Sleep<'a>
        = tokio::time::Sleep
    where
        Self: 'a;

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn sleep<'a>(&'a self, duration: Duration) -> Self::Sleep<'a> {
        tokio::time::sleep(duration)
    }
}
