use crate::error::FetchError;
use crate::ports;
use crate::types::RosterSnapshot;

mod fallback;

pub use fallback::fallback_snapshot;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterOrigin {
    Remote,
    Fallback,
}

impl RosterOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            RosterOrigin::Remote => "remote",
            RosterOrigin::Fallback => "fallback",
        }
    }
}

/// A roster snapshot together with where and when it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedRoster {
    pub snapshot: RosterSnapshot,
    pub origin: RosterOrigin,
    #[serde(with = "time::serde::rfc3339")]
    pub fetched_at: OffsetDateTime,
}

impl FetchedRoster {
    pub fn is_stale(&self, now: OffsetDateTime, max_age: time::Duration) -> bool {
        now - self.fetched_at > max_age
    }
}

#[derive(Debug, Clone)]
pub struct RosterFetcher<T, S> {
    time: T,
    source: S,
    timeout: Duration,
}

impl<T, S> RosterFetcher<T, S>
where
    T: ports::TimeProvider,
    S: ports::RosterSource,
{
    pub fn new(time: T, source: S, timeout: Duration) -> Self {
        Self {
            time,
            source,
            timeout,
        }
    }

    /// Single bounded attempt against the remote source. Never fails: any
    /// error yields the embedded fallback snapshot.
    pub async fn fetch_roster(&self) -> FetchedRoster {
        let (snapshot, origin) = match self.try_fetch().await {
            Ok(snapshot) => {
                tracing::info!(staff = snapshot.staff.len(), "roster fetched from remote");
                (snapshot, RosterOrigin::Remote)
            }
            Err(err) => {
                tracing::warn!(error = %err, "roster fetch failed, using fallback snapshot");
                (fallback_snapshot(), RosterOrigin::Fallback)
            }
        };
        FetchedRoster {
            snapshot,
            origin,
            fetched_at: self.time.now(),
        }
    }

    async fn try_fetch(&self) -> Result<RosterSnapshot, FetchError> {
        let snapshot = tokio::time::timeout(self.timeout, self.source.fetch())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))??;
        if snapshot.staff.is_empty() {
            return Err(FetchError::EmptyRoster);
        }
        Ok(snapshot)
    }
}
