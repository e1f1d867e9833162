use crate::config::AppConfig;
use crate::identity::{self, NotFound, ResolvedIdentity};
use crate::notify::NotificationScheduler;
use crate::permission::PermissionGate;
use crate::ports;
use crate::profile::ProfileStore;
use crate::roster::{FetchedRoster, RosterFetcher, RosterOrigin};
use crate::schedule::{self, ClassifiedShift};
use crate::types::{NotificationTicket, ScheduleSummary, ShiftEntry, StaffRecord};

use time::UtcOffset;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub title: String,
    pub utc_offset: UtcOffset,
    pub fetch_timeout: std::time::Duration,
    pub refresh_interval: time::Duration,
}

impl From<&AppConfig> for EngineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            title: config.app_name.clone(),
            utc_offset: config.utc_offset,
            fetch_timeout: config.fetch_timeout,
            refresh_interval: config.refresh_interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderStatus {
    PermissionDenied,
    Scheduled(ScheduleSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineStatus {
    pub user_name: Option<String>,
    pub identity: Option<ResolvedIdentity>,
    pub notifications_enabled: bool,
    pub pending_reminders: Vec<NotificationTicket>,
}

pub struct ReminderEngine<T, R, P, K> {
    time: T,
    fetcher: RosterFetcher<T, R>,
    scheduler: NotificationScheduler<T, P>,
    gate: PermissionGate<P>,
    profiles: ProfileStore<K>,
    offset: UtcOffset,
    refresh_interval: time::Duration,
}

impl<T, R, P, K> ReminderEngine<T, R, P, K>
where
    T: ports::TimeProvider,
    R: ports::RosterSource,
    P: ports::NotificationPlatform + ports::PermissionPlatform,
    K: ports::KeyValueStore,
{
    pub fn new(time: T, roster: R, platform: P, store: K, settings: EngineSettings) -> Self {
        Self {
            fetcher: RosterFetcher::new(time.clone(), roster, settings.fetch_timeout),
            scheduler: NotificationScheduler::new(
                time.clone(),
                platform.clone(),
                settings.utc_offset,
                settings.title,
            ),
            gate: PermissionGate::new(platform),
            profiles: ProfileStore::new(store),
            offset: settings.utc_offset,
            refresh_interval: settings.refresh_interval,
            time,
        }
    }

    pub fn scheduler(&self) -> &NotificationScheduler<T, P> {
        &self.scheduler
    }

    pub fn profiles(&self) -> &ProfileStore<K> {
        &self.profiles
    }

    pub async fn fetch_roster(&self) -> FetchedRoster {
        self.fetcher.fetch_roster().await
    }

    /// Binds `name` to a staff member of `roster` and remembers the result.
    pub async fn identify(
        &self,
        roster: &FetchedRoster,
        name: &str,
    ) -> Result<ResolvedIdentity, NotFound> {
        let staff = identity::resolve(&roster.snapshot, name)?;
        let resolved = ResolvedIdentity {
            staff: staff.clone(),
            roster: roster.clone(),
        };
        if !self.profiles.save(&resolved).await {
            tracing::warn!(name = %resolved.staff.full_name, "identity resolved but not persisted");
        }
        Ok(resolved)
    }

    /// Saved identity, refreshed from the remote roster when the cached
    /// copy is older than the refresh interval.
    pub async fn resume(&self) -> Option<ResolvedIdentity> {
        let saved = self.profiles.load().await?;
        if !saved.roster.is_stale(self.time.now(), self.refresh_interval) {
            return Some(saved);
        }

        let fetched = self.fetch_roster().await;
        if fetched.origin != RosterOrigin::Remote {
            return Some(saved);
        }
        match self.identify(&fetched, &saved.staff.full_name).await {
            Ok(refreshed) => Some(refreshed),
            Err(err) => {
                tracing::warn!(error = %err, "saved identity missing from refreshed roster");
                Some(saved)
            }
        }
    }

    pub fn agenda(&self, staff: &StaffRecord) -> Vec<ClassifiedShift> {
        schedule::classify(&staff.shifts, self.time.now(), self.offset)
    }

    /// Replaces all pending reminders with reminders for `identity`.
    pub async fn remind(&self, identity: &ResolvedIdentity) -> ReminderStatus {
        if !self.gate.ensure_notification_capability().await {
            self.profiles.set_notifications_enabled(false).await;
            return ReminderStatus::PermissionDenied;
        }

        let shifts: Vec<ShiftEntry> = self
            .agenda(&identity.staff)
            .into_iter()
            .map(|entry| entry.shift)
            .collect();
        let summary = self.scheduler.schedule_all_for(&shifts).await;
        let active = summary.scheduled > 0 && summary.failed == 0;
        self.profiles.set_notifications_enabled(active).await;
        ReminderStatus::Scheduled(summary)
    }

    pub async fn pending_reminders(&self) -> Vec<NotificationTicket> {
        self.scheduler.list_scheduled().await
    }

    /// Saved profile state next to the reminders the platform still holds.
    pub async fn status(&self) -> EngineStatus {
        EngineStatus {
            user_name: self.profiles.user_name().await,
            identity: self.profiles.load().await,
            notifications_enabled: self.profiles.notifications_enabled().await,
            pending_reminders: self.pending_reminders().await,
        }
    }

    /// Logout: drops every reminder and forgets the saved identity.
    pub async fn reset(&self) {
        self.scheduler.cancel_all().await;
        self.profiles.clear().await;
    }
}
