use crate::notify::reminder_body;
use crate::ports;
use crate::schedule::has_started;
use crate::types::{
    NotificationRequest, NotificationTicket, ScheduleOutcome, ScheduleSummary, ShiftEntry,
    SkipReason,
};

use time::{OffsetDateTime, UtcOffset};

#[derive(Debug, Clone)]
pub struct NotificationScheduler<T, P> {
    time: T,
    platform: P,
    offset: UtcOffset,
    title: String,
}

impl<T, P> NotificationScheduler<T, P>
where
    T: ports::TimeProvider,
    P: ports::NotificationPlatform,
{
    pub fn new(time: T, platform: P, offset: UtcOffset, title: impl Into<String>) -> Self {
        Self {
            time,
            platform,
            offset,
            title: title.into(),
        }
    }

    /// Registers one reminder at the shift's start. Never errors: past and
    /// unparseable shifts are skipped, platform errors become `Failed`.
    pub async fn schedule_one(&self, shift: &ShiftEntry) -> ScheduleOutcome {
        let start = match shift.start_at(self.offset) {
            Ok(start) => start,
            Err(err) => {
                tracing::warn!(error = %err, key = %shift.key(), "skipping unparseable shift");
                return ScheduleOutcome::Skipped(SkipReason::Invalid(err));
            }
        };

        let delay_seconds = match fire_delay_seconds(start, self.time.now()) {
            Some(delay) => delay,
            None => {
                tracing::info!(key = %shift.key(), "skipping reminder: shift already passed");
                return ScheduleOutcome::Skipped(SkipReason::AlreadyPassed {
                    weekday: shift.weekday_label.clone(),
                    date: shift.date.clone(),
                    start_time: shift.start_time.clone(),
                });
            }
        };

        let request = NotificationRequest {
            shift_key: shift.key(),
            delay_seconds,
            fire_at: start,
            title: self.title.clone(),
            body: reminder_body(shift),
        };

        match self.platform.schedule(&request).await {
            Ok(handle) => {
                tracing::info!(
                    key = %request.shift_key,
                    handle = %handle,
                    delay_seconds,
                    "reminder scheduled"
                );
                ScheduleOutcome::Scheduled {
                    ticket: NotificationTicket {
                        shift_key: request.shift_key,
                        handle,
                        fire_at: start,
                    },
                    fire_delay_seconds: delay_seconds,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, key = %request.shift_key, "failed to schedule reminder");
                ScheduleOutcome::Failed(err.to_string())
            }
        }
    }

    /// Replaces every pending reminder with reminders for `shifts`, in the
    /// given order. Already registered tickets stay if a later shift fails.
    /// When the old reminders cannot be cancelled nothing new is registered
    /// and every shift counts as failed.
    pub async fn schedule_all_for(&self, shifts: &[ShiftEntry]) -> ScheduleSummary {
        if let Err(err) = self.platform.cancel_all().await {
            tracing::warn!(
                error = %err,
                shifts = shifts.len(),
                "cannot replace pending reminders: cancel failed"
            );
            return ScheduleSummary {
                failed: shifts.len(),
                ..ScheduleSummary::default()
            };
        }

        let mut summary = ScheduleSummary::default();
        for shift in shifts {
            let outcome = self.schedule_one(shift).await;
            summary.record(&outcome);
        }
        tracing::info!(
            scheduled = summary.scheduled,
            skipped = summary.skipped,
            failed = summary.failed,
            "reminder pass finished"
        );
        summary
    }

    pub async fn cancel_all(&self) {
        match self.platform.cancel_all().await {
            Ok(()) => tracing::info!("cancelled all pending reminders"),
            Err(err) => tracing::warn!(error = %err, "failed to cancel pending reminders"),
        }
    }

    /// Pending reminders as the platform currently reports them.
    pub async fn list_scheduled(&self) -> Vec<NotificationTicket> {
        match self.platform.list_scheduled().await {
            Ok(tickets) => tickets,
            Err(err) => {
                tracing::warn!(error = %err, "failed to list pending reminders");
                Vec::new()
            }
        }
    }
}

/// Whole seconds until `start`, rounded down; `None` once it has started.
pub fn fire_delay_seconds(start: OffsetDateTime, now: OffsetDateTime) -> Option<u64> {
    if has_started(start, now) {
        return None;
    }
    u64::try_from((start - now).whole_seconds()).ok()
}
