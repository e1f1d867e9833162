use crate::error::PlatformError;
use crate::ports::{self, BoxFuture};
use crate::types::{
    NotificationHandle, NotificationRequest, NotificationTicket, PermissionStatus, ShiftKey,
};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredReminder {
    pub handle: NotificationHandle,
    pub shift_key: ShiftKey,
    pub title: String,
    pub body: String,
    pub delivered_at: OffsetDateTime,
}

struct PendingReminder {
    ticket: NotificationTicket,
    task: JoinHandle<()>,
}

/// In-process notification platform: each reminder is a tokio task that
/// sleeps for its trigger delay and then hands the reminder to the
/// delivery channel. Reminders only fire while the process is running.
#[derive(Clone)]
pub struct LocalNotificationPlatform<T> {
    time: T,
    capable: bool,
    permission: Arc<Mutex<PermissionStatus>>,
    pending: Arc<Mutex<Vec<PendingReminder>>>,
    next_id: Arc<AtomicU64>,
    deliveries: mpsc::UnboundedSender<DeliveredReminder>,
}

impl<T> LocalNotificationPlatform<T>
where
    T: ports::TimeProvider,
{
    pub fn new(time: T, capable: bool) -> (Self, mpsc::UnboundedReceiver<DeliveredReminder>) {
        let (deliveries, receiver) = mpsc::unbounded_channel();
        let platform = Self {
            time,
            capable,
            permission: Arc::new(Mutex::new(PermissionStatus::Undetermined)),
            pending: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            deliveries,
        };
        (platform, receiver)
    }

    fn permission(&self) -> PermissionStatus {
        *self.permission.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn register(&self, request: &NotificationRequest) -> Result<NotificationHandle, PlatformError> {
        if !self.capable {
            return Err(PlatformError::Unavailable);
        }
        if self.permission() != PermissionStatus::Granted {
            return Err(PlatformError::PermissionDenied);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = NotificationHandle(format!("piket-{id}"));
        let time = self.time.clone();
        let deliveries = self.deliveries.clone();
        let delay = Duration::from_secs(request.delay_seconds);
        let reminder = DeliveredReminder {
            handle: handle.clone(),
            shift_key: request.shift_key.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
            delivered_at: request.fire_at,
        };
        let task = tokio::spawn(async move {
            time.sleep(delay).await;
            let reminder = DeliveredReminder {
                delivered_at: time.now(),
                ..reminder
            };
            if deliveries.send(reminder).is_err() {
                tracing::debug!("reminder fired with no delivery listener");
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|err| err.into_inner());
        pending.retain(|entry| !entry.task.is_finished());
        pending.push(PendingReminder {
            ticket: NotificationTicket {
                shift_key: request.shift_key.clone(),
                handle: handle.clone(),
                fire_at: request.fire_at,
            },
            task,
        });
        Ok(handle)
    }
}

impl<T> ports::NotificationPlatform for LocalNotificationPlatform<T>
where
    T: ports::TimeProvider,
{
    type Error = PlatformError;

    fn schedule<'a>(
        &'a self,
        request: &'a NotificationRequest,
    ) -> BoxFuture<'a, Result<NotificationHandle, Self::Error>> {
        Box::pin(async move { self.register(request) })
    }

    fn cancel_all(&self) -> BoxFuture<'_, Result<(), Self::Error>> {
        Box::pin(async move {
            let mut pending = self.pending.lock().unwrap_or_else(|err| err.into_inner());
            for entry in pending.drain(..) {
                entry.task.abort();
            }
            Ok(())
        })
    }

    fn list_scheduled(&self) -> BoxFuture<'_, Result<Vec<NotificationTicket>, Self::Error>> {
        Box::pin(async move {
            let pending = self.pending.lock().unwrap_or_else(|err| err.into_inner());
            Ok(pending
                .iter()
                .filter(|entry| !entry.task.is_finished())
                .map(|entry| entry.ticket.clone())
                .collect())
        })
    }
}

impl<T> ports::PermissionPlatform for LocalNotificationPlatform<T>
where
    T: ports::TimeProvider,
{
    fn is_capable_device(&self) -> bool {
        self.capable
    }

    fn permission_status(&self) -> BoxFuture<'_, PermissionStatus> {
        Box::pin(async move { self.permission() })
    }

    /// A terminal has no consent dialog; asking on a capable device grants.
    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus> {
        Box::pin(async move {
            let mut status = self.permission.lock().unwrap_or_else(|err| err.into_inner());
            if self.capable {
                *status = PermissionStatus::Granted;
            }
            *status
        })
    }
}
