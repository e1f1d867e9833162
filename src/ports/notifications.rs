use crate::ports::BoxFuture;
use crate::types::{NotificationHandle, NotificationRequest, NotificationTicket, PermissionStatus};

/// Device-local notification facility: registers time-delay triggered
/// reminders and owns the set of pending ones.
pub trait NotificationPlatform: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;

    fn schedule<'a>(
        &'a self,
        request: &'a NotificationRequest,
    ) -> BoxFuture<'a, Result<NotificationHandle, Self::Error>>;

    fn cancel_all(&self) -> BoxFuture<'_, Result<(), Self::Error>>;

    fn list_scheduled(&self) -> BoxFuture<'_, Result<Vec<NotificationTicket>, Self::Error>>;
}

pub trait PermissionPlatform: Clone + Send + Sync + 'static {
    /// False when running somewhere that cannot show notifications at all.
    fn is_capable_device(&self) -> bool;

    fn permission_status(&self) -> BoxFuture<'_, PermissionStatus>;

    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus>;
}
