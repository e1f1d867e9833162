use crate::ports;
use crate::types::PermissionStatus;

#[derive(Debug, Clone)]
pub struct PermissionGate<P> {
    platform: P,
}

impl<P> PermissionGate<P>
where
    P: ports::PermissionPlatform,
{
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Returns whether reminders may be shown, prompting at most once and
    /// only when the current status is not already granted.
    pub async fn ensure_notification_capability(&self) -> bool {
        if !self.platform.is_capable_device() {
            tracing::warn!("notifications only work on a capable device");
            return false;
        }

        let status = match self.platform.permission_status().await {
            PermissionStatus::Granted => return true,
            _ => self.platform.request_permission().await,
        };

        let granted = status == PermissionStatus::Granted;
        if !granted {
            tracing::warn!(?status, "notification permission was not granted");
        }
        granted
    }
}
