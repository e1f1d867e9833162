//! Best-effort persistence of the resolved identity.
//!
//! Nothing here propagates storage errors: a profile that cannot be written
//! or read back is logged and reported as missing, and the user simply
//! identifies again.

use crate::error::StorageError;
use crate::identity::ResolvedIdentity;
use crate::ports;

pub const USER_NAME_KEY: &str = "@piket_kejari_username";
pub const USER_DATA_KEY: &str = "@piket_kejari_userdata";
pub const NOTIFICATIONS_ENABLED_KEY: &str = "@piket_kejari_notifications_enabled";

#[derive(Debug, Clone)]
pub struct ProfileStore<K> {
    store: K,
}

impl<K> ProfileStore<K>
where
    K: ports::KeyValueStore,
{
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Returns false when the identity could not be persisted.
    pub async fn save(&self, identity: &ResolvedIdentity) -> bool {
        match self.try_save(identity).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to save profile");
                false
            }
        }
    }

    async fn try_save(&self, identity: &ResolvedIdentity) -> Result<(), StorageError> {
        let blob = serde_json::to_string(identity)?;
        self.store.set(USER_DATA_KEY, &blob).await?;
        let saved_name = self
            .store
            .set(USER_NAME_KEY, identity.staff.full_name.trim())
            .await;
        if saved_name.is_err()
            && let Err(err) = self.store.remove(USER_DATA_KEY).await
        {
            tracing::warn!(error = %err, "failed to roll back profile blob");
        }
        saved_name
    }

    pub async fn load(&self) -> Option<ResolvedIdentity> {
        match self.try_load().await {
            Ok(identity) => identity,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load profile");
                None
            }
        }
    }

    async fn try_load(&self) -> Result<Option<ResolvedIdentity>, StorageError> {
        let Some(blob) = self.store.get(USER_DATA_KEY).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&blob)?))
    }

    pub async fn user_name(&self) -> Option<String> {
        match self.store.get(USER_NAME_KEY).await {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read saved user name");
                None
            }
        }
    }

    /// Forgets the identity, its cached roster and the reminder flag.
    pub async fn clear(&self) {
        for key in [USER_NAME_KEY, USER_DATA_KEY, NOTIFICATIONS_ENABLED_KEY] {
            if let Err(err) = self.store.remove(key).await {
                tracing::warn!(error = %err, key, "failed to clear profile entry");
            }
        }
    }

    pub async fn notifications_enabled(&self) -> bool {
        match self.store.get(NOTIFICATIONS_ENABLED_KEY).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read notification flag");
                false
            }
        }
    }

    pub async fn set_notifications_enabled(&self, enabled: bool) {
        let value = if enabled { "true" } else { "false" };
        if let Err(err) = self.store.set(NOTIFICATIONS_ENABLED_KEY, value).await {
            tracing::warn!(error = %err, "failed to store notification flag");
        }
    }
}
