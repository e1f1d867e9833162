use thiserror::Error;

/// A shift whose date or time does not describe a real instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} '{value}'")]
pub struct InvalidShift {
    pub field: &'static str,
    pub value: String,
}

impl InvalidShift {
    pub(crate) fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("roster request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("roster endpoint answered with status {0}")]
    Status(u16),
    #[error("roster payload is malformed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("roster request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("roster payload has no staff")]
    EmptyRoster,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("notification permission not granted")]
    PermissionDenied,
    #[error("notifications are not available on this device")]
    Unavailable,
    #[error("notification platform rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}
