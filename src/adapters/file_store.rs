use crate::error::StorageError;
use crate::ports::{self, BoxFuture};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

const STORE_FILE: &str = "store.json";

/// Key-value store persisted as one JSON object, rewritten atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STORE_FILE),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Current contents for a write. An unreadable file is discarded so a
    /// later write replaces it; the flag reports that the file must be
    /// rewritten even if nothing else changes.
    async fn read_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.read_all().await {
            Ok(values) => Ok((values, false)),
            Err(StorageError::Serialization(err)) => {
                tracing::warn!(
                    error = %err,
                    path = %self.path.display(),
                    "discarding unreadable store file"
                );
                Ok((BTreeMap::new(), true))
            }
            Err(err) => Err(err),
        }
    }

    async fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(values)?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, contents).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

impl ports::KeyValueStore for FileStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            let mut values = self.read_all().await?;
            Ok(values.remove(key))
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            let (mut values, _) = self.read_for_write().await?;
            values.insert(key.to_string(), value.to_string());
            self.write_all(&values).await
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            let (mut values, recovered) = self.read_for_write().await?;
            if values.remove(key).is_some() || recovered {
                self.write_all(&values).await?;
            }
            Ok(())
        })
    }
}
