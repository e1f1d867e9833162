use std::pin::Pin;

pub mod notifications;
pub mod roster;
pub mod storage;
pub mod time;

pub use notifications::{NotificationPlatform, PermissionPlatform};
pub use roster::RosterSource;
pub use storage::KeyValueStore;
pub use self::time::TimeProvider;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
