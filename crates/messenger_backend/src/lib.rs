mod env;
mod platform;
mod preferences;
mod row;
mod services;
mod sqlite_store;

pub use platform::{DEFAULT_NOTIFICATION_URI, HostPlatform};
pub use preferences::SqlitePreferences;
pub use services::MessengerService;
pub use sqlite_store::SqliteStore;
