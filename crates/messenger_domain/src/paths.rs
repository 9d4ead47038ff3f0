use std::path::{Path, PathBuf};

pub const MESSENGER_ROOT_ENV: &str = "MESSENGER_ROOT";
pub const MESSENGER_PHONE_NUMBER_ENV: &str = "MESSENGER_PHONE_NUMBER";
pub const MESSENGER_NATIVE_EMOJI_ENV: &str = "MESSENGER_NATIVE_EMOJI";
pub const MESSENGER_NOTIFICATION_URI_ENV: &str = "MESSENGER_NOTIFICATION_URI";

pub fn sqlite_path(messenger_root: &Path) -> PathBuf {
    messenger_root.join("messenger.db")
}
