use super::types::ColorSet;
use std::collections::BTreeSet;

/// Device-identity and platform-capability lookups needed while building settings.
pub trait DevicePlatform: Send + Sync {
    /// The device's own phone number, if the host can tell.
    fn own_phone_number(&self) -> Option<String>;

    /// Whether the OS already ships the modern native emoji set.
    fn has_native_modern_emoji(&self) -> bool;

    fn default_notification_uri(&self) -> String;

    /// Action selectors enabled when the user never chose any.
    fn default_notification_actions(&self) -> BTreeSet<String>;

    fn default_color_set(&self) -> ColorSet;

    fn now_unix_millis(&self) -> i64;
}
