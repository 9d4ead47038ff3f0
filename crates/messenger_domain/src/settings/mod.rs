mod handle;
mod keys;
mod platform;
mod snapshot;
mod store;
mod types;

pub use handle::Settings;
pub use keys::{PreferenceKind, SettingKey};
pub use platform::DevicePlatform;
pub use snapshot::SettingsSnapshot;
pub use store::{MemoryPreferenceStore, PreferenceStore, PreferenceValue};
pub use types::{
    BASE_THEMES, BaseTheme, CLEANUP_MESSAGES, ColorSet, DELAYED_SENDING, EMOJI_STYLES, EmojiStyle,
    FONT_SIZES, FontSizes, KEYBOARD_LAYOUTS, KeyboardLayout, NOTIFICATION_ACTIONS,
    NotificationAction, REPEAT_NOTIFICATIONS, VIBRATE_PATTERNS, VibratePattern,
};
