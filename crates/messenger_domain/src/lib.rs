mod contact;
pub use contact::should_display_contact_letter;
mod conversation;
pub use conversation::Conversation;
mod scheduled_message;
pub use scheduled_message::ScheduledMessage;
mod row;
pub use row::{MemoryRow, RowError, RowSource, RowValue};
pub mod phone;
pub mod paths;
pub mod selector;
pub mod settings;
mod strings;
pub mod time;

pub use settings::{
    BaseTheme, ColorSet, DevicePlatform, EmojiStyle, FontSizes, KeyboardLayout,
    MemoryPreferenceStore, NotificationAction, PreferenceKind, PreferenceStore, PreferenceValue,
    SettingKey, Settings, SettingsSnapshot, VibratePattern,
};
