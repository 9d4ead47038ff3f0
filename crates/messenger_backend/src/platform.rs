use crate::env::{flag_from_env, optional_trimmed_string_from_env};
use messenger_domain::paths;
use messenger_domain::{ColorSet, DevicePlatform};
use std::collections::BTreeSet;

pub const DEFAULT_NOTIFICATION_URI: &str = "content://settings/system/notification_sound";

const DEFAULT_PRIMARY_COLOR: i32 = 0xFF17_75D2_u32 as i32;
const DEFAULT_PRIMARY_DARK_COLOR: i32 = 0xFF16_65C0_u32 as i32;
const DEFAULT_ACCENT_COLOR: i32 = 0xFFFF_C107_u32 as i32;

/// Platform answers for a host process, configured from the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct HostPlatform {
    pub phone_number: Option<String>,
    pub native_emoji: bool,
    pub notification_uri: String,
    pub notification_actions: BTreeSet<String>,
    pub colors: ColorSet,
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self {
            phone_number: None,
            native_emoji: false,
            notification_uri: DEFAULT_NOTIFICATION_URI.to_owned(),
            notification_actions: BTreeSet::from(["reply".to_owned(), "read".to_owned()]),
            colors: ColorSet::create(
                DEFAULT_PRIMARY_COLOR,
                DEFAULT_PRIMARY_DARK_COLOR,
                DEFAULT_ACCENT_COLOR,
            ),
        }
    }
}

impl HostPlatform {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            phone_number: optional_trimmed_string_from_env(paths::MESSENGER_PHONE_NUMBER_ENV),
            native_emoji: flag_from_env(paths::MESSENGER_NATIVE_EMOJI_ENV)?,
            notification_uri: optional_trimmed_string_from_env(
                paths::MESSENGER_NOTIFICATION_URI_ENV,
            )
            .unwrap_or(defaults.notification_uri),
            ..defaults
        })
    }
}

impl DevicePlatform for HostPlatform {
    fn own_phone_number(&self) -> Option<String> {
        self.phone_number.clone()
    }

    fn has_native_modern_emoji(&self) -> bool {
        self.native_emoji
    }

    fn default_notification_uri(&self) -> String {
        self.notification_uri.clone()
    }

    fn default_notification_actions(&self) -> BTreeSet<String> {
        self.notification_actions.clone()
    }

    fn default_color_set(&self) -> ColorSet {
        self.colors
    }

    fn now_unix_millis(&self) -> i64 {
        messenger_domain::time::unix_millis_now()
    }
}
