#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKind {
    Bool,
    Int,
    Long,
    String,
    StringSet,
}

macro_rules! setting_keys {
    ($($variant:ident => ($key:literal, $kind:ident)),* $(,)?) => {
        /// Every preference the snapshot builder reads or writes.
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum SettingKey {
            $($variant,)*
        }

        impl SettingKey {
            pub const ALL: &'static [SettingKey] = &[$(SettingKey::$variant,)*];

            pub fn as_key(self) -> &'static str {
                match self {
                    $(SettingKey::$variant => $key,)*
                }
            }

            pub fn kind(self) -> PreferenceKind {
                match self {
                    $(SettingKey::$variant => PreferenceKind::$kind,)*
                }
            }

            pub fn parse(raw: &str) -> Option<SettingKey> {
                match raw.trim() {
                    $($key => Some(SettingKey::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

setting_keys! {
    FirstStart => ("first_start", Bool),
    SeenConvoNavTooltip => ("seen_convo_nav_tooltip", Bool),
    ShowTextOnlineOnConversationList => ("show_text_online_on_conversation_list", Bool),
    PhoneNumber => ("phone_number", String),
    InstallTime => ("install_time", Long),
    DeliveryReports => ("delivery_reports", Bool),
    GiffgaffDeliveryReports => ("giffgaff_delivery_reports", Bool),
    MobileOnly => ("mobile_only", Bool),
    SoundEffects => ("sound_effects", Bool),
    SecurePrivateConversations => ("secure_private_conversations", Bool),
    QuickCompose => ("quick_compose", Bool),
    Snooze => ("snooze", Long),
    Ringtone => ("ringtone", String),
    FontSize => ("font_size", String),
    GlobalColorTheme => ("global_color_theme", String),
    ApplyThemeGlobally => ("apply_theme_globally", Bool),
    Signature => ("signature", String),
    WakeScreen => ("wake_screen", String),
    HeadsUp => ("heads_up", String),
    RounderBubbles => ("rounder_bubbles", Bool),
    SwipeDelete => ("swipe_delete", Bool),
    StripUnicode => ("strip_unicode", Bool),
    HistoryInNotifications => ("history_in_notifications", Bool),
    InternalBrowser => ("internal_browser", Bool),
    EmojiStyle => ("emoji_style", String),
    VibratePattern => ("vibrate_pattern", String),
    RepeatNotifications => ("repeat_notifications_interval", String),
    DelayedSending => ("delayed_sending", String),
    CleanupOldMessages => ("cleanup_old_messages", String),
    KeyboardLayout => ("keyboard_layout", String),
    BaseTheme => ("base_theme", String),
    NotificationActions => ("notification_actions", StringSet),
    GlobalPrimaryColor => ("global_primary_color", Int),
    GlobalPrimaryDarkColor => ("global_primary_dark_color", Int),
    GlobalAccentColor => ("global_accent_color", Int),
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}
