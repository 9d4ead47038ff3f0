use super::keys::SettingKey;
use super::platform::DevicePlatform;
use super::store::{PreferenceStore, PreferenceValue};
use super::types::{
    BASE_THEMES, BaseTheme, CLEANUP_MESSAGES, ColorSet, DELAYED_SENDING, EMOJI_STYLES, EmojiStyle,
    FONT_SIZES, FontSizes, KEYBOARD_LAYOUTS, KeyboardLayout, NOTIFICATION_ACTIONS,
    NotificationAction, REPEAT_NOTIFICATIONS, VIBRATE_PATTERNS, VibratePattern,
};
use crate::phone::format_number;
use crate::strings::normalize_optional_string;
use crate::time::{DISABLED, timeout_duration};
use std::collections::BTreeSet;
use std::time::Duration;

const PHONE_NUMBER_MAX_LEN: usize = 64;

/// Every resolved setting at one point in time.
///
/// Snapshots are never edited after construction; a rebuild produces a new one.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct SettingsSnapshot {
    pub first_start: bool,
    pub install_time: i64,
    pub seen_convo_nav_tooltip: bool,
    pub show_text_online_on_conversation_list: bool,
    pub phone_number: Option<String>,

    pub vibrate: VibratePattern,
    pub notification_actions: BTreeSet<NotificationAction>,
    pub use_global_theme_color: bool,
    pub delivery_reports: bool,
    pub giffgaff_delivery_reports: bool,
    pub mobile_only: bool,
    pub sound_effects: bool,
    pub secure_private_conversations: bool,
    pub quick_compose: bool,
    pub wake_screen: bool,
    pub heads_up: bool,
    pub rounder_bubbles: bool,
    pub swipe_delete: bool,
    pub strip_unicode: bool,
    pub history_in_notifications: bool,
    pub internal_browser: bool,
    pub snooze: i64,
    pub repeat_notifications: i64,
    pub delayed_sending_timeout: i64,
    pub cleanup_messages_timeout: i64,
    pub ringtone: Option<String>,
    pub font_size: String,
    pub theme_color_string: String,
    pub base_theme_string: String,
    pub signature: String,

    pub font_sizes: Option<FontSizes>,
    pub main_color_set: ColorSet,
    pub base_theme: BaseTheme,
    pub keyboard_layout: Option<KeyboardLayout>,
    pub emoji_style: EmojiStyle,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            first_start: true,
            install_time: 0,
            seen_convo_nav_tooltip: false,
            show_text_online_on_conversation_list: true,
            phone_number: None,
            vibrate: VibratePattern::Default,
            notification_actions: BTreeSet::new(),
            use_global_theme_color: false,
            delivery_reports: false,
            giffgaff_delivery_reports: false,
            mobile_only: false,
            sound_effects: true,
            secure_private_conversations: false,
            quick_compose: false,
            wake_screen: false,
            heads_up: true,
            rounder_bubbles: false,
            swipe_delete: false,
            strip_unicode: false,
            history_in_notifications: true,
            internal_browser: true,
            snooze: 0,
            repeat_notifications: DISABLED,
            delayed_sending_timeout: 0,
            cleanup_messages_timeout: DISABLED,
            ringtone: None,
            font_size: "normal".to_owned(),
            theme_color_string: "default".to_owned(),
            base_theme_string: "day_night".to_owned(),
            signature: String::new(),
            font_sizes: None,
            main_color_set: ColorSet::default(),
            base_theme: BaseTheme::DayNight,
            keyboard_layout: None,
            emoji_style: EmojiStyle::Default,
        }
    }
}

impl SettingsSnapshot {
    /// Resolves a fresh snapshot from the store. Never fails.
    ///
    /// Write-once values (install time, the resolved phone number, the default
    /// ringtone) are persisted back to the store as a side effect.
    pub fn build<S, P>(store: &S, platform: &P) -> Self
    where
        S: PreferenceStore + ?Sized,
        P: DevicePlatform + ?Sized,
    {
        SettingsSnapshot::default().rebuild(store, platform)
    }

    /// Resolves a new snapshot seeded from this one.
    ///
    /// Font sizes and keyboard layout have no fallback selector, so an unknown
    /// stored selector keeps the value carried over from `self`.
    pub fn rebuild<S, P>(&self, store: &S, platform: &P) -> Self
    where
        S: PreferenceStore + ?Sized,
        P: DevicePlatform + ?Sized,
    {
        let mut next = self.clone();
        next.apply(store, platform);
        next
    }

    fn apply<S, P>(&mut self, store: &S, platform: &P)
    where
        S: PreferenceStore + ?Sized,
        P: DevicePlatform + ?Sized,
    {
        self.first_start = store.bool_or(SettingKey::FirstStart, true);
        self.seen_convo_nav_tooltip = store.bool_or(SettingKey::SeenConvoNavTooltip, false);
        self.show_text_online_on_conversation_list =
            store.bool_or(SettingKey::ShowTextOnlineOnConversationList, true);
        self.phone_number = resolve_phone_number(store, platform);
        self.install_time = resolve_install_time(store, platform);

        self.delivery_reports = store.bool_or(SettingKey::DeliveryReports, false);
        self.giffgaff_delivery_reports = store.bool_or(SettingKey::GiffgaffDeliveryReports, false);
        self.mobile_only = store.bool_or(SettingKey::MobileOnly, false);
        self.sound_effects = store.bool_or(SettingKey::SoundEffects, true);
        self.secure_private_conversations =
            store.bool_or(SettingKey::SecurePrivateConversations, false);
        self.quick_compose = store.bool_or(SettingKey::QuickCompose, false);
        self.snooze = store.long_or(SettingKey::Snooze, 0);
        self.font_size = store.string_or(SettingKey::FontSize, "normal");
        self.theme_color_string = store.string_or(SettingKey::GlobalColorTheme, "default");
        self.use_global_theme_color = store.bool_or(SettingKey::ApplyThemeGlobally, false);
        self.signature = store.string_or(SettingKey::Signature, "");
        self.wake_screen = store.string_or(SettingKey::WakeScreen, "off") == "on";
        self.heads_up = store.string_or(SettingKey::HeadsUp, "on") == "on";
        self.rounder_bubbles = store.bool_or(SettingKey::RounderBubbles, false);
        self.swipe_delete = store.bool_or(SettingKey::SwipeDelete, false);
        self.strip_unicode = store.bool_or(SettingKey::StripUnicode, false);
        self.history_in_notifications = store.bool_or(SettingKey::HistoryInNotifications, true);
        self.internal_browser = store.bool_or(SettingKey::InternalBrowser, true);

        self.ringtone = Some(match store.string(SettingKey::Ringtone) {
            Some(ringtone) => ringtone,
            None => {
                let uri = platform.default_notification_uri();
                store.put_setting(SettingKey::Ringtone, PreferenceValue::String(uri.clone()));
                uri
            }
        });

        match FONT_SIZES.lookup(&self.font_size) {
            Some(sizes) => self.font_sizes = Some(sizes),
            None => {
                tracing::debug!(selector = %self.font_size, "unknown font size selector, keeping font sizes");
            }
        }

        self.emoji_style = if platform.has_native_modern_emoji() {
            EmojiStyle::AndroidO
        } else {
            EMOJI_STYLES.resolve(store.string(SettingKey::EmojiStyle).as_deref())
        };

        self.vibrate = VIBRATE_PATTERNS.resolve(store.string(SettingKey::VibratePattern).as_deref());
        self.repeat_notifications =
            REPEAT_NOTIFICATIONS.resolve(store.string(SettingKey::RepeatNotifications).as_deref());
        self.delayed_sending_timeout =
            DELAYED_SENDING.resolve(store.string(SettingKey::DelayedSending).as_deref());
        self.cleanup_messages_timeout =
            CLEANUP_MESSAGES.resolve(store.string(SettingKey::CleanupOldMessages).as_deref());

        // Unlike every other selector this one has no fallback: an unknown
        // value leaves the layout as it was.
        let keyboard_layout = store.string_or(SettingKey::KeyboardLayout, "default");
        match KEYBOARD_LAYOUTS.lookup(&keyboard_layout) {
            Some(layout) => self.keyboard_layout = Some(layout),
            None => {
                tracing::warn!(
                    selector = %keyboard_layout,
                    previous = ?self.keyboard_layout,
                    "unknown keyboard layout selector, keeping previous layout"
                );
            }
        }

        self.base_theme_string = store.string_or(SettingKey::BaseTheme, "day_night");
        self.base_theme = BASE_THEMES.resolve(Some(&self.base_theme_string));

        let actions = store
            .string_set(SettingKey::NotificationActions)
            .unwrap_or_else(|| platform.default_notification_actions());
        self.notification_actions = actions
            .iter()
            .filter_map(|action| NOTIFICATION_ACTIONS.lookup(action).flatten())
            .collect();

        let defaults = platform.default_color_set();
        self.main_color_set = ColorSet::create(
            store.int_or(SettingKey::GlobalPrimaryColor, defaults.color),
            store.int_or(SettingKey::GlobalPrimaryDarkColor, defaults.color_dark),
            store.int_or(SettingKey::GlobalAccentColor, defaults.color_accent),
        );
    }

    pub fn is_currently_dark_theme(&self, is_night: bool) -> bool {
        match self.base_theme {
            BaseTheme::AlwaysLight => false,
            BaseTheme::DayNight => is_night,
            BaseTheme::AlwaysDark | BaseTheme::Black => true,
        }
    }

    pub fn repeat_notifications_interval(&self) -> Option<Duration> {
        timeout_duration(self.repeat_notifications)
    }

    pub fn delayed_sending(&self) -> Option<Duration> {
        timeout_duration(self.delayed_sending_timeout)
    }

    pub fn cleanup_messages_age(&self) -> Option<Duration> {
        timeout_duration(self.cleanup_messages_timeout)
    }
}

fn resolve_phone_number<S, P>(store: &S, platform: &P) -> Option<String>
where
    S: PreferenceStore + ?Sized,
    P: DevicePlatform + ?Sized,
{
    if let Some(stored) = store.string(SettingKey::PhoneNumber) {
        return Some(stored);
    }

    let own_number =
        normalize_optional_string(platform.own_phone_number().as_deref(), PHONE_NUMBER_MAX_LEN)?;
    let formatted = format_number(&own_number);
    if formatted.is_empty() {
        return None;
    }

    store.put_setting(
        SettingKey::PhoneNumber,
        PreferenceValue::String(formatted.clone()),
    );
    Some(formatted)
}

fn resolve_install_time<S, P>(store: &S, platform: &P) -> i64
where
    S: PreferenceStore + ?Sized,
    P: DevicePlatform + ?Sized,
{
    let stored = store.long_or(SettingKey::InstallTime, 0);
    if stored != 0 {
        return stored;
    }

    let now = platform.now_unix_millis();
    store.put_setting(SettingKey::InstallTime, PreferenceValue::Long(now));
    now
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::settings::store::MemoryPreferenceStore;
    use crate::time::DAY;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) struct TestPlatform {
        pub(crate) phone_number: Option<String>,
        pub(crate) native_emoji: bool,
        pub(crate) now: i64,
        pub(crate) phone_lookups: AtomicUsize,
    }

    impl TestPlatform {
        pub(crate) fn new() -> Self {
            Self {
                phone_number: None,
                native_emoji: false,
                now: 1_500_000_000_000,
                phone_lookups: AtomicUsize::new(0),
            }
        }
    }

    impl DevicePlatform for TestPlatform {
        fn own_phone_number(&self) -> Option<String> {
            self.phone_lookups.fetch_add(1, Ordering::SeqCst);
            self.phone_number.clone()
        }

        fn has_native_modern_emoji(&self) -> bool {
            self.native_emoji
        }

        fn default_notification_uri(&self) -> String {
            "content://settings/system/notification_sound".to_owned()
        }

        fn default_notification_actions(&self) -> BTreeSet<String> {
            BTreeSet::from(["reply".to_owned(), "read".to_owned()])
        }

        fn default_color_set(&self) -> ColorSet {
            ColorSet::create(100, 200, 300)
        }

        fn now_unix_millis(&self) -> i64 {
            self.now
        }
    }

    fn text(value: &str) -> PreferenceValue {
        PreferenceValue::String(value.to_owned())
    }

    fn build_with(values: impl IntoIterator<Item = (SettingKey, PreferenceValue)>) -> SettingsSnapshot {
        let store = MemoryPreferenceStore::with_values(values);
        SettingsSnapshot::build(&store, &TestPlatform::new())
    }

    #[test]
    fn empty_store_resolves_documented_defaults() {
        let snapshot = build_with([]);

        assert!(snapshot.first_start);
        assert!(!snapshot.delivery_reports);
        assert!(snapshot.sound_effects);
        assert!(!snapshot.swipe_delete);
        assert!(snapshot.heads_up);
        assert!(!snapshot.wake_screen);
        assert_eq!(snapshot.vibrate, VibratePattern::Default);
        assert_eq!(snapshot.repeat_notifications, DISABLED);
        assert_eq!(snapshot.delayed_sending_timeout, 0);
        assert_eq!(snapshot.cleanup_messages_timeout, DISABLED);
        assert_eq!(snapshot.font_sizes, Some(FontSizes::new(12, 14, 16)));
        assert_eq!(snapshot.keyboard_layout, Some(KeyboardLayout::Default));
        assert_eq!(snapshot.base_theme, BaseTheme::DayNight);
        assert_eq!(snapshot.emoji_style, EmojiStyle::Default);
        assert_eq!(
            snapshot.notification_actions,
            BTreeSet::from([NotificationAction::Reply, NotificationAction::Read])
        );
        assert_eq!(snapshot.main_color_set, ColorSet::create(100, 200, 300));
        assert_eq!(snapshot.phone_number, None);
    }

    #[test]
    fn every_font_selector_yields_its_fixed_triple() {
        for (selector, expected) in [
            ("small", (10, 12, 14)),
            ("normal", (12, 14, 16)),
            ("large", (14, 16, 18)),
            ("extra_large", (16, 18, 20)),
        ] {
            let snapshot = build_with([(SettingKey::FontSize, text(selector))]);
            let sizes = snapshot.font_sizes.expect("font sizes resolved");
            assert_eq!((sizes.small, sizes.medium, sizes.large), expected, "{selector}");
        }
    }

    #[test]
    fn unknown_font_selector_leaves_sizes_unset() {
        let snapshot = build_with([(SettingKey::FontSize, text("gigantic"))]);
        assert_eq!(snapshot.font_sizes, None);
        assert_eq!(snapshot.font_size, "gigantic");
    }

    #[test]
    fn unknown_font_selector_keeps_previous_sizes_on_rebuild() {
        let store = MemoryPreferenceStore::with_values([(SettingKey::FontSize, text("large"))]);
        let platform = TestPlatform::new();
        let first = SettingsSnapshot::build(&store, &platform);

        store.put_setting(SettingKey::FontSize, text("gigantic"));
        let second = first.rebuild(&store, &platform);
        assert_eq!(second.font_sizes, Some(FontSizes::new(14, 16, 18)));
    }

    #[test]
    fn cleanup_two_weeks_resolves_to_seventeen_days() {
        let snapshot = build_with([(SettingKey::CleanupOldMessages, text("two_weeks"))]);
        assert_eq!(snapshot.cleanup_messages_timeout, 17 * DAY);
        assert_eq!(
            snapshot.cleanup_messages_age(),
            Some(Duration::from_secs(17 * 24 * 60 * 60))
        );
    }

    #[test]
    fn timeout_selectors_resolve_through_tables() {
        let snapshot = build_with([
            (SettingKey::RepeatNotifications, text("half_hour")),
            (SettingKey::DelayedSending, text("fifteen_seconds")),
            (SettingKey::VibratePattern, text("vibrate_two_long")),
        ]);
        assert_eq!(snapshot.repeat_notifications, 1_800_000);
        assert_eq!(snapshot.delayed_sending_timeout, 15_000);
        assert_eq!(snapshot.vibrate, VibratePattern::TwoLong);
        assert_eq!(snapshot.delayed_sending(), Some(Duration::from_secs(15)));

        let defaults = build_with([
            (SettingKey::RepeatNotifications, text("weekly")),
            (SettingKey::DelayedSending, text("forever")),
            (SettingKey::VibratePattern, text("vibrate_morse")),
        ]);
        assert_eq!(defaults.repeat_notifications, DISABLED);
        assert_eq!(defaults.repeat_notifications_interval(), None);
        assert_eq!(defaults.delayed_sending_timeout, 0);
        assert_eq!(defaults.vibrate, VibratePattern::Default);
    }

    #[test]
    fn phone_number_is_resolved_formatted_and_persisted_once() {
        let store = MemoryPreferenceStore::new();
        let mut platform = TestPlatform::new();
        platform.phone_number = Some("+1 (515) 991-1493".to_owned());

        let first = SettingsSnapshot::build(&store, &platform);
        assert_eq!(first.phone_number.as_deref(), Some("+15159911493"));
        assert_eq!(
            store.string(SettingKey::PhoneNumber).as_deref(),
            Some("+15159911493")
        );

        let second = first.rebuild(&store, &platform);
        assert_eq!(second.phone_number, first.phone_number);
        assert_eq!(platform.phone_lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unresolvable_phone_number_stays_absent_and_unpersisted() {
        let store = MemoryPreferenceStore::new();
        let mut platform = TestPlatform::new();
        platform.phone_number = Some("   ".to_owned());

        let snapshot = SettingsSnapshot::build(&store, &platform);
        assert_eq!(snapshot.phone_number, None);
        assert_eq!(store.string(SettingKey::PhoneNumber), None);
    }

    #[test]
    fn install_time_is_stamped_once() {
        let store = MemoryPreferenceStore::new();
        let mut platform = TestPlatform::new();

        let first = SettingsSnapshot::build(&store, &platform);
        assert_eq!(first.install_time, platform.now);

        platform.now += 60_000;
        let second = first.rebuild(&store, &platform);
        assert_eq!(second.install_time, first.install_time);
        assert_eq!(store.long_or(SettingKey::InstallTime, 0), first.install_time);
    }

    #[test]
    fn missing_ringtone_persists_platform_default() {
        let store = MemoryPreferenceStore::new();
        let snapshot = SettingsSnapshot::build(&store, &TestPlatform::new());
        assert_eq!(
            snapshot.ringtone.as_deref(),
            Some("content://settings/system/notification_sound")
        );
        assert_eq!(snapshot.ringtone, store.string(SettingKey::Ringtone));
    }

    #[test]
    fn native_emoji_overrides_stored_style() {
        let store =
            MemoryPreferenceStore::with_values([(SettingKey::EmojiStyle, text("default"))]);
        let mut platform = TestPlatform::new();
        platform.native_emoji = true;
        assert_eq!(
            SettingsSnapshot::build(&store, &platform).emoji_style,
            EmojiStyle::AndroidO
        );

        let snapshot = build_with([(SettingKey::EmojiStyle, text("android_o"))]);
        assert_eq!(snapshot.emoji_style, EmojiStyle::AndroidO);
        let snapshot = build_with([(SettingKey::EmojiStyle, text("twemoji"))]);
        assert_eq!(snapshot.emoji_style, EmojiStyle::Default);
    }

    #[test]
    fn unknown_keyboard_selector_keeps_previous_layout() {
        let store = MemoryPreferenceStore::with_values([(SettingKey::KeyboardLayout, text("send"))]);
        let platform = TestPlatform::new();
        let first = SettingsSnapshot::build(&store, &platform);
        assert_eq!(first.keyboard_layout, Some(KeyboardLayout::Send));

        store.put_setting(SettingKey::KeyboardLayout, text("qwerty"));
        let second = first.rebuild(&store, &platform);
        assert_eq!(second.keyboard_layout, Some(KeyboardLayout::Send));

        let fresh = SettingsSnapshot::build(&store, &platform);
        assert_eq!(fresh.keyboard_layout, None);
    }

    #[test]
    fn notification_actions_ignore_unknown_entries() {
        let snapshot = build_with([(
            SettingKey::NotificationActions,
            PreferenceValue::StringSet(BTreeSet::from([
                "call".to_owned(),
                "delete".to_owned(),
                "archive".to_owned(),
            ])),
        )]);
        assert_eq!(
            snapshot.notification_actions,
            BTreeSet::from([NotificationAction::Call, NotificationAction::Delete])
        );

        let empty = build_with([(
            SettingKey::NotificationActions,
            PreferenceValue::StringSet(BTreeSet::new()),
        )]);
        assert!(empty.notification_actions.is_empty());
    }

    #[test]
    fn color_channels_default_independently() {
        let snapshot = build_with([(SettingKey::GlobalPrimaryDarkColor, PreferenceValue::Int(7))]);
        assert_eq!(snapshot.main_color_set, ColorSet::create(100, 7, 300));
    }

    #[test]
    fn base_theme_drives_dark_theme_check() {
        let light = build_with([(SettingKey::BaseTheme, text("light"))]);
        assert!(!light.is_currently_dark_theme(true));

        let black = build_with([(SettingKey::BaseTheme, text("black"))]);
        assert_eq!(black.base_theme, BaseTheme::Black);
        assert!(black.is_currently_dark_theme(false));

        let unknown = build_with([(SettingKey::BaseTheme, text("sepia"))]);
        assert_eq!(unknown.base_theme, BaseTheme::DayNight);
        assert_eq!(unknown.base_theme_string, "sepia");
        assert!(unknown.is_currently_dark_theme(true));
        assert!(!unknown.is_currently_dark_theme(false));
    }

    #[test]
    fn string_switches_only_accept_on() {
        let snapshot = build_with([
            (SettingKey::WakeScreen, text("on")),
            (SettingKey::HeadsUp, text("off")),
        ]);
        assert!(snapshot.wake_screen);
        assert!(!snapshot.heads_up);
    }

    #[test]
    fn mistyped_values_fall_back_to_defaults() {
        let snapshot = build_with([
            (SettingKey::SoundEffects, text("false")),
            (SettingKey::BaseTheme, PreferenceValue::Int(2)),
        ]);
        assert!(snapshot.sound_effects);
        assert_eq!(snapshot.base_theme, BaseTheme::DayNight);
    }
}
