use crate::selector::SelectorTable;
use crate::time::{DAY, DISABLED, HOUR, MINUTE, SECOND, YEAR};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FontSizes {
    pub small: i32,
    pub medium: i32,
    pub large: i32,
}

impl FontSizes {
    pub const fn new(small: i32, medium: i32, large: i32) -> Self {
        Self {
            small,
            medium,
            large,
        }
    }
}

pub const FONT_SIZES: SelectorTable<FontSizes> = SelectorTable::new(
    &[
        ("small", FontSizes::new(10, 12, 14)),
        ("normal", FontSizes::new(12, 14, 16)),
        ("large", FontSizes::new(14, 16, 18)),
        ("extra_large", FontSizes::new(16, 18, 20)),
    ],
    FontSizes::new(12, 14, 16),
);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmojiStyle {
    Default,
    AndroidO,
}

pub const EMOJI_STYLES: SelectorTable<EmojiStyle> = SelectorTable::new(
    &[
        ("default", EmojiStyle::Default),
        ("android_o", EmojiStyle::AndroidO),
    ],
    EmojiStyle::Default,
);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VibratePattern {
    Off,
    Default,
    TwoShort,
    TwoLong,
    ThreeShort,
    OneShortOneLong,
    OneLongOneShort,
    OneLong,
    OneShort,
    OneExtraLong,
    TwoShortOneLong,
    OneLongOneShortOneLong,
}

pub const VIBRATE_PATTERNS: SelectorTable<VibratePattern> = SelectorTable::new(
    &[
        ("vibrate_off", VibratePattern::Off),
        ("vibrate_default", VibratePattern::Default),
        ("vibrate_two_short", VibratePattern::TwoShort),
        ("vibrate_two_long", VibratePattern::TwoLong),
        ("vibrate_three_short", VibratePattern::ThreeShort),
        ("vibrate_one_short_one_long", VibratePattern::OneShortOneLong),
        ("vibrate_one_long_one_short", VibratePattern::OneLongOneShort),
        ("vibrate_one_long", VibratePattern::OneLong),
        ("vibrate_one_short", VibratePattern::OneShort),
        ("vibrate_one_extra_long", VibratePattern::OneExtraLong),
        ("vibrate_two_short_one_long", VibratePattern::TwoShortOneLong),
        (
            "vibrate_one_long_one_short_one_long",
            VibratePattern::OneLongOneShortOneLong,
        ),
    ],
    VibratePattern::Default,
);

pub const REPEAT_NOTIFICATIONS: SelectorTable<i64> = SelectorTable::new(
    &[
        ("never", DISABLED),
        ("one_min", MINUTE),
        ("five_min", MINUTE * 5),
        ("ten_min", MINUTE * 10),
        ("half_hour", MINUTE * 30),
        ("hour", HOUR),
    ],
    DISABLED,
);

pub const DELAYED_SENDING: SelectorTable<i64> = SelectorTable::new(
    &[
        ("off", 0),
        ("one_second", SECOND),
        ("three_seconds", SECOND * 3),
        ("five_seconds", SECOND * 5),
        ("ten_seconds", SECOND * 10),
        ("fifteen_seconds", SECOND * 15),
        ("thirty_seconds", SECOND * 30),
        ("one_minute", MINUTE),
    ],
    0,
);

// "two_weeks" is 17 days in stored data; keep it.
pub const CLEANUP_MESSAGES: SelectorTable<i64> = SelectorTable::new(
    &[
        ("never", DISABLED),
        ("one_week", DAY * 7),
        ("two_weeks", DAY * 17),
        ("one_month", DAY * 30),
        ("three_months", DAY * 90),
        ("six_months", YEAR / 2),
        ("one_year", YEAR),
    ],
    DISABLED,
);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardLayout {
    Default,
    Send,
    Enter,
}

pub const KEYBOARD_LAYOUTS: SelectorTable<KeyboardLayout> = SelectorTable::new(
    &[
        ("default", KeyboardLayout::Default),
        ("send", KeyboardLayout::Send),
        ("enter", KeyboardLayout::Enter),
    ],
    KeyboardLayout::Default,
);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseTheme {
    DayNight,
    AlwaysLight,
    AlwaysDark,
    Black,
}

pub const BASE_THEMES: SelectorTable<BaseTheme> = SelectorTable::new(
    &[
        ("day_night", BaseTheme::DayNight),
        ("light", BaseTheme::AlwaysLight),
        ("dark", BaseTheme::AlwaysDark),
        ("black", BaseTheme::Black),
    ],
    BaseTheme::DayNight,
);

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NotificationAction {
    Reply,
    Call,
    Read,
    Delete,
}

pub const NOTIFICATION_ACTIONS: SelectorTable<Option<NotificationAction>> = SelectorTable::new(
    &[
        ("reply", Some(NotificationAction::Reply)),
        ("call", Some(NotificationAction::Call)),
        ("read", Some(NotificationAction::Read)),
        ("delete", Some(NotificationAction::Delete)),
    ],
    None,
);

/// ARGB color channels of a theme.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ColorSet {
    pub color: i32,
    pub color_dark: i32,
    pub color_light: i32,
    pub color_accent: i32,
}

impl ColorSet {
    /// Builds a set from the three user-chosen channels; the light channel follows the primary.
    pub fn create(color: i32, color_dark: i32, color_accent: i32) -> Self {
        Self {
            color,
            color_dark,
            color_light: color,
            color_accent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_sizes_map_to_fixed_triples() {
        assert_eq!(FONT_SIZES.lookup("small"), Some(FontSizes::new(10, 12, 14)));
        assert_eq!(FONT_SIZES.lookup("normal"), Some(FontSizes::new(12, 14, 16)));
        assert_eq!(FONT_SIZES.lookup("large"), Some(FontSizes::new(14, 16, 18)));
        assert_eq!(
            FONT_SIZES.lookup("extra_large"),
            Some(FontSizes::new(16, 18, 20))
        );
        assert_eq!(FONT_SIZES.lookup("huge"), None);
    }

    #[test]
    fn vibrate_table_covers_twelve_patterns() {
        let selectors = [
            "vibrate_off",
            "vibrate_default",
            "vibrate_two_short",
            "vibrate_two_long",
            "vibrate_three_short",
            "vibrate_one_short_one_long",
            "vibrate_one_long_one_short",
            "vibrate_one_long",
            "vibrate_one_short",
            "vibrate_one_extra_long",
            "vibrate_two_short_one_long",
            "vibrate_one_long_one_short_one_long",
        ];
        let patterns = selectors
            .iter()
            .filter_map(|selector| VIBRATE_PATTERNS.lookup(selector))
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(patterns.len(), 12);
        assert_eq!(
            VIBRATE_PATTERNS.resolve(Some("vibrate_one_long_one_short_one_long")),
            VibratePattern::OneLongOneShortOneLong
        );
        assert_eq!(
            VIBRATE_PATTERNS.resolve(Some("buzz")),
            VibratePattern::Default
        );
    }

    #[test]
    fn repeat_notifications_use_disabled_sentinel() {
        assert_eq!(REPEAT_NOTIFICATIONS.resolve(Some("never")), -1);
        assert_eq!(REPEAT_NOTIFICATIONS.resolve(Some("one_min")), 60_000);
        assert_eq!(REPEAT_NOTIFICATIONS.resolve(Some("five_min")), 300_000);
        assert_eq!(REPEAT_NOTIFICATIONS.resolve(Some("ten_min")), 600_000);
        assert_eq!(REPEAT_NOTIFICATIONS.resolve(Some("half_hour")), 1_800_000);
        assert_eq!(REPEAT_NOTIFICATIONS.resolve(Some("hour")), 3_600_000);
        assert_eq!(REPEAT_NOTIFICATIONS.resolve(Some("daily")), -1);
    }

    #[test]
    fn delayed_sending_defaults_to_off() {
        assert_eq!(DELAYED_SENDING.resolve(Some("off")), 0);
        assert_eq!(DELAYED_SENDING.resolve(Some("one_second")), 1_000);
        assert_eq!(DELAYED_SENDING.resolve(Some("three_seconds")), 3_000);
        assert_eq!(DELAYED_SENDING.resolve(Some("five_seconds")), 5_000);
        assert_eq!(DELAYED_SENDING.resolve(Some("ten_seconds")), 10_000);
        assert_eq!(DELAYED_SENDING.resolve(Some("fifteen_seconds")), 15_000);
        assert_eq!(DELAYED_SENDING.resolve(Some("thirty_seconds")), 30_000);
        assert_eq!(DELAYED_SENDING.resolve(Some("one_minute")), 60_000);
        assert_eq!(DELAYED_SENDING.resolve(Some("two_minutes")), 0);
    }

    #[test]
    fn cleanup_two_weeks_is_seventeen_days() {
        assert_eq!(CLEANUP_MESSAGES.resolve(Some("two_weeks")), 17 * DAY);
        assert_ne!(CLEANUP_MESSAGES.resolve(Some("two_weeks")), 14 * DAY);
    }

    #[test]
    fn cleanup_table_matches_known_ages() {
        assert_eq!(CLEANUP_MESSAGES.resolve(Some("never")), -1);
        assert_eq!(CLEANUP_MESSAGES.resolve(Some("one_week")), 604_800_000);
        assert_eq!(CLEANUP_MESSAGES.resolve(Some("one_month")), 30 * DAY);
        assert_eq!(CLEANUP_MESSAGES.resolve(Some("three_months")), 90 * DAY);
        assert_eq!(CLEANUP_MESSAGES.resolve(Some("six_months")), 15_768_000_000);
        assert_eq!(CLEANUP_MESSAGES.resolve(Some("one_year")), 365 * DAY);
        assert_eq!(CLEANUP_MESSAGES.resolve(None), -1);
    }

    #[test]
    fn base_theme_defaults_to_day_night() {
        assert_eq!(BASE_THEMES.resolve(Some("light")), BaseTheme::AlwaysLight);
        assert_eq!(BASE_THEMES.resolve(Some("dark")), BaseTheme::AlwaysDark);
        assert_eq!(BASE_THEMES.resolve(Some("black")), BaseTheme::Black);
        assert_eq!(BASE_THEMES.resolve(Some("sepia")), BaseTheme::DayNight);
    }

    #[test]
    fn notification_actions_ignore_unknown_keys() {
        assert_eq!(
            NOTIFICATION_ACTIONS.resolve(Some("delete")),
            Some(NotificationAction::Delete)
        );
        assert_eq!(NOTIFICATION_ACTIONS.resolve(Some("archive")), None);
    }

    #[test]
    fn color_set_create_mirrors_primary_into_light() {
        let colors = ColorSet::create(1, 2, 3);
        assert_eq!(colors.color_light, 1);
        assert_eq!(colors.color_accent, 3);
    }
}
