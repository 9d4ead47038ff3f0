use crate::phone::{id_matcher, split_phone_numbers};
use crate::row::RowSource;
use crate::settings::ColorSet;

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub colors: ColorSet,
    pub led_color: i32,
    pub pinned: bool,
    pub read: bool,
    pub timestamp: i64,
    pub title: Option<String>,
    pub phone_numbers: Option<String>,
    pub snippet: Option<String>,
    pub ringtone_uri: Option<String>,
    pub image_uri: Option<String>,
    pub id_matcher: Option<String>,
    pub mute: bool,
    pub archived: bool,
    pub private_notifications: bool,
}

impl Conversation {
    pub const COLUMN_ID: &'static str = "_id";
    pub const COLUMN_COLOR: &'static str = "color";
    pub const COLUMN_COLOR_DARK: &'static str = "color_dark";
    pub const COLUMN_COLOR_LIGHT: &'static str = "color_light";
    pub const COLUMN_COLOR_ACCENT: &'static str = "color_accent";
    pub const COLUMN_LED_COLOR: &'static str = "led_color";
    pub const COLUMN_PINNED: &'static str = "pinned";
    pub const COLUMN_READ: &'static str = "read";
    pub const COLUMN_TIMESTAMP: &'static str = "timestamp";
    pub const COLUMN_TITLE: &'static str = "title";
    pub const COLUMN_PHONE_NUMBERS: &'static str = "phone_numbers";
    pub const COLUMN_SNIPPET: &'static str = "snippet";
    pub const COLUMN_RINGTONE: &'static str = "ringtone";
    pub const COLUMN_IMAGE_URI: &'static str = "image_uri";
    pub const COLUMN_ID_MATCHER: &'static str = "id_matcher";
    pub const COLUMN_MUTE: &'static str = "mute";
    pub const COLUMN_ARCHIVED: &'static str = "archive";
    pub const COLUMN_PRIVATE_NOTIFICATIONS: &'static str = "private_notifications";

    /// A new conversation with its id matcher derived from the recipients.
    pub fn for_recipients(title: impl Into<String>, phone_numbers: impl Into<String>) -> Self {
        let phone_numbers = phone_numbers.into();
        Self {
            title: Some(title.into()),
            id_matcher: Some(id_matcher(&phone_numbers)),
            phone_numbers: Some(phone_numbers),
            ..Self::default()
        }
    }

    pub fn from_row<R: RowSource>(row: &R) -> Result<Self, R::Error> {
        let mut conversation = Self::default();
        conversation.fill_from_row(row)?;
        Ok(conversation)
    }

    /// Copies every known column present in `row`; other fields keep their values.
    pub fn fill_from_row<R: RowSource>(&mut self, row: &R) -> Result<(), R::Error> {
        for index in 0..row.column_count() {
            match row.column_name(index)? {
                Self::COLUMN_ID => self.id = row.get_i64(index)?,
                Self::COLUMN_COLOR => self.colors.color = row.get_i32(index)?,
                Self::COLUMN_COLOR_DARK => self.colors.color_dark = row.get_i32(index)?,
                Self::COLUMN_COLOR_LIGHT => self.colors.color_light = row.get_i32(index)?,
                Self::COLUMN_COLOR_ACCENT => self.colors.color_accent = row.get_i32(index)?,
                Self::COLUMN_LED_COLOR => self.led_color = row.get_i32(index)?,
                Self::COLUMN_PINNED => self.pinned = row.get_flag(index)?,
                Self::COLUMN_READ => self.read = row.get_flag(index)?,
                Self::COLUMN_TIMESTAMP => self.timestamp = row.get_i64(index)?,
                Self::COLUMN_TITLE => self.title = row.get_string(index)?,
                Self::COLUMN_PHONE_NUMBERS => self.phone_numbers = row.get_string(index)?,
                Self::COLUMN_SNIPPET => self.snippet = row.get_string(index)?,
                Self::COLUMN_RINGTONE => self.ringtone_uri = row.get_string(index)?,
                Self::COLUMN_IMAGE_URI => self.image_uri = row.get_string(index)?,
                Self::COLUMN_ID_MATCHER => self.id_matcher = row.get_string(index)?,
                Self::COLUMN_MUTE => self.mute = row.get_flag(index)?,
                Self::COLUMN_ARCHIVED => self.archived = row.get_flag(index)?,
                Self::COLUMN_PRIVATE_NOTIFICATIONS => {
                    self.private_notifications = row.get_flag(index)?
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn recipients(&self) -> Vec<&str> {
        self.phone_numbers
            .as_deref()
            .map(split_phone_numbers)
            .unwrap_or_default()
    }

    pub fn is_group(&self) -> bool {
        self.phone_numbers
            .as_deref()
            .is_some_and(|numbers| numbers.contains(','))
    }
}
