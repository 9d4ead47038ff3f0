use crate::row::RowSource;

/// A message queued to be sent at `timestamp`.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduledMessage {
    pub id: i64,
    pub title: Option<String>,
    pub to: Option<String>,
    pub data: Option<String>,
    pub mime_type: Option<String>,
    pub timestamp: i64,
}

impl ScheduledMessage {
    pub const COLUMN_ID: &'static str = "_id";
    pub const COLUMN_TITLE: &'static str = "title";
    pub const COLUMN_TO: &'static str = "phone_number";
    pub const COLUMN_DATA: &'static str = "data";
    pub const COLUMN_MIME_TYPE: &'static str = "mime_type";
    pub const COLUMN_TIMESTAMP: &'static str = "timestamp";

    pub fn from_row<R: RowSource>(row: &R) -> Result<Self, R::Error> {
        let mut message = Self::default();
        message.fill_from_row(row)?;
        Ok(message)
    }

    pub fn fill_from_row<R: RowSource>(&mut self, row: &R) -> Result<(), R::Error> {
        for index in 0..row.column_count() {
            match row.column_name(index)? {
                Self::COLUMN_ID => self.id = row.get_i64(index)?,
                Self::COLUMN_TITLE => self.title = row.get_string(index)?,
                Self::COLUMN_TO => self.to = row.get_string(index)?,
                Self::COLUMN_DATA => self.data = row.get_string(index)?,
                Self::COLUMN_MIME_TYPE => self.mime_type = row.get_string(index)?,
                Self::COLUMN_TIMESTAMP => self.timestamp = row.get_i64(index)?,
                _ => {}
            }
        }
        Ok(())
    }
}
