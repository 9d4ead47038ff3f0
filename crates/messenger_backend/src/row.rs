use messenger_domain::RowSource;

/// Lets the domain mappers read a live `rusqlite` row by column name.
pub(crate) struct SqliteRow<'a, 'stmt>(pub(crate) &'a rusqlite::Row<'stmt>);

impl RowSource for SqliteRow<'_, '_> {
    type Error = rusqlite::Error;

    fn column_count(&self) -> usize {
        self.0.as_ref().column_count()
    }

    fn column_name(&self, index: usize) -> rusqlite::Result<&str> {
        self.0.as_ref().column_name(index)
    }

    fn get_i64(&self, index: usize) -> rusqlite::Result<i64> {
        self.0.get(index)
    }

    fn get_string(&self, index: usize) -> rusqlite::Result<Option<String>> {
        self.0.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use messenger_domain::{Conversation, ScheduledMessage};
    use rusqlite::Connection;

    #[test]
    fn maps_only_selected_columns() {
        let conn = Connection::open_in_memory().unwrap();
        let conversation = conn
            .query_row(
                "SELECT 4 AS _id, 'Luke' AS title, 1 AS mute, 'x' AS extra",
                [],
                |row| Conversation::from_row(&SqliteRow(row)),
            )
            .unwrap();

        assert_eq!(conversation.id, 4);
        assert_eq!(conversation.title.as_deref(), Some("Luke"));
        assert!(conversation.mute);
        assert_eq!(conversation.phone_numbers, None);
        assert!(!conversation.pinned);
    }

    #[test]
    fn null_text_reads_as_none() {
        let conn = Connection::open_in_memory().unwrap();
        let message = conn
            .query_row(
                "SELECT NULL AS title, 12 AS timestamp",
                [],
                |row| ScheduledMessage::from_row(&SqliteRow(row)),
            )
            .unwrap();
        assert_eq!(message.title, None);
        assert_eq!(message.timestamp, 12);
    }

    #[test]
    fn wrong_type_returns_the_driver_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .query_row("SELECT 'yes' AS pinned", [], |row| {
                Conversation::from_row(&SqliteRow(row))
            })
            .unwrap_err();
        assert!(
            matches!(err, rusqlite::Error::InvalidColumnType(0, ref name, _) if name == "pinned"),
            "unexpected error: {err:?}"
        );
    }
}
