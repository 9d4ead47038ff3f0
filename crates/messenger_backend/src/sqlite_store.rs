use crate::row::SqliteRow;
use anyhow::{Context as _, anyhow};
use messenger_domain::{Conversation, PreferenceValue, ScheduledMessage};
use rusqlite::{Connection, OptionalExtension as _, params};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

const LATEST_SCHEMA_VERSION: u32 = 2;

const MIGRATIONS: &[(u32, &str)] = &[
    (
        1,
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/migrations/0001_init.sql"
        )),
    ),
    (
        2,
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/migrations/0002_scheduled_message.sql"
        )),
    ),
];

/// Handle to the SQLite worker thread. Cloning shares the same worker.
#[derive(Clone)]
pub struct SqliteStore {
    tx: mpsc::Sender<DbCommand>,
}

enum DbCommand {
    LoadPreferences {
        reply: mpsc::Sender<anyhow::Result<HashMap<String, PreferenceValue>>>,
    },
    PutPreference {
        key: String,
        value: PreferenceValue,
    },
    RemovePreference {
        key: String,
    },
    Flush {
        reply: mpsc::Sender<anyhow::Result<()>>,
    },
    InsertConversation {
        conversation: Box<Conversation>,
        reply: mpsc::Sender<anyhow::Result<i64>>,
    },
    ListConversations {
        reply: mpsc::Sender<anyhow::Result<Vec<Conversation>>>,
    },
    FindConversationByIdMatcher {
        id_matcher: String,
        reply: mpsc::Sender<anyhow::Result<Option<Conversation>>>,
    },
    InsertScheduledMessage {
        message: ScheduledMessage,
        reply: mpsc::Sender<anyhow::Result<i64>>,
    },
    ListScheduledMessages {
        reply: mpsc::Sender<anyhow::Result<Vec<ScheduledMessage>>>,
    },
}

impl SqliteStore {
    pub fn new(db_path: PathBuf) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel::<DbCommand>();

        std::thread::Builder::new()
            .name("messenger-sqlite".to_owned())
            .spawn(move || {
                let mut db = SqliteDatabase::open(&db_path);
                while let Ok(cmd) = rx.recv() {
                    match (&mut db, cmd) {
                        (Ok(db), DbCommand::LoadPreferences { reply }) => {
                            let _ = reply.send(db.load_preferences());
                        }
                        (Ok(db), DbCommand::PutPreference { key, value }) => {
                            let result = db.put_preference(&key, &value);
                            db.record_write(&key, result);
                        }
                        (Ok(db), DbCommand::RemovePreference { key }) => {
                            let result = db.remove_preference(&key);
                            db.record_write(&key, result);
                        }
                        (Ok(db), DbCommand::Flush { reply }) => {
                            let _ = reply.send(db.take_write_error());
                        }
                        (
                            Ok(db),
                            DbCommand::InsertConversation {
                                conversation,
                                reply,
                            },
                        ) => {
                            let _ = reply.send(db.insert_conversation(&conversation));
                        }
                        (Ok(db), DbCommand::ListConversations { reply }) => {
                            let _ = reply.send(db.list_conversations());
                        }
                        (Ok(db), DbCommand::FindConversationByIdMatcher { id_matcher, reply }) => {
                            let _ = reply.send(db.find_conversation_by_id_matcher(&id_matcher));
                        }
                        (Ok(db), DbCommand::InsertScheduledMessage { message, reply }) => {
                            let _ = reply.send(db.insert_scheduled_message(&message));
                        }
                        (Ok(db), DbCommand::ListScheduledMessages { reply }) => {
                            let _ = reply.send(db.list_scheduled_messages());
                        }
                        (Err(err), cmd) => {
                            respond_db_open_error(err, cmd);
                        }
                    }
                }
            })
            .context("failed to spawn sqlite worker thread")?;

        Ok(Self { tx })
    }

    pub fn load_preferences(&self) -> anyhow::Result<HashMap<String, PreferenceValue>> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(DbCommand::LoadPreferences { reply: reply_tx })
            .context("sqlite worker is not running")?;
        reply_rx.recv().context("sqlite worker terminated")?
    }

    /// Queues a durable write and returns without waiting for it.
    pub fn put_preference(&self, key: impl Into<String>, value: PreferenceValue) {
        let key = key.into();
        if self
            .tx
            .send(DbCommand::PutPreference {
                key: key.clone(),
                value,
            })
            .is_err()
        {
            tracing::error!(key = %key, "sqlite worker is not running, preference not persisted");
        }
    }

    /// Queues a durable removal and returns without waiting for it.
    pub fn remove_preference(&self, key: impl Into<String>) {
        let key = key.into();
        if self
            .tx
            .send(DbCommand::RemovePreference { key: key.clone() })
            .is_err()
        {
            tracing::error!(key = %key, "sqlite worker is not running, preference not removed");
        }
    }

    /// Waits until every queued preference write has been applied.
    ///
    /// Fails if any of them failed since the previous flush.
    pub fn flush(&self) -> anyhow::Result<()> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(DbCommand::Flush { reply: reply_tx })
            .context("sqlite worker is not running")?;
        reply_rx.recv().context("sqlite worker terminated")?
    }

    pub fn insert_conversation(&self, conversation: Conversation) -> anyhow::Result<i64> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(DbCommand::InsertConversation {
                conversation: Box::new(conversation),
                reply: reply_tx,
            })
            .context("sqlite worker is not running")?;
        reply_rx.recv().context("sqlite worker terminated")?
    }

    pub fn list_conversations(&self) -> anyhow::Result<Vec<Conversation>> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(DbCommand::ListConversations { reply: reply_tx })
            .context("sqlite worker is not running")?;
        reply_rx.recv().context("sqlite worker terminated")?
    }

    pub fn find_conversation_by_id_matcher(
        &self,
        id_matcher: impl Into<String>,
    ) -> anyhow::Result<Option<Conversation>> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(DbCommand::FindConversationByIdMatcher {
                id_matcher: id_matcher.into(),
                reply: reply_tx,
            })
            .context("sqlite worker is not running")?;
        reply_rx.recv().context("sqlite worker terminated")?
    }

    pub fn insert_scheduled_message(&self, message: ScheduledMessage) -> anyhow::Result<i64> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(DbCommand::InsertScheduledMessage {
                message,
                reply: reply_tx,
            })
            .context("sqlite worker is not running")?;
        reply_rx.recv().context("sqlite worker terminated")?
    }

    pub fn list_scheduled_messages(&self) -> anyhow::Result<Vec<ScheduledMessage>> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(DbCommand::ListScheduledMessages { reply: reply_tx })
            .context("sqlite worker is not running")?;
        reply_rx.recv().context("sqlite worker terminated")?
    }
}

fn respond_db_open_error(err: &anyhow::Error, cmd: DbCommand) {
    let message = format!("{err:#}");
    match cmd {
        DbCommand::LoadPreferences { reply } => {
            let _ = reply.send(Err(anyhow!(message)));
        }
        DbCommand::PutPreference { key, .. } | DbCommand::RemovePreference { key } => {
            tracing::error!(key = %key, error = %message, "preference write dropped");
        }
        DbCommand::Flush { reply } => {
            let _ = reply.send(Err(anyhow!(message)));
        }
        DbCommand::InsertConversation { reply, .. } => {
            let _ = reply.send(Err(anyhow!(message)));
        }
        DbCommand::ListConversations { reply } => {
            let _ = reply.send(Err(anyhow!(message)));
        }
        DbCommand::FindConversationByIdMatcher { reply, .. } => {
            let _ = reply.send(Err(anyhow!(message)));
        }
        DbCommand::InsertScheduledMessage { reply, .. } => {
            let _ = reply.send(Err(anyhow!(message)));
        }
        DbCommand::ListScheduledMessages { reply } => {
            let _ = reply.send(Err(anyhow!(message)));
        }
    }
}

struct SqliteDatabase {
    conn: Connection,
    write_error: Option<String>,
}

impl SqliteDatabase {
    fn open(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut conn = Connection::open(db_path)
            .with_context(|| format!("failed to open sqlite db {}", db_path.display()))?;

        configure_connection(&mut conn).context("failed to configure sqlite connection")?;
        apply_migrations(&mut conn).context("failed to apply sqlite migrations")?;

        Ok(Self {
            conn,
            write_error: None,
        })
    }

    fn record_write(&mut self, key: &str, result: anyhow::Result<()>) {
        if let Err(err) = result {
            tracing::error!(key = %key, error = %format!("{err:#}"), "failed to persist preference");
            if self.write_error.is_none() {
                self.write_error = Some(format!("{err:#}"));
            }
        }
    }

    fn take_write_error(&mut self) -> anyhow::Result<()> {
        match self.write_error.take() {
            Some(message) => Err(anyhow!("preference write failed: {message}")),
            None => Ok(()),
        }
    }

    fn load_preferences(&mut self) -> anyhow::Result<HashMap<String, PreferenceValue>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM preferences")
            .context("failed to prepare preference query")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut preferences = HashMap::new();
        for row in rows {
            let (key, raw) = row?;
            match serde_json::from_str::<PreferenceValue>(&raw) {
                Ok(value) => {
                    preferences.insert(key, value);
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "skipping malformed preference");
                }
            }
        }
        Ok(preferences)
    }

    fn put_preference(&mut self, key: &str, value: &PreferenceValue) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value).context("failed to encode preference")?;
        let now = now_unix_seconds();
        self.conn
            .execute(
                "INSERT INTO preferences (key, value, created_at, updated_at)
                 VALUES (?1, ?2, COALESCE((SELECT created_at FROM preferences WHERE key = ?1), ?3), ?3)
                 ON CONFLICT(key) DO UPDATE SET
                   value = excluded.value,
                   updated_at = excluded.updated_at",
                params![key, raw, now],
            )
            .with_context(|| format!("failed to store preference {key}"))?;
        Ok(())
    }

    fn remove_preference(&mut self, key: &str) -> anyhow::Result<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])
            .with_context(|| format!("failed to remove preference {key}"))?;
        Ok(())
    }

    fn insert_conversation(&mut self, conversation: &Conversation) -> anyhow::Result<i64> {
        let id = (conversation.id > 0).then_some(conversation.id);
        self.conn
            .execute(
                "INSERT INTO conversation (
                   _id, color, color_dark, color_light, color_accent, led_color, pinned, read,
                   timestamp, title, phone_numbers, snippet, ringtone, image_uri, id_matcher,
                   mute, archive, private_notifications
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                params![
                    id,
                    conversation.colors.color,
                    conversation.colors.color_dark,
                    conversation.colors.color_light,
                    conversation.colors.color_accent,
                    conversation.led_color,
                    conversation.pinned as i64,
                    conversation.read as i64,
                    conversation.timestamp,
                    conversation.title,
                    conversation.phone_numbers,
                    conversation.snippet,
                    conversation.ringtone_uri,
                    conversation.image_uri,
                    conversation.id_matcher,
                    conversation.mute as i64,
                    conversation.archived as i64,
                    conversation.private_notifications as i64,
                ],
            )
            .context("failed to insert conversation")?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_conversations(&mut self) -> anyhow::Result<Vec<Conversation>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM conversation ORDER BY pinned DESC, timestamp DESC, _id ASC")
            .context("failed to prepare conversation query")?;
        let rows = stmt.query_map([], |row| Conversation::from_row(&SqliteRow(row)))?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("failed to load conversations")
    }

    fn find_conversation_by_id_matcher(
        &mut self,
        id_matcher: &str,
    ) -> anyhow::Result<Option<Conversation>> {
        self.conn
            .query_row(
                "SELECT * FROM conversation WHERE id_matcher = ?1 ORDER BY timestamp DESC LIMIT 1",
                params![id_matcher],
                |row| Conversation::from_row(&SqliteRow(row)),
            )
            .optional()
            .with_context(|| format!("failed to find conversation for id matcher {id_matcher}"))
    }

    fn insert_scheduled_message(&mut self, message: &ScheduledMessage) -> anyhow::Result<i64> {
        let id = (message.id > 0).then_some(message.id);
        self.conn
            .execute(
                "INSERT INTO scheduled_message (_id, title, phone_number, data, mime_type, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id,
                    message.title.as_deref().unwrap_or_default(),
                    message.to.as_deref().unwrap_or_default(),
                    message.data.as_deref().unwrap_or_default(),
                    message.mime_type.as_deref().unwrap_or_default(),
                    message.timestamp,
                ],
            )
            .context("failed to insert scheduled message")?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_scheduled_messages(&mut self) -> anyhow::Result<Vec<ScheduledMessage>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM scheduled_message ORDER BY timestamp ASC, _id ASC")
            .context("failed to prepare scheduled message query")?;
        let rows = stmt.query_map([], |row| ScheduledMessage::from_row(&SqliteRow(row)))?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("failed to load scheduled messages")
    }
}

fn configure_connection(conn: &mut Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = 5000;",
    )
    .context("failed to apply sqlite PRAGMAs")?;
    Ok(())
}

fn apply_migrations(conn: &mut Connection) -> anyhow::Result<()> {
    let mut current: u32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .context("failed to read user_version")? as u32;

    if current > LATEST_SCHEMA_VERSION {
        return Err(anyhow!(
            "sqlite schema version is newer than this build: db={}, app={}",
            current,
            LATEST_SCHEMA_VERSION
        ));
    }

    if current == LATEST_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to begin migration transaction")?;
    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        tx.execute_batch(sql)
            .with_context(|| format!("failed to apply migration v{version:04}"))?;
        tx.pragma_update(None, "user_version", *version as i64)
            .context("failed to update user_version")?;
        current = *version;
    }
    tx.commit()
        .context("failed to commit migration transaction")?;

    tracing::debug!(version = current, "sqlite schema migrated");
    Ok(())
}

fn now_unix_seconds() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
