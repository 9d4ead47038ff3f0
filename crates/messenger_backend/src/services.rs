use crate::env::resolve_messenger_root;
use crate::platform::HostPlatform;
use crate::preferences::SqlitePreferences;
use crate::sqlite_store::SqliteStore;
use anyhow::Context as _;
use messenger_domain::paths;
use messenger_domain::phone::id_matcher;
use messenger_domain::{Conversation, DevicePlatform, ScheduledMessage, Settings};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The messenger data directory opened for use: settings plus stored records.
pub struct MessengerService {
    root: PathBuf,
    sqlite: SqliteStore,
    preferences: Arc<SqlitePreferences>,
    settings: Settings,
}

impl MessengerService {
    /// Opens the data directory named by the environment, with host defaults
    /// for the device platform.
    pub fn new() -> anyhow::Result<Arc<Self>> {
        let root = resolve_messenger_root()?;
        let platform = HostPlatform::from_env().context("failed to read platform settings")?;
        Self::open_at(root, Arc::new(platform))
    }

    pub fn open_at(
        root: impl Into<PathBuf>,
        platform: Arc<dyn DevicePlatform>,
    ) -> anyhow::Result<Arc<Self>> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("failed to create {}", root.display()))?;

        let sqlite_path = paths::sqlite_path(&root);
        let sqlite = SqliteStore::new(sqlite_path).context("failed to init sqlite store")?;
        let preferences = Arc::new(
            SqlitePreferences::open(sqlite.clone()).context("failed to load preferences")?,
        );
        let settings = Settings::new(preferences.clone(), platform);

        tracing::info!(root = %root.display(), "messenger data opened");
        Ok(Arc::new(Self {
            root,
            sqlite,
            preferences,
            settings,
        }))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Waits for every queued preference write to reach the database.
    pub fn flush(&self) -> anyhow::Result<()> {
        self.preferences.flush()
    }

    pub fn conversations(&self) -> anyhow::Result<Vec<Conversation>> {
        self.sqlite.list_conversations()
    }

    /// Stores a new conversation and returns it with its assigned id.
    pub fn add_conversation(
        &self,
        title: &str,
        phone_numbers: &str,
        timestamp: i64,
    ) -> anyhow::Result<Conversation> {
        let mut conversation = Conversation::for_recipients(title, phone_numbers);
        conversation.timestamp = timestamp;
        conversation.colors = self.settings.get().main_color_set;
        conversation.id = self.sqlite.insert_conversation(conversation.clone())?;
        Ok(conversation)
    }

    /// The newest conversation with exactly these recipients, however they are formatted.
    pub fn find_conversation(&self, phone_numbers: &str) -> anyhow::Result<Option<Conversation>> {
        self.sqlite
            .find_conversation_by_id_matcher(id_matcher(phone_numbers))
    }

    pub fn scheduled_messages(&self) -> anyhow::Result<Vec<ScheduledMessage>> {
        self.sqlite.list_scheduled_messages()
    }

    pub fn schedule_message(&self, mut message: ScheduledMessage) -> anyhow::Result<ScheduledMessage> {
        message.id = self.sqlite.insert_scheduled_message(message.clone())?;
        Ok(message)
    }
}
