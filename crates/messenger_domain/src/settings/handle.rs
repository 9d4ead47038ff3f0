use super::keys::SettingKey;
use super::platform::DevicePlatform;
use super::snapshot::SettingsSnapshot;
use super::store::{PreferenceStore, PreferenceValue};
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Owns the authoritative settings snapshot for one preference store.
///
/// `get` builds the snapshot on first use; every mutation writes through the
/// store and then swaps in a rebuilt snapshot before returning. Readers keep
/// whatever `Arc` they already fetched, so they never see a half-applied update.
pub struct Settings {
    store: Arc<dyn PreferenceStore>,
    platform: Arc<dyn DevicePlatform>,
    current: RwLock<Option<Arc<SettingsSnapshot>>>,
}

impl Settings {
    pub fn new(store: Arc<dyn PreferenceStore>, platform: Arc<dyn DevicePlatform>) -> Self {
        Self {
            store,
            platform,
            current: RwLock::new(None),
        }
    }

    pub fn store(&self) -> &Arc<dyn PreferenceStore> {
        &self.store
    }

    pub fn get(&self) -> Arc<SettingsSnapshot> {
        if let Some(snapshot) = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Arc::clone(snapshot);
        }

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(snapshot) = current.as_ref() {
            return Arc::clone(snapshot);
        }

        let snapshot = Arc::new(SettingsSnapshot::build(
            self.store.as_ref(),
            self.platform.as_ref(),
        ));
        tracing::debug!("settings snapshot built");
        *current = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Rebuilds the snapshot from the store and makes it authoritative.
    pub fn force_update(&self) -> Arc<SettingsSnapshot> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let snapshot = match current.as_ref() {
            Some(previous) => previous.rebuild(self.store.as_ref(), self.platform.as_ref()),
            None => SettingsSnapshot::build(self.store.as_ref(), self.platform.as_ref()),
        };
        let snapshot = Arc::new(snapshot);
        tracing::debug!("settings snapshot rebuilt");
        *current = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub fn set_value(&self, key: SettingKey, value: PreferenceValue) -> Arc<SettingsSnapshot> {
        self.set_value_quietly(key, value);
        self.force_update()
    }

    /// Writes without rebuilding; the change shows up at the next rebuild.
    pub fn set_value_quietly(&self, key: SettingKey, value: PreferenceValue) {
        if value.kind() != key.kind() {
            tracing::warn!(
                key = %key,
                expected = ?key.kind(),
                actual = ?value.kind(),
                "storing preference with unexpected type"
            );
        }
        self.store.put_setting(key, value);
    }

    pub fn set_bool(&self, key: SettingKey, value: bool) -> Arc<SettingsSnapshot> {
        self.set_value(key, PreferenceValue::Bool(value))
    }

    pub fn set_int(&self, key: SettingKey, value: i32) -> Arc<SettingsSnapshot> {
        self.set_value(key, PreferenceValue::Int(value))
    }

    pub fn set_long(&self, key: SettingKey, value: i64) -> Arc<SettingsSnapshot> {
        self.set_value(key, PreferenceValue::Long(value))
    }

    pub fn set_string(&self, key: SettingKey, value: impl Into<String>) -> Arc<SettingsSnapshot> {
        self.set_value(key, PreferenceValue::String(value.into()))
    }

    pub fn set_string_set(
        &self,
        key: SettingKey,
        value: BTreeSet<String>,
    ) -> Arc<SettingsSnapshot> {
        self.set_value(key, PreferenceValue::StringSet(value))
    }

    pub fn remove_value(&self, key: SettingKey) -> Arc<SettingsSnapshot> {
        self.store.remove(key.as_key());
        self.force_update()
    }
}
