use super::keys::{PreferenceKind, SettingKey};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, PoisonError};

#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PreferenceValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    String(String),
    StringSet(BTreeSet<String>),
}

impl PreferenceValue {
    pub fn kind(&self) -> PreferenceKind {
        match self {
            PreferenceValue::Bool(_) => PreferenceKind::Bool,
            PreferenceValue::Int(_) => PreferenceKind::Int,
            PreferenceValue::Long(_) => PreferenceKind::Long,
            PreferenceValue::String(_) => PreferenceKind::String,
            PreferenceValue::StringSet(_) => PreferenceKind::StringSet,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PreferenceValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PreferenceValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            PreferenceValue::Long(value) => Some(*value),
            PreferenceValue::Int(value) => Some(i64::from(*value)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PreferenceValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_string_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            PreferenceValue::StringSet(value) => Some(value),
            _ => None,
        }
    }

    /// Parses operator input for a preference of the given kind.
    ///
    /// String sets are comma separated; blank items are dropped.
    pub fn parse(kind: PreferenceKind, raw: &str) -> Result<PreferenceValue, String> {
        let trimmed = raw.trim();
        match kind {
            PreferenceKind::Bool => match trimmed {
                "true" | "1" | "on" => Ok(PreferenceValue::Bool(true)),
                "false" | "0" | "off" => Ok(PreferenceValue::Bool(false)),
                _ => Err(format!("invalid boolean: {raw}")),
            },
            PreferenceKind::Int => trimmed
                .parse::<i32>()
                .map(PreferenceValue::Int)
                .map_err(|err| format!("invalid integer {raw}: {err}")),
            PreferenceKind::Long => trimmed
                .parse::<i64>()
                .map(PreferenceValue::Long)
                .map_err(|err| format!("invalid long {raw}: {err}")),
            PreferenceKind::String => Ok(PreferenceValue::String(raw.to_owned())),
            PreferenceKind::StringSet => Ok(PreferenceValue::StringSet(
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(ToOwned::to_owned)
                    .collect(),
            )),
        }
    }
}

/// String-keyed preference storage.
///
/// Reads are synchronous and never fail: a store that cannot answer reports the
/// key as absent. Writes may be persisted asynchronously, but a `get` issued
/// after `put` returns must observe the new value.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<PreferenceValue>;

    fn put(&self, key: &str, value: PreferenceValue);

    fn remove(&self, key: &str);

    fn bool_or(&self, key: SettingKey, default: bool) -> bool {
        read_typed(self, key, |value| value.as_bool()).unwrap_or(default)
    }

    fn int_or(&self, key: SettingKey, default: i32) -> i32 {
        read_typed(self, key, |value| value.as_int()).unwrap_or(default)
    }

    fn long_or(&self, key: SettingKey, default: i64) -> i64 {
        read_typed(self, key, |value| value.as_long()).unwrap_or(default)
    }

    fn string(&self, key: SettingKey) -> Option<String> {
        read_typed(self, key, |value| value.as_str().map(ToOwned::to_owned))
    }

    fn string_or(&self, key: SettingKey, default: &str) -> String {
        self.string(key).unwrap_or_else(|| default.to_owned())
    }

    fn string_set(&self, key: SettingKey) -> Option<BTreeSet<String>> {
        read_typed(self, key, |value| value.as_string_set().cloned())
    }

    fn put_setting(&self, key: SettingKey, value: PreferenceValue) {
        self.put(key.as_key(), value);
    }
}

fn read_typed<S, T>(
    store: &S,
    key: SettingKey,
    extract: impl FnOnce(&PreferenceValue) -> Option<T>,
) -> Option<T>
where
    S: PreferenceStore + ?Sized,
{
    let value = store.get(key.as_key())?;
    let typed = extract(&value);
    if typed.is_none() {
        tracing::warn!(
            key = %key,
            expected = ?key.kind(),
            stored = ?value.kind(),
            "stored preference has the wrong type, using default"
        );
    }
    typed
}

/// In-process store; the map is the only copy.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, PreferenceValue>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = (SettingKey, PreferenceValue)>) -> Self {
        let values = values
            .into_iter()
            .map(|(key, value)| (key.as_key().to_owned(), value))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: PreferenceValue) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
    }

    fn remove(&self, key: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
