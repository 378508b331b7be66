//! Async key-value contract and typed JSON helpers

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::database::Database;
use crate::key::StorageKey;
use crate::Result;

/// Blob store keyed by [`StorageKey`].
///
/// Writes replace the whole value. Callers doing read-modify-write on a list
/// accept last-write-wins when two mutations race.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: StorageKey) -> Result<Option<String>>;

    async fn set(&self, key: StorageKey, value: String) -> Result<()>;

    async fn remove(&self, key: StorageKey) -> Result<()>;
}

#[async_trait]
impl KeyValueStore for Database {
    async fn get(&self, key: StorageKey) -> Result<Option<String>> {
        self.get_entry(key)
    }

    async fn set(&self, key: StorageKey, value: String) -> Result<()> {
        self.set_entry(key, &value)
    }

    async fn remove(&self, key: StorageKey) -> Result<()> {
        self.remove_entry(key)
    }
}

/// Load and decode `key`. Absent or undecodable values yield `T::default()`.
pub async fn load_or_default<T>(store: &dyn KeyValueStore, key: StorageKey) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Discarding malformed entry");
            Ok(T::default())
        }
    }
}

/// Load a JSON array stored under `key`, keeping every element that decodes.
/// Undecodable elements are skipped so one bad record cannot hide the rest,
/// nor be used to overwrite them on the next read-modify-write.
pub async fn load_list<T>(store: &dyn KeyValueStore, key: StorageKey) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let elements: Vec<serde_json::Value> = load_or_default(store, key).await?;

    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value(element) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!(key = %key, index, error = %e, "Skipping malformed element"),
        }
    }
    Ok(items)
}

pub async fn save<T>(store: &dyn KeyValueStore, key: StorageKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let serialized = serde_json::to_string(value)?;
    store.set(key, serialized).await
}
