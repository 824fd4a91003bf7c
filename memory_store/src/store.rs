//! Memory store implementation
//!
//! Values are held as JSON text so any serde type can be stored and read
//! back without the store knowing its shape.

use crate::errors::MemoryError;
use async_trait::async_trait;
use config::MemoryConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Raw key/value access shared by storage backends
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the serialized value stored under `key`
    async fn get_raw(&self, key: &str) -> Result<String, MemoryError>;

    /// Store a serialized value under `key`, replacing any previous one
    async fn save_raw(&self, key: &str, value: String) -> Result<(), MemoryError>;
}

/// Process-local key/value store
#[derive(Clone)]
pub struct MemoryStore {
    config: Arc<MemoryConfig>,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entry_count = match self.entries.try_read() {
            Ok(entries) => entries.len().to_string(),
            Err(_) => "locked".to_string(),
        };

        f.debug_struct("MemoryStore")
            .field("config", &self.config)
            .field("entries", &entry_count)
            .finish()
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            config: Arc::new(config),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Namespaced key for an entry
    fn build_key(&self, key: &str) -> String {
        if self.config.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.config.key_prefix, key)
        }
    }

    /// Get a value and deserialize it
    pub async fn get<T>(&self, key: &str) -> Result<T, MemoryError>
    where
        T: DeserializeOwned,
    {
        let json_str = self.get_raw(key).await?;
        Ok(serde_json::from_str(&json_str)?)
    }

    /// Serialize and store a value
    pub async fn save<T>(&self, key: &str, value: &T) -> Result<(), MemoryError>
    where
        T: Serialize,
    {
        let json_str = serde_json::to_string(value)?;
        self.save_raw(key, json_str).await
    }

    /// Delete an entry, returning whether it existed
    pub async fn delete(&self, key: &str) -> bool {
        let cache_key = self.build_key(key);
        self.entries.write().await.remove(&cache_key).is_some()
    }

    /// Check if an entry exists
    pub async fn exists(&self, key: &str) -> bool {
        let cache_key = self.build_key(key);
        self.entries.read().await.contains_key(&cache_key)
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Remove every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Get current configuration
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<String, MemoryError> {
        let cache_key = self.build_key(key);
        self.entries
            .read()
            .await
            .get(&cache_key)
            .cloned()
            .ok_or_else(|| MemoryError::KeyNotFound(key.to_string()))
    }

    async fn save_raw(&self, key: &str, value: String) -> Result<(), MemoryError> {
        let cache_key = self.build_key(key);
        self.entries.write().await.insert(cache_key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Person {
        id: i64,
        name: String,
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let store = MemoryStore::default();
        let person = Person {
            id: 1,
            name: "Leonardo".to_string(),
        };

        store.save("1-Leonardo", &person).await.unwrap();
        let found: Person = store.get("1-Leonardo").await.unwrap();

        assert_eq!(found, person);
        assert!(store.exists("1-Leonardo").await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let store = MemoryStore::default();
        let err = store.get::<Person>("nobody").await.unwrap_err();

        assert!(matches!(err, MemoryError::KeyNotFound(ref key) if key == "nobody"));
        assert_eq!(err.to_string(), "memory data not found: nobody");
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let store = MemoryStore::default();
        store.save("k", &1).await.unwrap();
        store.save("k", &2).await.unwrap();

        assert_eq!(store.get::<i32>("k").await.unwrap(), 2);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_wrong_type_is_serialization_error() {
        let store = MemoryStore::default();
        store.save("k", &"text").await.unwrap();

        let err = store.get::<Person>("k").await.unwrap_err();
        assert!(matches!(err, MemoryError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let store = MemoryStore::new(MemoryConfig::new(String::new()));
        store.save("a", &1).await.unwrap();
        store.save("b", &2).await.unwrap();

        assert!(store.delete("a").await);
        assert!(!store.delete("a").await);
        store.clear().await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::default();
        let other = store.clone();
        store.save("shared", &42).await.unwrap();

        assert_eq!(other.get::<i32>("shared").await.unwrap(), 42);
    }
}
