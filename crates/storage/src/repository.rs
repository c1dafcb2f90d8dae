use async_trait::async_trait;
use flash_core::model::{Card, DeckKey, USERS_KEY};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Raw string-keyed store holding JSON blobs.
///
/// There is no schema and no transactions: a value is whatever string was
/// last written under its key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Repository contract for card collections.
#[async_trait]
pub trait DeckRepository: Send + Sync {
    /// Load a deck in stored order. A missing deck is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored JSON is not a card
    /// array, or other storage errors.
    async fn load_deck(&self, key: &DeckKey) -> Result<Vec<Card>, StorageError>;

    /// Replace a deck with `cards`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the deck cannot be stored.
    async fn save_deck(&self, key: &DeckKey, cards: &[Card]) -> Result<(), StorageError>;
}

/// Repository contract for the registered-usernames list.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load registered usernames in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be read or decoded.
    async fn load_users(&self) -> Result<Vec<String>, StorageError>;

    /// Replace the registered-usernames list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be stored.
    async fn save_users(&self, users: &[String]) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Typed decks and users encoded as JSON arrays on top of any
/// [`KeyValueStore`].
#[derive(Clone)]
pub struct JsonRepository {
    store: Arc<dyn KeyValueStore>,
}

impl JsonRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load_array<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        match self.store.get(key).await? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::Serialization(format!("{key}: {e}"))),
        }
    }

    async fn save_array<T: Serialize + Sync>(
        &self,
        key: &str,
        items: &[T],
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)
            .map_err(|e| StorageError::Serialization(format!("{key}: {e}")))?;
        self.store.set(key, raw).await
    }
}

#[async_trait]
impl DeckRepository for JsonRepository {
    async fn load_deck(&self, key: &DeckKey) -> Result<Vec<Card>, StorageError> {
        self.load_array(&key.storage_key()).await
    }

    async fn save_deck(&self, key: &DeckKey, cards: &[Card]) -> Result<(), StorageError> {
        self.save_array(&key.storage_key(), cards).await
    }
}

#[async_trait]
impl UserRepository for JsonRepository {
    async fn load_users(&self) -> Result<Vec<String>, StorageError> {
        self.load_array(USERS_KEY).await
    }

    async fn save_users(&self, users: &[String]) -> Result<(), StorageError> {
        self.save_array(USERS_KEY, users).await
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
    pub decks: Arc<dyn DeckRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    /// Wrap an arbitrary key-value backend.
    #[must_use]
    pub fn from_store(kv: Arc<dyn KeyValueStore>) -> Self {
        let repo = JsonRepository::new(Arc::clone(&kv));
        let decks: Arc<dyn DeckRepository> = Arc::new(repo.clone());
        let users: Arc<dyn UserRepository> = Arc::new(repo);
        Self { kv, decks, users }
    }
}
