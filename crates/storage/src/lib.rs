#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    DeckRepository, InMemoryStore, JsonRepository, KeyValueStore, Storage, StorageError,
    UserRepository,
};
