use std::fmt;

use crate::model::Username;

/// Prefix shared by every key this application writes.
pub const KEY_PREFIX: &str = "FLASHCARDS_";
/// Shared deck, visible to every learner.
pub const SHARED_DECK_KEY: &str = "FLASHCARDS_SHARED";
/// Registered usernames (`string[]`).
pub const USERS_KEY: &str = "FLASHCARDS_USERS";

/// Identifies a stored card collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeckKey {
    Shared,
    User(Username),
}

impl DeckKey {
    /// The key-value store key holding this deck.
    #[must_use]
    pub fn storage_key(&self) -> String {
        match self {
            DeckKey::Shared => SHARED_DECK_KEY.to_owned(),
            DeckKey::User(name) => format!("{KEY_PREFIX}{name}"),
        }
    }
}

impl fmt::Display for DeckKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}
