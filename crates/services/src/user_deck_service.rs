use std::sync::Arc;

use flash_core::model::{Card, CardDraft, DeckKey, Role, Session, Username};
use storage::repository::DeckRepository;

use crate::card_service::{append_card, remove_card_at};
use crate::error::CardServiceError;

/// Super-administrator management of a single user's personal deck.
#[derive(Clone)]
pub struct UserDeckService {
    decks: Arc<dyn DeckRepository>,
}

impl UserDeckService {
    #[must_use]
    pub fn new(decks: Arc<dyn DeckRepository>) -> Self {
        Self { decks }
    }

    /// List `username`'s personal deck in stored order.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non super-administrators, `Username` for a
    /// blank name, `Storage` if the deck cannot be read.
    pub async fn list(
        &self,
        session: &Session,
        username: &str,
    ) -> Result<Vec<Card>, CardServiceError> {
        let key = deck_key(session, username)?;
        Ok(self.decks.load_deck(&key).await?)
    }

    /// Append a card to `username`'s personal deck.
    ///
    /// # Errors
    ///
    /// As [`Self::list`], plus `Validation` for empty card fields.
    pub async fn add_card(
        &self,
        session: &Session,
        username: &str,
        draft: CardDraft,
    ) -> Result<Vec<Card>, CardServiceError> {
        let key = deck_key(session, username)?;
        let cards = append_card(self.decks.as_ref(), &key, draft).await?;
        tracing::info!(deck = %key, total = cards.len(), "added user card");
        Ok(cards)
    }

    /// Remove the card at `index` from `username`'s personal deck.
    ///
    /// Returns the remaining cards.
    ///
    /// # Errors
    ///
    /// As [`Self::list`], plus `IndexOutOfRange` for an unknown index.
    pub async fn delete_card(
        &self,
        session: &Session,
        username: &str,
        index: usize,
    ) -> Result<Vec<Card>, CardServiceError> {
        let key = deck_key(session, username)?;
        let (_removed, cards) = remove_card_at(self.decks.as_ref(), &key, index).await?;
        tracing::info!(deck = %key, index, remaining = cards.len(), "deleted user card");
        Ok(cards)
    }
}

fn deck_key(session: &Session, username: &str) -> Result<DeckKey, CardServiceError> {
    if session.role() != Role::SuperAdmin {
        return Err(CardServiceError::Forbidden {
            role: session.role(),
        });
    }
    Ok(DeckKey::User(Username::parse(username)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::{KeyValueStore, Storage};

    fn root() -> Session {
        Session::new(Username::parse("root").unwrap(), Role::SuperAdmin)
    }

    #[tokio::test]
    async fn manages_deck_under_normalized_name() {
        let storage = Storage::in_memory();
        let service = UserDeckService::new(Arc::clone(&storage.decks));

        service
            .add_card(&root(), " Dana ", CardDraft::new("Q1", "A1"))
            .await
            .unwrap();
        service
            .add_card(&root(), "DANA", CardDraft::new("Q2", "A2"))
            .await
            .unwrap();
        assert!(storage.kv.get("FLASHCARDS_dana").await.unwrap().is_some());

        let remaining = service.delete_card(&root(), "dana", 0).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].question(), "Q2");
        assert_eq!(service.list(&root(), "dana").await.unwrap(), remaining);
    }

    #[tokio::test]
    async fn only_super_admin_may_manage() {
        let storage = Storage::in_memory();
        let service = UserDeckService::new(Arc::clone(&storage.decks));
        let editor = Session::new(Username::parse("ed").unwrap(), Role::Editor);

        let err = service.list(&editor, "dana").await.unwrap_err();
        assert!(matches!(err, CardServiceError::Forbidden { role: Role::Editor }));
    }

    #[tokio::test]
    async fn delete_out_of_range_leaves_deck_alone() {
        let storage = Storage::in_memory();
        let service = UserDeckService::new(Arc::clone(&storage.decks));
        service
            .add_card(&root(), "dana", CardDraft::new("Q", "A"))
            .await
            .unwrap();

        let err = service.delete_card(&root(), "dana", 3).await.unwrap_err();
        assert!(matches!(
            err,
            CardServiceError::IndexOutOfRange { index: 3, len: 1 }
        ));
        assert_eq!(service.list(&root(), "dana").await.unwrap().len(), 1);
    }
}
