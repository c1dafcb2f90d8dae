use std::sync::Arc;

use flash_core::model::{Card, CardDraft, DeckKey, Session};
use storage::repository::DeckRepository;

use crate::error::CardServiceError;

/// Orchestrates edits to the shared deck.
#[derive(Clone)]
pub struct CardService {
    decks: Arc<dyn DeckRepository>,
}

impl CardService {
    #[must_use]
    pub fn new(decks: Arc<dyn DeckRepository>) -> Self {
        Self { decks }
    }

    /// Append a card to the shared deck and persist it.
    ///
    /// Returns the stored deck after the append.
    ///
    /// # Errors
    ///
    /// Returns `CardServiceError::Forbidden` unless the session is an editor
    /// or super-administrator.
    /// Returns `CardServiceError::Validation` for an empty question or answer.
    /// Returns `CardServiceError::Storage` if persistence fails.
    pub async fn add_shared_card(
        &self,
        session: &Session,
        draft: CardDraft,
    ) -> Result<Vec<Card>, CardServiceError> {
        if !session.role().can_add_shared_cards() {
            return Err(CardServiceError::Forbidden {
                role: session.role(),
            });
        }
        let cards = append_card(self.decks.as_ref(), &DeckKey::Shared, draft).await?;
        tracing::info!(user = %session.username(), total = cards.len(), "added shared card");
        Ok(cards)
    }

    /// List the shared deck in stored order.
    ///
    /// # Errors
    ///
    /// Returns `CardServiceError::Storage` if repository access fails.
    pub async fn list_shared_cards(&self) -> Result<Vec<Card>, CardServiceError> {
        Ok(self.decks.load_deck(&DeckKey::Shared).await?)
    }
}

/// Validate `draft`, append it to the stored deck and persist.
pub(crate) async fn append_card(
    decks: &dyn DeckRepository,
    key: &DeckKey,
    draft: CardDraft,
) -> Result<Vec<Card>, CardServiceError> {
    let card = draft.validate()?;
    let mut cards = decks.load_deck(key).await?;
    cards.push(card);
    decks.save_deck(key, &cards).await?;
    Ok(cards)
}

/// Remove the card at `index` from the stored deck and persist.
pub(crate) async fn remove_card_at(
    decks: &dyn DeckRepository,
    key: &DeckKey,
    index: usize,
) -> Result<(Card, Vec<Card>), CardServiceError> {
    let mut cards = decks.load_deck(key).await?;
    if index >= cards.len() {
        return Err(CardServiceError::IndexOutOfRange {
            index,
            len: cards.len(),
        });
    }
    let removed = cards.remove(index);
    decks.save_deck(key, &cards).await?;
    Ok((removed, cards))
}
