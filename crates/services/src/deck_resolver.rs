use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use flash_core::model::{Card, DeckKey, Role, Session};
use storage::repository::{DeckRepository, StorageError};

/// Cards visible to a session, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDeck {
    pub cards: Vec<Card>,
    /// True when `cards` was shuffled rather than kept in stored order.
    pub shuffled: bool,
}

/// Decides which stored cards a session studies and in what order.
///
/// - Learners get the shared deck followed by their own deck, shuffled.
/// - Editors get the shared deck in stored order, so positional deletes hit
///   the card they see.
/// - Super-administrators get their own personal deck in stored order.
#[derive(Clone)]
pub struct DeckResolver {
    decks: Arc<dyn DeckRepository>,
}

impl DeckResolver {
    #[must_use]
    pub fn new(decks: Arc<dyn DeckRepository>) -> Self {
        Self { decks }
    }

    /// Resolve using the thread-local random source.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a deck cannot be loaded.
    pub async fn resolve(&self, session: &Session) -> Result<ResolvedDeck, StorageError> {
        let (mut cards, shuffled) = self.load(session).await?;
        if shuffled {
            cards.shuffle(&mut rand::rng());
        }
        Ok(Self::finish(session, cards, shuffled))
    }

    /// Resolve with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a deck cannot be loaded.
    pub async fn resolve_with_rng<R: Rng + ?Sized>(
        &self,
        session: &Session,
        rng: &mut R,
    ) -> Result<ResolvedDeck, StorageError> {
        let (mut cards, shuffled) = self.load(session).await?;
        if shuffled {
            cards.shuffle(rng);
        }
        Ok(Self::finish(session, cards, shuffled))
    }

    async fn load(&self, session: &Session) -> Result<(Vec<Card>, bool), StorageError> {
        match session.role() {
            Role::Learner => {
                let mut cards = self.decks.load_deck(&DeckKey::Shared).await?;
                cards.extend(self.decks.load_deck(&session.own_deck()).await?);
                Ok((cards, true))
            }
            Role::Editor => Ok((self.decks.load_deck(&DeckKey::Shared).await?, false)),
            Role::SuperAdmin => Ok((self.decks.load_deck(&session.own_deck()).await?, false)),
        }
    }

    fn finish(session: &Session, cards: Vec<Card>, shuffled: bool) -> ResolvedDeck {
        tracing::debug!(
            user = %session.username(),
            role = %session.role(),
            cards = cards.len(),
            shuffled,
            "resolved deck"
        );
        ResolvedDeck { cards, shuffled }
    }
}
