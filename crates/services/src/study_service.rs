use std::sync::Arc;

use rand::Rng;

use flash_core::model::{Card, DeckKey, Session};
use flash_core::{AnswerStatus, Score, StudyNavigator};
use storage::repository::DeckRepository;

use crate::deck_resolver::{DeckResolver, ResolvedDeck};
use crate::error::StudyError;

//
// ─── STUDY SESSION ─────────────────────────────────────────────────────────────
//

/// A logged-in user stepping through their resolved deck.
#[derive(Debug)]
pub struct StudySession {
    session: Session,
    navigator: StudyNavigator,
    shuffled: bool,
}

impl StudySession {
    fn new(session: Session, resolved: ResolvedDeck) -> Self {
        let navigator = StudyNavigator::new(session.role(), resolved.cards);
        Self {
            session,
            navigator,
            shuffled: resolved.shuffled,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn navigator(&self) -> &StudyNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn shuffled(&self) -> bool {
        self.shuffled
    }

    /// Hand the session back, e.g. for logout.
    #[must_use]
    pub fn into_session(self) -> Session {
        self.session
    }

    /// # Errors
    ///
    /// See [`StudyNavigator::flip`].
    pub fn flip(&mut self, index: usize) -> Result<bool, StudyError> {
        Ok(self.navigator.flip(index)?)
    }

    /// # Errors
    ///
    /// See [`StudyNavigator::flip_current`].
    pub fn flip_current(&mut self) -> Result<bool, StudyError> {
        Ok(self.navigator.flip_current()?)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.navigator.set_draft(text);
    }

    /// Grade the typed answer for the current card.
    ///
    /// # Errors
    ///
    /// See [`StudyNavigator::submit_answer`].
    pub fn submit_answer(&mut self) -> Result<AnswerStatus, StudyError> {
        let status = self.navigator.submit_answer()?;
        let score = self.navigator.score();
        tracing::debug!(
            user = %self.session.username(),
            index = self.navigator.cursor(),
            ?status,
            correct = score.correct,
            total = score.total,
            "answer graded"
        );
        Ok(status)
    }

    /// # Errors
    ///
    /// See [`StudyNavigator::next`].
    pub fn next(&mut self) -> Result<usize, StudyError> {
        Ok(self.navigator.next()?)
    }

    /// # Errors
    ///
    /// See [`StudyNavigator::previous`].
    pub fn previous(&mut self) -> Result<usize, StudyError> {
        Ok(self.navigator.previous()?)
    }

    /// # Errors
    ///
    /// See [`StudyNavigator::finish`].
    pub fn finish(&mut self) -> Result<Score, StudyError> {
        let score = self.navigator.finish()?;
        tracing::info!(
            user = %self.session.username(),
            correct = score.correct,
            total = score.total,
            "study pass finished"
        );
        Ok(score)
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Starts study sessions and applies the edits that must reach storage.
#[derive(Clone)]
pub struct StudyService {
    resolver: DeckResolver,
    decks: Arc<dyn DeckRepository>,
}

impl StudyService {
    #[must_use]
    pub fn new(decks: Arc<dyn DeckRepository>) -> Self {
        Self {
            resolver: DeckResolver::new(Arc::clone(&decks)),
            decks,
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &DeckResolver {
        &self.resolver
    }

    /// Resolve the session's deck and position on its first card.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` if a deck cannot be loaded.
    pub async fn start(&self, session: Session) -> Result<StudySession, StudyError> {
        let resolved = self.resolver.resolve(&session).await?;
        Ok(StudySession::new(session, resolved))
    }

    /// Like [`Self::start`] with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` if a deck cannot be loaded.
    pub async fn start_with_rng<R: Rng + ?Sized>(
        &self,
        session: Session,
        rng: &mut R,
    ) -> Result<StudySession, StudyError> {
        let resolved = self.resolver.resolve_with_rng(&session, rng).await?;
        Ok(StudySession::new(session, resolved))
    }

    /// Re-resolve the deck to pick up edits made elsewhere. Starts the pass
    /// over from the first card.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` if a deck cannot be loaded; the session
    /// is left as it was.
    pub async fn reload(&self, study: &mut StudySession) -> Result<(), StudyError> {
        let resolved = self.resolver.resolve(&study.session).await?;
        study.shuffled = resolved.shuffled;
        study.navigator.reset(resolved.cards);
        Ok(())
    }

    /// Delete card `index` from the shared deck (editors only).
    ///
    /// Storage is written first; the in-memory deck only changes once the
    /// write succeeded.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Navigator` for a forbidden role or unknown index,
    /// `StudyError::Storage` if the write fails.
    pub async fn delete_card(
        &self,
        study: &mut StudySession,
        index: usize,
    ) -> Result<Card, StudyError> {
        let remaining = study.navigator.cards_without(index)?;
        self.decks.save_deck(&DeckKey::Shared, &remaining).await?;
        let removed = study.navigator.remove_card(index)?;
        tracing::info!(
            user = %study.session.username(),
            index,
            remaining = remaining.len(),
            "deleted shared card"
        );
        Ok(removed)
    }
}
