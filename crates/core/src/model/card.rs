use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// Unvalidated question/answer pair as typed into an editor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub question: String,
    pub answer: String,
}

impl CardDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Trim both sides and reject empty ones.
    ///
    /// # Errors
    ///
    /// Returns `CardError::EmptyQuestion` or `CardError::EmptyAnswer` when the
    /// corresponding field is empty after trimming.
    pub fn validate(self) -> Result<Card, CardError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(CardError::EmptyQuestion);
        }
        let answer = self.answer.trim();
        if answer.is_empty() {
            return Err(CardError::EmptyAnswer);
        }
        Ok(Card {
            question: question.to_owned(),
            answer: answer.to_owned(),
        })
    }
}

/// A flashcard as persisted: `{"question": ..., "answer": ...}`.
///
/// Cards carry no identifier. A card is addressed by its index in the
/// collection that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    question: String,
    answer: String,
}

impl Card {
    /// Build a card from raw text, trimming and validating both sides.
    ///
    /// # Errors
    ///
    /// See [`CardDraft::validate`].
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Result<Self, CardError> {
        CardDraft::new(question, answer).validate()
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Case- and surrounding-whitespace-insensitive comparison against the
    /// stored answer.
    #[must_use]
    pub fn is_correct(&self, typed: &str) -> bool {
        normalize_answer(typed) == normalize_answer(&self.answer)
    }
}

/// Trim + lowercase, the comparison form used for grading.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

//
// ─── CARD VALIDATION ERRORS ────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("question cannot be empty")]
    EmptyQuestion,

    #[error("answer cannot be empty")]
    EmptyAnswer,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
