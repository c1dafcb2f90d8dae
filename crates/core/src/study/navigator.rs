use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

use super::score::{AnswerStatus, Score};
use crate::model::{Card, Role};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a study transition was rejected. A rejected transition leaves the
/// navigator untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigatorError {
    #[error("there are no cards in this deck")]
    EmptyDeck,

    #[error("card index {index} is out of range (deck has {len} cards)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("already at the first card")]
    AtFirstCard,

    #[error("already at the last card")]
    AtLastCard,

    #[error("finish is only available on the last card")]
    NotAtLastCard,

    #[error("please enter your answer before submitting")]
    EmptyAnswer,

    #[error("this card has already been graded")]
    AlreadyGraded,

    #[error("role `{role}` is not allowed to do this")]
    Forbidden { role: Role },

    #[error("study pass already finished")]
    Finished,
}

//
// ─── NAVIGATOR ─────────────────────────────────────────────────────────────────
//

/// Sequential cursor over a resolved deck.
///
/// Tracks which cards show their answer face, what the learner typed for each
/// card, which cards were graded, and the running score. Indices always refer
/// to positions in `cards`.
#[derive(Clone)]
pub struct StudyNavigator {
    role: Role,
    cards: Vec<Card>,
    cursor: usize,
    flipped: HashSet<usize>,
    answers: HashMap<usize, String>,
    graded: HashSet<usize>,
    draft: String,
    score: Score,
    finished: bool,
}

impl StudyNavigator {
    #[must_use]
    pub fn new(role: Role, cards: Vec<Card>) -> Self {
        Self {
            role,
            cards,
            cursor: 0,
            flipped: HashSet::new(),
            answers: HashMap::new(),
            graded: HashSet::new(),
            draft: String::new(),
            score: Score::default(),
            finished: false,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Zero-based index of the current card.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.cursor)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        !self.cards.is_empty() && self.cursor + 1 == self.cards.len()
    }

    #[must_use]
    pub fn is_flipped(&self, index: usize) -> bool {
        self.flipped.contains(&index)
    }

    #[must_use]
    pub fn is_graded(&self, index: usize) -> bool {
        self.graded.contains(&index)
    }

    /// Text currently in the answer field for the current card.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn recorded_answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Correct/incorrect badge for a graded card.
    #[must_use]
    pub fn answer_status(&self, index: usize) -> Option<AnswerStatus> {
        if !self.graded.contains(&index) {
            return None;
        }
        let typed = self.answers.get(&index)?;
        let card = self.cards.get(index)?;
        Some(if card.is_correct(typed) {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        })
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Toggle the answer face of card `index`. Returns the new face state.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::IndexOutOfRange` for an unknown index.
    pub fn flip(&mut self, index: usize) -> Result<bool, NavigatorError> {
        self.ensure_active()?;
        self.ensure_index(index)?;
        if self.flipped.remove(&index) {
            Ok(false)
        } else {
            self.flipped.insert(index);
            Ok(true)
        }
    }

    /// Toggle the answer face of the current card.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::EmptyDeck` when there is nothing to flip.
    pub fn flip_current(&mut self) -> Result<bool, NavigatorError> {
        self.ensure_active()?;
        self.ensure_not_empty()?;
        self.flip(self.cursor)
    }

    /// Replace the typed answer for the current card.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Grade the draft against the current card and reveal its answer.
    ///
    /// # Errors
    ///
    /// - `Forbidden` unless the role is learner.
    /// - `EmptyDeck` when there is no current card.
    /// - `AlreadyGraded` when the current card was graded before.
    /// - `EmptyAnswer` when the draft is blank.
    pub fn submit_answer(&mut self) -> Result<AnswerStatus, NavigatorError> {
        self.ensure_active()?;
        if !self.role.is_learner() {
            return Err(NavigatorError::Forbidden { role: self.role });
        }
        self.ensure_not_empty()?;
        let index = self.cursor;
        if self.graded.contains(&index) {
            return Err(NavigatorError::AlreadyGraded);
        }
        let typed = self.draft.trim();
        if typed.is_empty() {
            return Err(NavigatorError::EmptyAnswer);
        }

        let correct = self.cards[index].is_correct(typed);
        let typed = typed.to_owned();
        self.draft.clone_from(&typed);
        self.answers.insert(index, typed);
        self.graded.insert(index);
        self.score.record(correct);
        self.flipped.insert(index);

        Ok(if correct {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        })
    }

    /// Move to the next card. Returns the new cursor.
    ///
    /// # Errors
    ///
    /// Returns `AtLastCard` on the last card, `EmptyDeck` on an empty deck.
    pub fn next(&mut self) -> Result<usize, NavigatorError> {
        self.ensure_active()?;
        self.ensure_not_empty()?;
        if self.cursor + 1 >= self.cards.len() {
            return Err(NavigatorError::AtLastCard);
        }
        self.move_to(self.cursor + 1);
        Ok(self.cursor)
    }

    /// Move to the previous card. Returns the new cursor.
    ///
    /// # Errors
    ///
    /// Returns `AtFirstCard` on the first card, `EmptyDeck` on an empty deck.
    pub fn previous(&mut self) -> Result<usize, NavigatorError> {
        self.ensure_active()?;
        self.ensure_not_empty()?;
        if self.cursor == 0 {
            return Err(NavigatorError::AtFirstCard);
        }
        self.move_to(self.cursor - 1);
        Ok(self.cursor)
    }

    /// End the pass from the last card and hand back the final score.
    ///
    /// # Errors
    ///
    /// Returns `NotAtLastCard` unless the cursor is on the last card.
    pub fn finish(&mut self) -> Result<Score, NavigatorError> {
        self.ensure_active()?;
        self.ensure_not_empty()?;
        if !self.is_last() {
            return Err(NavigatorError::NotAtLastCard);
        }
        self.finished = true;
        Ok(self.score)
    }

    /// The deck as it would look after removing `index`, without touching
    /// the navigator. Callers persist this before calling [`Self::remove_card`].
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` unless the role is editor, `IndexOutOfRange` for
    /// an unknown index.
    pub fn cards_without(&self, index: usize) -> Result<Vec<Card>, NavigatorError> {
        self.check_removal(index)?;
        let mut remaining = self.cards.clone();
        remaining.remove(index);
        Ok(remaining)
    }

    /// Drop card `index` from the in-memory deck.
    ///
    /// All per-card flip and answer state is cleared since later indices
    /// shift down by one. The cursor is clamped to the new last card.
    ///
    /// # Errors
    ///
    /// Same as [`Self::cards_without`].
    pub fn remove_card(&mut self, index: usize) -> Result<Card, NavigatorError> {
        self.check_removal(index)?;
        let removed = self.cards.remove(index);
        self.clear_card_state();
        self.cursor = self.cursor.min(self.cards.len().saturating_sub(1));
        Ok(removed)
    }

    /// Swap in a freshly resolved deck and start over from the first card.
    pub fn reset(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.cursor = 0;
        self.clear_card_state();
        self.score = Score::default();
        self.finished = false;
    }

    fn check_removal(&self, index: usize) -> Result<(), NavigatorError> {
        self.ensure_active()?;
        if self.role != Role::Editor {
            return Err(NavigatorError::Forbidden { role: self.role });
        }
        self.ensure_index(index)
    }

    fn move_to(&mut self, index: usize) {
        self.cursor = index;
        self.draft = self.answers.get(&index).cloned().unwrap_or_default();
    }

    fn clear_card_state(&mut self) {
        self.flipped.clear();
        self.answers.clear();
        self.graded.clear();
        self.draft.clear();
    }

    fn ensure_active(&self) -> Result<(), NavigatorError> {
        if self.finished {
            return Err(NavigatorError::Finished);
        }
        Ok(())
    }

    fn ensure_not_empty(&self) -> Result<(), NavigatorError> {
        if self.cards.is_empty() {
            return Err(NavigatorError::EmptyDeck);
        }
        Ok(())
    }

    fn ensure_index(&self, index: usize) -> Result<(), NavigatorError> {
        if index >= self.cards.len() {
            return Err(NavigatorError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for StudyNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudyNavigator")
            .field("role", &self.role)
            .field("cards_len", &self.cards.len())
            .field("cursor", &self.cursor)
            .field("graded_len", &self.graded.len())
            .field("score", &self.score)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Vec<Card> {
        (1..=n)
            .map(|i| Card::new(format!("Q{i}"), format!("A{i}")).unwrap())
            .collect()
    }

    fn learner(n: usize) -> StudyNavigator {
        StudyNavigator::new(Role::Learner, deck(n))
    }

    #[test]
    fn flip_toggles_without_touching_score() {
        let mut nav = learner(2);
        assert!(nav.flip(1).unwrap());
        assert!(nav.is_flipped(1));
        assert!(!nav.flip(1).unwrap());
        assert!(!nav.is_flipped(1));
        assert_eq!(nav.score(), Score::default());
    }

    #[test]
    fn flip_rejects_unknown_index() {
        let mut nav = learner(2);
        assert_eq!(
            nav.flip(2),
            Err(NavigatorError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn submit_grades_case_insensitively_and_reveals() {
        // stored answers are not trimmed on read
        let cards: Vec<Card> =
            serde_json::from_str(r#"[{"question":"Capital of France?","answer":"paris "}]"#)
                .unwrap();
        let mut nav = StudyNavigator::new(Role::Learner, cards);

        nav.set_draft("  Paris ");
        assert_eq!(nav.submit_answer().unwrap(), AnswerStatus::Correct);
        assert_eq!(
            nav.score(),
            Score {
                correct: 1,
                total: 1
            }
        );
        assert!(nav.is_flipped(0));
        assert!(nav.is_graded(0));
        assert_eq!(nav.recorded_answer(0), Some("Paris"));
        assert_eq!(nav.answer_status(0), Some(AnswerStatus::Correct));
    }

    #[test]
    fn submit_wrong_answer_counts_total_only() {
        let mut nav = learner(1);
        nav.set_draft("A11");
        assert_eq!(nav.submit_answer().unwrap(), AnswerStatus::Incorrect);
        assert_eq!(
            nav.score(),
            Score {
                correct: 0,
                total: 1
            }
        );
        assert_eq!(nav.answer_status(0), Some(AnswerStatus::Incorrect));
    }

    #[test]
    fn resubmitting_graded_card_is_rejected() {
        let mut nav = learner(1);
        nav.set_draft("A1");
        nav.submit_answer().unwrap();
        nav.set_draft("A1");
        assert_eq!(nav.submit_answer(), Err(NavigatorError::AlreadyGraded));
        assert_eq!(nav.score().total, 1);
    }

    #[test]
    fn blank_answer_is_rejected_without_change() {
        let mut nav = learner(1);
        nav.set_draft("   ");
        assert_eq!(nav.submit_answer(), Err(NavigatorError::EmptyAnswer));
        assert!(!nav.is_graded(0));
        assert!(!nav.is_flipped(0));
        assert_eq!(nav.score(), Score::default());
    }

    #[test]
    fn only_learners_submit() {
        let mut nav = StudyNavigator::new(Role::Editor, deck(1));
        nav.set_draft("A1");
        assert_eq!(
            nav.submit_answer(),
            Err(NavigatorError::Forbidden { role: Role::Editor })
        );
    }

    #[test]
    fn submit_on_flipped_card_keeps_answer_visible() {
        let mut nav = learner(1);
        nav.flip(0).unwrap();
        nav.set_draft("A1");
        nav.submit_answer().unwrap();
        assert!(nav.is_flipped(0));
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut nav = learner(3);
        assert_eq!(nav.previous(), Err(NavigatorError::AtFirstCard));
        assert_eq!(nav.next().unwrap(), 1);
        assert_eq!(nav.next().unwrap(), 2);
        assert_eq!(nav.next(), Err(NavigatorError::AtLastCard));
        assert_eq!(nav.cursor(), 2);
        assert_eq!(nav.previous().unwrap(), 1);
        assert_eq!(nav.cursor(), 1);
    }

    #[test]
    fn navigation_restores_recorded_answer() {
        let mut nav = learner(2);
        nav.set_draft(" A1 ");
        nav.submit_answer().unwrap();
        nav.next().unwrap();
        assert_eq!(nav.draft(), "");
        nav.set_draft("half typed");
        nav.previous().unwrap();
        assert_eq!(nav.draft(), "A1");
        nav.next().unwrap();
        assert_eq!(nav.draft(), "");
    }

    #[test]
    fn finish_only_from_last_card() {
        let mut nav = learner(2);
        assert_eq!(nav.finish(), Err(NavigatorError::NotAtLastCard));
        nav.next().unwrap();
        nav.set_draft("A2");
        nav.submit_answer().unwrap();
        let score = nav.finish().unwrap();
        assert_eq!(
            score,
            Score {
                correct: 1,
                total: 1
            }
        );
        assert!(nav.is_finished());
        assert_eq!(nav.previous(), Err(NavigatorError::Finished));
    }

    #[test]
    fn empty_deck_rejects_navigation() {
        let mut nav = learner(0);
        assert!(nav.is_empty());
        assert!(nav.current_card().is_none());
        assert_eq!(nav.next(), Err(NavigatorError::EmptyDeck));
        assert_eq!(nav.finish(), Err(NavigatorError::EmptyDeck));
        nav.set_draft("x");
        assert_eq!(nav.submit_answer(), Err(NavigatorError::EmptyDeck));
    }

    #[test]
    fn remove_card_requires_editor() {
        let mut nav = learner(2);
        assert_eq!(
            nav.remove_card(0),
            Err(NavigatorError::Forbidden {
                role: Role::Learner
            })
        );
        let nav = StudyNavigator::new(Role::SuperAdmin, deck(2));
        assert!(nav.cards_without(0).is_err());
    }

    #[test]
    fn remove_last_card_clamps_cursor_and_clears_state() {
        let mut nav = StudyNavigator::new(Role::Editor, deck(3));
        nav.next().unwrap();
        nav.next().unwrap();
        nav.flip(2).unwrap();
        nav.flip(0).unwrap();

        let remaining = nav.cards_without(2).unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(nav.len(), 3);

        let removed = nav.remove_card(2).unwrap();
        assert_eq!(removed.question(), "Q3");
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.cursor(), 1);
        assert!(!nav.is_flipped(0));
        assert!(!nav.cards().contains(&removed));
    }

    #[test]
    fn remove_only_card_leaves_empty_deck() {
        let mut nav = StudyNavigator::new(Role::Editor, deck(1));
        nav.remove_card(0).unwrap();
        assert!(nav.is_empty());
        assert_eq!(nav.cursor(), 0);
        assert_eq!(
            nav.remove_card(0),
            Err(NavigatorError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn reset_starts_over() {
        let mut nav = learner(2);
        nav.set_draft("A1");
        nav.submit_answer().unwrap();
        nav.next().unwrap();
        nav.reset(deck(3));
        assert_eq!(nav.len(), 3);
        assert_eq!(nav.cursor(), 0);
        assert!(!nav.is_graded(0));
        assert_eq!(nav.score(), Score::default());
    }
}
