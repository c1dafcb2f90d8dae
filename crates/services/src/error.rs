//! Shared error types for the services crate.

use thiserror::Error;

use flash_core::model::{CardError, Role, UsernameError};
use flash_core::NavigatorError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CardService` and `UserDeckService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CardServiceError {
    #[error("role `{role}` may not edit this deck")]
    Forbidden { role: Role },
    #[error(transparent)]
    Validation(#[from] CardError),
    #[error(transparent)]
    Username(#[from] UsernameError),
    #[error("card index {index} is out of range (deck has {len} cards)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `UserService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserServiceError {
    #[error("role `{role}` may not manage users")]
    Forbidden { role: Role },
    #[error(transparent)]
    Validation(#[from] UsernameError),
    #[error("user `{0}` already exists")]
    DuplicateUser(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while studying a resolved deck.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
