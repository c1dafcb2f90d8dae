use std::sync::Arc;

use flash_core::RoleSecrets;
use storage::repository::Storage;

use crate::auth_service::AuthService;
use crate::card_service::CardService;
use crate::error::AppServicesError;
use crate::study_service::StudyService;
use crate::user_deck_service::UserDeckService;
use crate::user_service::UserService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    study: Arc<StudyService>,
    cards: Arc<CardService>,
    users: Arc<UserService>,
    user_decks: Arc<UserDeckService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, secrets: RoleSecrets) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, secrets))
    }

    /// Build services over an in-memory store.
    #[must_use]
    pub fn in_memory(secrets: RoleSecrets) -> Self {
        Self::from_storage(&Storage::in_memory(), secrets)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, secrets: RoleSecrets) -> Self {
        Self {
            auth: Arc::new(AuthService::new(secrets)),
            study: Arc::new(StudyService::new(Arc::clone(&storage.decks))),
            cards: Arc::new(CardService::new(Arc::clone(&storage.decks))),
            users: Arc::new(UserService::new(Arc::clone(&storage.users))),
            user_decks: Arc::new(UserDeckService::new(Arc::clone(&storage.decks))),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }

    #[must_use]
    pub fn cards(&self) -> Arc<CardService> {
        Arc::clone(&self.cards)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }

    #[must_use]
    pub fn user_decks(&self) -> Arc<UserDeckService> {
        Arc::clone(&self.user_decks)
    }
}
