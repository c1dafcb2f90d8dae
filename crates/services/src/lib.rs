#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod card_service;
pub mod deck_resolver;
pub mod error;
pub mod study_service;
pub mod user_deck_service;
pub mod user_service;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use card_service::CardService;
pub use deck_resolver::{DeckResolver, ResolvedDeck};
pub use error::{AppServicesError, CardServiceError, StudyError, UserServiceError};
pub use study_service::{StudyService, StudySession};
pub use user_deck_service::UserDeckService;
pub use user_service::UserService;
