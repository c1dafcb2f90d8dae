#![forbid(unsafe_code)]

pub mod auth;
pub mod error;
pub mod model;
pub mod study;

pub use auth::{AuthError, RoleSecrets, authenticate};
pub use error::Error;
pub use study::{AnswerStatus, NavigatorError, Score, StudyNavigator};
