use thiserror::Error;

use crate::auth::AuthError;
use crate::model::{CardError, ParseRoleError, UsernameError};
use crate::study::NavigatorError;

/// Umbrella error for callers that do not care which domain check failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Username(#[from] UsernameError),
    #[error(transparent)]
    Role(#[from] ParseRoleError),
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
}
