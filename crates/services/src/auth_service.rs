use flash_core::model::{Role, Session};
use flash_core::{AuthError, RoleSecrets, authenticate};

/// Opens and closes sessions against the configured role secrets.
#[derive(Debug, Clone, Default)]
pub struct AuthService {
    secrets: RoleSecrets,
}

impl AuthService {
    #[must_use]
    pub fn new(secrets: RoleSecrets) -> Self {
        Self { secrets }
    }

    /// Log in with a username, password and the role picked on the form.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when a field is empty or the
    /// password does not match the role's secret.
    pub fn login(&self, username: &str, password: &str, role: Role) -> Result<Session, AuthError> {
        match authenticate(username, password, role, &self.secrets) {
            Ok(session) => {
                tracing::info!(user = %session.username(), %role, "login succeeded");
                Ok(session)
            }
            Err(err) => {
                tracing::warn!(user = username.trim(), %role, "login rejected");
                Err(err)
            }
        }
    }

    /// End a session. Consuming it means nothing can act on its behalf later.
    pub fn logout(&self, session: Session) {
        tracing::info!(user = %session.username(), role = %session.role(), "logged out");
        drop(session);
    }
}
