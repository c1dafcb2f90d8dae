//! Login check against the fixed per-role secrets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Role, Session, Username};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// One shared secret per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleSecrets {
    pub learner: String,
    pub editor: String,
    pub super_admin: String,
}

impl Default for RoleSecrets {
    fn default() -> Self {
        Self {
            learner: "user123".into(),
            editor: "admin123".into(),
            super_admin: "super123".into(),
        }
    }
}

impl RoleSecrets {
    #[must_use]
    pub fn secret_for(&self, role: Role) -> &str {
        match role {
            Role::Learner => &self.learner,
            Role::Editor => &self.editor,
            Role::SuperAdmin => &self.super_admin,
        }
    }
}

/// Validate a login attempt and open a session.
///
/// Any username may log in under any role as long as the password matches
/// that role's secret.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the username or password is
/// empty, or the password does not match the role's secret.
pub fn authenticate(
    username: &str,
    password: &str,
    role: Role,
    secrets: &RoleSecrets,
) -> Result<Session, AuthError> {
    let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;
    if password.is_empty() || password != secrets.secret_for(role) {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(Session::new(username, role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_secret_for_each_role() {
        let secrets = RoleSecrets::default();
        for role in Role::ALL {
            let session = authenticate("  Alice ", secrets.secret_for(role), role, &secrets)
                .expect("login should succeed");
            assert_eq!(session.username().as_str(), "alice");
            assert_eq!(session.role(), role);
        }
    }

    #[test]
    fn rejects_secret_of_another_role() {
        let secrets = RoleSecrets::default();
        let err = authenticate("alice", "admin123", Role::Learner, &secrets).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        let err = authenticate("alice", "user123", Role::SuperAdmin, &secrets).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn rejects_empty_fields() {
        let secrets = RoleSecrets::default();
        assert!(authenticate("   ", "user123", Role::Learner, &secrets).is_err());
        assert!(authenticate("alice", "", Role::Learner, &secrets).is_err());
    }

    #[test]
    fn empty_configured_secret_never_matches() {
        let secrets = RoleSecrets {
            learner: String::new(),
            ..RoleSecrets::default()
        };
        assert!(authenticate("alice", "", Role::Learner, &secrets).is_err());
    }

    #[test]
    fn password_is_case_sensitive() {
        let secrets = RoleSecrets::default();
        assert!(authenticate("alice", "USER123", Role::Learner, &secrets).is_err());
    }
}
