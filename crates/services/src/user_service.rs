use std::sync::Arc;

use flash_core::model::{Role, Session, Username};
use storage::repository::UserRepository;

use crate::error::UserServiceError;

/// Maintains the registered-usernames list.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a username.
    ///
    /// Names are compared and stored normalized, so `Alice` and `alice`
    /// collide. Returns the stored list after the append.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Forbidden` for non super-administrators,
    /// `Validation` for a blank name, `DuplicateUser` for a name already
    /// registered, `Storage` if persistence fails.
    pub async fn add_user(
        &self,
        session: &Session,
        username: &str,
    ) -> Result<Vec<String>, UserServiceError> {
        ensure_super_admin(session)?;
        let username = Username::parse(username)?;

        let mut users = self.users.load_users().await?;
        if users.iter().any(|existing| username.matches(existing)) {
            tracing::warn!(user = %username, "user already registered");
            return Err(UserServiceError::DuplicateUser(username.to_string()));
        }
        users.push(username.to_string());
        self.users.save_users(&users).await?;

        tracing::info!(user = %username, total = users.len(), "registered user");
        Ok(users)
    }

    /// Registered usernames in stored order.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Forbidden` for non super-administrators,
    /// `Storage` if the list cannot be read.
    pub async fn list_users(&self, session: &Session) -> Result<Vec<String>, UserServiceError> {
        ensure_super_admin(session)?;
        Ok(self.users.load_users().await?)
    }
}

fn ensure_super_admin(session: &Session) -> Result<(), UserServiceError> {
    if session.role() != Role::SuperAdmin {
        return Err(UserServiceError::Forbidden {
            role: session.role(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flash_core::model::UsernameError;
    use storage::repository::Storage;

    fn root() -> Session {
        Session::new(Username::parse("root").unwrap(), Role::SuperAdmin)
    }

    #[tokio::test]
    async fn duplicate_detection_is_case_insensitive() {
        let storage = Storage::in_memory();
        let service = UserService::new(Arc::clone(&storage.users));

        service.add_user(&root(), "Alice").await.unwrap();
        let err = service.add_user(&root(), "alice").await.unwrap_err();
        assert!(matches!(err, UserServiceError::DuplicateUser(ref name) if name == "alice"));
        assert_eq!(service.list_users(&root()).await.unwrap(), vec!["alice"]);
    }

    #[tokio::test]
    async fn legacy_unnormalized_entries_still_collide() {
        let storage = Storage::in_memory();
        storage
            .users
            .save_users(&[" Bob".to_owned()])
            .await
            .unwrap();
        let service = UserService::new(Arc::clone(&storage.users));

        let err = service.add_user(&root(), "BOB").await.unwrap_err();
        assert!(matches!(err, UserServiceError::DuplicateUser(_)));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let storage = Storage::in_memory();
        let service = UserService::new(Arc::clone(&storage.users));
        let err = service.add_user(&root(), "  ").await.unwrap_err();
        assert!(matches!(
            err,
            UserServiceError::Validation(UsernameError::Empty)
        ));
    }

    #[tokio::test]
    async fn non_super_admin_is_forbidden() {
        let storage = Storage::in_memory();
        let service = UserService::new(Arc::clone(&storage.users));
        let learner = Session::new(Username::parse("al").unwrap(), Role::Learner);
        assert!(matches!(
            service.add_user(&learner, "bob").await.unwrap_err(),
            UserServiceError::Forbidden { .. }
        ));
        assert!(service.list_users(&learner).await.is_err());
    }
}
