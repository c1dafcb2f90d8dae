use crate::model::{DeckKey, Role, Username};

/// Identity of a logged-in user.
///
/// Only exists between a successful login and logout; it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: Username,
    role: Role,
}

impl Session {
    #[must_use]
    pub fn new(username: Username, role: Role) -> Self {
        Self { username, role }
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The personal deck belonging to this session's username.
    #[must_use]
    pub fn own_deck(&self) -> DeckKey {
        DeckKey::User(self.username.clone())
    }
}
