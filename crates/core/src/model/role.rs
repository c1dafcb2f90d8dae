use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role picked on the login form.
///
/// The role is chosen per login, not stored with the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Studies the shared deck plus their own cards, can self-grade.
    #[serde(rename = "user")]
    Learner,
    /// Maintains the shared deck.
    #[serde(rename = "admin")]
    Editor,
    /// Manages registered users and their personal decks.
    #[serde(rename = "superadmin")]
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Learner, Role::Editor, Role::SuperAdmin];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Learner => "user",
            Role::Editor => "admin",
            Role::SuperAdmin => "superadmin",
        }
    }

    #[must_use]
    pub fn is_learner(self) -> bool {
        matches!(self, Role::Learner)
    }

    /// Editors and super-administrators may append to the shared deck.
    #[must_use]
    pub fn can_add_shared_cards(self) -> bool {
        matches!(self, Role::Editor | Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role `{raw}` (expected user, admin or superadmin)")]
pub struct ParseRoleError {
    raw: String,
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "learner" => Ok(Role::Learner),
            "admin" | "editor" => Ok(Role::Editor),
            "superadmin" | "super-admin" => Ok(Role::SuperAdmin),
            _ => Err(ParseRoleError { raw: s.to_owned() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_external_names_and_aliases() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::Learner);
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Editor);
        assert_eq!("editor".parse::<Role>().unwrap(), Role::Editor);
        assert_eq!(" superadmin ".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn only_learners_are_learners() {
        assert!(Role::Learner.is_learner());
        assert!(!Role::Editor.is_learner());
        assert!(!Role::Learner.can_add_shared_cards());
        assert!(Role::SuperAdmin.can_add_shared_cards());
    }
}
