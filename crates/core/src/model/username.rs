use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username cannot be empty")]
    Empty,
}

/// Normalized (trimmed, lower-cased) non-empty username.
///
/// Every storage key and uniqueness check goes through this type, so two
/// spellings of the same name always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Normalize and validate a raw username.
    ///
    /// # Errors
    ///
    /// Returns `UsernameError::Empty` if nothing is left after trimming.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, UsernameError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `raw` normalizes to this username.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        raw.trim().to_lowercase() == self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_lowercases() {
        let name = Username::parse("  Alice ").unwrap();
        assert_eq!(name.as_str(), "alice");
        assert_eq!(name.to_string(), "alice");
    }

    #[test]
    fn parse_rejects_blank() {
        assert_eq!(Username::parse(" \t "), Err(UsernameError::Empty));
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
    }

    #[test]
    fn matches_compares_normalized() {
        let name = Username::parse("alice").unwrap();
        assert!(name.matches("ALICE "));
        assert!(!name.matches("alicia"));
    }
}
