//! User Name Value Object
//!
//! Public handle used for display and uniqueness. Input is trimmed and
//! lowercased; the stored form is the canonical (lowercase) one, so
//! uniqueness checks are case-insensitive by construction.
//!
//! ## Invariants
//! - 3 to 30 characters after normalization
//! - ASCII letters, digits, and underscore only

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after normalization
    Empty,

    /// Too short (minimum: USER_NAME_MIN_LENGTH)
    TooShort { length: usize, min: usize },

    /// Too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Contains a character outside [a-z0-9_]
    InvalidCharacter { char: char },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Username is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char } => {
                write!(
                    f,
                    "Invalid character '{char}'. Username can only contain letters, numbers and underscores"
                )
            }
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated, canonical (lowercase) user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Create a new UserName from raw input
    ///
    /// Trims, lowercases, then validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let canonical = input.as_ref().trim().to_lowercase();

        if canonical.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = canonical.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some(char) = canonical
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '_')
        {
            return Err(UserNameError::InvalidCharacter { char });
        }

        Ok(Self(canonical))
    }

    /// Create from database value (assumed already canonical)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the canonical user name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(UserName::new("alice").unwrap().as_str(), "alice");
        assert_eq!(UserName::new("a_1").unwrap().as_str(), "a_1");
        assert_eq!(UserName::new("abc123_xyz").unwrap().as_str(), "abc123_xyz");
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(UserName::new("  Alice ").unwrap().as_str(), "alice");
        assert_eq!(UserName::new("BOB_99").unwrap().as_str(), "bob_99");
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(UserName::new("").unwrap_err(), UserNameError::Empty);
        assert!(matches!(
            UserName::new("ab").unwrap_err(),
            UserNameError::TooShort { length: 2, min: 3 }
        ));
        let long = "a".repeat(31);
        assert!(matches!(
            UserName::new(long).unwrap_err(),
            UserNameError::TooLong { length: 31, max: 30 }
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            UserName::new("has space").unwrap_err(),
            UserNameError::InvalidCharacter { char: ' ' }
        ));
        assert!(matches!(
            UserName::new("dot.ted").unwrap_err(),
            UserNameError::InvalidCharacter { char: '.' }
        ));
        assert!(matches!(
            UserName::new("dash-ed").unwrap_err(),
            UserNameError::InvalidCharacter { char: '-' }
        ));
    }
}
