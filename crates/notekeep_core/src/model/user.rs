//! User identity record.
//!
//! Credentials, password storage and session cookies belong to the host
//! auth stack; core only needs a stable identity with a display name.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a registered user.
pub type UserId = Uuid;

/// Minimal identity record for note ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable global ID referenced by `Note::author`.
    pub id: UserId,
    /// Unique login name. Uniqueness is enforced by storage.
    pub username: String,
}

/// Validation failure for user records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NilId,
    EmptyUsername,
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "user id must not be the nil uuid"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl Error for UserValidationError {}

impl User {
    /// Creates a user with a freshly generated ID.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::with_id(Uuid::new_v4(), username)
    }

    /// Creates a user with a caller-provided ID (import/test paths).
    pub fn with_id(
        id: UserId,
        username: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let user = Self {
            id,
            username: username.into(),
        };
        user.validate()?;
        Ok(user)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.id.is_nil() {
            return Err(UserValidationError::NilId);
        }
        if self.username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(())
    }
}
