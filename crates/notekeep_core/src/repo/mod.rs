//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for users and notes.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce record validation before persistence.
//! - Repository APIs return semantic errors (`DuplicateSlug`,
//!   `NoteNotFound`) in addition to DB transport errors.
//! - Per-note reads are always scoped to the requesting author; there is
//!   no unscoped note lookup in the public contract.

use crate::db::DbError;
use crate::model::note::NoteValidationError;
use crate::model::user::UserValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Shared repository error for user and note persistence.
#[derive(Debug)]
pub enum RepoError {
    Note(NoteValidationError),
    User(UserValidationError),
    Db(DbError),
    /// Unique constraint on `notes.slug` fired; carries the colliding value.
    DuplicateSlug(String),
    /// Unique constraint on `users.username` fired.
    DuplicateUsername(String),
    /// No note with this slug is owned by the requesting author.
    NoteNotFound(String),
    /// Persisted row failed to parse back into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Note(err) => write!(f, "{err}"),
            Self::User(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateSlug(slug) => write!(f, "slug already in use: `{slug}`"),
            Self::DuplicateUsername(name) => write!(f, "username already in use: `{name}`"),
            Self::NoteNotFound(slug) => write!(f, "note not found: `{slug}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Note(err) => Some(err),
            Self::User(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Note(value)
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Returns whether `err` is a UNIQUE constraint failure on `target`
/// (a `table.column` pair), so callers can map it to a semantic error
/// and fall back to the generic `Db` mapping otherwise.
pub(crate) fn is_unique_violation(err: &rusqlite::Error, target: &str) -> bool {
    if let rusqlite::Error::SqliteFailure(code, Some(message)) = err {
        return code.code == rusqlite::ErrorCode::ConstraintViolation
            && message
                .strip_prefix("UNIQUE constraint failed: ")
                .is_some_and(|column| column == target);
    }
    false
}
