//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its constructors.
//! - Validate field-level invariants before records reach SQL.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `slug` is well-formed (`[A-Za-z0-9_-]+`, capped length); global
//!   uniqueness is owned by storage, not by this type.
//! - `author` is immutable after creation; no mutator exists for it.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::user::UserId;
use crate::slug::{is_well_formed, SLUG_MAX_LEN};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Persisted note record, private to its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID.
    pub id: NoteId,
    /// Short human-readable heading. Required.
    pub title: String,
    /// Body text. Required.
    pub text: String,
    /// URL-safe identifier, unique across all notes of all users.
    pub slug: String,
    /// Owning user. Set once at creation.
    pub author: UserId,
}

/// Validation failure for note records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    NilId,
    NilAuthor,
    EmptyTitle,
    EmptyText,
    /// Slug is empty, too long, or contains characters outside
    /// `[A-Za-z0-9_-]`.
    MalformedSlug(String),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be the nil uuid"),
            Self::NilAuthor => write!(f, "note author must not be the nil uuid"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyText => write!(f, "text must not be empty"),
            Self::MalformedSlug(value) => write!(
                f,
                "slug `{value}` must be 1..={SLUG_MAX_LEN} chars of [A-Za-z0-9_-]"
            ),
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates a note with a freshly generated ID.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        slug: impl Into<String>,
        author: UserId,
    ) -> Result<Self, NoteValidationError> {
        Self::with_id(Uuid::new_v4(), title, text, slug, author)
    }

    /// Creates a note with a caller-provided ID (import/test paths).
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        text: impl Into<String>,
        slug: impl Into<String>,
        author: UserId,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            id,
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
            author,
        };
        note.validate()?;
        Ok(note)
    }

    /// Checks record-level invariants.
    ///
    /// Storage-level invariants (slug uniqueness) are intentionally not
    /// checked here; the `UNIQUE` constraint is the arbiter for those.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        if self.author.is_nil() {
            return Err(NoteValidationError::NilAuthor);
        }
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.text.trim().is_empty() {
            return Err(NoteValidationError::EmptyText);
        }
        if !is_well_formed(&self.slug) {
            return Err(NoteValidationError::MalformedSlug(self.slug.clone()));
        }
        Ok(())
    }
}
