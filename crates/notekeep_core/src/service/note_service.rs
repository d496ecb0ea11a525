//! Note use-case service: create/list/retrieve/edit/delete.
//!
//! # Responsibility
//! - Enforce the ownership contract through `find_owned`-style lookups.
//! - Resolve slugs per policy (explicit validation, auto derivation).
//! - Surface duplicate slugs as field-level form errors.
//!
//! # Invariants
//! - Authorization failure and absence are the same outcome: `NotFound`.
//! - An auto-derived slug that collides is disambiguated with `-2`,
//!   `-3`, ...; an explicit slug that collides is bounced back to the
//!   caller unchanged.
//! - Failed validation never mutates state.
//!
//! # See also
//! - docs/architecture/web-surface.md

use crate::model::note::{Note, NoteValidationError};
use crate::model::user::UserId;
use crate::repo::note_repo::NoteRepository;
use crate::repo::{RepoError, RepoResult};
use crate::slug::{is_well_formed, slugify, with_suffix, DUPLICATE_SLUG_WARNING};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form payload for create/edit operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub text: String,
    /// `None` requests automatic derivation from the title.
    pub slug: Option<String>,
}

/// Field-level validation failure, suitable for form re-rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// The duplicate-slug form error: colliding value plus fixed suffix.
    pub fn duplicate_slug(slug: &str) -> Self {
        Self::new("slug", format!("{slug}{DUPLICATE_SLUG_WARNING}"))
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Recoverable form-level failure; request must not mutate state.
    Invalid(FieldError),
    /// The note does not exist for this author. Deliberately also the
    /// outcome for notes owned by somebody else.
    NotFound,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::NotFound => write!(f, "note not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            // The UNIQUE constraint is the last line of defense against
            // concurrent creates; its firing is still a form error.
            RepoError::DuplicateSlug(slug) => Self::Invalid(FieldError::duplicate_slug(&slug)),
            RepoError::NoteNotFound(_) => Self::NotFound,
            other => Self::Repo(other),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        match value {
            NoteValidationError::EmptyTitle => {
                Self::Invalid(FieldError::new("title", "this field is required"))
            }
            NoteValidationError::EmptyText => {
                Self::Invalid(FieldError::new("text", "this field is required"))
            }
            NoteValidationError::MalformedSlug(slug) => {
                Self::Invalid(FieldError::new("slug", format!("`{slug}` is not a valid slug")))
            }
            other => Self::Repo(RepoError::Note(other)),
        }
    }
}

/// Note service facade over a repository implementation.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note owned by `author`.
    ///
    /// Slug handling: an explicit slug must be well-formed and free; a
    /// missing slug is derived from the title and disambiguated until
    /// free.
    pub fn create(&self, author: UserId, input: NoteInput) -> Result<Note, NoteServiceError> {
        check_required(&input)?;
        let slug = self.resolve_slug(&input, None)?;
        let note = Note::new(input.title, input.text, slug, author)?;
        self.repo.insert(&note)?;

        info!(
            "event=note_create module=service status=ok slug={} author={}",
            note.slug, note.author
        );
        Ok(note)
    }

    /// Lists all notes owned by `author` in stable order.
    pub fn list(&self, author: UserId) -> RepoResult<Vec<Note>> {
        self.repo.list_by_author(author)
    }

    /// Gets one owned note, or `NotFound`.
    pub fn retrieve(&self, author: UserId, slug: &str) -> Result<Note, NoteServiceError> {
        self.repo
            .find_owned(author, slug)?
            .ok_or(NoteServiceError::NotFound)
    }

    /// Replaces title/text/slug of an owned note.
    ///
    /// Slug uniqueness excludes the note itself, so re-submitting an
    /// unchanged form is not a collision.
    pub fn edit(
        &self,
        author: UserId,
        slug: &str,
        input: NoteInput,
    ) -> Result<Note, NoteServiceError> {
        let existing = self
            .repo
            .find_owned(author, slug)?
            .ok_or(NoteServiceError::NotFound)?;

        check_required(&input)?;
        let new_slug = self.resolve_slug(&input, Some(&existing))?;
        let updated = Note::with_id(existing.id, input.title, input.text, new_slug, existing.author)?;
        self.repo.update(&updated)?;

        info!(
            "event=note_edit module=service status=ok slug={} author={}",
            updated.slug, updated.author
        );
        Ok(updated)
    }

    /// Removes an owned note, or `NotFound`.
    ///
    /// A second delete of the same slug is `NotFound` as well.
    pub fn delete(&self, author: UserId, slug: &str) -> Result<(), NoteServiceError> {
        if !self.repo.delete_owned(author, slug)? {
            return Err(NoteServiceError::NotFound);
        }

        info!("event=note_delete module=service status=ok slug={slug} author={author}");
        Ok(())
    }

    fn resolve_slug(
        &self,
        input: &NoteInput,
        existing: Option<&Note>,
    ) -> Result<String, NoteServiceError> {
        let exclude = existing.map(|note| note.id);

        if let Some(explicit) = input.slug.as_deref() {
            if !is_well_formed(explicit) {
                return Err(NoteServiceError::Invalid(FieldError::new(
                    "slug",
                    format!("`{explicit}` is not a valid slug"),
                )));
            }
            if self.repo.slug_taken(explicit, exclude)? {
                return Err(NoteServiceError::Invalid(FieldError::duplicate_slug(
                    explicit,
                )));
            }
            return Ok(explicit.to_string());
        }

        let base = slugify(&input.title);
        if base.is_empty() {
            return Err(NoteServiceError::Invalid(FieldError::new(
                "title",
                "title does not produce a usable slug",
            )));
        }

        if !self.repo.slug_taken(&base, exclude)? {
            return Ok(base);
        }
        let mut counter = 2;
        loop {
            let candidate = with_suffix(&base, counter);
            if !self.repo.slug_taken(&candidate, exclude)? {
                return Ok(candidate);
            }
            counter += 1;
        }
    }
}

fn check_required(input: &NoteInput) -> Result<(), NoteServiceError> {
    if input.title.trim().is_empty() {
        return Err(NoteValidationError::EmptyTitle.into());
    }
    if input.text.trim().is_empty() {
        return Err(NoteValidationError::EmptyText.into());
    }
    Ok(())
}
