//! Core domain logic for notekeep: private per-user notes with unique
//! slugs. This crate is the single source of truth for the ownership
//! and slug-uniqueness invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod slug;
pub mod web;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::user::{User, UserId, UserValidationError};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::note_service::{FieldError, NoteInput, NoteService, NoteServiceError};
pub use slug::{slugify, DUPLICATE_SLUG_WARNING};
pub use web::{App, Method, NoteFormView, Page, Request, Response, Route, Session};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
