//! Domain model for users and their private notes.
//!
//! # Responsibility
//! - Define canonical records used by repositories and services.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - A note belongs to exactly one user and never changes owner.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod note;
pub mod user;
