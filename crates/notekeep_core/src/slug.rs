//! Slug derivation and well-formedness policy.
//!
//! # Responsibility
//! - Derive ASCII URL-safe slugs from arbitrary-script titles.
//! - Validate caller-supplied slugs against the allowed shape.
//! - Own the fixed warning suffix appended to duplicate-slug form errors.
//!
//! # Invariants
//! - Derived slugs are lowercase ASCII `[a-z0-9-]` and never exceed
//!   `SLUG_MAX_LEN` characters.
//! - Derivation is pure; uniqueness is a storage concern.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum slug length in characters.
pub const SLUG_MAX_LEN: usize = 100;

/// Fixed suffix appended to the colliding slug value in form errors.
pub const DUPLICATE_SLUG_WARNING: &str =
    " - this slug is already in use, please pick a unique value!";

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid slug regex"));

/// Returns whether `value` is an acceptable caller-supplied slug.
pub fn is_well_formed(value: &str) -> bool {
    value.chars().count() <= SLUG_MAX_LEN && SLUG_RE.is_match(value)
}

/// Derives a slug from a title by transliterating to ASCII.
///
/// Non-ASCII input produces an ASCII slug ("Заголовок" -> "zagolovok").
/// Returns an empty string when the title carries no sluggable
/// characters; callers must treat that as a validation failure.
pub fn slugify(title: &str) -> String {
    let derived = ::slug::slugify(title);
    truncate_chars(&derived, SLUG_MAX_LEN)
}

/// Appends a numeric suffix to a derived slug, keeping the length cap.
///
/// Used to disambiguate auto-derived slugs that collide with an existing
/// note. Caller-supplied slugs are never rewritten through this path.
pub fn with_suffix(base: &str, counter: u32) -> String {
    let suffix = format!("-{counter}");
    let room = SLUG_MAX_LEN.saturating_sub(suffix.chars().count());
    let mut result = truncate_chars(base, room);
    result.push_str(&suffix);
    result
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
