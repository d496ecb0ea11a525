//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide ownership-scoped note persistence APIs.
//! - Map `notes.slug` UNIQUE violations to `RepoError::DuplicateSlug`.
//!
//! # Invariants
//! - `find_owned` is the only per-note read path; a note owned by
//!   someone else is indistinguishable from a note that does not exist.
//! - `list_by_author` filters by author in SQL, never after the fact.
//! - List order is `created_at ASC, rowid ASC`, i.e. insertion order;
//!   `created_at` only has second resolution, so rowid breaks ties.
//!
//! # See also
//! - docs/architecture/web-surface.md

use crate::model::note::{Note, NoteId};
use crate::model::user::UserId;
use crate::repo::{is_unique_violation, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    text,
    slug,
    author_id
FROM notes";

/// Repository interface for note CRUD operations.
///
/// Every mutating or per-note operation takes the requesting author;
/// there is deliberately no way to reach another user's note.
pub trait NoteRepository {
    /// Persists one note and returns its stable id.
    fn insert(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces title/text/slug of an owned note. Author never changes.
    fn update(&self, note: &Note) -> RepoResult<()>;
    /// Gets one note by slug, scoped to the requesting author.
    fn find_owned(&self, author: UserId, slug: &str) -> RepoResult<Option<Note>>;
    /// Lists all notes of one author in stable order.
    fn list_by_author(&self, author: UserId) -> RepoResult<Vec<Note>>;
    /// Removes an owned note. Returns `false` when nothing matched.
    fn delete_owned(&self, author: UserId, slug: &str) -> RepoResult<bool>;
    /// Returns whether any note other than `exclude` already uses `slug`.
    fn slug_taken(&self, slug: &str, exclude: Option<NoteId>) -> RepoResult<bool>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        self.conn
            .execute(
                "INSERT INTO notes (id, title, text, slug, author_id)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.text.as_str(),
                    note.slug.as_str(),
                    note.author.to_string(),
                ],
            )
            .map_err(|err| {
                if is_unique_violation(&err, "notes.slug") {
                    RepoError::DuplicateSlug(note.slug.clone())
                } else {
                    err.into()
                }
            })?;

        Ok(note.id)
    }

    fn update(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE notes
                 SET
                    title = ?1,
                    text = ?2,
                    slug = ?3,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?4
                   AND author_id = ?5;",
                params![
                    note.title.as_str(),
                    note.text.as_str(),
                    note.slug.as_str(),
                    note.id.to_string(),
                    note.author.to_string(),
                ],
            )
            .map_err(|err| {
                if is_unique_violation(&err, "notes.slug") {
                    RepoError::DuplicateSlug(note.slug.clone())
                } else {
                    err.into()
                }
            })?;

        if changed == 0 {
            return Err(RepoError::NoteNotFound(note.slug.clone()));
        }

        Ok(())
    }

    fn find_owned(&self, author: UserId, slug: &str) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE slug = ?1
               AND author_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![slug, author.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_by_author(&self, author: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE author_id = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;

        let mut rows = stmt.query([author.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn delete_owned(&self, author: UserId, slug: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE slug = ?1 AND author_id = ?2;",
            params![slug, author.to_string()],
        )?;

        Ok(changed > 0)
    }

    fn slug_taken(&self, slug: &str, exclude: Option<NoteId>) -> RepoResult<bool> {
        let exclude_id = exclude.map(|id| id.to_string()).unwrap_or_default();
        let taken: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM notes
                WHERE slug = ?1
                  AND id <> ?2
            );",
            params![slug, exclude_id],
            |row| row.get(0),
        )?;

        Ok(taken == 1)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "notes.id")?;
    let author_text: String = row.get("author_id")?;
    let author = parse_uuid(&author_text, "notes.author_id")?;

    let note = Note {
        id,
        title: row.get("title")?,
        text: row.get("text")?,
        slug: row.get("slug")?,
        author,
    };
    note.validate()?;
    Ok(note)
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
