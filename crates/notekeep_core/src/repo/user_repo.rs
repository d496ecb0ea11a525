//! User repository contract and SQLite implementation.

use crate::model::user::{User, UserId};
use crate::repo::{is_unique_violation, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Repository interface for user identity records.
pub trait UserRepository {
    fn insert(&self, user: &User) -> RepoResult<UserId>;
    fn get(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert(&self, user: &User) -> RepoResult<UserId> {
        user.validate()?;

        self.conn
            .execute(
                "INSERT INTO users (id, username) VALUES (?1, ?2);",
                params![user.id.to_string(), user.username.as_str()],
            )
            .map_err(|err| {
                if is_unique_violation(&err, "users.username") {
                    RepoError::DuplicateUsername(user.username.clone())
                } else {
                    err.into()
                }
            })?;

        Ok(user.id)
    }

    fn get(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username FROM users WHERE id = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username FROM users WHERE username = ?1;")?;
        let mut rows = stmt.query([username])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in users.id"))
    })?;

    let user = User {
        id,
        username: row.get("username")?,
    };
    user.validate()?;
    Ok(user)
}
