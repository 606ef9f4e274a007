//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for authors and posts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes run record `validate()` before persistence.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Author name uniqueness is enforced by the `authors.name` unique index
//!   and reported as a validation error, never by check-then-insert.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::author::AuthorValidationError;
use crate::model::post::PostValidationError;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_repo;
pub mod post_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for author/post persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    AuthorValidation(AuthorValidationError),
    PostValidation(PostValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: i64 },
    /// Update requested for a record that storage has not assigned an id yet.
    Unsaved(&'static str),
    /// Connection was not bootstrapped through `db::open_db*`.
    SchemaNotReady { found: u32, expected: u32 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthorValidation(err) => write!(f, "{err}"),
            Self::PostValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Unsaved(entity) => write!(f, "{entity} has not been created yet"),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "connection schema version {found} does not match expected {expected}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AuthorValidation(err) => Some(err),
            Self::PostValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AuthorValidationError> for RepoError {
    fn from(value: AuthorValidationError) -> Self {
        Self::AuthorValidation(value)
    }
}

impl From<PostValidationError> for RepoError {
    fn from(value: PostValidationError) -> Self {
        Self::PostValidation(value)
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

/// Pagination options shared by list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u32>,
    pub offset: u32,
}

fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let expected = latest_version();
    if found != expected {
        return Err(RepoError::SchemaNotReady { found, expected });
    }
    Ok(())
}

fn push_page(sql: &mut String, bind_values: &mut Vec<Value>, page: Page) {
    if let Some(limit) = page.limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if page.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(page.offset)));
        }
    } else if page.offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(Value::Integer(i64::from(page.offset)));
    }
}
