//! Author repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `authors` table.
//! - Translate unique-index violations on `authors.name` into
//!   `AuthorValidationError::NameNotUnique`.
//!
//! # Invariants
//! - Write paths call `Author::validate()` before SQL mutations.
//! - `updated_at` stays `NULL` until the first successful update.

use crate::model::author::{Author, AuthorId, AuthorRow, AuthorValidationError};
use crate::model::or_none;
use crate::repo::{ensure_schema_ready, push_page, Page, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{ffi, params, params_from_iter, Connection, OptionalExtension, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    /// Inserts a new row and returns the storage-assigned id.
    ///
    /// Any id already carried by `author` is ignored.
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId>;
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    fn list_authors(&self, page: Page) -> RepoResult<Vec<Author>>;
    fn count_authors(&self) -> RepoResult<u64>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a connection opened via `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId> {
        author.validate()?;

        self.conn
            .execute(
                "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
                params![author.name(), author.phone_number()],
            )
            .map_err(map_author_write_error)?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        let id = author.id().ok_or(RepoError::Unsaved("author"))?;
        author.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE authors
                 SET
                    name = ?1,
                    phone_number = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?3;",
                params![author.name(), author.phone_number(), id],
            )
            .map_err(map_author_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "author",
                id,
            });
        }

        Ok(())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.query_one(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"), Value::Integer(id))
    }

    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.query_one(
            &format!("{AUTHOR_SELECT_SQL} WHERE name = ?1;"),
            Value::Text(name.to_string()),
        )
    }

    fn list_authors(&self, page: Page) -> RepoResult<Vec<Author>> {
        let mut sql = format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        push_page(&mut sql, &mut bind_values, page);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn count_authors(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get::<_, i64>(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative author count `{count}`")))
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "author",
                id,
            });
        }

        Ok(())
    }
}

impl SqliteAuthorRepository<'_> {
    fn query_one(&self, sql: &str, key: Value) -> RepoResult<Option<Author>> {
        let mut stmt = self.conn.prepare(sql)?;
        let row = stmt.query_row([key], read_author_row).optional()?;
        row.map(validate_author_row).transpose()
    }
}

fn map_author_write_error(err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE {
            return RepoError::AuthorValidation(AuthorValidationError::NameNotUnique);
        }
    }
    err.into()
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    validate_author_row(read_author_row(row)?)
}

fn read_author_row(row: &Row<'_>) -> rusqlite::Result<AuthorRow> {
    Ok(AuthorRow {
        id: row.get("id")?,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn validate_author_row(row: AuthorRow) -> RepoResult<Author> {
    let id = row.id;
    Author::try_from(row).map_err(|err| {
        RepoError::InvalidData(format!(
            "author row {} violates validation: {err}",
            or_none(id)
        ))
    })
}
