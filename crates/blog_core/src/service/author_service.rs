//! Author use-case service.
//!
//! # Responsibility
//! - Register authors and apply single-field mutations.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - A rejected mutation leaves the stored row untouched.

use crate::model::author::{Author, AuthorId, AuthorValidationError};
use crate::repo::author_repo::AuthorRepository;
use crate::repo::{Page, RepoError, RepoResult};
use crate::service::log_write_failure;
use log::info;

/// Request model for registering a new author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAuthorRequest {
    pub name: String,
    /// Optional; validated only when present.
    pub phone_number: Option<String>,
}

/// Use-case service wrapper for author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the request field by field, persists it and returns the
    /// stored record with its id and `created_at`.
    ///
    /// A name already used by another author fails with
    /// `AuthorValidationError::NameNotUnique`.
    pub fn register_author(&self, request: &RegisterAuthorRequest) -> RepoResult<Author> {
        let result = self.try_register(request);
        match &result {
            Ok(author) => info!(
                "event=author_register module=service status=ok author_id={}",
                author.id().unwrap_or_default()
            ),
            Err(err) => log_write_failure("author_register", err),
        }
        result
    }

    /// Reassigns `name` on a stored author.
    pub fn rename_author(&self, id: AuthorId, name: impl Into<String>) -> RepoResult<Author> {
        let name = name.into();
        self.mutate("author_rename", id, |author| author.set_name(name))
    }

    /// Reassigns `phone_number` on a stored author.
    pub fn change_phone_number(
        &self,
        id: AuthorId,
        phone_number: impl Into<String>,
    ) -> RepoResult<Author> {
        let phone_number = phone_number.into();
        self.mutate("author_phone_change", id, |author| {
            author.set_phone_number(phone_number)
        })
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.repo.find_author_by_name(name)
    }

    pub fn list_authors(&self, page: Page) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(page)
    }

    pub fn count_authors(&self) -> RepoResult<u64> {
        self.repo.count_authors()
    }

    pub fn remove_author(&self, id: AuthorId) -> RepoResult<()> {
        let result = self.repo.delete_author(id);
        match &result {
            Ok(()) => info!("event=author_remove module=service status=ok author_id={id}"),
            Err(err) => log_write_failure("author_remove", err),
        }
        result
    }

    fn try_register(&self, request: &RegisterAuthorRequest) -> RepoResult<Author> {
        let mut author = Author::new(request.name.as_str())?;
        if let Some(phone_number) = request.phone_number.as_deref() {
            author.set_phone_number(phone_number)?;
        }
        let id = self.repo.create_author(&author)?;
        self.read_back(id)
    }

    fn mutate<F>(&self, event: &str, id: AuthorId, apply: F) -> RepoResult<Author>
    where
        F: FnOnce(&mut Author) -> Result<(), AuthorValidationError>,
    {
        let result = self.try_mutate(id, apply);
        match &result {
            Ok(_) => info!("event={event} module=service status=ok author_id={id}"),
            Err(err) => log_write_failure(event, err),
        }
        result
    }

    fn try_mutate<F>(&self, id: AuthorId, apply: F) -> RepoResult<Author>
    where
        F: FnOnce(&mut Author) -> Result<(), AuthorValidationError>,
    {
        let mut author = self.read_back(id)?;
        apply(&mut author)?;
        self.repo.update_author(&author)?;
        self.read_back(id)
    }

    fn read_back(&self, id: AuthorId) -> RepoResult<Author> {
        self.repo.get_author(id)?.ok_or(RepoError::NotFound {
            entity: "author",
            id,
        })
    }
}
