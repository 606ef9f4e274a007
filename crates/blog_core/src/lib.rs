//! Core data layer for the blog: authors, posts and their validation rules.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorId, AuthorValidationError};
pub use model::post::{Category, Post, PostId, PostValidationError};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use repo::{Page, RepoError, RepoResult};
pub use service::author_service::{AuthorService, RegisterAuthorRequest};
pub use service::post_service::{PostDraft, PostService};

/// Minimal health-check API for callers wiring up the core.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
