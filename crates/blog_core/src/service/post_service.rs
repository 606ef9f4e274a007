//! Post use-case service.
//!
//! # Responsibility
//! - Publish posts from field values and apply single-field revisions.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Each revision reassigns one field and re-runs only that field's
//!   validator before the write.

use crate::model::post::{Post, PostId, PostValidationError};
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::log_write_failure;
use log::info;

/// Field values for a post that has not been published yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
}

impl PostDraft {
    /// Builds the record, validating every provided field.
    pub fn into_post(self) -> Result<Post, PostValidationError> {
        let mut post = Post::new(self.title)?;
        if let Some(content) = self.content {
            post.set_content(content)?;
        }
        if let Some(summary) = self.summary {
            post.set_summary(summary)?;
        }
        if let Some(category) = self.category.as_deref() {
            post.set_category(category)?;
        }
        Ok(post)
    }
}

/// Use-case service wrapper for post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a draft, returning the stored record.
    pub fn publish_post(&self, draft: PostDraft) -> RepoResult<Post> {
        let result = self.try_publish(draft);
        match &result {
            Ok(post) => info!(
                "event=post_publish module=service status=ok post_id={} has_category={}",
                post.id().unwrap_or_default(),
                post.category().is_some()
            ),
            Err(err) => log_write_failure("post_publish", err),
        }
        result
    }

    pub fn retitle_post(&self, id: PostId, title: impl Into<String>) -> RepoResult<Post> {
        let title = title.into();
        self.mutate("post_retitle", id, |post| post.set_title(title))
    }

    pub fn revise_content(&self, id: PostId, content: impl Into<String>) -> RepoResult<Post> {
        let content = content.into();
        self.mutate("post_revise_content", id, |post| post.set_content(content))
    }

    pub fn revise_summary(&self, id: PostId, summary: impl Into<String>) -> RepoResult<Post> {
        let summary = summary.into();
        self.mutate("post_revise_summary", id, |post| post.set_summary(summary))
    }

    pub fn recategorize_post(&self, id: PostId, category: &str) -> RepoResult<Post> {
        self.mutate("post_recategorize", id, |post| post.set_category(category))
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn count_posts(&self) -> RepoResult<u64> {
        self.repo.count_posts()
    }

    pub fn remove_post(&self, id: PostId) -> RepoResult<()> {
        let result = self.repo.delete_post(id);
        match &result {
            Ok(()) => info!("event=post_remove module=service status=ok post_id={id}"),
            Err(err) => log_write_failure("post_remove", err),
        }
        result
    }

    fn try_publish(&self, draft: PostDraft) -> RepoResult<Post> {
        let post = draft.into_post()?;
        let id = self.repo.create_post(&post)?;
        self.read_back(id)
    }

    fn mutate<F>(&self, event: &str, id: PostId, apply: F) -> RepoResult<Post>
    where
        F: FnOnce(&mut Post) -> Result<(), PostValidationError>,
    {
        let result = self.try_mutate(id, apply);
        match &result {
            Ok(_) => info!("event={event} module=service status=ok post_id={id}"),
            Err(err) => log_write_failure(event, err),
        }
        result
    }

    fn try_mutate<F>(&self, id: PostId, apply: F) -> RepoResult<Post>
    where
        F: FnOnce(&mut Post) -> Result<(), PostValidationError>,
    {
        let mut post = self.read_back(id)?;
        apply(&mut post)?;
        self.repo.update_post(&post)?;
        self.read_back(id)
    }

    fn read_back(&self, id: PostId) -> RepoResult<Post> {
        self.repo
            .get_post(id)?
            .ok_or(RepoError::NotFound { entity: "post", id })
    }
}
