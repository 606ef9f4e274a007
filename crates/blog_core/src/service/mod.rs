//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Emit metadata-only log events for every write.
//!
//! # Invariants
//! - Mutations load the stored record, reassign exactly one field through
//!   its validated setter, then write back.
//! - Log lines never carry user-provided field values.

use crate::repo::RepoError;
use log::{error, warn};

pub mod author_service;
pub mod post_service;

fn log_write_failure(event: &str, err: &RepoError) {
    match err {
        RepoError::AuthorValidation(_) | RepoError::PostValidation(_) => warn!(
            "event={event} module=service status=rejected error_code=validation_failed error={err}"
        ),
        RepoError::NotFound { .. } | RepoError::Unsaved(_) => {
            warn!("event={event} module=service status=rejected error_code=not_found error={err}")
        }
        _ => error!("event={event} module=service status=error error_code=storage_failed error={err}"),
    }
}
