//! Blog record types and their field validators.
//!
//! # Responsibility
//! - Define the `Author` and `Post` records persisted by the repositories.
//! - Own every field validation rule as a pure function.
//!
//! # Invariants
//! - Record fields are private; every assignment goes through a validator.
//! - Surrogate ids and timestamps are only ever set by storage.

use std::fmt::Display;

pub mod author;
pub mod post;

/// Renders an optional value the way debug strings expect (`None` when unset).
pub(crate) fn or_none<T: Display>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "None".to_string(),
    }
}
