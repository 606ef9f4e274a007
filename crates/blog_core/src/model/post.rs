//! Post record and field validators.
//!
//! # Responsibility
//! - Define the canonical post record stored in `posts`.
//! - Validate `title`, `content`, `summary` and `category` on assignment.
//!
//! # Invariants
//! - `title` always contains one of `CLICKBAIT_MARKERS`.
//! - `content`, when set, has at least `CONTENT_MIN_CHARS` characters.
//! - `summary`, when set, has at most `SUMMARY_MAX_CHARS` characters.
//! - Lengths are counted in chars, not bytes.

use super::or_none;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned surrogate key of a post row.
pub type PostId = i64;

/// A title must contain at least one of these (case-sensitive).
pub const CLICKBAIT_MARKERS: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];
pub const CONTENT_MIN_CHARS: usize = 250;
pub const SUMMARY_MAX_CHARS: usize = 250;

/// Validation failures for post fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// `content` is shorter than `CONTENT_MIN_CHARS`.
    ContentTooShort { chars: usize },
    /// `summary` is longer than `SUMMARY_MAX_CHARS`.
    SummaryTooLong { chars: usize },
    /// `category` is neither `Fiction` nor `Non-Fiction`.
    InvalidCategory(String),
    /// `title` contains none of `CLICKBAIT_MARKERS`.
    MissingClickbaitMarker,
}

impl Display for PostValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentTooShort { .. } => {
                write!(f, "Post must be at least {CONTENT_MIN_CHARS} characters long.")
            }
            Self::SummaryTooLong { .. } => write!(
                f,
                "Post summary may be a maximum of {SUMMARY_MAX_CHARS} characters."
            ),
            Self::InvalidCategory(_) => write!(f, "Category must be Fiction or Non-Fiction."),
            Self::MissingClickbaitMarker => write!(
                f,
                "Post title must contain one of the following words: 'Won't Believe', 'Secret', 'Top', 'Guess'."
            ),
        }
    }
}

impl Error for PostValidationError {}

/// Post category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fiction")]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl Category {
    /// Stored and displayed form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PostValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate_category(value)
    }
}

pub fn validate_content(content: &str) -> Result<&str, PostValidationError> {
    let chars = content.chars().count();
    if chars < CONTENT_MIN_CHARS {
        return Err(PostValidationError::ContentTooShort { chars });
    }
    Ok(content)
}

/// Accepts any summary up to `SUMMARY_MAX_CHARS`, including the empty one.
pub fn validate_summary(summary: &str) -> Result<&str, PostValidationError> {
    let chars = summary.chars().count();
    if chars > SUMMARY_MAX_CHARS {
        return Err(PostValidationError::SummaryTooLong { chars });
    }
    Ok(summary)
}

/// Exact, case-sensitive match; no trimming.
pub fn validate_category(category: &str) -> Result<Category, PostValidationError> {
    match category {
        "Fiction" => Ok(Category::Fiction),
        "Non-Fiction" => Ok(Category::NonFiction),
        other => Err(PostValidationError::InvalidCategory(other.to_string())),
    }
}

pub fn validate_title(title: &str) -> Result<&str, PostValidationError> {
    if !CLICKBAIT_MARKERS.iter().any(|marker| title.contains(marker)) {
        return Err(PostValidationError::MissingClickbaitMarker);
    }
    Ok(title)
}

/// Blog post.
///
/// Only `title` is required. `content`, `summary` and `category` stay `None`
/// until assigned, and each assignment runs that field's validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostRow")]
pub struct Post {
    id: Option<PostId>,
    title: String,
    content: Option<String>,
    summary: Option<String>,
    category: Option<Category>,
    created_at: Option<i64>,
    updated_at: Option<i64>,
}

/// Unvalidated post shape shared by deserialization and row decoding.
///
/// Storage-owned fields are skipped on deserialize.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PostRow {
    #[serde(skip_deserializing)]
    pub(crate) id: Option<PostId>,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    pub(crate) summary: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(skip_deserializing)]
    pub(crate) created_at: Option<i64>,
    #[serde(skip_deserializing)]
    pub(crate) updated_at: Option<i64>,
}

impl TryFrom<PostRow> for Post {
    type Error = PostValidationError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let category = row.category.as_deref().map(validate_category).transpose()?;
        let post = Self {
            id: row.id,
            title: row.title,
            content: row.content,
            summary: row.summary,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        post.validate()?;
        Ok(post)
    }
}

impl Post {
    /// Creates an unsaved post with a validated title.
    pub fn new(title: impl Into<String>) -> Result<Self, PostValidationError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self {
            id: None,
            title,
            content: None,
            summary: None,
            category: None,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Result<Self, PostValidationError> {
        self.set_content(content)?;
        Ok(self)
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Result<Self, PostValidationError> {
        self.set_summary(summary)?;
        Ok(self)
    }

    pub fn with_category(mut self, category: &str) -> Result<Self, PostValidationError> {
        self.set_category(category)?;
        Ok(self)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), PostValidationError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), PostValidationError> {
        let content = content.into();
        validate_content(&content)?;
        self.content = Some(content);
        Ok(())
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), PostValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = Some(summary);
        Ok(())
    }

    pub fn set_category(&mut self, category: &str) -> Result<(), PostValidationError> {
        self.category = Some(validate_category(category)?);
        Ok(())
    }

    /// Re-checks every present field. Used by repositories on write and read
    /// paths.
    pub fn validate(&self) -> Result<(), PostValidationError> {
        validate_title(&self.title)?;
        if let Some(content) = self.content.as_deref() {
            validate_content(content)?;
        }
        if let Some(summary) = self.summary.as_deref() {
            validate_summary(summary)?;
        }
        Ok(())
    }

    pub fn id(&self) -> Option<PostId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post(id={}, title={}, content={}, summary={})",
            or_none(self.id),
            self.title,
            or_none(self.content.as_deref()),
            or_none(self.summary.as_deref())
        )
    }
}
