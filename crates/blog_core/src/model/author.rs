//! Author record and field validators.
//!
//! # Responsibility
//! - Define the canonical author record stored in `authors`.
//! - Validate `name` and `phone_number` on every assignment.
//!
//! # Invariants
//! - `name` is never empty.
//! - `phone_number`, when set, is exactly ten decimal digits (any script).
//! - Name uniqueness is owned by the `authors.name` unique index, not by
//!   this module.

use super::or_none;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone number regex"));

/// Storage-assigned surrogate key of an author row.
pub type AuthorId = i64;

/// Validation failures for author fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorValidationError {
    /// `name` was empty.
    NameMissing,
    /// Another author already uses this `name`.
    NameNotUnique,
    /// `phone_number` was not exactly ten digits.
    InvalidPhoneNumber,
}

impl Display for AuthorValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameMissing => write!(f, "Name has to be present."),
            Self::NameNotUnique => write!(f, "Name must be unique."),
            Self::InvalidPhoneNumber => write!(f, "Phone numbers must be ten digits."),
        }
    }
}

impl Error for AuthorValidationError {}

/// Accepts a non-empty name and returns it unchanged.
///
/// Uniqueness is checked by storage on write and surfaces as
/// `AuthorValidationError::NameNotUnique`.
pub fn validate_name(name: &str) -> Result<&str, AuthorValidationError> {
    if name.is_empty() {
        return Err(AuthorValidationError::NameMissing);
    }
    Ok(name)
}

/// Accepts exactly ten decimal digits and returns the value unchanged.
///
/// Any Unicode decimal digit counts, so full-width `５５５１２３４５６７` passes.
/// No normalization happens: `555-123-4567` is rejected, not stripped.
pub fn validate_phone_number(phone_number: &str) -> Result<&str, AuthorValidationError> {
    if !PHONE_NUMBER_RE.is_match(phone_number) {
        return Err(AuthorValidationError::InvalidPhoneNumber);
    }
    Ok(phone_number)
}

/// Blog author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthorRow")]
pub struct Author {
    id: Option<AuthorId>,
    name: String,
    phone_number: Option<String>,
    /// Epoch milliseconds, set by storage on insert.
    created_at: Option<i64>,
    /// Epoch milliseconds, set by storage on every update after insert.
    updated_at: Option<i64>,
}

/// Unvalidated author shape shared by deserialization and row decoding.
///
/// Storage-owned fields are only filled by row decoding; JSON input never
/// carries an id or timestamps into a record.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthorRow {
    #[serde(skip_deserializing)]
    pub(crate) id: Option<AuthorId>,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) phone_number: Option<String>,
    #[serde(skip_deserializing)]
    pub(crate) created_at: Option<i64>,
    #[serde(skip_deserializing)]
    pub(crate) updated_at: Option<i64>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = AuthorValidationError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        let author = Self {
            id: row.id,
            name: row.name,
            phone_number: row.phone_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        author.validate()?;
        Ok(author)
    }
}

impl Author {
    /// Creates an unsaved author with a validated name and no phone number.
    pub fn new(name: impl Into<String>) -> Result<Self, AuthorValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id: None,
            name,
            phone_number: None,
            created_at: None,
            updated_at: None,
        })
    }

    /// Builder-style phone number assignment.
    pub fn with_phone_number(
        mut self,
        phone_number: impl Into<String>,
    ) -> Result<Self, AuthorValidationError> {
        self.set_phone_number(phone_number)?;
        Ok(self)
    }

    /// Reassigns `name`, validating only this field.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), AuthorValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Reassigns `phone_number`, validating only this field.
    pub fn set_phone_number(
        &mut self,
        phone_number: impl Into<String>,
    ) -> Result<(), AuthorValidationError> {
        let phone_number = phone_number.into();
        validate_phone_number(&phone_number)?;
        self.phone_number = Some(phone_number);
        Ok(())
    }

    /// Re-checks every field. Used by repositories on write and read paths.
    pub fn validate(&self) -> Result<(), AuthorValidationError> {
        validate_name(&self.name)?;
        if let Some(phone_number) = self.phone_number.as_deref() {
            validate_phone_number(phone_number)?;
        }
        Ok(())
    }

    pub fn id(&self) -> Option<AuthorId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    /// Whether storage has assigned an id yet.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Author(id={}, name={})", or_none(self.id), self.name)
    }
}
