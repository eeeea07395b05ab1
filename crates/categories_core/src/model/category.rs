//! Category domain model.
//!
//! # Responsibility
//! - Define the canonical category record and its create/update input.
//! - Enforce title length bounds on every typed construction path.
//!
//! # Invariants
//! - `title` length is within `TITLE_MIN_CHARS..=TITLE_MAX_CHARS` chars.
//! - `slug` lowercases the title and hyphenates the first space only.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned category identifier.
pub type CategoryId = i64;

/// Minimum title length, counted in chars.
pub const TITLE_MIN_CHARS: usize = 3;
/// Maximum title length, counted in chars.
pub const TITLE_MAX_CHARS: usize = 1024;

/// Domain validation failures for category titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    /// Title has fewer than `TITLE_MIN_CHARS` chars.
    TitleTooShort { len: usize },
    /// Title has more than `TITLE_MAX_CHARS` chars.
    TitleTooLong { len: usize },
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleTooShort { .. } => write!(f, "title must be at least three letters"),
            Self::TitleTooLong { .. } => write!(f, "title must be at most 1024 letters"),
        }
    }
}

impl Error for CategoryValidationError {}

/// Persisted category record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned id, immutable after insert.
    pub id: CategoryId,
    /// Display name.
    pub title: String,
    /// Lookup key derived from `title`.
    pub slug: String,
}

impl Category {
    /// Checks the persisted title against the shared bounds.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_title(&self.title)
    }
}

/// Input for create and update requests.
///
/// Deserialization runs the title check, so a decoded value is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CategoryToCreateWire")]
pub struct CategoryToCreate {
    pub title: String,
}

impl CategoryToCreate {
    /// Builds a validated input from a title.
    pub fn new(title: impl Into<String>) -> Result<Self, CategoryValidationError> {
        let input = Self {
            title: title.into(),
        };
        input.validate()?;
        Ok(input)
    }

    /// Re-checks title bounds. Fields are public, so writers call this again.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_title(&self.title)
    }

    /// Slug the store will persist for this input.
    pub fn slug(&self) -> String {
        derive_slug(&self.title)
    }
}

#[derive(Deserialize)]
struct CategoryToCreateWire {
    title: String,
}

impl TryFrom<CategoryToCreateWire> for CategoryToCreate {
    type Error = CategoryValidationError;

    fn try_from(value: CategoryToCreateWire) -> Result<Self, Self::Error> {
        Self::new(value.title)
    }
}

/// Checks a title against `TITLE_MIN_CHARS..=TITLE_MAX_CHARS`.
pub fn validate_title(title: &str) -> Result<(), CategoryValidationError> {
    let len = title.chars().count();
    if len < TITLE_MIN_CHARS {
        return Err(CategoryValidationError::TitleTooShort { len });
    }
    if len > TITLE_MAX_CHARS {
        return Err(CategoryValidationError::TitleTooLong { len });
    }
    Ok(())
}

/// Derives the lookup slug for a title.
///
/// Lowercases, then replaces only the first space with `-`; later spaces are
/// kept as-is, so `"A B C"` becomes `"a-b c"`.
pub fn derive_slug(title: &str) -> String {
    title.to_lowercase().replacen(' ', "-", 1)
}

/// Fixture categories seeded into fresh stores.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            title: "HTML".to_string(),
            slug: "html".to_string(),
        },
        Category {
            id: 2,
            title: "CSS".to_string(),
            slug: "css".to_string(),
        },
        Category {
            id: 3,
            title: "JavaScript".to_string(),
            slug: "js".to_string(),
        },
    ]
}
