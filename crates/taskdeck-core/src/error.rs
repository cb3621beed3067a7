//! Error types raised while validating or parsing user-facing input.

use thiserror::Error;

/// A task or category record is missing a required field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title is empty after trimming.
    #[error("Title is required")]
    EmptyTitle,
    /// Category is not set.
    #[error("Category is required")]
    MissingCategory,
    /// Category name is empty after trimming.
    #[error("Category name is required")]
    EmptyCategoryName,
}

/// A textual token could not be mapped onto a domain value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unknown priority name.
    #[error("unknown priority: {0}")]
    Priority(String),
    /// Unknown status filter name.
    #[error("unknown status filter: {0}")]
    Status(String),
    /// Unknown sort key name.
    #[error("unknown sort key: {0}")]
    SortKey(String),
}
