//! Errors surfaced by board intents.

use taskdeck_core::{CategoryId, TaskId, ValidationError};
use taskdeck_store_memory::StoreError;
use thiserror::Error;

/// Failure of a board intent. The board cache is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// No task carries the requested id.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// No category carries the requested id.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Input rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transient backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for BoardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TaskNotFound(id) => Self::TaskNotFound(id),
            StoreError::CategoryNotFound(id) => Self::CategoryNotFound(id),
            StoreError::Unavailable(reason) => Self::Backend(reason),
            err @ StoreError::IdsExhausted => Self::Backend(err.to_string()),
        }
    }
}

/// Result alias for board intents.
pub type BoardResult<T> = Result<T, BoardError>;
