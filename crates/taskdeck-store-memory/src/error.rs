//! Error types for in-memory store operations.

use taskdeck_core::{CategoryId, TaskId};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No task carries the requested id.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// No category carries the requested id.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Every numeric id is taken; nothing more can be created.
    #[error("No identifiers left to assign")]
    IdsExhausted,

    /// The backend could not serve the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// One-shot failure armed by `fail_next` on either store.
#[derive(Debug, Default)]
pub(crate) struct FaultSlot(Option<String>);

impl FaultSlot {
    pub(crate) const fn new() -> Self {
        Self(None)
    }

    pub(crate) fn arm(&mut self, reason: String) {
        self.0 = Some(reason);
    }

    pub(crate) fn check(&mut self) -> Result<(), StoreError> {
        self.0.take().map_or(Ok(()), |reason| Err(StoreError::Unavailable(reason)))
    }
}
