//! Async storage abstraction consumed by the board.

use taskdeck_core::{Category, CategoryId, CategoryPatch, NewCategory, NewTask, Task, TaskId, TaskPatch};
use taskdeck_store_memory::{MemoryCategoryStore, MemoryTaskStore, StoreError};

use crate::error::BoardError;

/// Async task storage.
#[allow(async_fn_in_trait)]
pub trait TaskStore: Send + Sync {
    /// Error type bubbled up from the backing store.
    type Error: Into<BoardError> + Send;

    /// Snapshot of every task in store order.
    ///
    /// # Errors
    /// Returns a store-specific error when listing fails.
    async fn get_all(&self) -> Result<Vec<Task>, Self::Error>;

    /// Fetch one task.
    ///
    /// # Errors
    /// Returns a store-specific error when the task is missing or cannot be read.
    async fn get_by_id(&self, id: TaskId) -> Result<Task, Self::Error>;

    /// Insert a task and return the stored record.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    async fn create(&self, new: NewTask) -> Result<Task, Self::Error>;

    /// Merge a patch into a task and return the merged record.
    ///
    /// # Errors
    /// Returns a store-specific error when the task is missing or persisting fails.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, Self::Error>;

    /// Remove a task.
    ///
    /// # Errors
    /// Returns a store-specific error when the task is missing or persisting fails.
    async fn delete(&self, id: TaskId) -> Result<(), Self::Error>;

    /// Set the archive flag.
    ///
    /// # Errors
    /// Same as [`TaskStore::update`].
    async fn archive(&self, id: TaskId) -> Result<Task, Self::Error> {
        self.update(id, TaskPatch::archived(true)).await
    }

    /// Clear the archive flag.
    ///
    /// # Errors
    /// Same as [`TaskStore::update`].
    async fn restore(&self, id: TaskId) -> Result<Task, Self::Error> {
        self.update(id, TaskPatch::archived(false)).await
    }
}

/// Async category storage.
#[allow(async_fn_in_trait)]
pub trait CategoryStore: Send + Sync {
    /// Error type bubbled up from the backing store.
    type Error: Into<BoardError> + Send;

    /// Snapshot of every category.
    ///
    /// # Errors
    /// Returns a store-specific error when listing fails.
    async fn get_all(&self) -> Result<Vec<Category>, Self::Error>;

    /// Fetch one category.
    ///
    /// # Errors
    /// Returns a store-specific error when the category is missing or cannot be read.
    async fn get_by_id(&self, id: &CategoryId) -> Result<Category, Self::Error>;

    /// Insert a category and return the stored record.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    async fn create(&self, new: NewCategory) -> Result<Category, Self::Error>;

    /// Merge a patch into a category and return the merged record.
    ///
    /// # Errors
    /// Returns a store-specific error when the category is missing or persisting fails.
    async fn update(&self, id: &CategoryId, patch: CategoryPatch) -> Result<Category, Self::Error>;

    /// Remove a category.
    ///
    /// # Errors
    /// Returns a store-specific error when the category is missing or persisting fails.
    async fn delete(&self, id: &CategoryId) -> Result<(), Self::Error>;
}

impl TaskStore for MemoryTaskStore {
    type Error = StoreError;

    async fn get_all(&self) -> Result<Vec<Task>, Self::Error> {
        Self::get_all(self).await
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Task, Self::Error> {
        Self::get_by_id(self, id).await
    }

    async fn create(&self, new: NewTask) -> Result<Task, Self::Error> {
        Self::create(self, new).await
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, Self::Error> {
        Self::update(self, id, patch).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
        Self::delete(self, id).await
    }

    async fn archive(&self, id: TaskId) -> Result<Task, Self::Error> {
        Self::archive(self, id).await
    }

    async fn restore(&self, id: TaskId) -> Result<Task, Self::Error> {
        Self::restore(self, id).await
    }
}

impl CategoryStore for MemoryCategoryStore {
    type Error = StoreError;

    async fn get_all(&self) -> Result<Vec<Category>, Self::Error> {
        Self::get_all(self).await
    }

    async fn get_by_id(&self, id: &CategoryId) -> Result<Category, Self::Error> {
        Self::get_by_id(self, id).await
    }

    async fn create(&self, new: NewCategory) -> Result<Category, Self::Error> {
        Self::create(self, new).await
    }

    async fn update(&self, id: &CategoryId, patch: CategoryPatch) -> Result<Category, Self::Error> {
        Self::update(self, id, patch).await
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), Self::Error> {
        Self::delete(self, id).await
    }
}
