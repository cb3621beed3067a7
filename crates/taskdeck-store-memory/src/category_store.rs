//! In-memory category store.

use taskdeck_core::{Category, CategoryId, CategoryPatch, NewCategory};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{FaultSlot, StoreError};
use crate::latency::{Latency, Operation};

#[derive(Debug)]
struct CategoryState {
    categories: Vec<Category>,
    fault: FaultSlot,
}

impl CategoryState {
    fn position(&self, id: &CategoryId) -> Result<usize, StoreError> {
        self.categories
            .iter()
            .position(|category| &category.id == id)
            .ok_or_else(|| StoreError::CategoryNotFound(id.clone()))
    }

    fn next_id(&self) -> Result<CategoryId, StoreError> {
        let max = self
            .categories
            .iter()
            .filter_map(|category| category.id.number())
            .max()
            .unwrap_or(0);
        max.checked_add(1)
            .map(CategoryId::from_number)
            .ok_or(StoreError::IdsExhausted)
    }
}

/// In-memory category collection, in creation order.
#[derive(Debug)]
pub struct MemoryCategoryStore {
    state: Mutex<CategoryState>,
    latency: Latency,
}

impl MemoryCategoryStore {
    /// Empty store.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self::with_categories(Vec::new(), latency)
    }

    /// Store pre-populated with `categories`.
    #[must_use]
    pub fn with_categories(categories: Vec<Category>, latency: Latency) -> Self {
        Self {
            state: Mutex::new(CategoryState {
                categories,
                fault: FaultSlot::new(),
            }),
            latency,
        }
    }

    /// Make the next operation fail with [`StoreError::Unavailable`].
    pub async fn fail_next(&self, reason: impl Into<String>) {
        self.state.lock().await.fault.arm(reason.into());
    }

    /// Snapshot of every category.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] when a failure was armed.
    pub async fn get_all(&self) -> Result<Vec<Category>, StoreError> {
        self.latency.wait(Operation::ListCategories).await;
        let mut state = self.state.lock().await;
        state.fault.check()?;
        debug!(count = state.categories.len(), "Listed categories");
        Ok(state.categories.clone())
    }

    /// Fetch one category.
    ///
    /// # Errors
    /// Returns [`StoreError::CategoryNotFound`] when no category carries `id`.
    pub async fn get_by_id(&self, id: &CategoryId) -> Result<Category, StoreError> {
        self.latency.wait(Operation::GetCategory).await;
        let mut state = self.state.lock().await;
        state.fault.check()?;
        let index = state.position(id)?;
        Ok(state.categories[index].clone())
    }

    /// Append a category with the next numeric id.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] when a failure was armed, or
    /// [`StoreError::IdsExhausted`] when the largest numeric id is `u64::MAX`.
    pub async fn create(&self, new: NewCategory) -> Result<Category, StoreError> {
        self.latency.wait(Operation::CreateCategory).await;
        let mut state = self.state.lock().await;
        state.fault.check()?;
        let category = Category::from_new(state.next_id()?, new);
        state.categories.push(category.clone());
        drop(state);
        info!(category = %category.id, name = %category.name, "Created category");
        Ok(category)
    }

    /// Merge `patch` into the category and return the merged record.
    ///
    /// # Errors
    /// Returns [`StoreError::CategoryNotFound`] when no category carries `id`.
    pub async fn update(&self, id: &CategoryId, patch: CategoryPatch) -> Result<Category, StoreError> {
        self.latency.wait(Operation::UpdateCategory).await;
        let mut state = self.state.lock().await;
        state.fault.check()?;
        let index = state.position(id)?;
        let category = &mut state.categories[index];
        category.apply(patch);
        let updated = category.clone();
        drop(state);
        info!(category = %id, "Updated category");
        Ok(updated)
    }

    /// Remove a category. Tasks referencing it are left alone.
    ///
    /// # Errors
    /// Returns [`StoreError::CategoryNotFound`] when no category carries `id`.
    pub async fn delete(&self, id: &CategoryId) -> Result<(), StoreError> {
        self.latency.wait(Operation::DeleteCategory).await;
        let mut state = self.state.lock().await;
        state.fault.check()?;
        let index = state.position(id)?;
        state.categories.remove(index);
        drop(state);
        info!(category = %id, "Deleted category");
        Ok(())
    }
}
