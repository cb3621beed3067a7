//! Explicit context owning the stores for one board.

use std::sync::Arc;

use taskdeck_core::{Clock, SystemClock};
use taskdeck_store_memory::{MemoryCategoryStore, MemoryTaskStore};
use tracing::debug;

use crate::config::AppConfig;
use crate::seed::Seed;
use crate::store::{CategoryStore, TaskStore};

/// One task store, one category store and the clock they share.
pub struct Workspace<T, C> {
    tasks: T,
    categories: C,
    clock: Arc<dyn Clock>,
}

impl<T, C> std::fmt::Debug for Workspace<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace").finish_non_exhaustive()
    }
}

impl<T: TaskStore, C: CategoryStore> Workspace<T, C> {
    /// Assemble a workspace from already constructed stores.
    #[must_use]
    pub const fn new(tasks: T, categories: C, clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks,
            categories,
            clock,
        }
    }

    /// Task store.
    #[must_use]
    pub const fn tasks(&self) -> &T {
        &self.tasks
    }

    /// Category store.
    #[must_use]
    pub const fn categories(&self) -> &C {
        &self.categories
    }

    /// Shared time source.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

/// Workspace backed by the in-memory stores.
pub type MemoryWorkspace = Workspace<MemoryTaskStore, MemoryCategoryStore>;

impl MemoryWorkspace {
    /// In-memory stores filled from `seed`, using the system clock.
    #[must_use]
    pub fn in_memory(config: &AppConfig, seed: Seed) -> Self {
        Self::in_memory_with_clock(config, seed, Arc::new(SystemClock))
    }

    /// In-memory stores filled from `seed`, stamping records with `clock`.
    #[must_use]
    pub fn in_memory_with_clock(config: &AppConfig, seed: Seed, clock: Arc<dyn Clock>) -> Self {
        let latency = config.store.latency();
        debug!(
            ?latency,
            tasks = seed.tasks.len(),
            categories = seed.categories.len(),
            "Building in-memory workspace"
        );
        let tasks = MemoryTaskStore::with_tasks(seed.tasks, latency, Arc::clone(&clock));
        let categories = MemoryCategoryStore::with_categories(seed.categories, latency);
        Self::new(tasks, categories, clock)
    }
}
