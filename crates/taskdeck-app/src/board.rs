//! Local board cache kept in step with the stores.
//!
//! Every intent calls the store first and touches the cache only once the
//! call has succeeded. A failed call leaves the cache exactly as it was.

use std::collections::BTreeMap;

use taskdeck_core::stats::{category_counts, summarize};
use taskdeck_core::sort::sort_tasks;
use taskdeck_core::{
    ArchiveView, Category, CategoryId, CategoryPatch, EmptyState, NewCategory, NewTask, SortKey,
    Task, TaskId, TaskListView, TaskPatch, TaskQuery, TaskSummary, ValidationError, ViewContext,
    derive_archive_view, derive_view,
};
use tracing::{info, warn};

use crate::error::{BoardError, BoardResult};
use crate::store::{CategoryStore, TaskStore};
use crate::workspace::Workspace;

/// Outcome of [`TaskBoard::clear_archived`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClearArchived {
    /// Tasks deleted from the store and the cache.
    pub removed: Vec<TaskId>,
    /// Tasks the store refused to delete; they stay cached.
    pub failed: Vec<(TaskId, BoardError)>,
}

/// Cached tasks and categories plus the intents that mutate them.
#[derive(Debug)]
pub struct TaskBoard<T, C> {
    workspace: Workspace<T, C>,
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

#[allow(clippy::future_not_send)]
impl<T: TaskStore, C: CategoryStore> TaskBoard<T, C> {
    /// Board with an empty cache; call [`TaskBoard::load`] before rendering.
    #[must_use]
    pub const fn new(workspace: Workspace<T, C>) -> Self {
        Self {
            workspace,
            tasks: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Backing workspace.
    #[must_use]
    pub const fn workspace(&self) -> &Workspace<T, C> {
        &self.workspace
    }

    /// Cached tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Cached categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Cached task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Replace the cache with fresh snapshots of both stores.
    ///
    /// # Errors
    /// Returns the first store error; the previous cache is kept.
    pub async fn load(&mut self) -> BoardResult<()> {
        let tasks = store_call("load tasks", self.workspace.tasks().get_all().await)?;
        let categories = store_call(
            "load categories",
            self.workspace.categories().get_all().await,
        )?;
        info!(tasks = tasks.len(), categories = categories.len(), "Loaded board");
        self.tasks = tasks;
        self.categories = categories;
        Ok(())
    }

    /// Read a single task straight from the store.
    ///
    /// # Errors
    /// Returns [`BoardError::TaskNotFound`] when the store has no such task.
    pub async fn fetch_task(&self, id: TaskId) -> BoardResult<Task> {
        store_call("fetch task", self.workspace.tasks().get_by_id(id).await)
    }

    /// Create a task from form input.
    ///
    /// # Errors
    /// Returns a validation error for a blank title or category, or the store error.
    pub async fn create_task(&mut self, new: NewTask) -> BoardResult<Task> {
        new.validate()?;
        let task = store_call("create task", self.workspace.tasks().create(new).await)?;
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Overwrite the form-editable fields of a task.
    ///
    /// # Errors
    /// Returns a validation error for a blank title or category, or the store error.
    pub async fn save_task(&mut self, id: TaskId, form: NewTask) -> BoardResult<Task> {
        form.validate()?;
        self.update_task(id, TaskPatch::from_form(form), "save task")
            .await
    }

    /// Flip the completion flag of a cached task.
    ///
    /// # Errors
    /// Returns [`BoardError::TaskNotFound`] when the task is not cached, or the store error.
    pub async fn toggle_complete(&mut self, id: TaskId) -> BoardResult<Task> {
        let completed = self.task(id).ok_or(BoardError::TaskNotFound(id))?.completed;
        self.update_task(id, TaskPatch::completed(!completed), "toggle task")
            .await
    }

    /// Move a task to the archive.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn archive(&mut self, id: TaskId) -> BoardResult<Task> {
        let task = store_call("archive task", self.workspace.tasks().archive(id).await)?;
        self.replace_cached(task.clone());
        Ok(task)
    }

    /// Bring a task back from the archive.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn restore(&mut self, id: TaskId) -> BoardResult<Task> {
        let task = store_call("restore task", self.workspace.tasks().restore(id).await)?;
        self.replace_cached(task.clone());
        Ok(task)
    }

    /// Delete a task permanently.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn delete_task(&mut self, id: TaskId) -> BoardResult<()> {
        store_call("delete task", self.workspace.tasks().delete(id).await)?;
        self.tasks.retain(|task| task.id != id);
        Ok(())
    }

    /// Delete every archived task. Tasks whose delete fails stay cached.
    pub async fn clear_archived(&mut self) -> ClearArchived {
        let archived: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.archived)
            .map(|task| task.id)
            .collect();

        let mut outcome = ClearArchived::default();
        for id in archived {
            match store_call("clear archived", self.workspace.tasks().delete(id).await) {
                Ok(()) => {
                    self.tasks.retain(|task| task.id != id);
                    outcome.removed.push(id);
                }
                Err(err) => outcome.failed.push((id, err)),
            }
        }
        info!(
            removed = outcome.removed.len(),
            failed = outcome.failed.len(),
            "Cleared archive"
        );
        outcome
    }

    /// Create a category.
    ///
    /// # Errors
    /// Returns a validation error for a blank name, or the store error.
    pub async fn create_category(&mut self, new: NewCategory) -> BoardResult<Category> {
        new.validate()?;
        let category = store_call(
            "create category",
            self.workspace.categories().create(new).await,
        )?;
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Rename a category and every task that referenced the old name.
    ///
    /// # Errors
    /// See [`TaskBoard::update_category`].
    pub async fn rename_category(
        &mut self,
        id: &CategoryId,
        name: impl Into<String>,
    ) -> BoardResult<Category> {
        self.update_category(id, CategoryPatch::rename(name)).await
    }

    /// Patch a category. A name change is carried over to the tasks that
    /// used the previous name.
    ///
    /// The cache is only touched once the category and every affected task
    /// have been written. When a cascade step fails, the tasks already moved
    /// and the category itself are put back before the error is returned.
    ///
    /// # Errors
    /// Returns a validation error for a blank name, or the first store error.
    pub async fn update_category(
        &mut self,
        id: &CategoryId,
        patch: CategoryPatch,
    ) -> BoardResult<Category> {
        if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ValidationError::EmptyCategoryName.into());
        }

        let categories = self.workspace.categories();
        let before = store_call("update category", categories.get_by_id(id).await)?;
        let updated = store_call("update category", categories.update(id, patch).await)?;

        let moved = if before.name == updated.name {
            Vec::new()
        } else {
            match self.cascade_rename(&before.name, &updated.name).await {
                Ok(moved) => moved,
                Err((moved, err)) => {
                    self.rollback_rename(&before, &moved).await;
                    return Err(err);
                }
            }
        };

        match self.categories.iter_mut().find(|category| &category.id == id) {
            Some(cached) => *cached = updated.clone(),
            None => self.categories.push(updated.clone()),
        }
        for task in moved {
            self.replace_cached(task);
        }
        Ok(updated)
    }

    /// Delete a category. Tasks keep their category name.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn delete_category(&mut self, id: &CategoryId) -> BoardResult<()> {
        store_call(
            "delete category",
            self.workspace.categories().delete(id).await,
        )?;
        self.categories.retain(|category| &category.id != id);
        Ok(())
    }

    /// Default board for a view context.
    #[must_use]
    pub fn view(&self, ctx: &ViewContext) -> TaskListView {
        derive_view(&self.tasks, &self.categories, ctx)
    }

    /// Archive listing for a search query.
    #[must_use]
    pub fn archive_view(&self, search: &str) -> ArchiveView {
        derive_archive_view(&self.tasks, search)
    }

    /// Placeholder copy for an empty view.
    #[must_use]
    pub fn empty_state(&self, ctx: &ViewContext) -> EmptyState {
        EmptyState::for_context(ctx, &self.categories)
    }

    /// Dashboard summary over non-archived tasks, as of the workspace clock.
    #[must_use]
    pub fn summary(&self) -> TaskSummary {
        let active: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| !task.archived)
            .cloned()
            .collect();
        summarize(&active, self.workspace.clock().today())
    }

    /// Non-archived task count per category id.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<CategoryId, usize> {
        category_counts(&self.tasks, &self.categories)
    }

    /// Non-archived tasks matching `query`, ordered by `key`.
    #[must_use]
    pub fn find(&self, query: &TaskQuery, key: SortKey) -> Vec<Task> {
        let matched: Vec<Task> = query
            .apply(&self.tasks)
            .into_iter()
            .filter(|task| !task.archived)
            .cloned()
            .collect();
        sort_tasks(&matched, key)
    }

    async fn update_task(
        &mut self,
        id: TaskId,
        patch: TaskPatch,
        intent: &'static str,
    ) -> BoardResult<Task> {
        let task = store_call(intent, self.workspace.tasks().update(id, patch).await)?;
        self.replace_cached(task.clone());
        Ok(task)
    }

    /// Move every cached task named `from` over to `to` in the store.
    /// On failure, hands back the tasks moved so far with the error.
    async fn cascade_rename(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<Task>, (Vec<TaskId>, BoardError)> {
        let affected: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.category == from)
            .map(|task| task.id)
            .collect();
        let mut moved = Vec::with_capacity(affected.len());
        for id in affected {
            let result = self.workspace.tasks().update(id, TaskPatch::category(to)).await;
            match store_call("rename category", result) {
                Ok(task) => moved.push(task),
                Err(err) => return Err((moved.iter().map(|task| task.id).collect(), err)),
            }
        }
        info!(from, to, tasks = moved.len(), "Renamed category on tasks");
        Ok(moved)
    }

    async fn rollback_rename(&self, before: &Category, moved: &[TaskId]) {
        for id in moved {
            let result = self
                .workspace
                .tasks()
                .update(*id, TaskPatch::category(before.name.as_str()))
                .await;
            if let Err(err) = result {
                let err: BoardError = err.into();
                warn!(task = %id, error = %err, "Could not restore task category");
            }
        }
        let revert = CategoryPatch {
            name: Some(before.name.clone()),
            color: Some(before.color.clone()),
            icon: Some(before.icon.clone()),
        };
        if let Err(err) = self.workspace.categories().update(&before.id, revert).await {
            let err: BoardError = err.into();
            warn!(category = %before.id, error = %err, "Could not restore category");
        }
        info!(category = %before.id, tasks = moved.len(), "Rolled back category rename");
    }

    fn replace_cached(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|cached| cached.id == task.id) {
            Some(cached) => *cached = task,
            None => self.tasks.insert(0, task),
        }
    }
}

fn store_call<V, E: Into<BoardError>>(intent: &'static str, result: Result<V, E>) -> BoardResult<V> {
    result.map_err(|err| {
        let err = err.into();
        warn!(intent, error = %err, "Store call failed; board left unchanged");
        err
    })
}
