//! In-memory task store.

use std::sync::Arc;

use taskdeck_core::{Clock, NewTask, Task, TaskId, TaskPatch};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{FaultSlot, StoreError};
use crate::latency::{Latency, Operation};

#[derive(Debug)]
struct TaskState {
    tasks: Vec<Task>,
    next_id: Option<TaskId>,
    fault: FaultSlot,
}

impl TaskState {
    fn position(&self, id: TaskId) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::TaskNotFound(id))
    }
}

/// Authoritative in-memory task collection, newest first.
pub struct MemoryTaskStore {
    state: Mutex<TaskState>,
    latency: Latency,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for MemoryTaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTaskStore")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl MemoryTaskStore {
    /// Empty store.
    #[must_use]
    pub fn new(latency: Latency, clock: Arc<dyn Clock>) -> Self {
        Self::with_tasks(Vec::new(), latency, clock)
    }

    /// Store pre-populated with `tasks`, kept in the given order.
    ///
    /// The id counter starts one past the highest seeded id. A seed holding
    /// `u64::MAX` leaves no id to hand out, so `create` fails from then on.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>, latency: Latency, clock: Arc<dyn Clock>) -> Self {
        let next_id = tasks
            .iter()
            .map(|task| task.id)
            .max()
            .map_or(Some(TaskId(1)), TaskId::checked_next);
        Self {
            state: Mutex::new(TaskState {
                tasks,
                next_id,
                fault: FaultSlot::new(),
            }),
            latency,
            clock,
        }
    }

    /// Make the next operation fail with [`StoreError::Unavailable`].
    pub async fn fail_next(&self, reason: impl Into<String>) {
        self.state.lock().await.fault.arm(reason.into());
    }

    /// Snapshot of every task in store order.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] when a failure was armed.
    pub async fn get_all(&self) -> Result<Vec<Task>, StoreError> {
        self.latency.wait(Operation::ListTasks).await;
        let mut state = self.state.lock().await;
        state.fault.check()?;
        debug!(count = state.tasks.len(), "Listed tasks");
        Ok(state.tasks.clone())
    }

    /// Fetch one task.
    ///
    /// # Errors
    /// Returns [`StoreError::TaskNotFound`] when no task carries `id`.
    pub async fn get_by_id(&self, id: TaskId) -> Result<Task, StoreError> {
        self.latency.wait(Operation::GetTask).await;
        let mut state = self.state.lock().await;
        state.fault.check()?;
        let index = state.position(id)?;
        Ok(state.tasks[index].clone())
    }

    /// Insert a task at the front and return it.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] when a failure was armed, or
    /// [`StoreError::IdsExhausted`] when no id is left.
    pub async fn create(&self, new: NewTask) -> Result<Task, StoreError> {
        self.latency.wait(Operation::CreateTask).await;
        let now = self.clock.now();
        let mut state = self.state.lock().await;
        state.fault.check()?;
        let id = state.next_id.ok_or(StoreError::IdsExhausted)?;
        state.next_id = id.checked_next();
        let task = Task::from_new(id, new, now);
        state.tasks.insert(0, task.clone());
        drop(state);
        info!(task = %id, title = %task.title, "Created task");
        Ok(task)
    }

    /// Merge `patch` into the task and return the merged record.
    ///
    /// # Errors
    /// Returns [`StoreError::TaskNotFound`] when no task carries `id`.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        self.latency.wait(Operation::UpdateTask).await;
        let now = self.clock.now();
        let mut state = self.state.lock().await;
        state.fault.check()?;
        let index = state.position(id)?;
        let task = &mut state.tasks[index];
        task.apply(patch, now);
        let updated = task.clone();
        drop(state);
        info!(task = %id, "Updated task");
        Ok(updated)
    }

    /// Remove a task.
    ///
    /// # Errors
    /// Returns [`StoreError::TaskNotFound`] when no task carries `id`.
    pub async fn delete(&self, id: TaskId) -> Result<(), StoreError> {
        self.latency.wait(Operation::DeleteTask).await;
        let mut state = self.state.lock().await;
        state.fault.check()?;
        let index = state.position(id)?;
        state.tasks.remove(index);
        drop(state);
        info!(task = %id, "Deleted task");
        Ok(())
    }

    /// Hide a task from the default views.
    ///
    /// # Errors
    /// Returns [`StoreError::TaskNotFound`] when no task carries `id`.
    pub async fn archive(&self, id: TaskId) -> Result<Task, StoreError> {
        self.update(id, TaskPatch::archived(true)).await
    }

    /// Bring an archived task back.
    ///
    /// # Errors
    /// Returns [`StoreError::TaskNotFound`] when no task carries `id`.
    pub async fn restore(&self, id: TaskId) -> Result<Task, StoreError> {
        self.update(id, TaskPatch::archived(false)).await
    }

    /// Tasks whose category name equals `category`.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] when a failure was armed.
    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Task>, StoreError> {
        self.query(|task| task.category == category).await
    }

    /// Tasks whose completion flag equals `completed`.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] when a failure was armed.
    pub async fn get_by_status(&self, completed: bool) -> Result<Vec<Task>, StoreError> {
        self.query(|task| task.completed == completed).await
    }

    async fn query(&self, keep: impl Fn(&Task) -> bool + Send) -> Result<Vec<Task>, StoreError> {
        self.latency.wait(Operation::QueryTasks).await;
        let mut state = self.state.lock().await;
        state.fault.check()?;
        Ok(state.tasks.iter().filter(|task| keep(task)).cloned().collect())
    }
}
