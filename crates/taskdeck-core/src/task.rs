//! Task records plus the form input and patch types that change them.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::ValidationError;
use crate::id::TaskId;
use crate::priority::Priority;

/// A unit of work on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Short summary; never empty for records created through the board.
    pub title: String,
    /// Free-form details.
    #[serde(default)]
    pub description: String,
    /// Urgency.
    #[serde(default)]
    pub priority: Priority,
    /// Name of the category this task belongs to.
    pub category: String,
    /// Optional calendar due date.
    #[serde(default, with = "crate::due::serde_option")]
    pub due_date: Option<Date>,
    /// Whether the work is done.
    #[serde(default)]
    pub completed: bool,
    /// Hidden from the default views when set.
    #[serde(default)]
    pub archived: bool,
    /// Creation timestamp (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Timestamp of the latest mutation (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Task {
    /// Materialize a freshly created record from its input fields.
    #[must_use]
    pub fn from_new(id: TaskId, new: NewTask, now: OffsetDateTime) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description.unwrap_or_default(),
            priority: new.priority.unwrap_or_default(),
            category: new.category,
            due_date: new.due_date,
            completed: false,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update over this record.
    ///
    /// The identifier is never touched; `updated_at` is refreshed to `now`.
    pub fn apply(&mut self, patch: TaskPatch, now: OffsetDateTime) {
        let TaskPatch {
            title,
            description,
            priority,
            category,
            due_date,
            completed,
            archived,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        if let Some(archived) = archived {
            self.archived = archived;
        }
        self.updated_at = now;
    }

    /// Whether the task is both incomplete and marked High.
    #[must_use]
    pub fn is_high_pending(&self) -> bool {
        self.priority == Priority::High && !self.completed
    }
}

/// Input fields for creating a task; missing fields take store defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Short summary.
    pub title: String,
    /// Optional details (defaults to empty).
    #[serde(default)]
    pub description: Option<String>,
    /// Optional urgency (defaults to Medium).
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Category name.
    pub category: String,
    /// Optional due date.
    #[serde(default, with = "crate::due::serde_option")]
    pub due_date: Option<Date>,
}

impl NewTask {
    /// Start a new task with its two required fields.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Date) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Check required fields the way the task form does.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyTitle`] for a blank title and
    /// [`ValidationError::MissingCategory`] for a blank category.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(())
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement category name.
    pub category: Option<String>,
    /// Replacement due date; `Some(None)` clears it.
    pub due_date: Option<Option<Date>>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
    /// Replacement archive flag.
    pub archived: Option<bool>,
}

impl TaskPatch {
    /// Patch that only sets the completion flag.
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Patch that only sets the archive flag.
    #[must_use]
    pub fn archived(archived: bool) -> Self {
        Self {
            archived: Some(archived),
            ..Self::default()
        }
    }

    /// Patch that moves the task to another category.
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Patch that replaces every form-editable field of a task.
    #[must_use]
    pub fn from_form(form: NewTask) -> Self {
        Self {
            title: Some(form.title),
            description: Some(form.description.unwrap_or_default()),
            priority: Some(form.priority.unwrap_or_default()),
            category: Some(form.category),
            due_date: Some(form.due_date),
            ..Self::default()
        }
    }
}
