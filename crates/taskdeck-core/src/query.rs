//! Ad-hoc task queries combining field, text and date-range clauses.

use time::Date;

use crate::priority::Priority;
use crate::task::Task;
use crate::text_matcher::TextMatcher;

/// Conjunction of optional clauses; an empty query keeps every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Required completion flag.
    pub completed: Option<bool>,
    /// Required priority.
    pub priority: Option<Priority>,
    /// Required category name (exact match).
    pub category: Option<String>,
    /// Case-insensitive search over title, description and category.
    pub text: Option<String>,
    /// Inclusive lower bound on the task date.
    pub due_from: Option<Date>,
    /// Inclusive upper bound on the task date.
    pub due_to: Option<Date>,
}

impl TaskQuery {
    /// Whether `task` satisfies every clause.
    ///
    /// Date bounds compare against the due date, falling back to the
    /// creation date for undated tasks.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.completed.is_some_and(|completed| task.completed != completed) {
            return false;
        }
        if self.priority.is_some_and(|priority| task.priority != priority) {
            return false;
        }
        if self.category.as_deref().is_some_and(|name| task.category != name) {
            return false;
        }
        if let Some(matcher) = self.text.as_deref().and_then(TextMatcher::new)
            && !matcher.matches(task)
        {
            return false;
        }

        let date = task.due_date.unwrap_or_else(|| task.created_at.date());
        if self.due_from.is_some_and(|from| date < from) {
            return false;
        }
        !self.due_to.is_some_and(|to| date > to)
    }

    /// Tasks satisfying the query, in input order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}
