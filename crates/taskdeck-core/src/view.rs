//! View models derived from the raw task and category collections.
//!
//! Everything here is a pure function of its inputs: calling it twice with the
//! same data yields the same output.

use serde::Serialize;

use crate::category::{Category, find_category};
use crate::filter::{StatusFilter, ViewContext, filter_archived, filter_visible};
use crate::sort::{sort_for_archive, sort_for_board};
use crate::stats::{ViewStats, compute_stats};
use crate::task::Task;

/// Ordered visible tasks plus badge statistics for the default board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskListView {
    /// Tasks to render, in display order.
    pub tasks: Vec<Task>,
    /// Progress and badge counts over every non-archived task.
    pub stats: ViewStats,
}

/// Ordered tasks for the archive listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveView {
    /// Archived tasks, most recently modified first.
    pub tasks: Vec<Task>,
}

/// Derive the default board for a view context.
#[must_use]
pub fn derive_view(tasks: &[Task], categories: &[Category], ctx: &ViewContext) -> TaskListView {
    let mut visible = filter_visible(tasks, categories, ctx);
    sort_for_board(&mut visible);
    TaskListView {
        tasks: visible.into_iter().cloned().collect(),
        stats: compute_stats(tasks),
    }
}

/// Derive the archive listing for a search query.
#[must_use]
pub fn derive_archive_view(tasks: &[Task], search: &str) -> ArchiveView {
    let mut archived = filter_archived(tasks, search);
    sort_for_archive(&mut archived);
    ArchiveView {
        tasks: archived.into_iter().cloned().collect(),
    }
}

/// Placeholder copy shown when a board view is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    /// Headline.
    pub message: String,
    /// Hint under the headline.
    pub description: String,
}

impl EmptyState {
    /// Pick the copy for an empty view; search wins over the status tab,
    /// which wins over the category.
    #[must_use]
    pub fn for_context(ctx: &ViewContext, categories: &[Category]) -> Self {
        let searching = ctx.matcher().is_some();
        let message = if searching {
            "No tasks match your search".to_owned()
        } else {
            match ctx.status {
                StatusFilter::Completed => "No completed tasks yet".to_owned(),
                StatusFilter::Pending => "No pending tasks".to_owned(),
                StatusFilter::High => "No high priority tasks".to_owned(),
                StatusFilter::All => ctx
                    .category
                    .id()
                    .and_then(|id| find_category(categories, id))
                    .map_or_else(
                        || "No tasks yet".to_owned(),
                        |category| format!("No tasks in {}", category.name),
                    ),
            }
        };

        let description = if searching {
            "Try adjusting your search terms or filters"
        } else if ctx.status == StatusFilter::Completed {
            "Complete some tasks to see them here"
        } else {
            "Create your first task to get started with organizing your day"
        };

        Self {
            message,
            description: description.to_owned(),
        }
    }
}
