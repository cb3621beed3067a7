//! Aggregate counts shown in badges, the progress ring and the sidebar.

use serde::Serialize;
use std::collections::BTreeMap;
use time::Date;

use crate::category::Category;
use crate::due::is_overdue;
use crate::id::CategoryId;
use crate::priority::Priority;
use crate::task::Task;

/// Per-tab badge counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Every non-archived task.
    pub all: usize,
    /// Open tasks.
    pub pending: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Open High-priority tasks.
    pub high: usize,
}

/// Progress figures over the non-archived task set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ViewStats {
    /// Number of non-archived tasks.
    pub total: usize,
    /// Number of completed non-archived tasks.
    pub completed: usize,
    /// `completed / total * 100`, or 0 for an empty board.
    pub percentage: f64,
    /// Per-tab badge counts.
    pub counts: StatusCounts,
}

/// Compute [`ViewStats`] over every non-archived task, regardless of the
/// active category, status tab or search.
#[must_use]
pub fn compute_stats(tasks: &[Task]) -> ViewStats {
    let mut counts = StatusCounts::default();
    for task in tasks.iter().filter(|task| !task.archived) {
        counts.all += 1;
        if task.completed {
            counts.completed += 1;
        } else {
            counts.pending += 1;
            if task.priority == Priority::High {
                counts.high += 1;
            }
        }
    }

    ViewStats {
        total: counts.all,
        completed: counts.completed,
        percentage: percentage(counts.completed, counts.all),
        counts,
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Open-task counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    /// Open High tasks.
    pub high: usize,
    /// Open Medium tasks.
    pub medium: usize,
    /// Open Low tasks.
    pub low: usize,
}

/// Summary used by the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Tasks considered.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Open tasks.
    pub pending: usize,
    /// Open tasks whose due date has passed.
    pub overdue: usize,
    /// Open tasks per priority.
    pub by_priority: PriorityCounts,
    /// Completion rate rounded to a whole percent.
    pub completion_rate: u8,
}

/// Summarize `tasks` as of `today`. The caller decides which tasks to pass in.
#[must_use]
pub fn summarize(tasks: &[Task], today: Date) -> TaskSummary {
    let mut summary = TaskSummary {
        total: tasks.len(),
        ..TaskSummary::default()
    };

    for task in tasks {
        if task.completed {
            summary.completed += 1;
            continue;
        }
        summary.pending += 1;
        if is_overdue(task.due_date, task.completed, today) {
            summary.overdue += 1;
        }
        match task.priority {
            Priority::High => summary.by_priority.high += 1,
            Priority::Medium => summary.by_priority.medium += 1,
            Priority::Low => summary.by_priority.low += 1,
        }
    }

    summary.completion_rate = rounded_rate(summary.completed, summary.total);
    summary
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn rounded_rate(part: usize, whole: usize) -> u8 {
    percentage(part, whole).round().clamp(0.0, 100.0) as u8
}

/// Number of non-archived tasks in each category, keyed by category id.
///
/// Categories without tasks are present with a zero count; tasks whose
/// category name matches no category are not counted.
#[must_use]
pub fn category_counts(tasks: &[Task], categories: &[Category]) -> BTreeMap<CategoryId, usize> {
    categories
        .iter()
        .map(|category| {
            let count = tasks
                .iter()
                .filter(|task| !task.archived && task.category == category.name)
                .count();
            (category.id.clone(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::NewCategory;
    use crate::id::TaskId;
    use crate::task::NewTask;
    use time::OffsetDateTime;
    use time::macros::date;

    fn task(id: u64, priority: Priority, completed: bool, archived: bool) -> Task {
        let mut task = Task::from_new(
            TaskId(id),
            NewTask::new(format!("t{id}"), "Work").with_priority(priority),
            OffsetDateTime::UNIX_EPOCH,
        );
        task.completed = completed;
        task.archived = archived;
        task
    }

    #[test]
    fn empty_board_has_zero_stats() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completed, 0);
        assert!(stats.percentage.abs() < f64::EPSILON);
        assert_eq!(stats.counts, StatusCounts::default());
    }

    #[test]
    fn stats_ignore_archived_tasks() {
        let tasks = vec![
            task(1, Priority::High, false, false),
            task(2, Priority::High, true, false),
            task(3, Priority::Low, false, false),
            task(4, Priority::High, false, true),
        ];
        let stats = compute_stats(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(
            stats.counts,
            StatusCounts {
                all: 3,
                pending: 2,
                completed: 1,
                high: 1,
            }
        );
        assert!((stats.percentage - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.counts.all, stats.counts.pending + stats.counts.completed);
    }

    #[test]
    fn summary_counts_overdue_and_priorities() {
        let mut overdue = task(1, Priority::Medium, false, false);
        overdue.due_date = Some(date!(2024-01-01));
        let mut done_late = task(2, Priority::High, true, false);
        done_late.due_date = Some(date!(2024-01-01));
        let tasks = vec![overdue, done_late, task(3, Priority::Low, false, false)];

        let summary = summarize(&tasks, date!(2024-02-01));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.overdue, 1);
        assert_eq!(
            summary.by_priority,
            PriorityCounts {
                high: 0,
                medium: 1,
                low: 1,
            }
        );
        assert_eq!(summary.completion_rate, 33);
    }

    #[test]
    fn category_counts_skip_archived() {
        let categories = vec![
            Category::from_new(CategoryId::from_number(1), NewCategory::new("Work")),
            Category::from_new(CategoryId::from_number(2), NewCategory::new("Home")),
        ];
        let tasks = vec![
            task(1, Priority::Low, false, false),
            task(2, Priority::Low, true, false),
            task(3, Priority::Low, false, true),
        ];
        let counts = category_counts(&tasks, &categories);
        assert_eq!(counts.get(&CategoryId::from_number(1)), Some(&2));
        assert_eq!(counts.get(&CategoryId::from_number(2)), Some(&0));
    }
}
