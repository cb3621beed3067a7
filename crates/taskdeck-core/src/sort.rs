//! Task orderings used by the board and archive listings.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::{fmt, str::FromStr};
use time::Date;

use crate::error::ParseError;
use crate::task::Task;

/// Board ordering: open before completed, then priority weight (high first),
/// then due date (dated first, earliest first), then newest creation first.
#[must_use]
pub fn compare_for_board(a: &Task, b: &Task) -> Ordering {
    compare_completion(a, b)
        .then_with(|| b.priority.weight().cmp(&a.priority.weight()))
        .then_with(|| compare_due_dates(a.due_date, b.due_date))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Archive ordering: most recently modified first.
#[must_use]
pub fn compare_for_archive(a: &Task, b: &Task) -> Ordering {
    b.updated_at.cmp(&a.updated_at)
}

/// Stable sort with [`compare_for_board`].
pub fn sort_for_board(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| compare_for_board(a, b));
}

/// Stable sort with [`compare_for_archive`].
pub fn sort_for_archive(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| compare_for_archive(a, b));
}

fn compare_completion(a: &Task, b: &Task) -> Ordering {
    // false < true, so open tasks come first.
    a.completed.cmp(&b.completed)
}

fn compare_due_dates(a: Option<Date>, b: Option<Date>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Single-criterion orderings offered by list commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Priority weight, high first.
    #[default]
    Priority,
    /// Due date ascending, undated last.
    DueDate,
    /// Creation time, newest first.
    Created,
    /// Modification time, newest first.
    Updated,
    /// Title, alphabetical.
    Title,
}

impl SortKey {
    /// Compare two tasks; completed tasks always sort after open ones.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        compare_completion(a, b).then_with(|| match self {
            Self::Priority => b.priority.weight().cmp(&a.priority.weight()),
            Self::DueDate => compare_due_dates(a.due_date, b.due_date),
            Self::Created => b.created_at.cmp(&a.created_at),
            Self::Updated => b.updated_at.cmp(&a.updated_at),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        })
    }

    /// Token used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::DueDate => "due_date",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "priority" => Ok(Self::Priority),
            "due_date" | "duedate" | "due" => Ok(Self::DueDate),
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "title" => Ok(Self::Title),
            _ => Err(ParseError::SortKey(s.to_owned())),
        }
    }
}

/// Return a sorted copy of `tasks` using a single key.
#[must_use]
pub fn sort_tasks(tasks: &[Task], key: SortKey) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use crate::priority::Priority;
    use crate::task::NewTask;
    use time::macros::{date, datetime};
    use time::{Duration, OffsetDateTime};

    fn task(id: u64, priority: Priority) -> Task {
        Task::from_new(
            TaskId(id),
            NewTask::new(format!("task {id}"), "Work").with_priority(priority),
            datetime!(2024-01-01 0:00 UTC),
        )
    }

    fn order(mut tasks: Vec<&Task>) -> Vec<u64> {
        sort_for_board(&mut tasks);
        tasks.iter().map(|task| task.id.0).collect()
    }

    #[test]
    fn open_tasks_precede_completed_ones() {
        let mut done_high = task(1, Priority::High);
        done_high.completed = true;
        let open_low = task(2, Priority::Low);
        assert_eq!(order(vec![&done_high, &open_low]), vec![2, 1]);
    }

    #[test]
    fn priority_then_due_date_then_creation() {
        let high = task(1, Priority::High);
        let mut medium_late = task(2, Priority::Medium);
        medium_late.due_date = Some(date!(2024-02-01));
        let mut medium_early = task(3, Priority::Medium);
        medium_early.due_date = Some(date!(2024-01-15));
        let mut medium_undated_new = task(4, Priority::Medium);
        medium_undated_new.created_at += Duration::days(2);
        let medium_undated_old = task(5, Priority::Medium);
        let low = task(6, Priority::Low);

        assert_eq!(
            order(vec![
                &low,
                &medium_undated_old,
                &medium_late,
                &high,
                &medium_undated_new,
                &medium_early,
            ]),
            vec![1, 3, 2, 4, 5, 6]
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let tasks: Vec<Task> = (1..=6)
            .map(|id| {
                let mut t = task(id, [Priority::Low, Priority::High, Priority::Medium][(id % 3) as usize]);
                t.completed = id % 2 == 0;
                t
            })
            .collect();
        let once = order(tasks.iter().collect());
        let mut again: Vec<&Task> = once
            .iter()
            .filter_map(|id| tasks.iter().find(|t| t.id.0 == *id))
            .collect();
        sort_for_board(&mut again);
        let twice: Vec<u64> = again.iter().map(|t| t.id.0).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn archive_orders_by_update_time() {
        let mut older = task(1, Priority::High);
        older.updated_at = OffsetDateTime::UNIX_EPOCH;
        let newer = task(2, Priority::Low);
        let mut tasks = vec![&older, &newer];
        sort_for_archive(&mut tasks);
        assert_eq!(tasks[0].id, TaskId(2));
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("due-date".parse::<SortKey>(), Ok(SortKey::DueDate));
        assert_eq!("Title".parse::<SortKey>(), Ok(SortKey::Title));
        assert!("random".parse::<SortKey>().is_err());
    }

    #[test]
    fn single_key_sorts_keep_completed_last() {
        let mut zed = task(1, Priority::Low);
        zed.title = "zed".into();
        let mut alpha_done = task(2, Priority::Low);
        alpha_done.title = "Alpha".into();
        alpha_done.completed = true;
        let mut beta = task(3, Priority::Low);
        beta.title = "beta".into();

        let sorted = sort_tasks(&[zed, alpha_done, beta], SortKey::Title);
        let titles: Vec<&str> = sorted.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["beta", "zed", "Alpha"]);
    }

    #[test]
    fn due_date_key_puts_undated_last() {
        let undated = task(1, Priority::Low);
        let mut dated = task(2, Priority::Low);
        dated.due_date = Some(date!(2030-01-01));
        let sorted = sort_tasks(&[undated, dated], SortKey::DueDate);
        assert_eq!(sorted[0].id, TaskId(2));
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use crate::id::TaskId;
    use crate::priority::Priority;
    use crate::task::NewTask;
    use proptest::prelude::*;
    use time::Duration;
    use time::macros::{date, datetime};

    fn sort_key() -> impl Strategy<Value = SortKey> {
        prop_oneof![
            Just(SortKey::Priority),
            Just(SortKey::DueDate),
            Just(SortKey::Created),
            Just(SortKey::Updated),
            Just(SortKey::Title),
        ]
    }

    prop_compose! {
        fn task()(
            id in 1u64..1_000,
            weight in 0usize..3,
            due in prop::option::of(0i64..60),
            completed in any::<bool>(),
            created in 0i64..1_000,
        ) -> Task {
            let priority = [Priority::Low, Priority::Medium, Priority::High][weight];
            let mut task = Task::from_new(
                TaskId(id),
                NewTask::new(format!("task {id}"), "Work").with_priority(priority),
                datetime!(2024-01-01 0:00 UTC) + Duration::minutes(created),
            );
            task.due_date = due.map(|days| date!(2024-01-01) + Duration::days(days));
            task.completed = completed;
            task
        }
    }

    proptest! {
        /// Board order never puts a completed task ahead of an open one and
        /// keeps priority weight non-increasing inside each completion group.
        #[test]
        fn board_order_groups_completion_then_priority(tasks in prop::collection::vec(task(), 0..40)) {
            let mut refs: Vec<&Task> = tasks.iter().collect();
            sort_for_board(&mut refs);
            prop_assert_eq!(refs.len(), tasks.len());
            for pair in refs.windows(2) {
                prop_assert!(!pair[0].completed || pair[1].completed);
                if pair[0].completed == pair[1].completed {
                    prop_assert!(pair[0].priority.weight() >= pair[1].priority.weight());
                }
            }
        }

        /// Every single-key ordering is a permutation with open tasks first.
        #[test]
        fn sort_key_keeps_open_tasks_first(
            tasks in prop::collection::vec(task(), 0..40),
            key in sort_key(),
        ) {
            let sorted = sort_tasks(&tasks, key);
            prop_assert_eq!(sorted.len(), tasks.len());
            prop_assert!(sorted.iter().all(|task| tasks.contains(task)));
            for pair in sorted.windows(2) {
                prop_assert!(!pair[0].completed || pair[1].completed);
            }
        }
    }
}
