//! View context and the predicates that derive the visible task set.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::category::{Category, find_category};
use crate::error::ParseError;
use crate::id::CategoryId;
use crate::task::Task;
use crate::text_matcher::TextMatcher;

/// Category selection of the current view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Only the category carrying this id.
    Id(CategoryId),
}

impl CategoryFilter {
    /// Interpret an optional route/flag value: missing, blank or `all` select every category.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(raw) if raw.eq_ignore_ascii_case("all") => Self::All,
            Some(raw) => Self::Id(CategoryId::from(raw)),
        }
    }

    /// Selected category id, if any.
    #[must_use]
    pub const fn id(&self) -> Option<&CategoryId> {
        match self {
            Self::All => None,
            Self::Id(id) => Some(id),
        }
    }
}

/// Status tab of the current view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// No status restriction.
    #[default]
    All,
    /// Incomplete tasks.
    Pending,
    /// Completed tasks.
    Completed,
    /// Incomplete High-priority tasks.
    High,
}

impl StatusFilter {
    /// Whether a task belongs in this tab.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
            Self::High => task.is_high_pending(),
        }
    }

    /// Token used in configuration files and flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::High => "high",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" | "done" => Ok(Self::Completed),
            "high" => Ok(Self::High),
            _ => Err(ParseError::Status(s.to_owned())),
        }
    }
}

/// Everything the board needs to know about the current view besides the data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
    /// Active category.
    pub category: CategoryFilter,
    /// Active status tab.
    pub status: StatusFilter,
    /// Raw search box text.
    pub search: String,
}

impl ViewContext {
    /// Context showing every non-archived task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Select a status tab.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Set the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Matcher for the search text, if it is not blank.
    #[must_use]
    pub fn matcher(&self) -> Option<TextMatcher> {
        TextMatcher::new(&self.search)
    }
}

/// Apply the default-view pipeline: drop archived, restrict by category,
/// status tab, then search. Order of the input is preserved.
#[must_use]
pub fn filter_visible<'a>(
    tasks: &'a [Task],
    categories: &[Category],
    ctx: &ViewContext,
) -> Vec<&'a Task> {
    let category_name = match ctx.category.id() {
        None => None,
        Some(id) => match find_category(categories, id) {
            Some(category) => Some(category.name.as_str()),
            None => return Vec::new(),
        },
    };
    let matcher = ctx.matcher();

    tasks
        .iter()
        .filter(|task| !task.archived)
        .filter(|task| category_name.is_none_or(|name| task.category == name))
        .filter(|task| ctx.status.matches(task))
        .filter(|task| matcher.as_ref().is_none_or(|m| m.matches(task)))
        .collect()
}

/// Apply the archive-view pipeline: keep archived tasks matching the search.
#[must_use]
pub fn filter_archived<'a>(tasks: &'a [Task], search: &str) -> Vec<&'a Task> {
    let matcher = TextMatcher::new(search);
    tasks
        .iter()
        .filter(|task| task.archived)
        .filter(|task| matcher.as_ref().is_none_or(|m| m.matches(task)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::NewCategory;
    use crate::id::TaskId;
    use crate::priority::Priority;
    use crate::task::NewTask;
    use time::OffsetDateTime;

    fn task(id: u64, title: &str, category: &str, priority: Priority) -> Task {
        Task::from_new(
            TaskId(id),
            NewTask::new(title, category).with_priority(priority),
            OffsetDateTime::UNIX_EPOCH,
        )
    }

    fn categories() -> Vec<Category> {
        vec![
            Category::from_new(CategoryId::from_number(1), NewCategory::new("Work")),
            Category::from_new(CategoryId::from_number(2), NewCategory::new("Personal")),
        ]
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|task| task.id.0).collect()
    }

    #[test]
    fn category_param_parsing() {
        assert_eq!(CategoryFilter::from_param(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_param(Some(" ")), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_param(Some("ALL")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_param(Some("3")),
            CategoryFilter::Id(CategoryId::from_number(3))
        );
    }

    #[test]
    fn status_parsing() {
        assert_eq!("Pending".parse::<StatusFilter>(), Ok(StatusFilter::Pending));
        assert_eq!("high".parse::<StatusFilter>(), Ok(StatusFilter::High));
        assert!("later".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn archived_tasks_never_visible_by_default() {
        let mut archived = task(1, "Old", "Work", Priority::Low);
        archived.archived = true;
        let tasks = vec![archived, task(2, "New", "Work", Priority::Low)];

        let visible = filter_visible(&tasks, &categories(), &ViewContext::new());
        assert_eq!(ids(&visible), vec![2]);

        let archived = filter_archived(&tasks, "");
        assert_eq!(ids(&archived), vec![1]);
    }

    #[test]
    fn category_filter_resolves_by_name() {
        let tasks = vec![
            task(1, "Report", "Work", Priority::Low),
            task(2, "Gym", "Personal", Priority::Low),
        ];
        let ctx = ViewContext::new().with_category(CategoryFilter::Id(CategoryId::from_number(2)));
        assert_eq!(ids(&filter_visible(&tasks, &categories(), &ctx)), vec![2]);
    }

    #[test]
    fn unknown_category_yields_nothing() {
        let tasks = vec![task(1, "Report", "Work", Priority::Low)];
        let ctx = ViewContext::new().with_category(CategoryFilter::Id(CategoryId::from("42")));
        assert!(filter_visible(&tasks, &categories(), &ctx).is_empty());
    }

    #[test]
    fn status_tabs() {
        let mut done_high = task(1, "Ship", "Work", Priority::High);
        done_high.completed = true;
        let tasks = vec![
            done_high,
            task(2, "Plan", "Work", Priority::High),
            task(3, "Tidy", "Work", Priority::Low),
        ];
        let cats = categories();
        let run = |status| ids(&filter_visible(&tasks, &cats, &ViewContext::new().with_status(status)));

        assert_eq!(run(StatusFilter::All), vec![1, 2, 3]);
        assert_eq!(run(StatusFilter::Pending), vec![2, 3]);
        assert_eq!(run(StatusFilter::Completed), vec![1]);
        assert_eq!(run(StatusFilter::High), vec![2]);
    }

    #[test]
    fn search_covers_title_description_and_category() {
        let mut described = task(2, "Gym", "Personal", Priority::Low);
        described.description = "leg day".into();
        let tasks = vec![task(1, "Report", "Work", Priority::Low), described];
        let cats = categories();
        let run = |q: &str| ids(&filter_visible(&tasks, &cats, &ViewContext::new().with_search(q)));

        assert_eq!(run("REPORT"), vec![1]);
        assert_eq!(run("leg"), vec![2]);
        assert_eq!(run("personal"), vec![2]);
        assert_eq!(run("   "), vec![1, 2]);
        assert!(run("nothing").is_empty());
    }
}
