//! Free-text search over task fields.

use crate::task::Task;

/// Case-insensitive substring matcher for task fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Lowercase a query string into a matcher. Returns `None` for blank inputs.
    ///
    /// Whitespace only decides blankness; a non-blank query is matched as
    /// typed, so `"mom "` does not match a title ending in `mom`.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }
        Some(Self {
            needle: query.to_lowercase(),
        })
    }

    /// Normalized query text.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Whether the title, description or category name contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title)
            || self.matches_field(&task.description)
            || self.matches_field(&task.category)
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use crate::task::NewTask;
    use time::OffsetDateTime;

    fn task(title: &str, description: &str, category: &str) -> Task {
        Task::from_new(
            TaskId(1),
            NewTask::new(title, category).with_description(description),
            OffsetDateTime::UNIX_EPOCH,
        )
    }

    #[test]
    fn matcher_skips_blank_queries() {
        assert!(TextMatcher::new("").is_none());
        assert!(TextMatcher::new("   ").is_none());
        assert!(TextMatcher::new("\n").is_none());
    }

    #[test]
    fn matcher_finds_text_across_fields() {
        let task = task("Quarterly Review", "Prepare slides", "Work");

        let matcher = TextMatcher::new("review")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&task));

        let matcher = TextMatcher::new("SLIDES")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&task));

        let matcher = TextMatcher::new("work")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&task));

        let missing = TextMatcher::new("groceries")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(!missing.matches(&task));
    }

    #[test]
    fn matcher_lowercases_non_ascii() {
        let task = task("Überweisung", "", "Finanzen");
        let matcher = TextMatcher::new("ÜBER")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert_eq!(matcher.needle(), "über");
        assert!(matcher.matches(&task));
    }

    #[test]
    fn matcher_keeps_surrounding_spaces() {
        let task = task("Call mom", "", "Personal");

        let trailing = TextMatcher::new("mom ")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert_eq!(trailing.needle(), "mom ");
        assert!(!trailing.matches(&task));

        let inner = TextMatcher::new(" mom")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(inner.matches(&task));
    }
}
