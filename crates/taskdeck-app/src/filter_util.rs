//! Query construction from raw command-line strings.

use taskdeck_core::due::parse_due_date;
use taskdeck_core::{ParseError, Priority, TaskQuery};
use thiserror::Error;
use time::Date;

/// Error type returned while constructing task queries from user-facing inputs.
#[derive(Debug, Error)]
pub enum FilterBuildError {
    /// Priority token is not `low`, `medium` or `high`.
    #[error(transparent)]
    InvalidPriority(#[from] ParseError),
    /// Date bound is not a `YYYY-MM-DD` calendar date.
    #[error("invalid {field} date: {source}")]
    InvalidDate {
        /// Which bound was rejected (`due_from` or `due_to`).
        field: &'static str,
        /// Underlying parse failure.
        #[source]
        source: time::error::Parse,
    },
}

/// Result alias for query construction helpers.
pub type FilterBuildResult<T> = Result<T, FilterBuildError>;

/// Builder that accepts user-facing strings and normalizes them into [`TaskQuery`] values.
#[derive(Debug, Clone, Default)]
pub struct TaskQueryBuilder {
    query: TaskQuery,
}

impl TaskQueryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: Option<bool>) -> Self {
        self.query.completed = completed;
        self
    }

    /// Require a priority given by name (blank inputs clear the clause).
    ///
    /// # Errors
    /// Returns an error if the token is not a known priority.
    pub fn with_priority(mut self, priority: Option<String>) -> FilterBuildResult<Self> {
        self.query.priority = match normalize(priority) {
            Some(raw) => Some(raw.parse::<Priority>()?),
            None => None,
        };
        Ok(self)
    }

    /// Require an exact category name (whitespace-only inputs become `None`).
    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.query.category = normalize(category);
        self
    }

    /// Configure the optional search text (whitespace-only inputs become `None`).
    #[must_use]
    pub fn with_text(mut self, text: Option<String>) -> Self {
        self.query.text = normalize(text);
        self
    }

    /// Configure the date bounds using `YYYY-MM-DD` strings.
    ///
    /// # Errors
    /// Returns an error if either date fails to parse.
    pub fn with_date_range(
        mut self,
        from: Option<String>,
        to: Option<String>,
    ) -> FilterBuildResult<Self> {
        self.query.due_from = parse_optional_date("due_from", from)?;
        self.query.due_to = parse_optional_date("due_to", to)?;
        Ok(self)
    }

    /// Configure the date bounds using already parsed values.
    #[must_use]
    pub const fn with_date_range_values(mut self, from: Option<Date>, to: Option<Date>) -> Self {
        self.query.due_from = from;
        self.query.due_to = to;
        self
    }

    /// Build the final [`TaskQuery`].
    #[must_use]
    pub fn build(self) -> TaskQuery {
        self.query
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn parse_optional_date(field: &'static str, value: Option<String>) -> FilterBuildResult<Option<Date>> {
    let Some(raw) = normalize(value) else {
        return Ok(None);
    };
    parse_due_date(&raw)
        .map(Some)
        .map_err(|source| FilterBuildError::InvalidDate { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn builder_trims_text_inputs() {
        let query = TaskQueryBuilder::new()
            .with_text(Some("  report ".into()))
            .with_category(Some("   ".into()))
            .build();
        assert_eq!(query.text.as_deref(), Some("report"));
        assert_eq!(query.category, None);
    }

    #[test]
    fn builder_parses_priority_and_dates() -> Result<(), FilterBuildError> {
        let query = TaskQueryBuilder::new()
            .with_completed(Some(false))
            .with_priority(Some("high".into()))?
            .with_date_range(Some("2024-01-01".into()), Some(" ".into()))?
            .build();
        assert_eq!(query.completed, Some(false));
        assert_eq!(query.priority, Some(Priority::High));
        assert_eq!(query.due_from, Some(date!(2024-01-01)));
        assert_eq!(query.due_to, None);
        Ok(())
    }

    #[test]
    fn builder_rejects_bad_tokens() {
        let err = TaskQueryBuilder::new()
            .with_priority(Some("urgent".into()))
            .map(TaskQueryBuilder::build);
        assert!(matches!(err, Err(FilterBuildError::InvalidPriority(_))));

        let err = TaskQueryBuilder::new()
            .with_date_range(None, Some("tomorrow".into()))
            .map(TaskQueryBuilder::build);
        assert!(matches!(
            err,
            Err(FilterBuildError::InvalidDate { field: "due_to", .. })
        ));
    }

    #[test]
    fn parsed_values_pass_through() {
        let query = TaskQueryBuilder::new()
            .with_date_range_values(Some(date!(2024-02-01)), Some(date!(2024-02-29)))
            .build();
        assert_eq!(query.due_to, Some(date!(2024-02-29)));
    }
}
