//! Calendar helpers for task due dates.

use time::error::{Format, Parse};
use time::format_description::BorrowedFormatItem;
use time::{Date, macros::format_description};

const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a due date from `YYYY-MM-DD`, ignoring any time-of-day suffix
/// (`2024-05-01T00:00:00Z` parses as `2024-05-01`).
///
/// # Errors
/// Returns a parse error when the date part is not a valid calendar date.
pub fn parse_due_date(input: &str) -> Result<Date, Parse> {
    let day = input.trim().split('T').next().unwrap_or_default();
    Date::parse(day, DUE_DATE_FORMAT)
}

/// Format a due date as `YYYY-MM-DD`.
///
/// # Errors
/// Returns a format error when the date cannot be written with a four-digit year.
pub fn format_due_date(date: Date) -> Result<String, Format> {
    date.format(DUE_DATE_FORMAT)
}

/// True when an open task's due date lies strictly before `today`.
#[must_use]
pub fn is_overdue(due: Option<Date>, completed: bool, today: Date) -> bool {
    match due {
        Some(due) if !completed => due < today,
        _ => false,
    }
}

/// Signed number of days from `today` until `due` (negative when past).
#[must_use]
pub fn days_until_due(due: Date, today: Date) -> i64 {
    (due - today).whole_days()
}

/// Human label for a due date relative to `today`.
#[must_use]
pub fn relative_label(due: Date, today: Date) -> String {
    match days_until_due(due, today) {
        0 => "Today".to_owned(),
        1 => "Tomorrow".to_owned(),
        -1 => "Yesterday".to_owned(),
        days if days > 1 => format!("in {days} days"),
        days => format!("{} days ago", -days),
    }
}

pub(crate) mod serde_option {
    use serde::{Deserialize, Deserializer, Serializer, ser};
    use time::Date;

    use super::{format_due_date, parse_due_date};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<Date>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => s.serialize_some(&format_due_date(*date).map_err(ser::Error::custom)?),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_due_date(text)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
