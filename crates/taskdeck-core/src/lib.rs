//! Domain types and the filter/sort/stats engine for taskdeck boards.

/// Category records.
pub mod category;
/// Time sources.
pub mod clock;
/// Due-date helpers.
pub mod due;
/// Validation and parse errors.
pub mod error;
/// View context and filtering predicates.
pub mod filter;
/// Identifier types.
pub mod id;
/// Task priority levels.
pub mod priority;
/// Ad-hoc task queries.
pub mod query;
/// Board, archive and single-key orderings.
pub mod sort;
/// Aggregate statistics.
pub mod stats;
/// Task records and patches.
pub mod task;
/// Case-insensitive search.
pub mod text_matcher;
/// Derived board and archive views.
pub mod view;

pub use category::{Category, CategoryPatch, NewCategory};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ParseError, ValidationError};
pub use filter::{CategoryFilter, StatusFilter, ViewContext};
pub use id::{CategoryId, TaskId};
pub use priority::Priority;
pub use query::TaskQuery;
pub use sort::SortKey;
pub use stats::{TaskSummary, ViewStats};
pub use task::{NewTask, Task, TaskPatch};
pub use view::{ArchiveView, EmptyState, TaskListView, derive_archive_view, derive_view};
