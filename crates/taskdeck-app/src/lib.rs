//! Application layer for taskdeck.
//!
//! This crate wires the stores into a [`Workspace`], keeps the [`TaskBoard`]
//! cache in step with them, and loads configuration and seed data for the CLI.

pub mod board;
pub mod config;
pub mod error;
pub mod filter_util;
pub mod seed;
pub mod store;
pub mod workspace;

// Re-exports for convenience
pub use board::{ClearArchived, TaskBoard};
pub use config::{AppConfig, StoreConfig, ViewConfig};
pub use error::{BoardError, BoardResult};
pub use filter_util::{FilterBuildError, TaskQueryBuilder};
pub use seed::Seed;
pub use store::{CategoryStore, TaskStore};
pub use workspace::{MemoryWorkspace, Workspace};
