//! In-memory task and category stores with simulated latency.
//!
//! Each operation sleeps for its configured delay first and then performs its
//! read-modify-write under a single lock acquisition, so mutations never
//! interleave.

/// Category collection.
mod category_store;
/// Store errors.
pub mod error;
/// Delay strategies.
pub mod latency;
/// Task collection.
mod task_store;

pub use category_store::MemoryCategoryStore;
pub use error::StoreError;
pub use latency::{Latency, Operation};
pub use task_store::MemoryTaskStore;
