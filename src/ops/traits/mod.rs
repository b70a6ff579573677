//! Operation traits for graph sampling primitives.
//!
//! This module contains trait definitions for the operations.
//! Implementations are in the backend-specific modules (cpu/).

mod compaction;
mod csc;
mod cumulative;
mod indexing;
mod sorting;

pub use compaction::{CompactedIds, CompactionOps};
pub use csc::{CscOps, ExpandIndptrConfig, IndexSelectCscConfig};
pub use cumulative::CumulativeOps;
pub use indexing::IndexingOps;
pub use sorting::{SortConfig, SortingOps};
