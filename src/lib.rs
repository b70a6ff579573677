//! # graphslice
//!
//! **Data-parallel CSC slicing and id compaction for GNN mini-batch sampling.**
//!
//! graphslice provides the array primitives a neighbor sampler is built
//! from: slicing compressed-sparse-column adjacency by a node subset,
//! splitting neighbor lists by edge type, expanding offsets into per-edge
//! coordinates, and renumbering sampled node ids into a compact local space.
//!
//! ## Features
//!
//! - **Tensors**: flat and row-major arrays with a runtime dtype and memory tier
//! - **CSC slicing**: degrees, segment starts, per-type split, neighbor gather
//! - **Id compaction**: deduplicate and renumber (src, dst) edge ids
//! - **Sorting**: stable radix sort of non-negative ids with a bit-width hint
//! - **Cross-tier reads**: row selection straight out of pinned host memory
//! - **Deterministic parallelism**: identical results on one thread or many
//!
//! ## Quick Start
//!
//! ```
//! use graphslice::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let indptr = Tensor::<CpuRuntime>::from_slice(&[0i64, 2, 5, 5], &[4], &device);
//! let indices = Tensor::<CpuRuntime>::from_slice(&[10i64, 11, 20, 21, 22], &[5], &device);
//! let nodes = Tensor::<CpuRuntime>::from_slice(&[1i64, 2], &[2], &device);
//!
//! let (new_indptr, new_indices) = client.index_select_csc(&indptr, &indices, &nodes, None)?;
//! assert_eq!(new_indptr.to_vec::<i64>(), [0, 3, 3]);
//! assert_eq!(new_indices.to_vec::<i64>(), [20, 21, 22]);
//! # Ok::<(), graphslice::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): Multi-threaded CPU kernels

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod sparse;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::runtime::{Device, MemoryTier, Runtime, RuntimeClient};
    pub use crate::tensor::{Layout, Tensor};

    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime, ParallelismConfig};

    pub use crate::ops::{
        CompactedIds, CompactionOps, CscOps, CumulativeOps, ExpandIndptrConfig,
        IndexSelectCscConfig, IndexingOps, SortConfig, SortingOps,
    };

    pub use crate::sparse::CscGraph;
}
