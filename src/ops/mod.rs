//! Graph sampling operations
//!
//! This module defines operation traits and their CPU implementations.
//!
//! # Design
//!
//! Operations are defined as traits that are implemented by the runtime
//! client. This gives operations access to the device and the client's
//! parallelism settings when creating output tensors.
//!
//! ```text
//! RuntimeClient<R>
//!   ├── CumulativeOps<R>   exclusive_cumsum, exclusive_cumsum_to
//!   ├── SortingOps<R>      sort_ids, sort_ids_with_positions, isin
//!   ├── IndexingOps<R>     gather, index_select, uva_index_select
//!   ├── CscOps<R>          slice_csc_indptr, slice_csc_indptr_hetero,
//!   │                      index_select_csc, index_select_csc_sliced,
//!   │                      expand_indptr
//!   └── CompactionOps<R>   unique_and_compact, unique_and_compact_batched
//! ```
//!
//! # Implementing Operations for a New Backend
//!
//! Every trait method has a default body returning `Error::NotImplemented`,
//! so a backend can implement operations one at a time:
//!
//! ```ignore
//! impl CumulativeOps<CudaRuntime> for CudaClient {
//!     fn exclusive_cumsum(&self, a: &Tensor<CudaRuntime>) -> Result<Tensor<CudaRuntime>> {
//!         // 1. Validate rank and dtype
//!         // 2. Allocate output tensor with Tensor::try_empty
//!         // 3. Launch the scan kernel
//!     }
//! }
//! ```
//!
//! Helpers select typed kernels with [`dispatch_dtype!`](crate::dispatch_dtype)
//! and [`dispatch_int_dtype!`](crate::dispatch_int_dtype).

mod cpu;
mod dispatch;
mod traits;

pub use traits::*;
