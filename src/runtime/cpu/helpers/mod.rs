//! Helper functions for CPU tensor operations
//!
//! This module contains the shared validation and dispatch code behind the
//! `CpuClient` operation impls, organized by functional category.

pub mod compaction;
pub mod csc;
pub mod cumulative;
pub mod indexing;
pub mod sort;

// Re-export all helper functions
pub use compaction::{unique_and_compact_batched_impl, unique_and_compact_impl};
pub use csc::{
    expand_indptr_impl, index_select_csc_impl, index_select_csc_sliced_impl,
    slice_csc_indptr_hetero_impl, slice_csc_indptr_impl,
};
pub use cumulative::exclusive_cumsum_impl;
pub use indexing::{gather_impl, index_select_impl, uva_index_select_impl};
pub use sort::{isin_impl, sort_ids_impl, sort_ids_with_positions_impl};

use super::{CpuClient, CpuRuntime};
use crate::dispatch_int_dtype;
use crate::dtype::IndexElement;
use crate::error::Result;
use crate::runtime::{ensure_contiguous, require_accessible};
use crate::tensor::Tensor;

/// Check that `t` is readable by CPU kernels and return a contiguous view
pub(crate) fn contiguous_input(
    client: &CpuClient,
    t: &Tensor<CpuRuntime>,
    op: &'static str,
) -> Result<Tensor<CpuRuntime>> {
    require_accessible(t, &client.device, op)?;
    ensure_contiguous(t)
}

/// Read element `pos` of a 1-D integer tensor, widened to `i128`
pub(crate) fn read_int(t: &Tensor<CpuRuntime>, pos: usize, op: &'static str) -> Result<i128> {
    let elem = t.narrow(0, pos, 1)?;
    let value: i128;
    dispatch_int_dtype!(t.dtype(), T => {
        value = elem.item::<T>()?.as_i128();
    }, op);
    Ok(value)
}
