//! CPU kernel implementations
//!
//! Kernels take raw pointers (or slices) plus a `chunk_len` and split their
//! work into index ranges of that length. With the `rayon` feature the
//! ranges run in parallel on the current pool; without it they run in
//! order. Every range writes a disjoint part of the output, so the
//! partitioning never changes the result, and a failing kernel always
//! reports the error of the lowest failing range.

#![allow(unsafe_op_in_unsafe_fn)] // Kernels are already marked unsafe, inner unsafe is redundant

pub mod compaction;
pub mod csc;
pub mod cumulative;
pub mod index;
pub mod search;
pub mod sort;

pub use compaction::unique_and_compact_kernel;
pub use csc::{
    convert_ids_kernel, expand_indptr_kernel, gather_segments_kernel, slice_indptr_hetero_kernel,
    slice_indptr_identity_kernel, slice_indptr_kernel,
};
pub use cumulative::exclusive_cumsum_kernel;
pub use index::{cast_kernel, gather_kernel, index_select_rows_kernel};
pub use search::{isin_kernel, sorted_copy};
pub use sort::{apply_permutation_kernel, argsort_ids_kernel, bits_for, scan_keys_kernel};

use crate::error::Result;
use std::ops::Range;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// View `len` elements at `ptr`
///
/// Zero-length views never touch the pointer, which may be null for empty
/// tensors.
///
/// # Safety
/// - For `len > 0`, `ptr` must point to `len` initialized elements
#[inline]
pub(crate) unsafe fn raw_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(ptr, len)
    }
}

/// Split `0..len` into consecutive ranges of at most `chunk_len`
#[inline]
fn chunk_ranges(len: usize, chunk_len: usize) -> impl Iterator<Item = Range<usize>> {
    let chunk_len = chunk_len.max(1);
    (0..len.div_ceil(chunk_len)).map(move |c| {
        let start = c * chunk_len;
        start..start.saturating_add(chunk_len).min(len)
    })
}

/// Run `f` over `0..len` in ranges of `chunk_len`
pub(crate) fn for_each_range<F>(len: usize, chunk_len: usize, f: F)
where
    F: Fn(Range<usize>) + Send + Sync,
{
    #[cfg(feature = "rayon")]
    if len > chunk_len {
        let ranges: Vec<Range<usize>> = chunk_ranges(len, chunk_len).collect();
        ranges.into_par_iter().for_each(f);
        return;
    }
    chunk_ranges(len, chunk_len).for_each(f);
}

/// Run fallible `f` over `0..len` in ranges of `chunk_len`
///
/// Returns the error of the first failing range in index order.
pub(crate) fn try_for_each_range<F>(len: usize, chunk_len: usize, f: F) -> Result<()>
where
    F: Fn(Range<usize>) -> Result<()> + Send + Sync,
{
    #[cfg(feature = "rayon")]
    if len > chunk_len {
        let ranges: Vec<Range<usize>> = chunk_ranges(len, chunk_len).collect();
        let first_err = ranges
            .into_par_iter()
            .enumerate()
            .filter_map(|(c, range)| f(range).err().map(|e| (c, e)))
            .min_by_key(|(c, _)| *c);
        return match first_err {
            Some((_, e)) => Err(e),
            None => Ok(()),
        };
    }
    chunk_ranges(len, chunk_len).try_for_each(f)
}

/// Map every range of `0..len` through `f`, keeping range order
pub(crate) fn map_ranges<U, F>(len: usize, chunk_len: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(Range<usize>) -> U + Send + Sync,
{
    #[cfg(feature = "rayon")]
    if len > chunk_len {
        let ranges: Vec<Range<usize>> = chunk_ranges(len, chunk_len).collect();
        return ranges.into_par_iter().map(f).collect();
    }
    chunk_ranges(len, chunk_len).map(f).collect()
}
