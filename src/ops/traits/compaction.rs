//! Id deduplication and compaction operations trait.

use super::sorting::SortConfig;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// `(unique_ids, compacted_src, compacted_dst)`
pub type CompactedIds<R> = (Tensor<R>, Tensor<R>, Tensor<R>);

/// Deduplicate and renumber node ids of sampled edges
pub trait CompactionOps<R: Runtime> {
    /// Build a dense local id space for a sampled edge list
    ///
    /// `unique_dst_ids` lists the destination (seed) nodes without
    /// duplicates. The returned `unique_ids` starts with exactly those ids
    /// in that order, followed by every other id of `dst_ids` and `src_ids`
    /// in first-occurrence order of the `dst_ids` then `src_ids` scan.
    /// `compacted_src[i]` and `compacted_dst[i]` are the positions of
    /// `src_ids[i]` and `dst_ids[i]` in `unique_ids`.
    ///
    /// All three inputs are 1-D, share an integer dtype, and hold ids in
    /// `[0, 1 << num_bits)`. Outputs use the same dtype.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphslice::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let src = Tensor::<CpuRuntime>::from_slice(&[5i64, 6, 1], &[3], &device);
    /// let dst = Tensor::<CpuRuntime>::from_slice(&[1i64, 2, 2], &[3], &device);
    /// let seeds = Tensor::<CpuRuntime>::from_slice(&[1i64, 2], &[2], &device);
    /// let (unique, c_src, c_dst) =
    ///     client.unique_and_compact(&src, &dst, &seeds, SortConfig::default())?;
    /// assert_eq!(unique.to_vec::<i64>(), [1, 2, 5, 6]);
    /// assert_eq!(c_src.to_vec::<i64>(), [2, 3, 0]);
    /// assert_eq!(c_dst.to_vec::<i64>(), [0, 1, 1]);
    /// # Ok::<(), graphslice::error::Error>(())
    /// ```
    fn unique_and_compact(
        &self,
        src_ids: &Tensor<R>,
        dst_ids: &Tensor<R>,
        unique_dst_ids: &Tensor<R>,
        config: SortConfig,
    ) -> Result<CompactedIds<R>> {
        let _ = (src_ids, dst_ids, unique_dst_ids, config);
        Err(Error::NotImplemented {
            feature: "CompactionOps::unique_and_compact",
        })
    }

    /// Run [`CompactionOps::unique_and_compact`] on independent batches
    ///
    /// Each element of `batches` is `(src_ids, dst_ids, unique_dst_ids)`.
    /// Results are returned in batch order; the first failing batch's error
    /// is returned and no results are produced.
    fn unique_and_compact_batched(
        &self,
        batches: &[(&Tensor<R>, &Tensor<R>, &Tensor<R>)],
        config: SortConfig,
    ) -> Result<Vec<CompactedIds<R>>> {
        let _ = (batches, config);
        Err(Error::NotImplemented {
            feature: "CompactionOps::unique_and_compact_batched",
        })
    }
}
