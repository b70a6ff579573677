//! Id compaction helpers for CPU tensors

use super::super::kernels;
use super::super::{CpuClient, CpuRuntime};
use super::contiguous_input;
use crate::dispatch_int_dtype;
use crate::error::Result;
use crate::ops::{CompactedIds, SortConfig};
use crate::runtime::{require_1d, require_int, require_same_dtype};
use crate::tensor::Tensor;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Deduplicate `unique_dst ++ dst ++ src` and renumber `src` and `dst`
pub fn unique_and_compact_impl(
    client: &CpuClient,
    src_ids: &Tensor<CpuRuntime>,
    dst_ids: &Tensor<CpuRuntime>,
    unique_dst_ids: &Tensor<CpuRuntime>,
    config: SortConfig,
) -> Result<CompactedIds<CpuRuntime>> {
    const OP: &str = "unique_and_compact";
    let src_len = require_1d(src_ids)?;
    let dst_len = require_1d(dst_ids)?;
    let unique_len = require_1d(unique_dst_ids)?;
    require_int(src_ids, OP)?;
    require_same_dtype(src_ids, dst_ids)?;
    require_same_dtype(src_ids, unique_dst_ids)?;

    let src_contig = contiguous_input(client, src_ids, OP)?;
    let dst_contig = contiguous_input(client, dst_ids, OP)?;
    let unique_contig = contiguous_input(client, unique_dst_ids, OP)?;
    let src_ptr = src_contig.storage().ptr();
    let dst_ptr = dst_contig.storage().ptr();
    let unique_ptr = unique_contig.storage().ptr();

    let explicit = config.num_bits.filter(|&bits| bits > 0);
    let min_len = client.rayon_min_len();
    let tier = src_ids.tier();

    dispatch_int_dtype!(src_ids.dtype(), T => {
        let compacted = client.install_parallelism(|| unsafe {
            let src = kernels::raw_slice(src_ptr as *const T, src_len);
            let dst = kernels::raw_slice(dst_ptr as *const T, dst_len);
            let unique_dst = kernels::raw_slice(unique_ptr as *const T, unique_len);

            let mut max_key = 0u64;
            for ids in [unique_dst, dst, src] {
                let ids_max =
                    kernels::scan_keys_kernel(ids.as_ptr(), ids.len(), explicit, min_len)?;
                max_key = max_key.max(ids_max);
            }
            let num_bits = match explicit {
                Some(bits) => bits,
                None => {
                    let bits = kernels::bits_for(max_key);
                    tracing::debug!(
                        op = OP,
                        max_key,
                        num_bits = bits,
                        "inferred num_bits from data"
                    );
                    bits
                }
            };
            tracing::trace!(src_len, dst_len, unique_len, num_bits, "{OP}");
            kernels::unique_and_compact_kernel(src, dst, unique_dst, num_bits, min_len)
        })?;

        let unique_ids = Tensor::<CpuRuntime>::try_from_slice_in(
            &compacted.unique_ids,
            &[compacted.unique_ids.len()],
            tier,
            &client.device,
        )?;
        let compacted_src = Tensor::<CpuRuntime>::try_from_slice_in(
            &compacted.compacted_src,
            &[src_len],
            tier,
            &client.device,
        )?;
        let compacted_dst = Tensor::<CpuRuntime>::try_from_slice_in(
            &compacted.compacted_dst,
            &[dst_len],
            tier,
            &client.device,
        )?;
        return Ok((unique_ids, compacted_src, compacted_dst));
    }, OP);
}

/// [`unique_and_compact_impl`] over independent batches
///
/// Batches run concurrently; the first failing batch in input order
/// determines the error.
pub fn unique_and_compact_batched_impl(
    client: &CpuClient,
    batches: &[(&Tensor<CpuRuntime>, &Tensor<CpuRuntime>, &Tensor<CpuRuntime>)],
    config: SortConfig,
) -> Result<Vec<CompactedIds<CpuRuntime>>> {
    tracing::debug!(num_batches = batches.len(), "unique_and_compact_batched");

    let results: Vec<Result<CompactedIds<CpuRuntime>>> = client.install_parallelism(|| {
        #[cfg(feature = "rayon")]
        {
            batches
                .par_iter()
                .map(|(src, dst, unique_dst)| {
                    unique_and_compact_impl(client, src, dst, unique_dst, config)
                })
                .collect()
        }
        #[cfg(not(feature = "rayon"))]
        {
            batches
                .iter()
                .map(|(src, dst, unique_dst)| {
                    unique_and_compact_impl(client, src, dst, unique_dst, config)
                })
                .collect()
        }
    });

    results.into_iter().collect()
}
