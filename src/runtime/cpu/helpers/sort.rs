//! Id sorting and membership helpers for CPU tensors

use super::super::kernels;
use super::super::{CpuClient, CpuRuntime};
use super::contiguous_input;
use crate::dispatch_int_dtype;
use crate::dtype::{DType, IndexElement};
use crate::error::Result;
use crate::ops::SortConfig;
use crate::runtime::{require_1d, require_int, require_same_dtype};
use crate::tensor::Tensor;

/// Validate keys against `config` and return the radix width to sort with
///
/// `None` and `Some(0)` infer the width from the maximum key.
///
/// # Safety
/// - `a` must point to `len` elements
pub(crate) unsafe fn resolve_num_bits<T: IndexElement>(
    client: &CpuClient,
    a: *const T,
    len: usize,
    config: SortConfig,
    op: &'static str,
) -> Result<u32> {
    let explicit = config.num_bits.filter(|&bits| bits > 0);
    let a_addr = a as usize;
    let min_len = client.rayon_min_len();
    let max_key = client.install_parallelism(|| unsafe {
        kernels::scan_keys_kernel(a_addr as *const T, len, explicit, min_len)
    })?;
    Ok(match explicit {
        Some(bits) => bits,
        None => {
            let bits = kernels::bits_for(max_key);
            tracing::debug!(op, max_key, num_bits = bits, "inferred num_bits from data");
            bits
        }
    })
}

fn sort_ids_common(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    config: SortConfig,
    with_positions: bool,
    op: &'static str,
) -> Result<(Tensor<CpuRuntime>, Option<Tensor<CpuRuntime>>)> {
    let len = require_1d(a)?;
    require_int(a, op)?;
    let dtype = a.dtype();
    let a_contig = contiguous_input(client, a, op)?;

    let sorted = Tensor::<CpuRuntime>::try_empty_in(&[len], dtype, a.tier(), &client.device)?;
    let positions = if with_positions {
        Some(Tensor::<CpuRuntime>::try_empty_in(
            &[len],
            DType::I64,
            a.tier(),
            &client.device,
        )?)
    } else {
        None
    };

    let a_ptr = a_contig.storage().ptr();
    let sorted_ptr = sorted.storage().ptr();
    let positions_ptr = positions.as_ref().map_or(0, |p| p.storage().ptr());
    let min_len = client.rayon_min_len();

    dispatch_int_dtype!(dtype, T => {
        let num_bits = unsafe { resolve_num_bits::<T>(client, a_ptr as *const T, len, config, op)? };
        tracing::trace!(len, num_bits, dtype = %dtype, "{op}");
        client.install_parallelism(|| unsafe {
            let perm = kernels::argsort_ids_kernel(a_ptr as *const T, len, num_bits, min_len);
            kernels::apply_permutation_kernel(
                a_ptr as *const T,
                &perm,
                sorted_ptr as *mut T,
                positions_ptr as *mut i64,
                min_len,
            )
        })?;
    }, op);

    Ok((sorted, positions))
}

/// Sort non-negative ids ascending
pub fn sort_ids_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    config: SortConfig,
) -> Result<Tensor<CpuRuntime>> {
    sort_ids_common(client, a, config, false, "sort_ids").map(|(sorted, _)| sorted)
}

/// Sort non-negative ids and return originating positions
pub fn sort_ids_with_positions_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    config: SortConfig,
) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
    let (sorted, positions) =
        sort_ids_common(client, a, config, true, "sort_ids_with_positions")?;
    let positions = positions.ok_or_else(|| {
        crate::error::Error::Internal("positions tensor was not allocated".to_string())
    })?;
    Ok((sorted, positions))
}

/// Membership of every element of `elements` in `test_elements`
pub fn isin_impl(
    client: &CpuClient,
    elements: &Tensor<CpuRuntime>,
    test_elements: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    let len = require_1d(elements)?;
    let haystack_len = require_1d(test_elements)?;
    require_int(elements, "isin")?;
    require_same_dtype(elements, test_elements)?;

    let elements_contig = contiguous_input(client, elements, "isin")?;
    let haystack_contig = contiguous_input(client, test_elements, "isin")?;
    let out =
        Tensor::<CpuRuntime>::try_empty_in(&[len], DType::Bool, elements.tier(), &client.device)?;

    let elements_ptr = elements_contig.storage().ptr();
    let haystack_ptr = haystack_contig.storage().ptr();
    let out_ptr = out.storage().ptr();
    let min_len = client.rayon_min_len();
    tracing::trace!(len, haystack_len, "isin");

    dispatch_int_dtype!(elements.dtype(), T => {
        client.install_parallelism(|| unsafe {
            let sorted = kernels::sorted_copy(haystack_ptr as *const T, haystack_len);
            kernels::isin_kernel(
                elements_ptr as *const T,
                len,
                &sorted,
                out_ptr as *mut u8,
                min_len,
            );
        });
    }, "isin");

    Ok(out)
}
