//! Gather and row-selection helpers for CPU tensors

use super::super::kernels;
use super::super::{CpuClient, CpuRuntime};
use super::contiguous_input;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::{MemoryTier, require_1d, require_accessible, require_int};
use crate::tensor::Tensor;
use crate::{dispatch_dtype, dispatch_int_dtype};

/// Gather a 1-D tensor by a 1-D index, optionally converting the result
pub fn gather_impl(
    client: &CpuClient,
    input: &Tensor<CpuRuntime>,
    index: &Tensor<CpuRuntime>,
    dtype: Option<DType>,
) -> Result<Tensor<CpuRuntime>> {
    let input_len = require_1d(input)?;
    let index_len = require_1d(index)?;
    require_int(index, "gather")?;

    let in_dtype = input.dtype();
    let out_dtype = dtype.unwrap_or(in_dtype);
    if in_dtype.is_bool() || out_dtype.is_bool() {
        let bad = if in_dtype.is_bool() { in_dtype } else { out_dtype };
        return Err(Error::unsupported_dtype(bad, "gather"));
    }

    let input_contig = contiguous_input(client, input, "gather")?;
    let index_contig = contiguous_input(client, index, "gather")?;
    let gathered =
        Tensor::<CpuRuntime>::try_empty_in(&[index_len], in_dtype, input.tier(), &client.device)?;

    let input_ptr = input_contig.storage().ptr();
    let index_ptr = index_contig.storage().ptr();
    let gathered_ptr = gathered.storage().ptr();
    let min_len = client.rayon_min_len();
    tracing::trace!(input_len, index_len, dtype = %in_dtype, "gather");

    dispatch_dtype!(in_dtype, T => {
        dispatch_int_dtype!(index.dtype(), I => {
            client.install_parallelism(|| unsafe {
                kernels::gather_kernel::<T, I>(
                    input_ptr as *const T,
                    input_len,
                    index_ptr as *const I,
                    index_len,
                    gathered_ptr as *mut T,
                    min_len,
                )
            })?;
        }, "gather");
    }, "gather");

    if out_dtype == in_dtype {
        return Ok(gathered);
    }

    let out =
        Tensor::<CpuRuntime>::try_empty_in(&[index_len], out_dtype, input.tier(), &client.device)?;
    let out_ptr = out.storage().ptr();
    dispatch_dtype!(in_dtype, T => {
        dispatch_dtype!(out_dtype, O => {
            client.install_parallelism(|| unsafe {
                kernels::cast_kernel::<T, O>(
                    gathered_ptr as *const T,
                    out_ptr as *mut O,
                    index_len,
                    min_len,
                )
            });
        }, "gather");
    }, "gather");

    Ok(out)
}

/// Copy the rows named by `index` out of a contiguous `input`
///
/// Contiguous tensors start at storage offset 0, so rows are addressed from
/// the storage pointer directly.
fn select_rows(
    client: &CpuClient,
    input: &Tensor<CpuRuntime>,
    index: &Tensor<CpuRuntime>,
    out_tier: MemoryTier,
    op: &'static str,
) -> Result<Tensor<CpuRuntime>> {
    let index_len = require_1d(index)?;
    require_int(index, op)?;

    let shape = input.shape();
    let Some((&num_rows, row_shape)) = shape.split_first() else {
        return Err(Error::InvalidDimension { dim: 0, ndim: 0 });
    };
    let row_elems: usize = row_shape.iter().product();
    let row_bytes = row_elems * input.dtype().size_in_bytes();

    let mut out_shape = Vec::with_capacity(shape.len());
    out_shape.push(index_len);
    out_shape.extend_from_slice(row_shape);

    let index_contig = contiguous_input(client, index, op)?;
    let out =
        Tensor::<CpuRuntime>::try_empty_in(&out_shape, input.dtype(), out_tier, &client.device)?;

    let input_ptr = input.storage().ptr();
    let index_ptr = index_contig.storage().ptr();
    let out_ptr = out.storage().ptr();
    let rows_per_task = (client.rayon_min_len() / row_elems.max(1)).max(1);
    tracing::trace!(num_rows, index_len, row_bytes, "{op}");

    dispatch_int_dtype!(index.dtype(), I => {
        client.install_parallelism(|| unsafe {
            kernels::index_select_rows_kernel::<I>(
                input_ptr as *const u8,
                num_rows,
                row_bytes,
                index_ptr as *const I,
                index_len,
                out_ptr as *mut u8,
                rows_per_task,
            )
        })?;
    }, op);

    Ok(out)
}

/// Select rows of an `(N, ...)` tensor in the input's tier
pub fn index_select_impl(
    client: &CpuClient,
    input: &Tensor<CpuRuntime>,
    index: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    let input_contig = contiguous_input(client, input, "index_select")?;
    select_rows(client, &input_contig, index, input.tier(), "index_select")
}

/// Select rows straight out of a pinned buffer into `index`'s tier
pub fn uva_index_select_impl(
    client: &CpuClient,
    input: &Tensor<CpuRuntime>,
    index: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    if input.tier() != MemoryTier::Pinned {
        return Err(Error::TierMismatch {
            op: "uva_index_select",
            expected: MemoryTier::Pinned,
            got: input.tier(),
        });
    }
    // Rows are read in place; a strided pinned view would need staging
    if !input.is_contiguous() {
        return Err(Error::NotContiguous);
    }
    require_accessible(index, &client.device, "uva_index_select")?;
    tracing::debug!(
        rows = input.shape().first().copied().unwrap_or(0),
        index_len = index.numel(),
        out_tier = %index.tier(),
        "reading rows from pinned memory"
    );
    select_rows(client, input, index, index.tier(), "uva_index_select")
}
