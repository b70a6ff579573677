//! Prefix-sum helpers for CPU tensors

use super::super::kernels;
use super::super::{CpuClient, CpuRuntime};
use super::contiguous_input;
use crate::dispatch_int_dtype;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::{require_1d, require_int};
use crate::tensor::Tensor;

/// Exclusive prefix sum of a 1-D integer tensor into `out_dtype`
pub fn exclusive_cumsum_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    out_dtype: DType,
) -> Result<Tensor<CpuRuntime>> {
    let len = require_1d(a)?;
    require_int(a, "exclusive_cumsum")?;
    if !out_dtype.is_int() {
        return Err(Error::unsupported_dtype(out_dtype, "exclusive_cumsum"));
    }

    let a_contig = contiguous_input(client, a, "exclusive_cumsum")?;
    let out = Tensor::<CpuRuntime>::try_empty_in(&[len], out_dtype, a.tier(), &client.device)?;
    if len == 0 {
        return Ok(out);
    }

    let a_ptr = a_contig.storage().ptr();
    let out_ptr = out.storage().ptr();
    let min_len = client.rayon_min_len();
    tracing::trace!(len, dtype = %a.dtype(), out_dtype = %out_dtype, "exclusive_cumsum");

    dispatch_int_dtype!(a.dtype(), T => {
        dispatch_int_dtype!(out_dtype, O => {
            client.install_parallelism(|| unsafe {
                kernels::exclusive_cumsum_kernel::<T, O>(
                    a_ptr as *const T,
                    out_ptr as *mut O,
                    len,
                    min_len,
                )
            })?;
        }, "exclusive_cumsum");
    }, "exclusive_cumsum");

    Ok(out)
}
