//! CSC slicing helpers for CPU tensors

use super::super::kernels;
use super::super::{CpuClient, CpuRuntime};
use super::{contiguous_input, exclusive_cumsum_impl, read_int};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::{ExpandIndptrConfig, IndexSelectCscConfig};
use crate::runtime::{check_size_hint, require_1d, require_int, require_same_dtype};
use crate::tensor::Tensor;
use crate::{dispatch_dtype, dispatch_int_dtype};

/// Length of an offset array minus its trailing entry
fn offsets_len(indptr: &Tensor<CpuRuntime>, op: &'static str) -> Result<usize> {
    let len = require_1d(indptr)?;
    require_int(indptr, op)?;
    if len == 0 {
        return Err(Error::shape_mismatch(&[1], &[0]));
    }
    Ok(len - 1)
}

/// Require a 1-D tensor of exactly `expected` elements
fn require_len(t: &Tensor<CpuRuntime>, expected: usize) -> Result<()> {
    let len = require_1d(t)?;
    if len != expected {
        return Err(Error::shape_mismatch(&[expected], &[len]));
    }
    Ok(())
}

/// Read a non-negative edge total back to the host
fn read_total(
    t: &Tensor<CpuRuntime>,
    pos: usize,
    arg: &'static str,
    op: &'static str,
) -> Result<usize> {
    let v = read_int(t, pos, op)?;
    usize::try_from(v)
        .map_err(|_| Error::invalid_argument(arg, format!("edge total {v} is negative")))
}

/// Degrees and segment starts of a node subset
pub fn slice_csc_indptr_impl(
    client: &CpuClient,
    indptr: &Tensor<CpuRuntime>,
    nodes: Option<&Tensor<CpuRuntime>>,
) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
    const OP: &str = "slice_csc_indptr";
    let num_nodes = offsets_len(indptr, OP)?;
    let dtype = indptr.dtype();
    let indptr_contig = contiguous_input(client, indptr, OP)?;
    let indptr_ptr = indptr_contig.storage().ptr();
    let min_len = client.rayon_min_len();

    let Some(nodes) = nodes else {
        tracing::debug!(num_nodes, "no node subset given, slicing every node");
        let degrees = Tensor::<CpuRuntime>::try_empty_in(
            &[num_nodes + 1],
            dtype,
            indptr.tier(),
            &client.device,
        )?;
        let starts =
            Tensor::<CpuRuntime>::try_empty_in(&[num_nodes], dtype, indptr.tier(), &client.device)?;
        let (degrees_ptr, starts_ptr) = (degrees.storage().ptr(), starts.storage().ptr());

        dispatch_int_dtype!(dtype, I => {
            client.install_parallelism(|| unsafe {
                kernels::slice_indptr_identity_kernel::<I>(
                    indptr_ptr as *const I,
                    num_nodes,
                    degrees_ptr as *mut I,
                    starts_ptr as *mut I,
                    min_len,
                )
            })?;
        }, OP);
        return Ok((degrees, starts));
    };

    let m = require_1d(nodes)?;
    require_int(nodes, OP)?;
    let nodes_contig = contiguous_input(client, nodes, OP)?;
    let degrees =
        Tensor::<CpuRuntime>::try_empty_in(&[m + 1], dtype, indptr.tier(), &client.device)?;
    let starts = Tensor::<CpuRuntime>::try_empty_in(&[m], dtype, indptr.tier(), &client.device)?;

    let nodes_ptr = nodes_contig.storage().ptr();
    let (degrees_ptr, starts_ptr) = (degrees.storage().ptr(), starts.storage().ptr());
    tracing::trace!(num_nodes, m, dtype = %dtype, nodes_dtype = %nodes.dtype(), "{OP}");

    dispatch_int_dtype!(dtype, I => {
        dispatch_int_dtype!(nodes.dtype(), N => {
            client.install_parallelism(|| unsafe {
                kernels::slice_indptr_kernel::<I, N>(
                    indptr_ptr as *const I,
                    num_nodes,
                    nodes_ptr as *const N,
                    m,
                    degrees_ptr as *mut I,
                    starts_ptr as *mut I,
                    min_len,
                )
            })?;
        }, OP);
    }, OP);

    Ok((degrees, starts))
}

/// Split sliced node segments into per-edge-type segments
pub fn slice_csc_indptr_hetero_impl(
    client: &CpuClient,
    sub_indptr: &Tensor<CpuRuntime>,
    etypes: &Tensor<CpuRuntime>,
    sliced_indptr: &Tensor<CpuRuntime>,
    num_fanouts: usize,
) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
    const OP: &str = "slice_csc_indptr_hetero";
    if num_fanouts == 0 {
        return Err(Error::invalid_argument(
            "num_fanouts",
            "at least one edge type is required",
        ));
    }
    let r = offsets_len(sub_indptr, OP)?;
    require_len(sliced_indptr, r)?;
    require_same_dtype(sub_indptr, sliced_indptr)?;
    let etypes_len = require_1d(etypes)?;
    require_int(etypes, OP)?;

    let split = r.checked_mul(num_fanouts).ok_or_else(|| {
        Error::invalid_argument(
            "num_fanouts",
            format!("{r} nodes x {num_fanouts} edge types overflows usize"),
        )
    })?;

    let dtype = sub_indptr.dtype();
    let tier = sub_indptr.tier();
    let sub_contig = contiguous_input(client, sub_indptr, OP)?;
    let etypes_contig = contiguous_input(client, etypes, OP)?;
    let sliced_contig = contiguous_input(client, sliced_indptr, OP)?;
    let new_sub = Tensor::<CpuRuntime>::try_empty_in(&[split + 1], dtype, tier, &client.device)?;
    let new_indeg = Tensor::<CpuRuntime>::try_empty_in(&[split + 1], dtype, tier, &client.device)?;
    let new_sliced = Tensor::<CpuRuntime>::try_empty_in(&[split], dtype, tier, &client.device)?;

    let sub_ptr = sub_contig.storage().ptr();
    let etypes_ptr = etypes_contig.storage().ptr();
    let sliced_ptr = sliced_contig.storage().ptr();
    let out_ptrs = (
        new_sub.storage().ptr(),
        new_indeg.storage().ptr(),
        new_sliced.storage().ptr(),
    );
    let min_len = client.rayon_min_len();
    tracing::trace!(r, num_fanouts, etypes_len, "{OP}");

    dispatch_int_dtype!(dtype, I => {
        dispatch_int_dtype!(etypes.dtype(), E => {
            client.install_parallelism(|| unsafe {
                kernels::slice_indptr_hetero_kernel::<I, E>(
                    sub_ptr as *const I,
                    r,
                    etypes_ptr as *const E,
                    etypes_len,
                    sliced_ptr as *const I,
                    num_fanouts,
                    out_ptrs.0 as *mut I,
                    out_ptrs.1 as *mut I,
                    out_ptrs.2 as *mut I,
                    min_len,
                )
            })?;
        }, OP);
    }, OP);

    Ok((new_sub, new_indeg, new_sliced))
}

/// Select the neighbor lists of `nodes` from a full CSC graph
pub fn index_select_csc_impl(
    client: &CpuClient,
    indptr: &Tensor<CpuRuntime>,
    indices: &Tensor<CpuRuntime>,
    nodes: &Tensor<CpuRuntime>,
    output_size: Option<usize>,
) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
    let num_nodes = offsets_len(indptr, "index_select_csc")?;
    let (in_degree, sliced_indptr) = slice_csc_indptr_impl(client, indptr, Some(nodes))?;
    let config = IndexSelectCscConfig {
        nodes_max: Some(num_nodes.saturating_sub(1) as u64),
        output_size,
    };
    index_select_csc_sliced_impl(client, &in_degree, &sliced_indptr, indices, nodes, config)
}

/// Select neighbor lists described by degrees and segment starts
pub fn index_select_csc_sliced_impl(
    client: &CpuClient,
    in_degree: &Tensor<CpuRuntime>,
    sliced_indptr: &Tensor<CpuRuntime>,
    indices: &Tensor<CpuRuntime>,
    nodes: &Tensor<CpuRuntime>,
    config: IndexSelectCscConfig,
) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
    const OP: &str = "index_select_csc";
    let m = offsets_len(in_degree, OP)?;
    require_len(sliced_indptr, m)?;
    require_len(nodes, m)?;
    require_int(nodes, OP)?;
    require_same_dtype(in_degree, sliced_indptr)?;
    let indices_len = require_1d(indices)?;
    if indices.dtype().is_bool() {
        return Err(Error::unsupported_dtype(indices.dtype(), OP));
    }

    let new_indptr = exclusive_cumsum_impl(client, in_degree, in_degree.dtype())?;
    let total = read_total(&new_indptr, m, "in_degree", OP)?;
    check_size_hint(OP, config.output_size, total)?;

    let segments_max = m.saturating_sub(1) as u64;
    let bound = match config.nodes_max {
        Some(nodes_max) => nodes_max.max(segments_max),
        None => {
            tracing::debug!(m, "nodes_max not given, sizing segment ids by segment count");
            segments_max
        }
    };
    let narrow_ids = bound <= u64::from(u32::MAX);

    let starts_contig = contiguous_input(client, sliced_indptr, OP)?;
    let indices_contig = contiguous_input(client, indices, OP)?;
    let new_indices = Tensor::<CpuRuntime>::try_empty_in(
        &[total],
        indices.dtype(),
        indices.tier(),
        &client.device,
    )?;

    let new_indptr_ptr = new_indptr.storage().ptr();
    let starts_ptr = starts_contig.storage().ptr();
    let indices_ptr = indices_contig.storage().ptr();
    let out_ptr = new_indices.storage().ptr();
    let min_len = client.rayon_min_len();
    tracing::trace!(m, total, indices_len, narrow_ids, "{OP}");

    dispatch_int_dtype!(in_degree.dtype(), I => {
        dispatch_dtype!(indices.dtype(), T => {
            client.install_parallelism(|| unsafe {
                if narrow_ids {
                    kernels::gather_segments_kernel::<I, T, u32>(
                        new_indptr_ptr as *const I,
                        m,
                        starts_ptr as *const I,
                        indices_ptr as *const T,
                        indices_len,
                        out_ptr as *mut T,
                        total,
                        min_len,
                    )
                } else {
                    kernels::gather_segments_kernel::<I, T, u64>(
                        new_indptr_ptr as *const I,
                        m,
                        starts_ptr as *const I,
                        indices_ptr as *const T,
                        indices_len,
                        out_ptr as *mut T,
                        total,
                        min_len,
                    )
                }
            })?;
        }, OP);
    }, OP);

    Ok((new_indptr, new_indices))
}

/// Expand an offset array into one coordinate per edge
pub fn expand_indptr_impl(
    client: &CpuClient,
    indptr: &Tensor<CpuRuntime>,
    dtype: DType,
    config: ExpandIndptrConfig<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    const OP: &str = "expand_indptr";
    if !dtype.is_int() {
        return Err(Error::unsupported_dtype(dtype, OP));
    }
    let n = offsets_len(indptr, OP)?;
    let indptr_contig = contiguous_input(client, indptr, OP)?;
    let total = read_total(&indptr_contig, n, "indptr", OP)?;
    check_size_hint(OP, config.output_size, total)?;
    let min_len = client.rayon_min_len();

    // Segment values converted to the output dtype up front
    let values = match &config.node_ids {
        Some(ids) => {
            require_len(ids, n)?;
            require_int(ids, OP)?;
            let ids_contig = contiguous_input(client, ids, OP)?;
            if ids.dtype() == dtype {
                Some(ids_contig)
            } else {
                let converted =
                    Tensor::<CpuRuntime>::try_empty_in(&[n], dtype, ids.tier(), &client.device)?;
                let (src_ptr, dst_ptr) = (ids_contig.storage().ptr(), converted.storage().ptr());
                dispatch_int_dtype!(ids.dtype(), S => {
                    dispatch_int_dtype!(dtype, O => {
                        client.install_parallelism(|| unsafe {
                            kernels::convert_ids_kernel::<S, O>(
                                src_ptr as *const S,
                                dst_ptr as *mut O,
                                n,
                                min_len,
                            )
                        })?;
                    }, OP);
                }, OP);
                Some(converted)
            }
        }
        None => {
            tracing::debug!(n, "node_ids not given, expanding segment indices");
            None
        }
    };

    let out = Tensor::<CpuRuntime>::try_empty_in(&[total], dtype, indptr.tier(), &client.device)?;
    let indptr_ptr = indptr_contig.storage().ptr();
    let values_ptr = values.as_ref().map(|v| v.storage().ptr());
    let out_ptr = out.storage().ptr();
    tracing::trace!(n, total, dtype = %dtype, "{OP}");

    dispatch_int_dtype!(indptr.dtype(), I => {
        dispatch_int_dtype!(dtype, O => {
            client.install_parallelism(|| unsafe {
                let values = values_ptr.map(|ptr| kernels::raw_slice(ptr as *const O, n));
                kernels::expand_indptr_kernel::<I, O>(
                    indptr_ptr as *const I,
                    n,
                    values,
                    out_ptr as *mut O,
                    total,
                    min_len,
                )
            })?;
        }, OP);
    }, OP);

    Ok(out)
}
