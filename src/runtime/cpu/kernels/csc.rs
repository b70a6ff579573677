//! CSC offset-array kernels: slicing, per-type splitting, segment gather and expansion

use super::{raw_slice, try_for_each_range};
use crate::dtype::{Element, IndexElement};
use crate::error::{Error, Result};

#[inline]
fn narrow<O: IndexElement>(v: i128, op: &'static str) -> Result<O> {
    O::from_i128(v).ok_or(Error::Overflow { op, dtype: O::DTYPE })
}

#[inline]
fn degree(lo: i128, hi: i128, arg: &'static str, node: usize) -> Result<i128> {
    if hi < lo {
        return Err(Error::invalid_argument(
            arg,
            format!("offsets decrease at node {node} ({lo} > {hi})"),
        ));
    }
    Ok(hi - lo)
}

/// Degrees and segment starts of a node subset
///
/// Writes `degrees[j] = indptr[nodes[j] + 1] - indptr[nodes[j]]` and
/// `starts[j] = indptr[nodes[j]]` for `j < m`, then `degrees[m] = 0`.
///
/// # Errors
/// - `IndexOutOfBounds` if a node id is outside `[0, num_nodes)`
/// - `InvalidArgument` if a selected segment has decreasing offsets
///
/// # Safety
/// - `indptr` must point to `num_nodes + 1` elements
/// - `nodes` and `starts` must point to `m` elements, `degrees` to `m + 1`
#[allow(clippy::too_many_arguments)]
pub unsafe fn slice_indptr_kernel<I: IndexElement, N: IndexElement>(
    indptr: *const I,
    num_nodes: usize,
    nodes: *const N,
    m: usize,
    degrees: *mut I,
    starts: *mut I,
    chunk_len: usize,
) -> Result<()> {
    let indptr = raw_slice(indptr, num_nodes + 1);
    let nodes = raw_slice(nodes, m);
    let (degrees_addr, starts_addr) = (degrees as usize, starts as usize);

    try_for_each_range(m, chunk_len, |range| {
        let degrees = degrees_addr as *mut I;
        let starts = starts_addr as *mut I;
        for j in range {
            let v = nodes[j].as_i128();
            if v < 0 || v >= num_nodes as i128 {
                return Err(Error::index_out_of_bounds(v, num_nodes));
            }
            let v = v as usize;
            let lo = indptr[v].as_i128();
            let d = degree(lo, indptr[v + 1].as_i128(), "indptr", v)?;
            *degrees.add(j) = narrow(d, "slice_csc_indptr")?;
            *starts.add(j) = indptr[v];
        }
        Ok(())
    })?;

    *degrees.add(m) = I::zero();
    Ok(())
}

/// [`slice_indptr_kernel`] for the identity subset `0..num_nodes`
///
/// Degrees are the adjacent differences of `indptr`.
///
/// # Safety
/// - `indptr` and `degrees` must point to `num_nodes + 1` elements
/// - `starts` must point to `num_nodes` elements
pub unsafe fn slice_indptr_identity_kernel<I: IndexElement>(
    indptr: *const I,
    num_nodes: usize,
    degrees: *mut I,
    starts: *mut I,
    chunk_len: usize,
) -> Result<()> {
    let indptr = raw_slice(indptr, num_nodes + 1);
    let (degrees_addr, starts_addr) = (degrees as usize, starts as usize);

    try_for_each_range(num_nodes, chunk_len, |range| {
        let degrees = degrees_addr as *mut I;
        let starts = starts_addr as *mut I;
        for v in range {
            let d = degree(indptr[v].as_i128(), indptr[v + 1].as_i128(), "indptr", v)?;
            *degrees.add(v) = narrow(d, "slice_csc_indptr")?;
            *starts.add(v) = indptr[v];
        }
        Ok(())
    })?;

    *degrees.add(num_nodes) = I::zero();
    Ok(())
}

/// Split every node segment into `num_fanouts` per-type segments
///
/// For node `v` with tag segment `seg = etypes[sub_indptr[v]..sub_indptr[v + 1]]`
/// and `i = v * num_fanouts + t`, with `off(t)` the lower bound of `t` in `seg`:
/// - `new_sub[i] = sub_indptr[v] + off(t)`, and `new_sub[r * num_fanouts] = sub_indptr[r]`
/// - `new_indeg[i] = new_sub[i + 1] - new_sub[i]`, and a trailing 0
/// - `new_sliced[i] = sliced[v] + off(t)`
///
/// # Errors
/// - `ShapeMismatch` if `etypes_len != sub_indptr[r]`
/// - `IndexOutOfBounds` for tags outside `[0, num_fanouts)` or segments past `etypes_len`
/// - `InvalidArgument` for decreasing offsets or unsorted tags within a segment
/// - `Overflow` if a shifted offset does not fit the offset dtype
///
/// # Safety
/// - `sub_indptr` must point to `r + 1` elements, `sliced` to `r`
/// - `etypes` must point to `etypes_len` elements
/// - `new_sub` and `new_indeg` must point to `r * num_fanouts + 1` elements,
///   `new_sliced` to `r * num_fanouts`
#[allow(clippy::too_many_arguments)]
pub unsafe fn slice_indptr_hetero_kernel<I: IndexElement, E: IndexElement>(
    sub_indptr: *const I,
    r: usize,
    etypes: *const E,
    etypes_len: usize,
    sliced: *const I,
    num_fanouts: usize,
    new_sub: *mut I,
    new_indeg: *mut I,
    new_sliced: *mut I,
    chunk_len: usize,
) -> Result<()> {
    let sub_indptr = raw_slice(sub_indptr, r + 1);
    let tagged = sub_indptr[r].as_i128();
    if tagged != etypes_len as i128 {
        return Err(Error::ShapeMismatch {
            expected: vec![usize::try_from(tagged).unwrap_or(0)],
            got: vec![etypes_len],
        });
    }
    let etypes = raw_slice(etypes, etypes_len);
    let sliced = raw_slice(sliced, r);
    let addrs = (new_sub as usize, new_indeg as usize, new_sliced as usize);
    let f = num_fanouts;
    let node_chunk = (chunk_len / f.max(1)).max(1);

    try_for_each_range(r, node_chunk, |range| {
        let new_sub = addrs.0 as *mut I;
        let new_indeg = addrs.1 as *mut I;
        let new_sliced = addrs.2 as *mut I;
        let mut offsets = vec![0usize; f + 1];

        for v in range {
            let lo = sub_indptr[v].as_i128();
            let hi = sub_indptr[v + 1].as_i128();
            degree(lo, hi, "sub_indptr", v)?;
            if lo < 0 || hi > etypes_len as i128 {
                return Err(Error::index_out_of_bounds(hi.max(lo), etypes_len));
            }
            let seg = &etypes[lo as usize..hi as usize];

            for (k, &tag) in seg.iter().enumerate() {
                let t = tag.as_i128();
                if t < 0 || t >= f as i128 {
                    return Err(Error::index_out_of_bounds(t, f));
                }
                if k > 0 && seg[k - 1] > tag {
                    return Err(Error::invalid_argument(
                        "etypes",
                        format!("edge type tags of node {v} are not sorted"),
                    ));
                }
            }

            for (t, off) in offsets.iter_mut().enumerate().take(f) {
                *off = seg.partition_point(|e| e.as_i128() < t as i128);
            }
            offsets[f] = seg.len();

            let base = sliced[v].as_i128();
            for t in 0..f {
                let i = v * f + t;
                let off = offsets[t] as i128;
                *new_sub.add(i) = narrow(lo + off, "slice_csc_indptr_hetero")?;
                *new_indeg.add(i) = narrow(
                    (offsets[t + 1] - offsets[t]) as i128,
                    "slice_csc_indptr_hetero",
                )?;
                *new_sliced.add(i) = narrow(base + off, "slice_csc_indptr_hetero")?;
            }
        }
        Ok(())
    })?;

    *new_sub.add(r * f) = sub_indptr[r];
    *new_indeg.add(r * f) = I::zero();
    Ok(())
}

/// Expand an offset array: every slot of segment `j` gets `values[j]`
///
/// Without `values` the segment index `j` itself is written.
///
/// # Errors
/// - `InvalidArgument` if `indptr[0] != 0` or offsets decrease
/// - `IndexOutOfBounds` if a segment ends past `total`
/// - `Overflow` if a segment index does not fit `O`
///
/// # Safety
/// - `indptr` must point to `n + 1` elements
/// - `out` must point to `total` elements
pub unsafe fn expand_indptr_kernel<I: IndexElement, O: IndexElement>(
    indptr: *const I,
    n: usize,
    values: Option<&[O]>,
    out: *mut O,
    total: usize,
    chunk_len: usize,
) -> Result<()> {
    let indptr = raw_slice(indptr, n + 1);
    if indptr[0].as_i128() != 0 {
        return Err(Error::invalid_argument(
            "indptr",
            format!("must start at 0, got {}", indptr[0].as_i128()),
        ));
    }
    let out_addr = out as usize;

    try_for_each_range(n, chunk_len, |range| {
        let out = out_addr as *mut O;
        for j in range {
            let lo = indptr[j].as_i128();
            let hi = indptr[j + 1].as_i128();
            degree(lo, hi, "indptr", j)?;
            if hi > total as i128 {
                return Err(Error::index_out_of_bounds(hi, total));
            }
            let value = match values {
                Some(values) => values[j],
                None => narrow(j as i128, "expand_indptr")?,
            };
            for e in lo as usize..hi as usize {
                *out.add(e) = value;
            }
        }
        Ok(())
    })
}

/// Concatenate selected segments of `indices` (edge-parallel)
///
/// Segment `j` is `indices[starts[j]..starts[j] + deg(j)]`, written to
/// `out[new_indptr[j]..new_indptr[j + 1]]`. A per-edge segment-id scratch of
/// type `S` is expanded from `new_indptr` first, so every output edge is
/// resolved independently and high-degree segments do not serialize the copy.
///
/// # Errors
/// `IndexOutOfBounds` if a segment starts below 0 or reads past `indices_len`.
///
/// # Safety
/// - `new_indptr` must point to `m + 1` elements, a valid exclusive prefix
///   sum starting at 0 and ending at `total`
/// - `starts` must point to `m` elements
/// - `indices` must point to `indices_len` elements
/// - `out` must point to `total` elements
#[allow(clippy::too_many_arguments)]
pub unsafe fn gather_segments_kernel<I: IndexElement, T: Element, S: IndexElement>(
    new_indptr: *const I,
    m: usize,
    starts: *const I,
    indices: *const T,
    indices_len: usize,
    out: *mut T,
    total: usize,
    chunk_len: usize,
) -> Result<()> {
    if total == 0 {
        return Ok(());
    }
    let mut segment_ids = vec![S::zero(); total];
    expand_indptr_kernel::<I, S>(new_indptr, m, None, segment_ids.as_mut_ptr(), total, chunk_len)?;

    let new_indptr = raw_slice(new_indptr, m + 1);
    let starts = raw_slice(starts, m);
    let indices = raw_slice(indices, indices_len);
    let segment_ids = &segment_ids;
    let out_addr = out as usize;

    try_for_each_range(total, chunk_len, |range| {
        let out = out_addr as *mut T;
        for e in range {
            let j = segment_ids[e].as_i128() as usize;
            let start = starts[j].as_i128();
            let src = start + (e as i128 - new_indptr[j].as_i128());
            if start < 0 || src >= indices_len as i128 {
                return Err(Error::index_out_of_bounds(src, indices_len));
            }
            *out.add(e) = indices[src as usize];
        }
        Ok(())
    })
}

/// Checked id conversion between integer dtypes
///
/// # Safety
/// - `input` and `out` must point to `len` elements
pub unsafe fn convert_ids_kernel<S: IndexElement, O: IndexElement>(
    input: *const S,
    out: *mut O,
    len: usize,
    chunk_len: usize,
) -> Result<()> {
    let input = raw_slice(input, len);
    let out_addr = out as usize;
    try_for_each_range(len, chunk_len, |range| {
        let out = out_addr as *mut O;
        for i in range {
            *out.add(i) = narrow(input[i].as_i128(), "convert_ids")?;
        }
        Ok(())
    })
}
