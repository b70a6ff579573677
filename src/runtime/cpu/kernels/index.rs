//! Gather, cast and row-selection kernels

use super::{for_each_range, raw_slice, try_for_each_range};
use crate::dtype::{Element, IndexElement};
use crate::error::{Error, Result};
use num_traits::AsPrimitive;

/// Resolve an index value against a dimension of size `size`
#[inline]
fn checked_row<I: IndexElement>(idx: I, size: usize) -> Result<usize> {
    let v = idx.as_i128();
    if v < 0 || v >= size as i128 {
        return Err(Error::index_out_of_bounds(v, size));
    }
    Ok(v as usize)
}

/// `out[j] = input[index[j]]`
///
/// # Errors
/// `IndexOutOfBounds` for any index outside `[0, input_len)`; nothing is
/// read out of bounds.
///
/// # Safety
/// - `input` must point to `input_len` elements
/// - `index` and `out` must point to `index_len` elements
pub unsafe fn gather_kernel<T: Element, I: IndexElement>(
    input: *const T,
    input_len: usize,
    index: *const I,
    index_len: usize,
    out: *mut T,
    chunk_len: usize,
) -> Result<()> {
    if index_len == 0 {
        return Ok(());
    }
    let input = raw_slice(input, input_len);
    let index = raw_slice(index, index_len);
    let out_addr = out as usize;
    try_for_each_range(index_len, chunk_len, |range| {
        let out = out_addr as *mut T;
        for j in range {
            *out.add(j) = input[checked_row(index[j], input_len)?];
        }
        Ok(())
    })
}

/// Elementwise numeric conversion with `as` semantics
///
/// # Safety
/// - `input` and `out` must point to `len` elements
pub unsafe fn cast_kernel<T, O>(input: *const T, out: *mut O, len: usize, chunk_len: usize)
where
    T: Element + AsPrimitive<O>,
    O: Element,
{
    if len == 0 {
        return;
    }
    let input = raw_slice(input, len);
    let out_addr = out as usize;
    for_each_range(len, chunk_len, |range| {
        let out = out_addr as *mut O;
        for i in range {
            *out.add(i) = input[i].as_();
        }
    });
}

/// Copy whole rows of `row_bytes` bytes: `out[j] = input[index[j]]`
///
/// Rows are copied as raw bytes, so one kernel serves every dtype. Used
/// for same-tier row selection and for reading rows straight out of a
/// pinned buffer.
///
/// # Safety
/// - `input` must point to `num_rows * row_bytes` bytes
/// - `index` must point to `index_len` elements
/// - `out` must point to `index_len * row_bytes` bytes and not overlap `input`
pub unsafe fn index_select_rows_kernel<I: IndexElement>(
    input: *const u8,
    num_rows: usize,
    row_bytes: usize,
    index: *const I,
    index_len: usize,
    out: *mut u8,
    chunk_len: usize,
) -> Result<()> {
    if index_len == 0 {
        return Ok(());
    }
    let index = raw_slice(index, index_len);
    let input_addr = input as usize;
    let out_addr = out as usize;
    try_for_each_range(index_len, chunk_len, |range| {
        let input = input_addr as *const u8;
        let out = out_addr as *mut u8;
        for j in range {
            let row = checked_row(index[j], num_rows)?;
            if row_bytes == 0 {
                continue;
            }
            std::ptr::copy_nonoverlapping(
                input.add(row * row_bytes),
                out.add(j * row_bytes),
                row_bytes,
            );
        }
        Ok(())
    })
}
