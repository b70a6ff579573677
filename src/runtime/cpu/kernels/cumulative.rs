//! Exclusive prefix-sum kernel

use super::{map_ranges, raw_slice, try_for_each_range};
use crate::dtype::IndexElement;
use crate::error::{Error, Result};

/// Exclusive prefix sum with checked narrowing
///
/// `out[i] = sum(a[0..i])`. Runs in two passes: per-range totals, a serial
/// scan of the totals, then per-range writes seeded by that scan. Sums are
/// carried in `i128`, so only the final narrowing to `O` can fail.
///
/// # Errors
/// - `InvalidArgument` if any count is negative
/// - `Overflow` if a prefix does not fit `O`
///
/// # Safety
/// - `a` must point to `len` elements
/// - `out` must point to `len` elements and not overlap `a`
pub unsafe fn exclusive_cumsum_kernel<T: IndexElement, O: IndexElement>(
    a: *const T,
    out: *mut O,
    len: usize,
    chunk_len: usize,
) -> Result<()> {
    if len == 0 {
        return Ok(());
    }
    let a = raw_slice(a, len);
    let out_addr = out as usize;

    let totals: Vec<Result<i128>> = map_ranges(len, chunk_len, |range| {
        let start = range.start;
        a[range]
            .iter()
            .enumerate()
            .try_fold(0i128, |acc, (i, &v)| {
                let v = v.as_i128();
                if v < 0 {
                    Err(Error::invalid_argument(
                        "a",
                        format!("negative count {v} at position {}", start + i),
                    ))
                } else {
                    Ok(acc + v)
                }
            })
    });

    let mut bases = Vec::with_capacity(totals.len());
    let mut running = 0i128;
    for total in totals {
        bases.push(running);
        running += total?;
    }

    try_for_each_range(len, chunk_len, |range| {
        let out = out_addr as *mut O;
        let mut acc = bases[range.start / chunk_len.max(1)];
        for i in range {
            *out.add(i) = O::from_i128(acc).ok_or(Error::Overflow {
                op: "exclusive_cumsum",
                dtype: O::DTYPE,
            })?;
            acc += a[i].as_i128();
        }
        Ok(())
    })
}
