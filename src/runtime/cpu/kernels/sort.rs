//! Bounded-range radix sort kernels

use super::{for_each_range, map_ranges, raw_slice, try_for_each_range};
use crate::dtype::IndexElement;
use crate::error::{Error, Result};

/// Bits per radix digit
const RADIX_BITS: u32 = 8;
const RADIX: usize = 1 << RADIX_BITS;

/// Validate sort keys and return their maximum
///
/// Every value must be non-negative and, when `num_bits` is given, below
/// `1 << num_bits`. Returns 0 for empty input.
///
/// # Safety
/// - `a` must point to `len` elements
pub unsafe fn scan_keys_kernel<T: IndexElement>(
    a: *const T,
    len: usize,
    num_bits: Option<u32>,
    chunk_len: usize,
) -> Result<u64> {
    if len == 0 {
        return Ok(0);
    }
    let a = raw_slice(a, len);
    let limit: Option<u64> = num_bits.and_then(|bits| 1u64.checked_shl(bits));

    let maxima: Vec<Result<u64>> = map_ranges(len, chunk_len, |range| {
        let start = range.start;
        let mut max = 0u64;
        for (i, &v) in a[range].iter().enumerate() {
            if v.as_i128() < 0 {
                return Err(Error::invalid_argument(
                    "ids",
                    format!("negative id {} at position {}", v.as_i128(), start + i),
                ));
            }
            let key = v.radix_key();
            match limit {
                Some(limit) if key >= limit => {
                    return Err(Error::index_out_of_bounds(
                        key as i128,
                        usize::try_from(limit).unwrap_or(usize::MAX),
                    ));
                }
                _ => {}
            }
            max = max.max(key);
        }
        Ok(max)
    });

    maxima
        .into_iter()
        .try_fold(0u64, |acc, m| m.map(|m| acc.max(m)))
}

/// Number of bits needed to represent `max_key`
#[inline]
pub fn bits_for(max_key: u64) -> u32 {
    u64::BITS - max_key.leading_zeros()
}

/// Stable LSD radix argsort of `keys` bounded by `1 << num_bits`
///
/// Returns the permutation `perm` with `keys[perm[i]]` non-decreasing and
/// equal keys in ascending position order. Each pass builds per-range digit
/// histograms, scans them digit-major, and scatters every range into its
/// own disjoint slots, so the result does not depend on `chunk_len`.
/// Passes in which every key shares one digit are skipped.
pub fn radix_argsort(keys: &[u64], num_bits: u32, chunk_len: usize) -> Vec<usize> {
    let len = keys.len();
    let mut perm: Vec<usize> = (0..len).collect();
    if len <= 1 || num_bits == 0 {
        return perm;
    }
    let chunk_len = chunk_len.max(1);
    let passes = num_bits.min(u64::BITS).div_ceil(RADIX_BITS);

    let mut cur_keys = keys.to_vec();
    let mut next_keys = vec![0u64; len];
    let mut next_perm = vec![0usize; len];

    for pass in 0..passes {
        let shift = pass * RADIX_BITS;
        let digit = |k: u64| ((k >> shift) as usize) & (RADIX - 1);

        let histograms: Vec<[usize; RADIX]> = map_ranges(len, chunk_len, |range| {
            let mut hist = [0usize; RADIX];
            for &k in &cur_keys[range] {
                hist[digit(k)] += 1;
            }
            hist
        });

        // A single populated digit leaves the order unchanged
        let mut totals = [0usize; RADIX];
        for hist in &histograms {
            for (t, &h) in totals.iter_mut().zip(hist.iter()) {
                *t += h;
            }
        }
        if totals.iter().any(|&t| t == len) {
            continue;
        }

        // Digit-major, range-minor offsets keep the scatter stable
        let mut offsets = vec![[0usize; RADIX]; histograms.len()];
        let mut running = 0usize;
        for d in 0..RADIX {
            for (c, hist) in histograms.iter().enumerate() {
                offsets[c][d] = running;
                running += hist[d];
            }
        }

        let keys_addr = next_keys.as_mut_ptr() as usize;
        let perm_addr = next_perm.as_mut_ptr() as usize;
        let (src_keys, src_perm) = (&cur_keys, &perm);
        for_each_range(len, chunk_len, |range| {
            let mut slots = offsets[range.start / chunk_len];
            let keys_out = keys_addr as *mut u64;
            let perm_out = perm_addr as *mut usize;
            for i in range {
                let k = src_keys[i];
                let d = digit(k);
                // SAFETY: slots of distinct ranges are disjoint by construction
                unsafe {
                    *keys_out.add(slots[d]) = k;
                    *perm_out.add(slots[d]) = src_perm[i];
                }
                slots[d] += 1;
            }
        });

        std::mem::swap(&mut cur_keys, &mut next_keys);
        std::mem::swap(&mut perm, &mut next_perm);
    }

    perm
}

/// Stable argsort of validated non-negative ids
///
/// # Safety
/// - `a` must point to `len` elements, all in `[0, 1 << num_bits)`
pub unsafe fn argsort_ids_kernel<T: IndexElement>(
    a: *const T,
    len: usize,
    num_bits: u32,
    chunk_len: usize,
) -> Vec<usize> {
    let keys: Vec<u64> = raw_slice(a, len)
        .iter()
        .map(|v| v.radix_key())
        .collect();
    radix_argsort(&keys, num_bits, chunk_len)
}

/// Write `sorted[i] = a[perm[i]]` and optionally `positions[i] = perm[i]`
///
/// # Safety
/// - `a`, `sorted` and (if non-null) `positions` must point to `perm.len()` elements
pub unsafe fn apply_permutation_kernel<T: IndexElement>(
    a: *const T,
    perm: &[usize],
    sorted: *mut T,
    positions: *mut i64,
    chunk_len: usize,
) -> Result<()> {
    let len = perm.len();
    let a = raw_slice(a, len);
    let sorted_addr = sorted as usize;
    let positions_addr = positions as usize;
    try_for_each_range(len, chunk_len, |range| {
        let sorted = sorted_addr as *mut T;
        let positions = positions_addr as *mut i64;
        for i in range {
            let p = perm[i];
            *sorted.add(i) = a[p];
            if !positions.is_null() {
                *positions.add(i) = i64::try_from(p).map_err(|_| Error::Overflow {
                    op: "sort_ids_with_positions",
                    dtype: crate::dtype::DType::I64,
                })?;
            }
        }
        Ok(())
    })
}
