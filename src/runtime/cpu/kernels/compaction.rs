//! Id deduplication and compaction kernel

use super::sort::{bits_for, radix_argsort};
use super::{for_each_range, map_ranges};
use crate::dtype::IndexElement;
use crate::error::{Error, Result};

/// Output of [`unique_and_compact_kernel`]
pub struct Compacted<T> {
    /// Universe: the supplied destination ids, then every new id
    pub unique_ids: Vec<T>,
    /// Universe position of each source id
    pub compacted_src: Vec<T>,
    /// Universe position of each destination id
    pub compacted_dst: Vec<T>,
}

/// Deduplicate `unique_dst ++ dst ++ src` and renumber `src` and `dst`
///
/// 1. Stable radix argsort of the concatenation, so equal ids are ordered
///    by scan position and `unique_dst` entries lead their runs.
/// 2. One pass over runs keeps each run head: the id's first occurrence.
/// 3. Heads are ordered by first occurrence, which puts `unique_dst` first
///    in its given order and every other id after it in scan order.
/// 4. Every `src`/`dst` id is binary searched among the sorted heads.
///
/// Keys must already be validated as non-negative and below `1 << num_bits`.
///
/// # Errors
/// - `InvalidArgument` if `unique_dst` contains a duplicate
/// - `Overflow` if a universe position does not fit `T`
pub fn unique_and_compact_kernel<T: IndexElement>(
    src: &[T],
    dst: &[T],
    unique_dst: &[T],
    num_bits: u32,
    chunk_len: usize,
) -> Result<Compacted<T>> {
    let (u, d) = (unique_dst.len(), dst.len());
    let total = u + d + src.len();
    let value_at = |p: usize| -> T {
        if p < u {
            unique_dst[p]
        } else if p < u + d {
            dst[p - u]
        } else {
            src[p - u - d]
        }
    };

    let keys: Vec<u64> = unique_dst
        .iter()
        .chain(dst)
        .chain(src)
        .map(|v| v.radix_key())
        .collect();
    let perm = radix_argsort(&keys, num_bits, chunk_len);

    // Run heads in sorted order
    let (keys_ref, perm_ref) = (&keys, &perm);
    let heads_per_range: Vec<Result<Vec<usize>>> = map_ranges(total, chunk_len, |range| {
        let mut heads = Vec::new();
        for i in range {
            let p = perm_ref[i];
            if i == 0 || keys_ref[perm_ref[i - 1]] != keys_ref[p] {
                heads.push(p);
            } else if p < u {
                return Err(Error::invalid_argument(
                    "unique_dst_ids",
                    format!("duplicate id {} at position {p}", keys_ref[p]),
                ));
            }
        }
        Ok(heads)
    });
    let mut first_pos = Vec::new();
    for heads in heads_per_range {
        first_pos.extend(heads?);
    }
    let sorted_keys: Vec<u64> = first_pos.iter().map(|&p| keys[p]).collect();

    // Universe order is first-occurrence order
    let pos_keys: Vec<u64> = first_pos.iter().map(|&p| p as u64).collect();
    let order = radix_argsort(&pos_keys, bits_for(total as u64), chunk_len);

    let mut universe_pos = vec![T::zero(); order.len()];
    let mut unique_ids = Vec::with_capacity(order.len());
    for (r, &k) in order.iter().enumerate() {
        universe_pos[k] = T::from_i128(r as i128).ok_or(Error::Overflow {
            op: "unique_and_compact",
            dtype: T::DTYPE,
        })?;
        unique_ids.push(value_at(first_pos[k]));
    }

    let compacted_src = compact(src, &sorted_keys, &universe_pos, chunk_len);
    let compacted_dst = compact(dst, &sorted_keys, &universe_pos, chunk_len);

    Ok(Compacted {
        unique_ids,
        compacted_src,
        compacted_dst,
    })
}

/// Map every id to its universe position by binary search on the sorted keys
fn compact<T: IndexElement>(
    ids: &[T],
    sorted_keys: &[u64],
    universe_pos: &[T],
    chunk_len: usize,
) -> Vec<T> {
    let mut out = vec![T::zero(); ids.len()];
    let out_addr = out.as_mut_ptr() as usize;
    for_each_range(ids.len(), chunk_len, |range| {
        let out = out_addr as *mut T;
        for i in range {
            // Every id is a member of the universe
            let k = sorted_keys.partition_point(|&key| key < ids[i].radix_key());
            // SAFETY: ranges are disjoint and within `ids.len()`
            unsafe { *out.add(i) = universe_pos[k] };
        }
    });
    out
}
