//! Membership-test kernels

use super::{for_each_range, raw_slice};
use crate::dtype::IndexElement;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Private sorted copy of a haystack
///
/// # Safety
/// - `a` must point to `len` elements
pub unsafe fn sorted_copy<T: IndexElement>(a: *const T, len: usize) -> Vec<T> {
    let mut copy = raw_slice(a, len).to_vec();
    #[cfg(feature = "rayon")]
    copy.par_sort_unstable();
    #[cfg(not(feature = "rayon"))]
    copy.sort_unstable();
    copy
}

/// `out[i] = 1` iff `elements[i]` occurs in `sorted_haystack`
///
/// Every query is an independent binary search, so ranges share no state.
///
/// # Safety
/// - `elements` and `out` must point to `len` elements
pub unsafe fn isin_kernel<T: IndexElement>(
    elements: *const T,
    len: usize,
    sorted_haystack: &[T],
    out: *mut u8,
    chunk_len: usize,
) {
    if len == 0 {
        return;
    }
    let elements = raw_slice(elements, len);
    let out_addr = out as usize;
    for_each_range(len, chunk_len, |range| {
        let out = out_addr as *mut u8;
        for i in range {
            let found = sorted_haystack.binary_search(&elements[i]).is_ok();
            *out.add(i) = found as u8;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isin() {
        let haystack = [9i32, 2, 7, 2];
        let sorted = unsafe { sorted_copy(haystack.as_ptr(), 4) };
        assert_eq!(sorted, [2, 2, 7, 9]);

        let queries = [7i32, 3, 2, 9, -1];
        let mut out = [0u8; 5];
        unsafe { isin_kernel(queries.as_ptr(), 5, &sorted, out.as_mut_ptr(), 2) };
        assert_eq!(out, [1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_isin_empty_haystack() {
        let queries = [1u16, 2];
        let mut out = [1u8; 2];
        unsafe { isin_kernel(queries.as_ptr(), 2, &[], out.as_mut_ptr(), 1) };
        assert_eq!(out, [0, 0]);
    }
}
