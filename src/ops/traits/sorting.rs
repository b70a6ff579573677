//! Id sorting and membership operations trait.

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Configuration for bounded-range id sorts
///
/// `num_bits` bounds every key to `[0, 1 << num_bits)`. `None` or `Some(0)`
/// infers the tightest bound from the data with one max-reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortConfig {
    /// Key width in bits, or `None` to infer
    pub num_bits: Option<u32>,
}

impl SortConfig {
    /// Config with an explicit key width
    pub fn with_num_bits(num_bits: u32) -> Self {
        Self {
            num_bits: Some(num_bits),
        }
    }
}

/// Sorting and membership operations on non-negative integer ids
pub trait SortingOps<R: Runtime> {
    /// Sort a 1-D tensor of non-negative ids in ascending order
    ///
    /// Keys outside `[0, 1 << num_bits)` return `Error::IndexOutOfBounds`.
    fn sort_ids(&self, a: &Tensor<R>, config: SortConfig) -> Result<Tensor<R>> {
        let _ = (a, config);
        Err(Error::NotImplemented {
            feature: "SortingOps::sort_ids",
        })
    }

    /// Sort ids and return the originating positions
    ///
    /// Returns `(sorted, positions)` with `sorted[i] == a[positions[i]]`;
    /// `positions` is `I64`. The sort is stable, so equal ids keep their
    /// input order.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphslice::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let ids = Tensor::<CpuRuntime>::from_slice(&[5i32, 1, 5, 0], &[4], &device);
    /// let (sorted, pos) = client.sort_ids_with_positions(&ids, SortConfig::default())?;
    /// assert_eq!(sorted.to_vec::<i32>(), [0, 1, 5, 5]);
    /// assert_eq!(pos.to_vec::<i64>(), [3, 1, 0, 2]);
    /// # Ok::<(), graphslice::error::Error>(())
    /// ```
    fn sort_ids_with_positions(
        &self,
        a: &Tensor<R>,
        config: SortConfig,
    ) -> Result<(Tensor<R>, Tensor<R>)> {
        let _ = (a, config);
        Err(Error::NotImplemented {
            feature: "SortingOps::sort_ids_with_positions",
        })
    }

    /// Test every element of `elements` for membership in `test_elements`
    ///
    /// Returns a `Bool` tensor shaped like `elements`. Both inputs are 1-D
    /// and share a dtype; neither needs to be sorted.
    fn isin(&self, elements: &Tensor<R>, test_elements: &Tensor<R>) -> Result<Tensor<R>> {
        let _ = (elements, test_elements);
        Err(Error::NotImplemented {
            feature: "SortingOps::isin",
        })
    }
}
