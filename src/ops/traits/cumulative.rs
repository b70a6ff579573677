//! Prefix-sum operations trait.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Prefix-sum operations
///
/// Offset arrays are built from degree arrays with an exclusive prefix sum,
/// so these operations define the indptr convention used by every CSC op.
pub trait CumulativeOps<R: Runtime> {
    /// Exclusive prefix sum of a 1-D integer tensor
    ///
    /// `out[i] = sum(a[0..i])`, `out[0] = 0`, same length and dtype as `a`.
    /// Sums are accumulated without wrapping; a prefix that does not fit the
    /// dtype returns `Error::Overflow`, and negative counts return
    /// `Error::InvalidArgument`.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphslice::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let degrees = Tensor::<CpuRuntime>::from_slice(&[3i64, 2, 0], &[3], &device);
    /// let indptr = client.exclusive_cumsum(&degrees)?;
    /// assert_eq!(indptr.to_vec::<i64>(), [0, 3, 5]);
    /// # Ok::<(), graphslice::error::Error>(())
    /// ```
    fn exclusive_cumsum(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        let _ = a;
        Err(Error::NotImplemented {
            feature: "CumulativeOps::exclusive_cumsum",
        })
    }

    /// Exclusive prefix sum written in `dtype`
    ///
    /// Used to turn narrow degree counts (e.g. `I32`) into wide offsets
    /// (`I64`) without a separate cast.
    fn exclusive_cumsum_to(&self, a: &Tensor<R>, dtype: DType) -> Result<Tensor<R>> {
        let _ = (a, dtype);
        Err(Error::NotImplemented {
            feature: "CumulativeOps::exclusive_cumsum_to",
        })
    }
}
