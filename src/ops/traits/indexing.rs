//! Gather and row-selection operations trait.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Gather and row-selection operations
pub trait IndexingOps<R: Runtime> {
    /// `out[j] = input[index[j]]` over 1-D tensors
    ///
    /// If `dtype` is given the gathered values are converted with numeric
    /// `as` semantics; otherwise the output keeps the input dtype.
    fn gather(
        &self,
        input: &Tensor<R>,
        index: &Tensor<R>,
        dtype: Option<DType>,
    ) -> Result<Tensor<R>> {
        let _ = (input, index, dtype);
        Err(Error::NotImplemented {
            feature: "IndexingOps::gather",
        })
    }

    /// Select rows of an `(N, ...)` tensor, producing `(M, ...)`
    ///
    /// `index` must be 1-D with values in `[0, N)`.
    fn index_select(&self, input: &Tensor<R>, index: &Tensor<R>) -> Result<Tensor<R>> {
        let _ = (input, index);
        Err(Error::NotImplemented {
            feature: "IndexingOps::index_select",
        })
    }

    /// Select rows directly out of a pinned host buffer
    ///
    /// `input` must live in the `Pinned` tier; `index` must be in a tier
    /// the client's device can read. Rows are copied straight from the
    /// pinned buffer without first staging `input`. The output is allocated
    /// in `index`'s tier.
    fn uva_index_select(&self, input: &Tensor<R>, index: &Tensor<R>) -> Result<Tensor<R>> {
        let _ = (input, index);
        Err(Error::NotImplemented {
            feature: "IndexingOps::uva_index_select",
        })
    }
}
