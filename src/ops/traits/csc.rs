//! CSC slicing operations trait.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Options for [`CscOps::index_select_csc_sliced`]
///
/// - `nodes_max`: upper bound on any node id in `nodes`. It only selects
///   the width of the per-edge segment-id scratch (32-bit when the bound
///   fits, 64-bit otherwise); `None` uses the number of selected segments.
/// - `output_size`: the caller's promise of the selected edge total. A
///   different computed total fails with `Error::SizeHintMismatch`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexSelectCscConfig {
    /// Largest node id that may appear in `nodes`
    pub nodes_max: Option<u64>,
    /// Expected total number of selected edges
    pub output_size: Option<usize>,
}

/// Options for [`CscOps::expand_indptr`]
///
/// - `node_ids`: value written for each segment; defaults to `0..N`.
/// - `output_size`: expected `indptr[N]`; a mismatch fails with
///   `Error::SizeHintMismatch`.
#[derive(Clone, Debug)]
pub struct ExpandIndptrConfig<R: Runtime> {
    /// Per-segment ids, length N
    pub node_ids: Option<Tensor<R>>,
    /// Expected total edge count
    pub output_size: Option<usize>,
}

impl<R: Runtime> Default for ExpandIndptrConfig<R> {
    fn default() -> Self {
        Self {
            node_ids: None,
            output_size: None,
        }
    }
}

/// Slicing operations on compressed-sparse-column adjacency
///
/// A CSC graph with N nodes is an offset array `indptr` (length N+1,
/// non-decreasing, `indptr[0] == 0`) plus a neighbor array `indices` of
/// length `indptr[N]`. Node `v`'s in-neighbors are
/// `indices[indptr[v]..indptr[v + 1]]`.
pub trait CscOps<R: Runtime> {
    /// Per-node degrees and segment starts for a node subset
    ///
    /// Returns `(degrees, segment_start)`:
    /// - `degrees` has length M+1; `degrees[j] = indptr[nodes[j] + 1] - indptr[nodes[j]]`
    ///   and the trailing entry is 0, so its exclusive prefix sum is the
    ///   sliced offset array.
    /// - `segment_start` has length M; `segment_start[j] = indptr[nodes[j]]`.
    ///
    /// `nodes = None` selects every node. Both outputs use `indptr`'s dtype;
    /// `nodes` may be any integer dtype.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphslice::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let indptr = Tensor::<CpuRuntime>::from_slice(&[0i64, 2, 2, 5], &[4], &device);
    /// let nodes = Tensor::<CpuRuntime>::from_slice(&[2i64, 0], &[2], &device);
    /// let (degrees, starts) = client.slice_csc_indptr(&indptr, Some(&nodes))?;
    /// assert_eq!(degrees.to_vec::<i64>(), [3, 2, 0]);
    /// assert_eq!(starts.to_vec::<i64>(), [2, 0]);
    /// # Ok::<(), graphslice::error::Error>(())
    /// ```
    fn slice_csc_indptr(
        &self,
        indptr: &Tensor<R>,
        nodes: Option<&Tensor<R>>,
    ) -> Result<(Tensor<R>, Tensor<R>)> {
        let _ = (indptr, nodes);
        Err(Error::NotImplemented {
            feature: "CscOps::slice_csc_indptr",
        })
    }

    /// Split each sliced node segment into one segment per edge type
    ///
    /// `sub_indptr` (length R+1) indexes the already-sliced edge array whose
    /// per-edge type tags are `etypes`; `sliced_indptr` (length R) holds the
    /// matching segment starts in the original graph. Within a node's
    /// segment tags must be non-decreasing and in `[0, num_fanouts)`.
    ///
    /// Returns `(new_sub_indptr, new_indegrees, new_sliced_indptr)` indexed
    /// by `i = node * num_fanouts + t`; empty (node, type) pairs stay as
    /// zero-length segments. The first two have length `R * num_fanouts + 1`,
    /// the last `R * num_fanouts`.
    fn slice_csc_indptr_hetero(
        &self,
        sub_indptr: &Tensor<R>,
        etypes: &Tensor<R>,
        sliced_indptr: &Tensor<R>,
        num_fanouts: usize,
    ) -> Result<(Tensor<R>, Tensor<R>, Tensor<R>)> {
        let _ = (sub_indptr, etypes, sliced_indptr, num_fanouts);
        Err(Error::NotImplemented {
            feature: "CscOps::slice_csc_indptr_hetero",
        })
    }

    /// Select the neighbor lists of `nodes`
    ///
    /// Returns `(new_indptr, new_indices)`: `new_indptr` has length M+1 in
    /// `indptr`'s dtype, and `new_indices` concatenates the selected
    /// segments of `indices` in `nodes` order.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphslice::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let indptr = Tensor::<CpuRuntime>::from_slice(&[0i64, 2, 5, 5], &[4], &device);
    /// let indices = Tensor::<CpuRuntime>::from_slice(&[10i64, 11, 20, 21, 22], &[5], &device);
    /// let nodes = Tensor::<CpuRuntime>::from_slice(&[1i64, 2], &[2], &device);
    /// let (new_indptr, new_indices) = client.index_select_csc(&indptr, &indices, &nodes, None)?;
    /// assert_eq!(new_indptr.to_vec::<i64>(), [0, 3, 3]);
    /// assert_eq!(new_indices.to_vec::<i64>(), [20, 21, 22]);
    /// # Ok::<(), graphslice::error::Error>(())
    /// ```
    fn index_select_csc(
        &self,
        indptr: &Tensor<R>,
        indices: &Tensor<R>,
        nodes: &Tensor<R>,
        output_size: Option<usize>,
    ) -> Result<(Tensor<R>, Tensor<R>)> {
        let _ = (indptr, indices, nodes, output_size);
        Err(Error::NotImplemented {
            feature: "CscOps::index_select_csc",
        })
    }

    /// Select neighbor lists given the output of [`CscOps::slice_csc_indptr`]
    ///
    /// `in_degree` (length M+1) and `sliced_indptr` (length M) describe the
    /// selected segments of `indices`. `nodes` is the subset they were
    /// sliced for and is only checked for its length.
    fn index_select_csc_sliced(
        &self,
        in_degree: &Tensor<R>,
        sliced_indptr: &Tensor<R>,
        indices: &Tensor<R>,
        nodes: &Tensor<R>,
        config: IndexSelectCscConfig,
    ) -> Result<(Tensor<R>, Tensor<R>)> {
        let _ = (in_degree, sliced_indptr, indices, nodes, config);
        Err(Error::NotImplemented {
            feature: "CscOps::index_select_csc_sliced",
        })
    }

    /// Expand an offset array into one coordinate per edge
    ///
    /// Every position of segment `i` receives `node_ids[i]` (default `i`),
    /// converted to `dtype`.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphslice::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let indptr = Tensor::<CpuRuntime>::from_slice(&[0i64, 2, 3], &[3], &device);
    /// let cols = client.expand_indptr(&indptr, DType::I32, ExpandIndptrConfig::default())?;
    /// assert_eq!(cols.to_vec::<i32>(), [0, 0, 1]);
    /// # Ok::<(), graphslice::error::Error>(())
    /// ```
    fn expand_indptr(
        &self,
        indptr: &Tensor<R>,
        dtype: DType,
        config: ExpandIndptrConfig<R>,
    ) -> Result<Tensor<R>> {
        let _ = (indptr, dtype, config);
        Err(Error::NotImplemented {
            feature: "CscOps::expand_indptr",
        })
    }
}
