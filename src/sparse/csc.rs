//! Compressed-sparse-column adjacency

use crate::dispatch_int_dtype;
use crate::dtype::{DType, IndexElement};
use crate::error::{Error, Result};
use crate::ops::{CscOps, ExpandIndptrConfig};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// CSC adjacency of a graph with N nodes
///
/// `indptr` has N+1 entries starting at 0 and ending at `indices.len()`;
/// node `v`'s in-neighbors are `indices[indptr[v]..indptr[v + 1]]`.
#[derive(Debug, Clone)]
pub struct CscGraph<R: Runtime> {
    pub(crate) indptr: Tensor<R>,
    pub(crate) indices: Tensor<R>,
}

impl<R: Runtime> CscGraph<R> {
    /// Create a graph from its offset and neighbor arrays
    ///
    /// Checks ranks, dtypes and the two ends of `indptr`. Monotonicity is
    /// checked lazily by the kernels that read a segment.
    pub fn new(indptr: Tensor<R>, indices: Tensor<R>) -> Result<Self> {
        if indptr.ndim() != 1 || indptr.numel() == 0 {
            return Err(Error::ShapeMismatch {
                expected: vec![indptr.numel().max(1)],
                got: indptr.shape().to_vec(),
            });
        }
        if indices.ndim() != 1 {
            return Err(Error::ShapeMismatch {
                expected: vec![indices.numel()],
                got: indices.shape().to_vec(),
            });
        }
        if !indptr.dtype().is_int() {
            return Err(Error::unsupported_dtype(indptr.dtype(), "CscGraph::new"));
        }

        let n = indptr.numel() - 1;
        let first = read_offset(&indptr, 0)?;
        let last = read_offset(&indptr, n)?;
        if first != 0 {
            return Err(Error::invalid_argument(
                "indptr",
                format!("must start at 0, got {first}"),
            ));
        }
        if last != indices.numel() as i128 {
            return Err(Error::invalid_argument(
                "indptr",
                format!(
                    "ends at {last} but indices has {} entries",
                    indices.numel()
                ),
            ));
        }

        Ok(Self { indptr, indices })
    }

    /// Number of nodes (columns)
    pub fn num_nodes(&self) -> usize {
        self.indptr.numel() - 1
    }

    /// Number of edges (stored neighbors)
    pub fn num_edges(&self) -> usize {
        self.indices.numel()
    }

    /// The offset array
    pub fn indptr(&self) -> &Tensor<R> {
        &self.indptr
    }

    /// The neighbor array
    pub fn indices(&self) -> &Tensor<R> {
        &self.indices
    }

    /// Split into `(indptr, indices)`
    pub fn into_parts(self) -> (Tensor<R>, Tensor<R>) {
        (self.indptr, self.indices)
    }

    /// Sub-graph made of the columns `nodes`, in `nodes` order
    ///
    /// Column `j` of the result is column `nodes[j]` of `self`.
    pub fn select_columns<C>(&self, client: &C, nodes: &Tensor<R>) -> Result<Self>
    where
        C: CscOps<R>,
    {
        let (indptr, indices) = client.index_select_csc(&self.indptr, &self.indices, nodes, None)?;
        Ok(Self { indptr, indices })
    }

    /// In-degree of every node, with a trailing 0
    pub fn in_degrees<C>(&self, client: &C) -> Result<Tensor<R>>
    where
        C: CscOps<R>,
    {
        client.slice_csc_indptr(&self.indptr, None).map(|(degrees, _)| degrees)
    }

    /// Column (destination node) of every edge, as `dtype`
    pub fn to_coo_columns<C>(&self, client: &C, dtype: DType) -> Result<Tensor<R>>
    where
        C: CscOps<R>,
    {
        let config = ExpandIndptrConfig {
            node_ids: None,
            output_size: Some(self.num_edges()),
        };
        client.expand_indptr(&self.indptr, dtype, config)
    }
}

fn read_offset<R: Runtime>(indptr: &Tensor<R>, pos: usize) -> Result<i128> {
    let elem = indptr.narrow(0, pos, 1)?;
    let value: i128;
    dispatch_int_dtype!(indptr.dtype(), T => {
        value = elem.item::<T>()?.as_i128();
    }, "CscGraph::new");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    fn graph(device: &CpuDevice) -> CscGraph<CpuRuntime> {
        let indptr = Tensor::<CpuRuntime>::from_slice(&[0i32, 2, 2, 5], &[4], device);
        let indices = Tensor::<CpuRuntime>::from_slice(&[10i32, 11, 20, 21, 22], &[5], device);
        CscGraph::new(indptr, indices).unwrap()
    }

    #[test]
    fn test_counts() {
        let device = CpuDevice::new();
        let g = graph(&device);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 5);
    }

    #[test]
    fn test_rejects_mismatched_edge_count() {
        let device = CpuDevice::new();
        let indptr = Tensor::<CpuRuntime>::from_slice(&[0i64, 2, 4], &[3], &device);
        let indices = Tensor::<CpuRuntime>::from_slice(&[1i64, 2, 3], &[3], &device);
        assert!(matches!(
            CscGraph::new(indptr, indices),
            Err(Error::InvalidArgument { arg: "indptr", .. })
        ));
    }

    #[test]
    fn test_rejects_nonzero_start() {
        let device = CpuDevice::new();
        let indptr = Tensor::<CpuRuntime>::from_slice(&[1u32, 2], &[2], &device);
        let indices = Tensor::<CpuRuntime>::from_slice(&[7u32, 8], &[2], &device);
        assert!(CscGraph::new(indptr, indices).is_err());
    }

    #[test]
    fn test_select_and_expand() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let g = graph(&device);

        let nodes = Tensor::<CpuRuntime>::from_slice(&[1i64, 2], &[2], &device);
        let sub = g.select_columns(&client, &nodes).unwrap();
        assert_eq!(sub.indptr().to_vec::<i32>(), [0, 0, 3]);
        assert_eq!(sub.indices().to_vec::<i32>(), [20, 21, 22]);

        let cols = g.to_coo_columns(&client, DType::I64).unwrap();
        assert_eq!(cols.to_vec::<i64>(), [0, 0, 2, 2, 2]);

        let degrees = g.in_degrees(&client).unwrap();
        assert_eq!(degrees.to_vec::<i32>(), [2, 0, 3, 0]);
    }
}
