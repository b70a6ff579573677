//! Graph adjacency containers
//!
//! The ops in [`crate::ops`] work on bare offset/neighbor tensors. This
//! module pairs them into a validated container so the common mini-batch
//! steps read as method calls.
//!
//! # Usage
//!
//! ```
//! # use graphslice::prelude::*;
//! # let device = CpuDevice::new();
//! # let client = CpuRuntime::default_client(&device);
//! // 3 nodes: 0 <- {10, 11}, 1 <- {}, 2 <- {20, 21, 22}
//! let indptr = Tensor::<CpuRuntime>::from_slice(&[0i64, 2, 2, 5], &[4], &device);
//! let indices = Tensor::<CpuRuntime>::from_slice(&[10i64, 11, 20, 21, 22], &[5], &device);
//! let graph = CscGraph::new(indptr, indices)?;
//!
//! let nodes = Tensor::<CpuRuntime>::from_slice(&[2i64, 0], &[2], &device);
//! let sub = graph.select_columns(&client, &nodes)?;
//! assert_eq!(sub.num_nodes(), 2);
//! assert_eq!(sub.indices().to_vec::<i64>(), [20, 21, 22, 10, 11]);
//!
//! let cols = sub.to_coo_columns(&client, DType::I32)?;
//! assert_eq!(cols.to_vec::<i32>(), [0, 0, 0, 1, 1]);
//! # Ok::<(), graphslice::error::Error>(())
//! ```

mod csc;

pub use csc::CscGraph;
