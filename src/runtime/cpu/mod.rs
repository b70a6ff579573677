//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and is the reference
//! implementation for every graph operation. Kernels run serially or on
//! rayon, as configured per client through [`ParallelismConfig`]; the
//! partitioning never changes results.

mod client;
mod device;
pub(crate) mod helpers;
pub(crate) mod kernels;
mod runtime;

pub use crate::tensor::Tensor;
pub use client::{CpuClient, ParallelismConfig};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
