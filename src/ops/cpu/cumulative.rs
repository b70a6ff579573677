//! CPU implementation of prefix-sum operations.

use crate::dtype::DType;
use crate::error::Result;
use crate::ops::CumulativeOps;
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers};
use crate::tensor::Tensor;

/// CumulativeOps implementation for CPU runtime.
impl CumulativeOps<CpuRuntime> for CpuClient {
    fn exclusive_cumsum(&self, a: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        helpers::exclusive_cumsum_impl(self, a, a.dtype())
    }

    fn exclusive_cumsum_to(
        &self,
        a: &Tensor<CpuRuntime>,
        dtype: DType,
    ) -> Result<Tensor<CpuRuntime>> {
        helpers::exclusive_cumsum_impl(self, a, dtype)
    }
}
