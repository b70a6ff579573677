//! CPU implementation of id sorting and membership operations.

use crate::error::Result;
use crate::ops::{SortConfig, SortingOps};
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers};
use crate::tensor::Tensor;

/// SortingOps implementation for CPU runtime.
impl SortingOps<CpuRuntime> for CpuClient {
    fn sort_ids(&self, a: &Tensor<CpuRuntime>, config: SortConfig) -> Result<Tensor<CpuRuntime>> {
        helpers::sort_ids_impl(self, a, config)
    }

    fn sort_ids_with_positions(
        &self,
        a: &Tensor<CpuRuntime>,
        config: SortConfig,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        helpers::sort_ids_with_positions_impl(self, a, config)
    }

    fn isin(
        &self,
        elements: &Tensor<CpuRuntime>,
        test_elements: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        helpers::isin_impl(self, elements, test_elements)
    }
}
