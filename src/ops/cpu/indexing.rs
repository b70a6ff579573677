//! CPU implementation of gather and row-selection operations.

use crate::dtype::DType;
use crate::error::Result;
use crate::ops::IndexingOps;
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers};
use crate::tensor::Tensor;

/// IndexingOps implementation for CPU runtime.
impl IndexingOps<CpuRuntime> for CpuClient {
    fn gather(
        &self,
        input: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
        dtype: Option<DType>,
    ) -> Result<Tensor<CpuRuntime>> {
        helpers::gather_impl(self, input, index, dtype)
    }

    fn index_select(
        &self,
        input: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        helpers::index_select_impl(self, input, index)
    }

    fn uva_index_select(
        &self,
        input: &Tensor<CpuRuntime>,
        index: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        helpers::uva_index_select_impl(self, input, index)
    }
}
