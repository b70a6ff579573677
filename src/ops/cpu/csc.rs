//! CPU implementation of CSC slicing operations.

use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{CscOps, ExpandIndptrConfig, IndexSelectCscConfig};
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers};
use crate::tensor::Tensor;

/// CscOps implementation for CPU runtime.
impl CscOps<CpuRuntime> for CpuClient {
    fn slice_csc_indptr(
        &self,
        indptr: &Tensor<CpuRuntime>,
        nodes: Option<&Tensor<CpuRuntime>>,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        helpers::slice_csc_indptr_impl(self, indptr, nodes)
    }

    fn slice_csc_indptr_hetero(
        &self,
        sub_indptr: &Tensor<CpuRuntime>,
        etypes: &Tensor<CpuRuntime>,
        sliced_indptr: &Tensor<CpuRuntime>,
        num_fanouts: usize,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        helpers::slice_csc_indptr_hetero_impl(self, sub_indptr, etypes, sliced_indptr, num_fanouts)
    }

    fn index_select_csc(
        &self,
        indptr: &Tensor<CpuRuntime>,
        indices: &Tensor<CpuRuntime>,
        nodes: &Tensor<CpuRuntime>,
        output_size: Option<usize>,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        helpers::index_select_csc_impl(self, indptr, indices, nodes, output_size)
    }

    fn index_select_csc_sliced(
        &self,
        in_degree: &Tensor<CpuRuntime>,
        sliced_indptr: &Tensor<CpuRuntime>,
        indices: &Tensor<CpuRuntime>,
        nodes: &Tensor<CpuRuntime>,
        config: IndexSelectCscConfig,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        helpers::index_select_csc_sliced_impl(self, in_degree, sliced_indptr, indices, nodes, config)
    }

    fn expand_indptr(
        &self,
        indptr: &Tensor<CpuRuntime>,
        dtype: DType,
        config: ExpandIndptrConfig<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        helpers::expand_indptr_impl(self, indptr, dtype, config)
    }
}
