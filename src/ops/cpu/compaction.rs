//! CPU implementation of id compaction operations.

use crate::error::Result;
use crate::ops::{CompactedIds, CompactionOps, SortConfig};
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers};
use crate::tensor::Tensor;

/// CompactionOps implementation for CPU runtime.
impl CompactionOps<CpuRuntime> for CpuClient {
    fn unique_and_compact(
        &self,
        src_ids: &Tensor<CpuRuntime>,
        dst_ids: &Tensor<CpuRuntime>,
        unique_dst_ids: &Tensor<CpuRuntime>,
        config: SortConfig,
    ) -> Result<CompactedIds<CpuRuntime>> {
        helpers::unique_and_compact_impl(self, src_ids, dst_ids, unique_dst_ids, config)
    }

    fn unique_and_compact_batched(
        &self,
        batches: &[(
            &Tensor<CpuRuntime>,
            &Tensor<CpuRuntime>,
            &Tensor<CpuRuntime>,
        )],
        config: SortConfig,
    ) -> Result<Vec<CompactedIds<CpuRuntime>>> {
        helpers::unique_and_compact_batched_impl(self, batches, config)
    }
}
