//! Common test utilities
#![allow(dead_code)]

use graphslice::runtime::Runtime;
use graphslice::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime, ParallelismConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Single-threaded client, for comparing against parallel runs
pub fn create_serial_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuClient::new(device.clone())
        .with_parallelism(ParallelismConfig::serial())
        .unwrap();
    (client, device)
}

/// Client with a dedicated pool and tiny tasks, so every kernel splits its work
pub fn create_chunked_client(num_threads: usize, min_len: usize) -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuClient::new(device.clone())
        .with_parallelism(ParallelismConfig {
            num_threads: Some(num_threads),
            min_len,
        })
        .unwrap();
    (client, device)
}

/// Seeded RNG so randomized tests are reproducible
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random CSC offset array with `num_nodes` nodes and degrees in `0..max_degree`
pub fn random_indptr(rng: &mut StdRng, num_nodes: usize, max_degree: i64) -> Vec<i64> {
    let mut indptr = Vec::with_capacity(num_nodes + 1);
    indptr.push(0i64);
    for _ in 0..num_nodes {
        let last = *indptr.last().unwrap();
        indptr.push(last + rng.random_range(0..max_degree));
    }
    indptr
}

/// Random ids in `0..max_id`
pub fn random_ids(rng: &mut StdRng, len: usize, max_id: i64) -> Vec<i64> {
    (0..len).map(|_| rng.random_range(0..max_id)).collect()
}
