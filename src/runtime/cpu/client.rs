//! CPU client and parallelism settings

use super::device::CpuDevice;
use super::runtime::CpuRuntime;
use crate::error::{Error, Result};
use crate::runtime::RuntimeClient;
#[cfg(feature = "rayon")]
use std::sync::Arc;

/// Parallelism settings for CPU kernels
///
/// `num_threads: None` runs on rayon's global pool. `Some(n)` builds a
/// dedicated pool of `n` workers owned by the client. `min_len` is the
/// smallest number of elements (or segments) handed to one rayon task.
///
/// Results never depend on these settings; only throughput does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelismConfig {
    /// Worker count for a dedicated pool, or `None` for the global pool
    pub num_threads: Option<usize>,
    /// Minimum items per parallel task
    pub min_len: usize,
}

impl Default for ParallelismConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            min_len: 4096,
        }
    }
}

impl ParallelismConfig {
    /// Single-threaded execution
    pub fn serial() -> Self {
        Self {
            num_threads: Some(1),
            min_len: usize::MAX,
        }
    }
}

/// CPU client for operation dispatch
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    parallelism: ParallelismConfig,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        Self {
            device,
            parallelism: ParallelismConfig::default(),
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// Return a client that runs kernels with the given parallelism settings
    ///
    /// Fails if a dedicated thread pool is requested and cannot be built.
    pub fn with_parallelism(mut self, config: ParallelismConfig) -> Result<Self> {
        if config.num_threads == Some(0) {
            return Err(Error::invalid_argument(
                "num_threads",
                "a dedicated pool needs at least one thread",
            ));
        }
        #[cfg(feature = "rayon")]
        {
            self.pool = match config.num_threads {
                Some(n) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(n)
                        .thread_name(|i| format!("graphslice-cpu-{i}"))
                        .build()
                        .map_err(|e| Error::Backend(format!("failed to build thread pool: {e}")))?;
                    Some(Arc::new(pool))
                }
                None => None,
            };
        }
        self.parallelism = config;
        Ok(self)
    }

    /// Current parallelism settings
    pub fn parallelism(&self) -> ParallelismConfig {
        self.parallelism
    }

    /// Minimum chunk length for rayon tasks, never zero
    #[inline]
    pub(crate) fn rayon_min_len(&self) -> usize {
        self.parallelism.min_len.max(1)
    }

    /// Run `f` inside this client's thread pool
    ///
    /// Parallel iterators started inside `f` use the dedicated pool when one
    /// is configured, and rayon's global pool otherwise.
    pub(crate) fn install_parallelism<F, T>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        #[cfg(feature = "rayon")]
        if let Some(pool) = &self.pool {
            return pool.install(f);
        }
        f()
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) {
        // CPU operations are synchronous, nothing to do
    }
}
