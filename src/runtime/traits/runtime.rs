//! Core trait for compute backends

use crate::error::Result;
use crate::runtime::MemoryTier;

/// Core trait for compute backends
///
/// `Runtime` abstracts over different compute devices (CPU, GPU, etc.).
/// It uses static dispatch via generics for zero-cost abstraction.
///
/// # Associated Types
///
/// - `Device`: Identifies a specific compute unit (e.g., GPU 0, GPU 1)
/// - `Client`: Handles operation dispatch and synchronization
///
/// # Memory tiers
///
/// Every allocation names the [`MemoryTier`] it lives in. A backend reports
/// through [`Runtime::is_accessible`] which tiers its kernels may read
/// without a staging copy; cross-tier operations consult it before touching
/// a buffer.
///
/// # Example
///
/// ```ignore
/// let device = CpuRuntime::default_device();
/// let ptr = CpuRuntime::allocate(1024, MemoryTier::Pageable, &device)?;
/// // ... use memory ...
/// CpuRuntime::deallocate(ptr, 1024, MemoryTier::Pageable, &device);
/// ```
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: super::Device;

    /// Client for dispatching operations
    type Client: super::RuntimeClient<Self>;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Tier used for tensors created without an explicit tier
    fn default_tier() -> MemoryTier;

    /// Whether kernels running on `device` can read `tier` directly
    fn is_accessible(tier: MemoryTier, device: &Self::Device) -> bool;

    /// Allocate memory in the given tier
    ///
    /// Returns a pointer (u64) that can be used for operations.
    /// Returns `Err(OutOfMemory)` if allocation fails.
    fn allocate(size_bytes: usize, tier: MemoryTier, device: &Self::Device) -> Result<u64>;

    /// Deallocate memory previously returned by [`Runtime::allocate`]
    fn deallocate(ptr: u64, size_bytes: usize, tier: MemoryTier, device: &Self::Device);

    /// Copy data from host to device
    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()>;

    /// Copy data from device to host
    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()>;

    /// Copy data within device (device to device)
    fn copy_within_device(
        src: u64,
        dst: u64,
        size_bytes: usize,
        device: &Self::Device,
    ) -> Result<()>;

    /// Copy strided data to a contiguous buffer
    ///
    /// # Parameters
    /// - `src_handle`: Source buffer handle
    /// - `src_byte_offset`: Byte offset into source buffer
    /// - `dst_handle`: Destination buffer handle
    /// - `shape`: Shape of the tensor
    /// - `strides`: Strides of the source tensor (in elements, not bytes)
    /// - `elem_size`: Size of each element in bytes
    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        device: &Self::Device,
    ) -> Result<()>;

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Get the default client for a device
    fn default_client(device: &Self::Device) -> Self::Client;
}
