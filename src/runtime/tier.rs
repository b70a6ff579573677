//! Memory tiers a buffer can live in

use std::fmt;

/// Memory tier of a buffer
///
/// Sampling pipelines keep large graph structures in host memory that the
/// accelerator can address directly (pinned / host-mapped), while per-batch
/// tensors live in ordinary or device memory. Kernels read each tier through
/// the runtime's accessor instead of staging a copy first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MemoryTier {
    /// Ordinary pageable host memory
    #[default]
    Pageable,
    /// Page-locked host memory, addressable by the host and by devices
    Pinned,
    /// Memory resident on an accelerator
    Device,
}

impl MemoryTier {
    /// Returns true if the host can dereference this tier directly
    #[inline]
    pub const fn is_host(self) -> bool {
        matches!(self, Self::Pageable | Self::Pinned)
    }

    /// Short name for display
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Pageable => "pageable",
            Self::Pinned => "pinned",
            Self::Device => "device",
        }
    }
}

impl fmt::Display for MemoryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
