//! Runtime backends for graph kernels
//!
//! This module defines the `Runtime` trait and provides the CPU
//! implementation. Accelerator backends plug in behind the same traits.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific GPU/CPU)
//! ├── Client (dispatches operations, owns parallelism settings)
//! └── MemoryTier (pageable / pinned / device)
//! ```

pub(crate) mod helpers;
mod tier;
mod traits;

pub mod cpu;

pub use tier::MemoryTier;
pub use traits::{Device, Runtime, RuntimeClient};

pub(crate) use helpers::{
    check_size_hint, ensure_contiguous, require_1d, require_accessible, require_int,
    require_same_dtype,
};
