//! Tensor types
//!
//! This module provides the `Tensor` type: a flat or row-major n-dimensional
//! array stored in one memory tier of a compute device.

mod core;
mod layout;
mod storage;

pub use core::Tensor;
pub use layout::Layout;
pub use storage::Storage;
