//! CPU implementation of graph operations.
//!
//! This module contains the operation trait implementations for the CPU runtime.
//! Each operation type has its own module; the work itself lives in
//! `runtime::cpu::helpers` and `runtime::cpu::kernels`.

pub mod compaction;
pub mod csc;
pub mod cumulative;
pub mod indexing;
pub mod sorting;
