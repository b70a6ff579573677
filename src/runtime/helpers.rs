//! Shared helper functions for runtime backends

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Ensure a tensor is contiguous in memory.
///
/// If the tensor is already contiguous, returns a clone (zero-copy, just
/// increments the Arc refcount). Otherwise, materializes the strided view
/// into fresh storage.
#[inline]
pub fn ensure_contiguous<R: Runtime>(tensor: &Tensor<R>) -> Result<Tensor<R>> {
    if tensor.is_contiguous() {
        Ok(tensor.clone())
    } else {
        tensor.contiguous()
    }
}

/// Require a 1-D tensor, returning its length
///
/// Rank violations are rejected before any computation starts.
#[inline]
pub fn require_1d<R: Runtime>(tensor: &Tensor<R>) -> Result<usize> {
    match tensor.shape() {
        [len] => Ok(*len),
        other => Err(Error::ShapeMismatch {
            expected: vec![tensor.numel()],
            got: other.to_vec(),
        }),
    }
}

/// Require that `tensor` has an integer dtype
#[inline]
pub fn require_int<R: Runtime>(tensor: &Tensor<R>, op: &'static str) -> Result<()> {
    if tensor.dtype().is_int() {
        Ok(())
    } else {
        Err(Error::unsupported_dtype(tensor.dtype(), op))
    }
}

/// Require that two tensors share a dtype
#[inline]
pub fn require_same_dtype<R: Runtime>(a: &Tensor<R>, b: &Tensor<R>) -> Result<()> {
    if a.dtype() == b.dtype() {
        Ok(())
    } else {
        Err(Error::DTypeMismatch {
            lhs: a.dtype(),
            rhs: b.dtype(),
        })
    }
}

/// Check a caller-supplied size hint against the computed size
#[inline]
pub fn check_size_hint(op: &'static str, hint: Option<usize>, actual: usize) -> Result<()> {
    match hint {
        Some(hint) if hint != actual => Err(Error::size_hint_mismatch(op, hint, actual)),
        _ => Ok(()),
    }
}

/// Require that kernels on `device` can read `tensor`'s memory tier
#[inline]
pub fn require_accessible<R: Runtime>(
    tensor: &Tensor<R>,
    device: &R::Device,
    op: &'static str,
) -> Result<()> {
    if R::is_accessible(tensor.tier(), device) {
        Ok(())
    } else {
        Err(Error::TierMismatch {
            op,
            expected: R::default_tier(),
            got: tensor.tier(),
        })
    }
}
