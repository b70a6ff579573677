//! Error types for graphslice

use crate::dtype::DType;
use crate::runtime::MemoryTier;
use thiserror::Error;

/// Result type alias using graphslice's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in graphslice operations
///
/// Every error is raised synchronously by the call that detected it, before
/// any output tensor is handed back to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Invalid dimension index
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: isize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Buffer lives in a memory tier the operation cannot read from
    #[error("Memory tier mismatch in '{op}': expected {expected:?}, got {got:?}")]
    TierMismatch {
        /// The operation name
        op: &'static str,
        /// Tier required by the operation
        expected: MemoryTier,
        /// Tier the buffer actually lives in
        got: MemoryTier,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// A cumulative value does not fit the output dtype
    #[error("Integer overflow in '{op}': result does not fit {dtype:?}")]
    Overflow {
        /// The operation name
        op: &'static str,
        /// The dtype that overflowed
        dtype: DType,
    },

    /// A caller-supplied size hint disagrees with the computed size
    #[error("Size hint mismatch in '{op}': hint {hint}, actual {actual}")]
    SizeHintMismatch {
        /// The operation name
        op: &'static str,
        /// The size the caller promised
        hint: usize,
        /// The size actually computed
        actual: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Tensor is not contiguous when contiguous memory is required
    #[error("Operation requires contiguous tensor")]
    NotContiguous,

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Feature not yet implemented
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Description of the unimplemented feature
        feature: &'static str,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a size hint mismatch error
    pub fn size_hint_mismatch(op: &'static str, hint: usize, actual: usize) -> Self {
        Self::SizeHintMismatch { op, hint, actual }
    }

    /// Create an index error from a possibly negative value
    ///
    /// Negative values are reported as index 0 since the error field is unsigned.
    pub fn index_out_of_bounds(index: i128, size: usize) -> Self {
        Self::IndexOutOfBounds {
            index: usize::try_from(index).unwrap_or(0),
            size,
        }
    }
}
