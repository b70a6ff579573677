//! DType dispatch utilities
//!
//! This module provides the `dispatch_dtype!` and `dispatch_int_dtype!`
//! macros for runtime type dispatch. Helpers use them to turn a `DType`
//! into a concrete type parameter for a typed kernel.
//!
//! # Usage
//!
//! ```ignore
//! fn my_operation(dtype: DType) -> Result<usize> {
//!     dispatch_int_dtype!(dtype, T => {
//!         // T is now a concrete integer type (i64, u32, ...)
//!         Ok(std::mem::size_of::<T>())
//!     }, "my_operation")
//! }
//! ```
//!
//! ## Arguments
//!
//! * `$dtype` - Expression evaluating to a `DType` value
//! * `$T` - Identifier to bind to the concrete type in the body
//! * `$body` - Code block to execute with `T` bound
//! * `$error_op` - Operation name for error messages (used when dtype is unsupported)
//!
//! Unsupported dtypes `return` an `UnsupportedDType` error from the
//! enclosing function.

/// Dispatch over every numeric dtype (floats and integers).
///
/// `Bool` returns `UnsupportedDType`.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            other => $crate::dispatch_int_dtype!(other, $T => $body, $error_op),
        }
    };
}

/// Dispatch over integer dtypes only.
///
/// Ids, offsets, degrees and type tags are always integers; floats and
/// `Bool` return `UnsupportedDType`.
#[macro_export]
macro_rules! dispatch_int_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::U64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::U32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::U16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
            other => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: other,
                    op: $error_op,
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::dtype::DType;
    use crate::error::{Error, Result};

    fn width(dtype: DType) -> Result<usize> {
        dispatch_int_dtype!(dtype, T => { Ok(std::mem::size_of::<T>()) }, "width")
    }

    fn any_width(dtype: DType) -> Result<usize> {
        dispatch_dtype!(dtype, T => { Ok(std::mem::size_of::<T>()) }, "any_width")
    }

    #[test]
    fn test_int_dispatch() {
        assert_eq!(width(DType::I32).unwrap(), 4);
        assert_eq!(width(DType::U8).unwrap(), 1);
        assert!(matches!(
            width(DType::F32),
            Err(Error::UnsupportedDType { op: "width", .. })
        ));
    }

    #[test]
    fn test_numeric_dispatch() {
        assert_eq!(any_width(DType::F64).unwrap(), 8);
        assert_eq!(any_width(DType::U16).unwrap(), 2);
        assert!(any_width(DType::Bool).is_err());
    }
}
