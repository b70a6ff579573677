//! Element traits for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::hash::Hash;
use std::ops::{Add, Sub};

/// Trait for types that can be elements of a tensor
///
/// This trait connects Rust's type system to the runtime dtype system.
/// It's implemented for the primitive numeric types the graph kernels move
/// around: integer ids and offsets, plus `f32`/`f64` feature rows.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
/// - `Add + Sub` - Offset arithmetic (Output = Self)
/// - `PartialOrd` - Comparison for sorting and searching
pub trait Element:
    Copy
    + Clone
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;
}

/// Integer element usable as a node id, edge offset or degree
///
/// All conversions go through `i128`, which holds every value of every
/// supported integer dtype, so range checks never wrap.
pub trait IndexElement: Element + Ord + Eq + Hash {
    /// Widen to `i128` without loss
    fn as_i128(self) -> i128;

    /// Narrow from `i128`, returning `None` if the value does not fit
    fn from_i128(v: i128) -> Option<Self>;

    /// Unsigned sort key of a non-negative value
    ///
    /// Only meaningful for values `>= 0`; callers validate the sign first.
    fn radix_key(self) -> u64;
}

macro_rules! impl_float_element {
    ($($t:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                #[inline]
                fn zero() -> Self {
                    0.0
                }

                #[inline]
                fn one() -> Self {
                    1.0
                }
            }
        )*
    };
}

macro_rules! impl_int_element {
    ($($t:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn one() -> Self {
                    1
                }
            }

            impl IndexElement for $t {
                #[inline]
                fn as_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_i128(v: i128) -> Option<Self> {
                    <$t>::try_from(v).ok()
                }

                #[inline]
                fn radix_key(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_float_element!(f64 => F64, f32 => F32);

impl_int_element!(
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
    u64 => U64,
    u32 => U32,
    u16 => U16,
    u8 => U8,
);

// Note: bool doesn't implement Pod, so boolean tensors use u8 internally.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i32::DTYPE, DType::I32);
        assert_eq!(u8::DTYPE, DType::U8);
    }

    #[test]
    fn test_index_element_narrowing() {
        assert_eq!(i32::from_i128(42), Some(42));
        assert_eq!(u8::from_i128(256), None);
        assert_eq!(u16::from_i128(-1), None);
        assert_eq!(i64::MAX.as_i128(), i64::MAX as i128);
    }

    #[test]
    fn test_radix_key_preserves_order() {
        assert!(3i32.radix_key() < 7i32.radix_key());
        assert_eq!(u64::MAX.radix_key(), u64::MAX);
    }
}
