//! Layout: shape, strides, and offset for tensor memory layout

use smallvec::SmallVec;
use std::fmt;

/// Stack allocation threshold for dimensions
/// Graph tensors are 1-D or 2-D (feature rows), so four covers everything
const STACK_DIMS: usize = 4;

/// Shape type: dimensions of a tensor
pub type Shape = SmallVec<[usize; STACK_DIMS]>;

/// Strides type: element offsets between consecutive elements along each dimension
/// NOTE: Strides are in ELEMENTS, not bytes
pub type Strides = SmallVec<[isize; STACK_DIMS]>;

/// Layout describes the memory layout of a tensor
///
/// Address of element at indices [i0, i1, ..., in]:
///   offset + i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    strides: Strides,
    offset: usize,
}

impl Layout {
    /// Create a new contiguous (row-major/C-order) layout from a shape
    ///
    /// # Example
    /// ```
    /// use graphslice::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]);
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        let shape: Shape = shape.iter().copied().collect();
        let strides = Self::compute_contiguous_strides(&shape);
        Self {
            shape,
            strides,
            offset: 0,
        }
    }

    fn compute_contiguous_strides(shape: &[usize]) -> Strides {
        let mut strides: Strides = SmallVec::with_capacity(shape.len());
        let mut stride = 1isize;
        for &dim in shape.iter().rev() {
            strides.push(stride);
            stride *= dim as isize;
        }
        strides.reverse();
        strides
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Get the offset
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Check if memory is contiguous (row-major order, starting at offset 0)
    ///
    /// Kernels index storage from its base pointer, so a view with a
    /// non-zero offset counts as non-contiguous.
    pub fn is_contiguous(&self) -> bool {
        if self.offset != 0 {
            return false;
        }
        // Strides of size-1 dims never affect addressing
        let mut expected = 1isize;
        for (&dim, &stride) in self.shape.iter().zip(&self.strides).rev() {
            if dim != 1 && stride != expected {
                return false;
            }
            expected *= dim as isize;
        }
        true
    }

    /// Get size along a specific dimension (supports negative indexing)
    pub fn dim(&self, d: isize) -> Option<usize> {
        self.normalize_dim(d).map(|i| self.shape[i])
    }

    /// Normalize a possibly negative dimension index
    pub fn normalize_dim(&self, d: isize) -> Option<usize> {
        let ndim = self.ndim() as isize;
        let d = if d < 0 { d + ndim } else { d };
        (0..ndim).contains(&d).then_some(d as usize)
    }

    /// Restrict dimension `dim` to `[start, start + length)` (zero-copy)
    pub fn narrow(&self, dim: usize, start: usize, length: usize) -> Option<Self> {
        let size = *self.shape.get(dim)?;
        if start.checked_add(length)? > size {
            return None;
        }
        let mut shape = self.shape.clone();
        shape[dim] = length;
        let offset = if length == 0 {
            self.offset
        } else {
            (self.offset as isize + start as isize * self.strides[dim]) as usize
        };
        Some(Self {
            shape,
            strides: self.strides.clone(),
            offset,
        })
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout(shape={:?}, strides={:?}, offset={})",
            self.shape.as_slice(),
            self.strides.as_slice(),
            self.offset
        )
    }
}
