//! Core Tensor type

use super::{Layout, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::{MemoryTier, Runtime};
use std::fmt;

/// N-dimensional array stored on a compute device
///
/// `Tensor` is the fundamental data structure in graphslice. It consists of:
/// - **Storage**: Reference-counted memory in one [`MemoryTier`]
/// - **Layout**: Shape, strides, and offset defining the view into storage
/// - **DType**: Element type (determined at runtime)
///
/// Offset arrays, neighbor lists, node subsets and feature rows are all
/// tensors; `narrow` produces views sharing the same storage.
///
/// # Example
///
/// ```ignore
/// use graphslice::prelude::*;
///
/// let indptr = Tensor::<CpuRuntime>::from_slice(&[0i64, 2, 2, 5], &[4], &device);
/// let tail = indptr.narrow(0, 1, 3)?; // Zero-copy, shares storage
/// ```
pub struct Tensor<R: Runtime> {
    storage: Storage<R>,
    layout: Layout,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from storage and layout
    pub fn from_parts(storage: Storage<R>, layout: Layout) -> Self {
        Self { storage, layout }
    }

    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape` dimensions.
    /// For a fallible alternative, use [`Self::try_from_slice`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let nodes = Tensor::<CpuRuntime>::from_slice(&[2i32, 0], &[2], &device);
    /// ```
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Self {
        Self::try_from_slice(data, shape, device).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    ///
    /// Returns an error if `data.len()` does not equal the product of the `shape` dimensions,
    /// or if memory allocation fails.
    pub fn try_from_slice<T: Element>(
        data: &[T],
        shape: &[usize],
        device: &R::Device,
    ) -> Result<Self> {
        Self::try_from_slice_in(data, shape, R::default_tier(), device)
    }

    /// Create a tensor from a slice of data in an explicit memory tier
    pub fn try_from_slice_in<T: Element>(
        data: &[T],
        shape: &[usize],
        tier: MemoryTier,
        device: &R::Device,
    ) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let storage = Storage::from_slice(data, tier, device)?;
        Ok(Self::from_parts(storage, Layout::contiguous(shape)))
    }

    /// Create a zero-initialized tensor in the runtime's default tier
    pub fn empty(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_empty(shape, dtype, device).expect("Tensor::empty failed")
    }

    /// Create a zero-initialized tensor (fallible version)
    pub fn try_empty(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        Self::try_empty_in(shape, dtype, R::default_tier(), device)
    }

    /// Create a zero-initialized tensor in an explicit memory tier
    pub fn try_empty_in(
        shape: &[usize],
        dtype: DType,
        tier: MemoryTier,
        device: &R::Device,
    ) -> Result<Self> {
        let len: usize = shape.iter().product();
        let storage = Storage::new(len, dtype, tier, device)?;
        Ok(Self::from_parts(storage, Layout::contiguous(shape)))
    }

    // ===== Accessors =====

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Get the memory tier the data lives in
    #[inline]
    pub fn tier(&self) -> MemoryTier {
        self.storage.tier()
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Check if the tensor is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Get size along a dimension (supports negative indexing)
    pub fn size(&self, dim: isize) -> Option<usize> {
        self.layout.dim(dim)
    }

    // ===== View Operations (Zero-Copy) =====

    /// Narrow a dimension to `[start, start + length)` (zero-copy)
    ///
    /// ```ignore
    /// let indptr = Tensor::<CpuRuntime>::from_slice(&[0i64, 2, 2, 5], &[4], &device);
    /// let starts = indptr.narrow(0, 0, 3)?; // [0, 2, 2]
    /// ```
    pub fn narrow(&self, dim: isize, start: usize, length: usize) -> Result<Self> {
        let dim_idx = self
            .layout
            .normalize_dim(dim)
            .ok_or(Error::InvalidDimension {
                dim,
                ndim: self.ndim(),
            })?;

        let new_layout =
            self.layout
                .narrow(dim_idx, start, length)
                .ok_or_else(|| Error::ShapeMismatch {
                    expected: vec![self.shape()[dim_idx]],
                    got: vec![start, length],
                })?;

        Ok(Self::from_parts(self.storage.clone(), new_layout))
    }

    // ===== Materialization =====

    /// Return a contiguous tensor with the same data, in the same tier
    ///
    /// Already-contiguous tensors are returned as a zero-copy clone.
    pub fn contiguous(&self) -> Result<Self> {
        if self.is_contiguous() {
            return Ok(self.clone());
        }
        self.copy_to_tier(self.tier())
    }

    /// Return a copy of this tensor in the `Pinned` tier
    ///
    /// Pinned buffers can be read by [`crate::ops::IndexingOps::uva_index_select`]
    /// without staging. Tensors that are already pinned are returned as a
    /// zero-copy clone.
    pub fn pin_memory(&self) -> Result<Self> {
        if self.tier() == MemoryTier::Pinned && self.is_contiguous() {
            return Ok(self.clone());
        }
        self.copy_to_tier(MemoryTier::Pinned)
    }

    fn copy_to_tier(&self, tier: MemoryTier) -> Result<Self> {
        let device = self.storage.device();
        if !R::is_accessible(self.tier(), device) {
            return Err(Error::TierMismatch {
                op: "copy_to_tier",
                expected: R::default_tier(),
                got: self.tier(),
            });
        }

        let dtype = self.dtype();
        let elem_size = dtype.size_in_bytes();
        let new_storage = Storage::new(self.numel(), dtype, tier, device)?;

        R::copy_strided(
            self.storage.ptr(),
            self.layout.offset() * elem_size,
            new_storage.ptr(),
            self.shape(),
            self.strides(),
            elem_size,
            device,
        )?;

        Ok(Self::from_parts(new_storage, Layout::contiguous(self.shape())))
    }

    /// Copy tensor data to a Vec on the host
    ///
    /// # Panics
    ///
    /// Panics if the tensor is not contiguous, or if `T` does not match the
    /// element size of the tensor's dtype.
    pub fn to_vec<T: bytemuck::Pod>(&self) -> Vec<T> {
        assert!(
            self.is_contiguous(),
            "Tensor must be contiguous to copy to vec"
        );
        assert_eq!(
            std::mem::size_of::<T>(),
            self.dtype().size_in_bytes(),
            "to_vec element size does not match dtype {}",
            self.dtype()
        );

        // Allocate with the alignment of T, then view as bytes for the copy
        let mut result = vec![T::zeroed(); self.numel()];
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut result);
        R::copy_from_device(self.storage.ptr(), bytes, self.storage.device())
            .expect("copy_from_device failed in to_vec()");
        result
    }

    /// Extract the scalar value from a single-element tensor
    ///
    /// Used for reading totals such as `indptr[N]` back to the host.
    ///
    /// ```ignore
    /// let num_edges: i64 = indptr.narrow(0, n, 1)?.item()?;
    /// ```
    pub fn item<T: bytemuck::Pod>(&self) -> Result<T> {
        if self.numel() != 1 {
            return Err(Error::ShapeMismatch {
                expected: vec![1],
                got: self.shape().to_vec(),
            });
        }
        if std::mem::size_of::<T>() != self.dtype().size_in_bytes() {
            return Err(Error::unsupported_dtype(self.dtype(), "item"));
        }

        // Single-element views address storage through their offset
        let byte_offset = self.layout.offset() * self.dtype().size_in_bytes();
        let src_ptr = self.storage.ptr() + byte_offset as u64;

        let mut result = T::zeroed();
        let bytes: &mut [u8] = bytemuck::bytes_of_mut(&mut result);
        R::copy_from_device(src_ptr, bytes, self.storage.device())?;
        Ok(result)
    }
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone creates a new tensor sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("tier", &self.tier())
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl<R: Runtime> fmt::Display for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({:?}, {}, {})", self.shape(), self.dtype(), self.tier())
    }
}
