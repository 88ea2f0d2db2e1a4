//! Owned, explicitly-sized `f32` buffers shared by every pass.
//!
//! A [`Batch`] is zero-initialised and aligned to [`BATCH_ALIGNMENT`] bytes so
//! both the 128-bit and 256-bit kernels see register-aligned groups. Angle and
//! result batches always come in pairs of equal length.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::{allocation_error, layout_error, validation_error, Result};

/// Byte alignment of every batch buffer (one AVX register).
pub const BATCH_ALIGNMENT: usize = 32;

/// A zero-initialised, 32-byte aligned run of `f32` values.
pub struct Batch {
    ptr: NonNull<f32>,
    len: usize,
    // `None` for the empty batch, which owns no allocation.
    layout: Option<Layout>,
}

impl Batch {
    /// Allocates `len` zeroed values.
    ///
    /// # Errors
    ///
    /// Returns a layout error if the byte size overflows, and an allocation
    /// error if the global allocator cannot satisfy the request.
    pub fn zeroed(len: usize) -> Result<Self> {
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len: 0,
                layout: None,
            });
        }

        let size_bytes = len
            .checked_mul(std::mem::size_of::<f32>())
            .ok_or_else(|| layout_error(len, "byte size overflows usize"))?;

        let layout = Layout::from_size_align(size_bytes, BATCH_ALIGNMENT)
            .map_err(|err| layout_error(len, err.to_string()))?;

        // SAFETY: `layout` has a non-zero size (len > 0).
        let raw = unsafe { alloc_zeroed(layout) as *mut f32 };

        let ptr =
            NonNull::new(raw).ok_or_else(|| allocation_error(size_bytes, BATCH_ALIGNMENT))?;

        Ok(Self {
            ptr,
            len,
            layout: Some(layout),
        })
    }

    /// Allocates a batch holding a copy of `values`.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let mut batch = Self::zeroed(values.len())?;
        batch.copy_from_slice(values);
        Ok(batch)
    }

    /// Whether the backing storage starts on a [`BATCH_ALIGNMENT`] boundary.
    pub fn is_aligned(&self) -> bool {
        self.len == 0 || (self.ptr.as_ptr() as usize) % BATCH_ALIGNMENT == 0
    }
}

impl Deref for Batch {
    type Target = [f32];

    #[inline(always)]
    fn deref(&self) -> &[f32] {
        // SAFETY: `ptr` is valid for `len` initialised values (zeroed on
        // allocation), or dangling with `len == 0`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for Batch {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [f32] {
        // SAFETY: as in `deref`, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for Batch {
    fn drop(&mut self) {
        if let Some(layout) = self.layout {
            // SAFETY: `ptr` was returned by `alloc_zeroed` with this exact layout.
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

impl fmt::Debug for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// The two input batches: angles whose cosine is taken and angles whose sine
/// is taken.
#[derive(Debug)]
pub struct AngleBatches {
    cos: Batch,
    sin: Batch,
}

impl AngleBatches {
    /// Pairs two angle batches.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the batches differ in length.
    pub fn new(cos: Batch, sin: Batch) -> Result<Self> {
        if cos.len() != sin.len() {
            return Err(validation_error(format!(
                "angle batches must have the same length (cos: {}, sin: {})",
                cos.len(),
                sin.len()
            )));
        }
        Ok(Self { cos, sin })
    }

    /// Copies two slices into a new pair of aligned batches.
    pub fn from_slices(cos: &[f32], sin: &[f32]) -> Result<Self> {
        Self::new(Batch::from_slice(cos)?, Batch::from_slice(sin)?)
    }

    pub fn len(&self) -> usize {
        self.cos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }

    /// Angles fed to the cosine evaluations.
    pub fn cos(&self) -> &[f32] {
        &self.cos
    }

    /// Angles fed to the sine evaluations.
    pub fn sin(&self) -> &[f32] {
        &self.sin
    }
}

/// The two output batches, overwritten by the packed passes and accumulated
/// into by the single-lane and scalar passes.
#[derive(Debug)]
pub struct ResultBatches {
    cos: Batch,
    sin: Batch,
}

impl ResultBatches {
    /// Allocates a zero-filled pair of result batches.
    pub fn zeroed(len: usize) -> Result<Self> {
        Ok(Self {
            cos: Batch::zeroed(len)?,
            sin: Batch::zeroed(len)?,
        })
    }

    pub fn len(&self) -> usize {
        self.cos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }

    pub fn cos(&self) -> &[f32] {
        &self.cos
    }

    pub fn sin(&self) -> &[f32] {
        &self.sin
    }

    /// Borrows both outputs mutably at once.
    pub fn split_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.cos, &mut self.sin)
    }
}
