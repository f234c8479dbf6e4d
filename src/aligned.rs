use alloc::alloc::{alloc, dealloc, Layout};
use core::fmt;
use core::mem::align_of;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::slice;

use crate::fft::FftError;
use crate::num::{Float, Lane};
use crate::simd::SIMD_ALIGN;

/// Heap storage for `len` lanes whose base address is aligned to
/// [`SIMD_ALIGN`] bytes, freed when dropped.
///
/// Dereferences to `[L]`, so it can be handed straight to the transforms.
pub struct AlignedBuffer<L: Lane> {
    ptr: NonNull<L>,
    len: usize,
}

// SAFETY: the buffer uniquely owns its allocation and `L: Send + Sync`.
unsafe impl<L: Lane> Send for AlignedBuffer<L> {}
// SAFETY: shared access only hands out `&[L]`.
unsafe impl<L: Lane> Sync for AlignedBuffer<L> {}

impl<L: Lane> AlignedBuffer<L> {
    /// Allocates `len` lanes, every slot set to zero.
    pub fn zeroed(len: usize) -> Result<Self, FftError> {
        let buf = Self::uninit(len)?;
        let zero = L::splat(<L::Scalar as Float>::zero());
        for i in 0..len {
            // SAFETY: `i < len` and the allocation holds `len` lanes.
            unsafe { ptr::write(buf.ptr.as_ptr().add(i), zero) };
        }
        Ok(buf)
    }

    /// Allocates a buffer holding a copy of `values`.
    pub fn from_slice(values: &[L]) -> Result<Self, FftError> {
        let buf = Self::uninit(values.len())?;
        // SAFETY: the fresh allocation holds `values.len()` lanes and cannot overlap `values`.
        unsafe { ptr::copy_nonoverlapping(values.as_ptr(), buf.ptr.as_ptr(), values.len()) };
        Ok(buf)
    }

    /// Copies the contents into a new aligned allocation.
    pub fn try_clone(&self) -> Result<Self, FftError> {
        Self::from_slice(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[L] {
        self
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [L] {
        self
    }

    fn layout(len: usize) -> Result<Layout, FftError> {
        Layout::array::<L>(len)
            .and_then(|layout| layout.align_to(SIMD_ALIGN))
            .map_err(|_| FftError::AllocationFailed(len))
    }

    /// Allocation whose slots the caller must initialise before `Self` escapes.
    fn uninit(len: usize) -> Result<Self, FftError> {
        let layout = Self::layout(len)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: Self::dangling(),
                len,
            });
        }
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc(layout) };
        match NonNull::new(raw.cast::<L>()) {
            Some(ptr) => {
                fft_log!(
                    debug,
                    "allocated {} aligned lanes ({} bytes) at {:p}",
                    len,
                    layout.size(),
                    raw
                );
                Ok(Self { ptr, len })
            }
            None => {
                fft_log!(warn, "aligned allocation of {} bytes failed", layout.size());
                Err(FftError::AllocationFailed(len))
            }
        }
    }

    /// Non-null, suitably aligned address for buffers that own no memory.
    fn dangling() -> NonNull<L> {
        let align = SIMD_ALIGN.max(align_of::<L>());
        NonNull::new(align as *mut L).unwrap_or(NonNull::dangling())
    }
}

impl<L: Lane> Drop for AlignedBuffer<L> {
    fn drop(&mut self) {
        // The layout was valid at allocation time, so it still is.
        if let Ok(layout) = Self::layout(self.len) {
            if layout.size() != 0 {
                fft_log!(debug, "freeing {} aligned lanes", self.len);
                // SAFETY: `ptr` came from `alloc` with this exact layout.
                unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
    }
}

impl<L: Lane> Deref for AlignedBuffer<L> {
    type Target = [L];

    #[inline]
    fn deref(&self) -> &[L] {
        // SAFETY: `ptr` is valid for `len` initialised lanes (or dangling with `len == 0`).
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<L: Lane> DerefMut for AlignedBuffer<L> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [L] {
        // SAFETY: as in `deref`, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<L: Lane> AsRef<[L]> for AlignedBuffer<L> {
    fn as_ref(&self) -> &[L] {
        self
    }
}

impl<L: Lane> AsMut<[L]> for AlignedBuffer<L> {
    fn as_mut(&mut self) -> &mut [L] {
        self
    }
}

impl<L: Lane> fmt::Debug for AlignedBuffer<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Allocates `count` zeroed lanes aligned to [`SIMD_ALIGN`].
///
/// ```
/// let mut buf = lanefft::allocate_aligned::<f32>(8)?;
/// buf[0] = 1.0;
/// lanefft::real_fft(&mut buf);
/// lanefft::free_aligned(buf);
/// # Ok::<(), lanefft::FftError>(())
/// ```
pub fn allocate_aligned<L: Lane>(count: usize) -> Result<AlignedBuffer<L>, FftError> {
    AlignedBuffer::zeroed(count)
}

/// Releases a buffer from [`allocate_aligned`]. Equivalent to dropping it.
pub fn free_aligned<L: Lane>(buffer: AlignedBuffer<L>) {
    drop(buffer);
}
