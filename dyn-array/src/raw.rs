//! The owned slot buffer behind a [`DynArray`](crate::DynArray).
//!
//! `RawBuf` knows nothing about which slots are initialized; it only owns
//! `cap` slots obtained from its allocator and hands them back on drop.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};

use crate::alloc::RawAlloc;
use crate::error::ArrayError;

pub(crate) struct RawBuf<T, A: RawAlloc> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: `RawBuf` uniquely owns its slots, like `Vec`.
unsafe impl<T: Send, A: RawAlloc + Send> Send for RawBuf<T, A> {}
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for RawBuf<T, A> {}

impl<T, A: RawAlloc> RawBuf<T, A> {
    /// Allocates `cap` slots from `alloc`, zero-filled when `zeroed` is set.
    pub(crate) fn try_with_capacity(cap: usize, alloc: A, zeroed: bool) -> Result<Self, ArrayError> {
        let ptr = Self::obtain(&alloc, cap, zeroed)?;
        Ok(Self {
            ptr,
            cap,
            alloc,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Moves the first `len` slots into a fresh buffer of `new_cap` slots.
    ///
    /// On failure nothing changes: the old buffer stays in place.
    pub(crate) fn reallocate(&mut self, len: usize, new_cap: usize) -> Result<(), ArrayError> {
        debug_assert!(len <= self.cap && len <= new_cap);
        let new_ptr = Self::obtain(&self.alloc, new_cap, false)?;
        unsafe {
            // SAFETY: both buffers hold at least `len` slots and are distinct allocations.
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len);
            self.give_back();
        }
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    fn layout(cap: usize) -> Result<Layout, ArrayError> {
        Layout::array::<T>(cap).map_err(|_| ArrayError::AllocFailed {
            requested: cap.saturating_mul(core::mem::size_of::<T>()),
        })
    }

    fn obtain(alloc: &A, cap: usize, zeroed: bool) -> Result<NonNull<T>, ArrayError> {
        let layout = Self::layout(cap)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        let block = if zeroed {
            alloc.allocate_zeroed(layout)
        } else {
            alloc.allocate(layout)
        };
        block.map(|block| block.cast::<T>()).ok_or(ArrayError::AllocFailed {
            requested: layout.size(),
        })
    }

    /// SAFETY: the current block must not be used again until replaced.
    unsafe fn give_back(&mut self) {
        if let Ok(layout) = Self::layout(self.cap) {
            if layout.size() != 0 {
                self.alloc.release(self.ptr.cast(), layout);
            }
        }
    }
}

impl<T, A: RawAlloc> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        // SAFETY: the buffer is going away with `self`.
        unsafe { self.give_back() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::Global;

    #[test]
    fn zero_sized_elements_never_allocate() {
        struct Refuse;

        unsafe impl RawAlloc for Refuse {
            fn allocate(&self, _: Layout) -> Option<NonNull<u8>> {
                None
            }

            unsafe fn release(&self, _: NonNull<u8>, _: Layout) {
                unreachable!()
            }
        }

        let mut buf: RawBuf<(), Refuse> = RawBuf::try_with_capacity(4, Refuse, true).unwrap();
        buf.reallocate(0, 64).unwrap();
        assert_eq!(buf.capacity(), 64);
    }

    #[test]
    fn reallocate_keeps_prefix() {
        let mut buf: RawBuf<u32, Global> = RawBuf::try_with_capacity(2, Global, true).unwrap();
        unsafe {
            buf.ptr().write(7);
            buf.ptr().add(1).write(9);
        }
        buf.reallocate(2, 5).unwrap();
        assert_eq!(buf.capacity(), 5);
        unsafe {
            assert_eq!(buf.ptr().read(), 7);
            assert_eq!(buf.ptr().add(1).read(), 9);
        }
    }
}
