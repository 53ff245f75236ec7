//! Allocator injection.
//!
//! A [`DynArray`](crate::DynArray) never talks to the global heap directly.
//! Every buffer it owns is obtained from and returned to a [`RawAlloc`]
//! bound at construction time.

use core::alloc::Layout;
use core::ptr::{self, NonNull};
use std::alloc;

/// The allocator triple used by [`DynArray`](crate::DynArray): allocate,
/// zero-allocate and release.
///
/// # Safety
///
/// Implementors must return blocks that are valid for reads and writes of
/// `layout.size()` bytes and aligned to `layout.align()`, and that stay valid
/// until passed back to [`release`](RawAlloc::release). Returning `None`
/// signals allocation failure and is always allowed.
///
/// Callers never pass a zero-sized layout.
pub unsafe trait RawAlloc {
    /// Allocates an uninitialized block for `layout`.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Allocates a block for `layout` with every byte set to zero.
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        let block = self.allocate(layout)?;
        // SAFETY: `block` is valid for `layout.size()` bytes.
        unsafe { ptr::write_bytes(block.as_ptr(), 0, layout.size()) };
        Some(block)
    }

    /// Returns a block to the allocator.
    ///
    /// # Safety
    ///
    /// `block` must have been returned by `allocate` or `allocate_zeroed` of
    /// this allocator with the same `layout`, and must not be used afterwards.
    unsafe fn release(&self, block: NonNull<u8>, layout: Layout);
}

/// The process heap, via [`std::alloc`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl RawAlloc for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY: callers never pass a zero-sized layout.
        NonNull::new(unsafe { alloc::alloc(layout) })
    }

    #[inline]
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY: callers never pass a zero-sized layout.
        NonNull::new(unsafe { alloc::alloc_zeroed(layout) })
    }

    #[inline]
    unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
        alloc::dealloc(block.as_ptr(), layout)
    }
}

unsafe impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    #[inline]
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate_zeroed(layout)
    }

    #[inline]
    unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
        (**self).release(block, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_zeroed_block_is_zero() {
        let layout = Layout::array::<u64>(16).unwrap();
        let block = Global.allocate_zeroed(layout).unwrap();
        unsafe {
            let words = core::slice::from_raw_parts(block.as_ptr() as *const u64, 16);
            assert!(words.iter().all(|&w| w == 0));
            Global.release(block, layout);
        }
    }

    #[test]
    fn default_zeroed_falls_back_to_allocate() {
        struct Plain;

        unsafe impl RawAlloc for Plain {
            fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
                let block = Global.allocate(layout)?;
                unsafe { ptr::write_bytes(block.as_ptr(), 0xAB, layout.size()) };
                Some(block)
            }

            unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
                Global.release(block, layout)
            }
        }

        let layout = Layout::array::<u8>(32).unwrap();
        let block = Plain.allocate_zeroed(layout).unwrap();
        unsafe {
            let bytes = core::slice::from_raw_parts(block.as_ptr(), 32);
            assert!(bytes.iter().all(|&b| b == 0));
            (&Plain).release(block, layout);
        }
    }
}
