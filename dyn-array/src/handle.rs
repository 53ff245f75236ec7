//! Identity of stored handles.
//!
//! [`DynArray::remove`](crate::DynArray::remove),
//! [`index_of`](crate::DynArray::index_of) and
//! [`contains_count`](crate::DynArray::contains_count) look for a handle,
//! not for an equal target. Two `&String`s pointing at different strings
//! that both read `"k"` are different handles.

use core::ptr::{self, NonNull};
use std::{rc::Rc, sync::Arc};

/// A value that stands for something else and can tell whether another
/// value stands for the same thing.
pub trait Handle {
    /// `true` when both handles refer to the same target.
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Handle for &T {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Handle for &mut T {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        ptr::eq(&**self, &**other)
    }
}

impl<T: ?Sized> Handle for *const T {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Handle for *mut T {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Handle for NonNull<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        ptr::eq(self.as_ptr(), other.as_ptr())
    }
}

impl<T: ?Sized> Handle for Rc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Handle for Arc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

/// A missing handle is only the same as another missing handle.
impl<H: Handle> Handle for Option<H> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

// Ids and indices: the value is the identity.
macro_rules! value_handle {
    ($($t:ty)*) => {$(
        impl Handle for $t {
            #[inline]
            fn same(&self, other: &Self) -> bool {
                self == other
            }
        }
    )*};
}

value_handle! { u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize char }
