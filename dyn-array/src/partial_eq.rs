use crate::{alloc::RawAlloc, DynArray};

macro_rules! __impl_slice_eq1 {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
        }
    }
}

__impl_slice_eq1! { [A: RawAlloc, B: RawAlloc] DynArray<T, A>, DynArray<U, B> }
__impl_slice_eq1! { [A: RawAlloc] DynArray<T, A>, &[U] }
__impl_slice_eq1! { [A: RawAlloc] DynArray<T, A>, &mut [U] }
__impl_slice_eq1! { [A: RawAlloc] &[T], DynArray<U, A> }
__impl_slice_eq1! { [A: RawAlloc] &mut [T], DynArray<U, A> }
__impl_slice_eq1! { [A: RawAlloc] DynArray<T, A>, [U] }
__impl_slice_eq1! { [A: RawAlloc] [T], DynArray<U, A> }
__impl_slice_eq1! { [A: RawAlloc, const N: usize] DynArray<T, A>, [U; N] }
__impl_slice_eq1! { [A: RawAlloc, const N: usize] DynArray<T, A>, &[U; N] }

impl<T: Eq, A: RawAlloc> Eq for DynArray<T, A> {}

#[cfg(test)]
mod tests {
    use crate::{ArrayConfig, DynArray, Global};

    #[test]
    fn equality_ignores_capacity() {
        let a = DynArray::from_array([1, 2, 3]).unwrap();
        let mut b: DynArray<i32> = DynArray::new_in(ArrayConfig::new(Global).with_capacity(32)).unwrap();
        b.try_extend([1, 2, 3]).unwrap();
        assert_eq!(a, b);
        b.remove_last().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn compares_with_slices() {
        let a = DynArray::from_array([1, 2]).unwrap();
        let s: &[i32] = &[1, 2];
        assert!(a == s);
        assert!(s == a);
        assert!(a == [1, 2]);
        assert!(a == &[1, 2]);
        assert!(a[..] == *s);
    }
}
