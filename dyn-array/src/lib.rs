//! A growable array of handles with pluggable allocators.
//!
//! [`DynArray`] keeps its elements in one contiguous buffer obtained from a
//! [`RawAlloc`]. It grows by a configurable factor, supports insertion and
//! removal at any position, and offers a [`Cursor`] that can remove, insert
//! and replace elements while walking the array.
//!
//! ```
//! use dyn_array::DynArray;
//!
//! let mut arr = DynArray::new().unwrap();
//! arr.add("a").unwrap();
//! arr.add("c").unwrap();
//! arr.add_at("b", 1).unwrap();
//! assert_eq!(arr, ["a", "b", "c"]);
//! ```

use core::{
    cmp::Ordering,
    fmt,
    mem,
    ops::{Deref, DerefMut},
    ptr, slice,
};

pub mod alloc;
pub mod config;
mod cursor;
pub mod error;
mod handle;
mod partial_eq;
mod raw;
mod write;

pub use alloc::{Global, RawAlloc};
pub use config::ArrayConfig;
pub use cursor::Cursor;
pub use error::ArrayError;
pub use handle::Handle;

use raw::RawBuf;

pub struct DynArray<T, A: RawAlloc = Global> {
    len: usize,
    buf: RawBuf<T, A>,
    growth_factor: f64,
    max_elements: usize,
}

impl<T> DynArray<T, Global> {
    /// Creates an empty array on the process heap with the default
    /// capacity of 8 and growth factor of 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let arr: DynArray<u8> = DynArray::new().unwrap();
    /// assert_eq!(arr.capacity(), 8);
    /// ```
    pub fn new() -> Result<Self, ArrayError> {
        Self::new_in(ArrayConfig::default())
    }

    /// Creates an empty array on the process heap with room for
    /// `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Self::new_in(ArrayConfig::default().with_capacity(capacity))
    }

    /// Creates a heap array holding `values`, with capacity `max(N, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let arr = DynArray::from_array(['a', 'b']).unwrap();
    /// assert_eq!(arr.capacity(), 2);
    /// ```
    pub fn from_array<const N: usize>(values: [T; N]) -> Result<Self, ArrayError> {
        let mut array = Self::with_capacity(N.max(1))?;
        array.fill_from(values.into_iter());
        Ok(array)
    }

    /// Creates a heap array holding clones of `values`, with capacity
    /// `max(values.len(), 1)`.
    pub fn from_slice(values: &[T]) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(values.len().max(1))?;
        array.fill_from(values.iter().cloned());
        Ok(array)
    }
}

impl<T, A: RawAlloc> DynArray<T, A> {
    /// The largest number of slots an array of `T` can ever hold.
    pub const MAX_ELEMENTS: usize = isize::MAX as usize
        / if mem::size_of::<T>() == 0 {
            1
        } else {
            mem::size_of::<T>()
        };

    /// Creates an empty array from `config`.
    ///
    /// A growth factor `<= 1` is silently replaced with the default. The
    /// call fails if the initial capacity is zero or above the element
    /// ceiling, if `growth_factor >= max_elements / initial_capacity` (the
    /// first growth step could overflow), or if the allocator cannot
    /// provide the initial buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::{ArrayConfig, DynArray, Global};
    ///
    /// let config = ArrayConfig::new(Global).with_capacity(4).with_growth_factor(1.5);
    /// let arr: DynArray<&str> = DynArray::new_in(config).unwrap();
    /// assert_eq!(arr.capacity(), 4);
    /// assert_eq!(arr.growth_factor(), 1.5);
    /// ```
    pub fn new_in(config: ArrayConfig<A>) -> Result<Self, ArrayError> {
        let max_elements = config.max_elements.min(Self::MAX_ELEMENTS);
        let capacity = config.initial_capacity;
        if capacity == 0 || capacity > max_elements {
            return Err(ArrayError::InvalidCapacity {
                capacity,
                max: max_elements,
            });
        }
        let growth_factor = config.effective_growth_factor();
        if growth_factor >= max_elements as f64 / capacity as f64 {
            return Err(ArrayError::GrowthOverflow {
                growth_factor,
                capacity,
                max: max_elements,
            });
        }
        let buf = RawBuf::try_with_capacity(capacity, config.allocator, true)?;
        Ok(Self {
            len: 0,
            buf,
            growth_factor,
            max_elements,
        })
    }

    /// Returns the number of elements the array can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the number of elements currently in the array.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let arr = DynArray::from_array([1, 2]).unwrap();
    /// assert_eq!(arr.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len >= self.capacity()
    }

    /// Returns the number of elements that can be added before the next growth step.
    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.capacity() - self.len
    }

    #[inline]
    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    /// The slot ceiling this array will never grow past.
    #[inline]
    pub fn max_elements(&self) -> usize {
        self.max_elements
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Returns a raw pointer to the array's buffer.
    ///
    /// Any call that grows or trims the array reallocates the buffer, which
    /// leaves this pointer dangling.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Returns an unsafe mutable pointer to the array's buffer.
    ///
    /// Same invalidation rules as [`as_ptr`](Self::as_ptr).
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialized.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[0, len)` is initialized.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    //============================================================

    /// Appends an element to the back of the array, growing it if full.
    ///
    /// On failure the array is unchanged and `element` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let mut list = DynArray::from_array([1]).unwrap();
    /// list.add(2).unwrap();
    /// list.add(3).unwrap();
    /// assert_eq!(list, [1, 2, 3]);
    /// ```
    pub fn add(&mut self, element: T) -> Result<(), ArrayError> {
        if self.is_full() {
            self.grow()?;
        }
        unsafe {
            ptr::write(self.as_mut_ptr().add(self.len), element);
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts an element at `index`, shifting all elements after it to the right.
    ///
    /// `index` must name an existing element, so `index < len`. Appending
    /// at `len` is the job of [`add`](Self::add); on an empty array every
    /// index is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let mut list = DynArray::from_array([1, 3]).unwrap();
    /// list.add_at(2, 1).unwrap();
    /// assert_eq!(list, [1, 2, 3]);
    /// assert!(list.add_at(4, 3).is_err());
    /// ```
    pub fn add_at(&mut self, element: T, index: usize) -> Result<(), ArrayError> {
        if index >= self.len {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        if self.is_full() {
            self.grow()?;
        }
        unsafe {
            let p = self.as_mut_ptr().add(index);
            // Shift everything over to make space. The ranges overlap.
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, element);
        }
        self.len += 1;
        Ok(())
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn replace_at(&mut self, element: T, index: usize) -> Result<T, ArrayError> {
        match self.as_mut_slice().get_mut(index) {
            Some(slot) => Ok(mem::replace(slot, element)),
            None => Err(ArrayError::IndexOutOfBounds {
                index,
                len: self.len,
            }),
        }
    }

    /// Removes and returns the first handle that is the [same](Handle::same)
    /// as `element`, shifting everything after it to the left. Targets are
    /// never compared.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let (a, b) = (String::from("a"), String::from("b"));
    /// let lookalike = String::from("b");
    /// let mut list = DynArray::from_array([&a, &b, &a]).unwrap();
    /// assert!(std::ptr::eq(list.remove(&&a).unwrap(), &a));
    /// assert_eq!(list, [&b, &a]);
    ///
    /// assert_eq!(list.remove(&&lookalike), None);
    /// ```
    pub fn remove(&mut self, element: &T) -> Option<T>
    where
        T: Handle,
    {
        let index = self.index_of(element)?;
        Some(unsafe { self.take_at(index) })
    }

    /// Removes the element at `index`, shifting all elements after it to the left.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let mut list = DynArray::from_array(['a', 'b', 'c']).unwrap();
    /// assert_eq!(list.remove_at(1), Ok('b'));
    /// assert_eq!(list, ['a', 'c']);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(unsafe { self.take_at(index) })
    }

    /// Removes the last element. Fails on an empty array.
    pub fn remove_last(&mut self) -> Result<T, ArrayError> {
        match self.len.checked_sub(1) {
            Some(last) => self.remove_at(last),
            None => Err(ArrayError::IndexOutOfBounds { index: 0, len: 0 }),
        }
    }

    /// Forgets every element without running its destructor. Capacity is kept.
    ///
    /// For non-owning handles this is a plain clear. Owning handles are
    /// leaked, which leaves their targets to whoever else holds them.
    pub fn remove_all(&mut self) {
        self.len = 0;
    }

    /// Drops every element. Capacity is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let mut list = DynArray::from_array([Box::new(1), Box::new(2)]).unwrap();
    /// list.remove_all_free();
    /// assert!(list.is_empty());
    /// ```
    pub fn remove_all_free(&mut self) {
        self.truncate(0)
    }

    /// Shortens the array, keeping the first `len` elements and dropping
    /// the rest.
    ///
    /// If `len` is greater than the array's current length, this has no
    /// effect. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        if len > self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(
            unsafe { self.as_mut_ptr().add(len) },
            self.len - len,
        );
        // Lowered before dropping: a panicking destructor leaks the rest of
        // the tail instead of leaving it reachable for a second drop.
        self.len = len;
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Releases the buffer and abandons the elements without dropping them.
    pub fn destroy(mut self) {
        self.len = 0;
    }

    /// Drops every element, then releases the buffer. Same as letting the
    /// array go out of scope.
    pub fn destroy_free(self) {
        drop(self)
    }

    //============================================================

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    #[inline]
    pub fn get_last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Position of the first handle that is the same as `element`.
    pub fn index_of(&self, element: &T) -> Option<usize>
    where
        T: Handle,
    {
        self.iter().position(|e| e.same(element))
    }

    /// How many times `element` itself is stored.
    pub fn contains_count(&self, element: &T) -> usize
    where
        T: Handle,
    {
        self.iter().filter(|e| T::same(e, element)).count()
    }

    /// Calls `op` on every element, front to back.
    pub fn for_each<F>(&self, op: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(op)
    }

    /// Returns a cursor positioned before the first element.
    pub fn cursor(&mut self) -> Cursor<'_, T, A> {
        Cursor::new(self)
    }

    //============================================================

    /// Returns a new array holding clones of the elements in `begin..=end`.
    ///
    /// The new array shares this array's allocator and growth settings and
    /// its capacity is exactly `end - begin + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let arr = DynArray::from_array([1, 2, 3, 4, 5]).unwrap();
    /// let sub = arr.subarray(1, 3).unwrap();
    /// assert_eq!(sub, [2, 3, 4]);
    /// assert_eq!(sub.capacity(), 3);
    /// ```
    pub fn subarray(&self, begin: usize, end: usize) -> Result<Self, ArrayError>
    where
        T: Clone,
        A: Clone,
    {
        if begin > end || end >= self.len {
            return Err(ArrayError::InvalidRange {
                begin,
                end,
                len: self.len,
            });
        }
        let mut sub = self.sibling(end - begin + 1, false)?;
        sub.fill_from(self.as_slice()[begin..=end].iter().cloned());
        Ok(sub)
    }

    /// Returns a copy with the same capacity and settings whose elements
    /// are clones of this array's handles.
    ///
    /// For non-owning handles (references, raw pointers, `Rc`) the copy
    /// points at the same data as the original.
    pub fn copy_shallow(&self) -> Result<Self, ArrayError>
    where
        T: Clone,
        A: Clone,
    {
        self.copy_deep(T::clone)
    }

    /// Returns a copy with the same capacity and settings whose elements
    /// are produced by `cp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let arr = DynArray::from_array([Box::new(1), Box::new(2)]).unwrap();
    /// let copy = arr.copy_deep(|b| Box::new(**b * 10)).unwrap();
    /// assert_eq!(*copy[1], 20);
    /// ```
    pub fn copy_deep<F>(&self, cp: F) -> Result<Self, ArrayError>
    where
        F: FnMut(&T) -> T,
        A: Clone,
    {
        let mut copy = self.sibling(self.capacity(), true)?;
        copy.fill_from(self.iter().map(cp));
        Ok(copy)
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        self.as_mut_slice().reverse()
    }

    /// Shrinks the capacity to `max(len, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::DynArray;
    ///
    /// let mut arr: DynArray<u8> = DynArray::new().unwrap();
    /// arr.trim_capacity().unwrap();
    /// assert_eq!(arr.capacity(), 1);
    /// ```
    pub fn trim_capacity(&mut self) -> Result<(), ArrayError> {
        let target = self.len.max(1);
        if self.capacity() == target {
            return Ok(());
        }
        self.buf.reallocate(self.len, target)
    }

    /// Sorts the array with a three-way comparator. Not stable.
    pub fn sort_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_unstable_by(cmp)
    }

    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.as_mut_slice().sort_unstable()
    }

    /// Appends every element of `iter`, stopping at the first failure.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), ArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        for element in iter {
            self.add(element)?;
        }
        Ok(())
    }

    /// Appends clones of `other`. Either all of them are added or none are.
    pub fn try_extend_from_slice(&mut self, other: &[T]) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.reserve(other.len())?;
        self.fill_from(other.iter().cloned());
        Ok(())
    }

    //============================================================

    /// Grows until `additional` more elements fit.
    fn reserve(&mut self, additional: usize) -> Result<(), ArrayError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityExhausted {
                capacity: self.capacity(),
            })?;
        while self.capacity() < needed {
            self.grow()?;
        }
        Ok(())
    }

    /// Grows the buffer by one step of the growth factor.
    ///
    /// Overflowing products are clamped to `max_elements`. A product that
    /// truncates back to the current capacity grows by a single slot.
    fn grow(&mut self) -> Result<(), ArrayError> {
        let capacity = self.capacity();
        if capacity >= self.max_elements {
            return Err(ArrayError::CapacityExhausted { capacity });
        }
        // `as` saturates, so an overflowing product lands on `usize::MAX`.
        let scaled = (capacity as f64 * self.growth_factor) as usize;
        let new_capacity = if scaled > self.max_elements {
            self.max_elements
        } else if scaled <= capacity {
            capacity + 1
        } else {
            scaled
        };
        self.buf.reallocate(self.len, new_capacity)
    }

    /// An empty array with this array's settings and allocator.
    fn sibling(&self, capacity: usize, zeroed: bool) -> Result<Self, ArrayError>
    where
        A: Clone,
    {
        let buf = RawBuf::try_with_capacity(capacity, self.allocator().clone(), zeroed)?;
        Ok(Self {
            len: 0,
            buf,
            growth_factor: self.growth_factor,
            max_elements: self.max_elements,
        })
    }

    /// Writes elements into spare capacity. The caller guarantees they fit.
    fn fill_from<I>(&mut self, iter: I)
    where
        I: Iterator<Item = T>,
    {
        for element in iter {
            debug_assert!(!self.is_full());
            unsafe { ptr::write(self.as_mut_ptr().add(self.len), element) };
            // Bumped per element so a panicking iterator leaves no holes.
            self.len += 1;
        }
    }

    /// SAFETY: `index < len`.
    unsafe fn take_at(&mut self, index: usize) -> T {
        let len = self.len;
        let p = self.as_mut_ptr().add(index);
        // The slot is logically moved out here; the tail move below
        // overwrites it without dropping.
        let ret = ptr::read(p);
        ptr::copy(p.add(1), p, len - index - 1);
        self.len = len - 1;
        ret
    }
}

impl<T, A: RawAlloc> Drop for DynArray<T, A> {
    fn drop(&mut self) {
        self.truncate(0);
    }
}

impl<T, A: RawAlloc> AsRef<[T]> for DynArray<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> AsMut<[T]> for DynArray<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> Deref for DynArray<T, A> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> DerefMut for DynArray<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a DynArray<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut DynArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for DynArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Clone> TryFrom<&[T]> for DynArray<T, Global> {
    type Error = ArrayError;

    fn try_from(values: &[T]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl<T, const N: usize> TryFrom<[T; N]> for DynArray<T, Global> {
    type Error = ArrayError;

    fn try_from(values: [T; N]) -> Result<Self, Self::Error> {
        Self::from_array(values)
    }
}
