use crate::{alloc::RawAlloc, error::ArrayError, DynArray};

/// A position inside a [`DynArray`] that can edit the array while walking it.
///
/// The cursor starts before the first element. [`next`](Cursor::next)
/// yields the element at the cursor's index and moves past it; the editing
/// methods work relative to that index:
///
/// | method    | touches             | index afterwards |
/// |-----------|---------------------|------------------|
/// | `remove`  | `index - 1`         | unchanged        |
/// | `add`     | inserts at `index`  | `index + 1`      |
/// | `replace` | `index`             | unchanged        |
///
/// `replace` writes at the current index, not at the last yielded
/// element, and `remove` leaves the index alone, so the element that slid
/// into the freed slot is skipped by the following `next`. Both behaviours
/// are part of the contract.
///
/// # Examples
///
/// ```
/// use dyn_array::DynArray;
///
/// let mut arr = DynArray::from_array(['a', 'b', 'c']).unwrap();
/// let mut cursor = arr.cursor();
/// assert_eq!(cursor.next(), Some(&'a'));
/// cursor.add('x').unwrap();
/// assert_eq!(cursor.next(), Some(&'b'));
/// assert_eq!(arr, ['a', 'x', 'b', 'c']);
/// ```
pub struct Cursor<'a, T, A: RawAlloc> {
    array: &'a mut DynArray<T, A>,
    index: usize,
}

impl<'a, T, A: RawAlloc> Cursor<'a, T, A> {
    pub(crate) fn new(array: &'a mut DynArray<T, A>) -> Self {
        Self { array, index: 0 }
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.index < self.array.len()
    }

    /// Returns the element at the cursor and advances past it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&T> {
        let element = self.array.as_slice().get(self.index)?;
        self.index += 1;
        Some(element)
    }

    /// Removes the element last returned by [`next`](Cursor::next).
    pub fn remove(&mut self) -> Result<T, ArrayError> {
        let last = self.last_yielded()?;
        self.array.remove_at(last)
    }

    /// Inserts `element` right after the element last returned by
    /// [`next`](Cursor::next), so it is not visited by this cursor.
    ///
    /// Like [`DynArray::add_at`], this needs an existing element at the
    /// insertion point and fails once the cursor is exhausted.
    pub fn add(&mut self, element: T) -> Result<(), ArrayError> {
        self.array.add_at(element, self.index)?;
        self.index += 1;
        Ok(())
    }

    /// Replaces the element at the cursor's current index, which is the
    /// element the next call to [`next`](Cursor::next) would return.
    pub fn replace(&mut self, element: T) -> Result<T, ArrayError> {
        self.array.replace_at(element, self.index)
    }

    /// Index of the element last returned by [`next`](Cursor::next).
    #[inline]
    pub fn current_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    fn last_yielded(&self) -> Result<usize, ArrayError> {
        self.current_index().ok_or(ArrayError::CursorNotStarted)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArrayError, DynArray};

    #[test]
    fn walks_front_to_back() {
        let mut arr = DynArray::from_array([1, 2, 3]).unwrap();
        let mut cursor = arr.cursor();
        let mut seen = Vec::new();
        while cursor.has_next() {
            seen.push(*cursor.next().unwrap());
        }
        assert_eq!(seen, [1, 2, 3]);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.current_index(), Some(2));
    }

    #[test]
    fn current_index_before_next() {
        let mut arr = DynArray::from_array([1]).unwrap();
        let mut cursor = arr.cursor();
        assert_eq!(cursor.current_index(), None);
        assert_eq!(cursor.remove(), Err(ArrayError::CursorNotStarted));
        cursor.next();
        assert_eq!(cursor.current_index(), Some(0));
    }

    #[test]
    fn remove_skips_the_shifted_element() {
        let mut arr = DynArray::from_array(['a', 'b', 'c', 'd']).unwrap();
        let mut cursor = arr.cursor();
        assert_eq!(cursor.next(), Some(&'a'));
        assert_eq!(cursor.remove(), Ok('a'));
        assert_eq!(cursor.next(), Some(&'c'));
        assert_eq!(cursor.next(), Some(&'d'));
        assert!(!cursor.has_next());
        assert_eq!(arr, ['b', 'c', 'd']);
    }

    #[test]
    fn add_is_not_revisited() {
        let mut arr = DynArray::from_array(['a', 'b', 'c']).unwrap();
        let mut cursor = arr.cursor();
        cursor.next();
        cursor.add('x').unwrap();
        assert_eq!(cursor.current_index(), Some(1));
        assert_eq!(cursor.next(), Some(&'b'));
        assert_eq!(cursor.next(), Some(&'c'));
        assert_eq!(cursor.next(), None);
        assert_eq!(arr, ['a', 'x', 'b', 'c']);
    }

    #[test]
    fn add_after_last_element_fails() {
        let mut arr = DynArray::from_array(['a']).unwrap();
        let mut cursor = arr.cursor();
        cursor.next();
        assert_eq!(
            cursor.add('x'),
            Err(ArrayError::IndexOutOfBounds { index: 1, len: 1 })
        );
        assert_eq!(cursor.current_index(), Some(0));
        assert_eq!(arr, ['a']);
    }

    #[test]
    fn replace_targets_current_index_not_last_yielded() {
        let mut arr = DynArray::from_array(['a', 'b', 'c']).unwrap();
        let mut cursor = arr.cursor();
        cursor.next();
        assert_eq!(cursor.replace('z'), Ok('b'));
        assert_eq!(cursor.next(), Some(&'z'));
        cursor.next();
        assert!(cursor.replace('q').is_err());
        assert_eq!(arr, ['a', 'z', 'c']);
    }
}
