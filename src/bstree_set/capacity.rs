use super::BSTreeSet;
use crate::BSTreeMap;

impl<T> BSTreeSet<T> {
    /// Creates an empty set with room for at least `capacity` elements before
    /// its node storage reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let set: BSTreeSet<i32> = BSTreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BSTreeSet {
            map: BSTreeMap::with_capacity(capacity),
        }
    }

    /// Returns how many elements the set can hold before its node storage
    /// reallocates.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns the largest number of elements any set can hold.
    #[must_use]
    pub const fn max_size() -> usize {
        BSTreeMap::<T, ()>::max_size()
    }
}
