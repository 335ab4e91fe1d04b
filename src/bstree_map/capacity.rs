use super::BSTreeMap;
use crate::raw::RawBSTree;

impl<K, V> BSTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before
    /// its node storage reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let map: BSTreeMap<i32, i32> = BSTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BSTreeMap {
            raw: RawBSTree::with_capacity(capacity),
        }
    }

    /// Returns how many entries the map can hold before its node storage
    /// reallocates.
    ///
    /// Slots freed by removals are reused before the storage grows.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the largest number of entries any map can hold.
    ///
    /// Inserting past this limit panics.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// assert!(BSTreeMap::<u8, u8>::max_size() >= 1 << 16);
    /// ```
    #[must_use]
    pub const fn max_size() -> usize {
        RawBSTree::<K, V>::max_size()
    }
}
