use core::fmt;

use crate::raw::{Handle, RawBSTree, Side};

/// A view into a single entry in a map, which may either be vacant or occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`crate::BSTreeMap`].
/// Looking up an entry descends the tree once; inserting through a vacant
/// entry reuses that descent.
///
/// # Examples
///
/// ```
/// use bstree::BSTreeMap;
/// use bstree::bstree_map::Entry;
///
/// let mut map = BSTreeMap::new();
///
/// match map.entry("oz") {
///     Entry::Vacant(v) => {
///         v.insert(1);
///     }
///     Entry::Occupied(mut o) => {
///         *o.get_mut() += 1;
///     }
/// }
/// assert_eq!(map["oz"], 1);
/// ```
///
/// [`entry`]: crate::BSTreeMap::entry
pub enum Entry<'a, K: 'a, V: 'a> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),

    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Vacant(v) => f.debug_tuple("Entry").field(v).finish(),
            Entry::Occupied(o) => f.debug_tuple("Entry").field(o).finish(),
        }
    }
}

/// A view into a vacant entry in a `BSTreeMap`.
/// It is part of the [`Entry`] enum.
///
/// Remembers the leaf position the key belongs at, so inserting does not
/// search again.
pub struct VacantEntry<'a, K, V> {
    pub(crate) key: K,
    pub(crate) parent: Option<Handle>,
    pub(crate) side: Side,
    pub(crate) tree: &'a mut RawBSTree<K, V>,
}

impl<K: fmt::Debug, V> fmt::Debug for VacantEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VacantEntry").field("key", &self.key).finish()
    }
}

/// A view into an occupied entry in a `BSTreeMap`.
/// It is part of the [`Entry`] enum.
///
/// # Examples
///
/// ```
/// use bstree::BSTreeMap;
/// use bstree::bstree_map::Entry;
///
/// let mut map = BSTreeMap::new();
/// map.insert("oz", 1);
///
/// if let Entry::Occupied(mut o) = map.entry("oz") {
///     *o.get_mut() += 1;
/// }
/// assert_eq!(map["oz"], 2);
/// ```
pub struct OccupiedEntry<'a, K, V> {
    pub(crate) handle: Handle,
    pub(crate) tree: &'a mut RawBSTree<K, V>,
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OccupiedEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry").field("key", self.key()).field("value", self.get()).finish()
    }
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map: BSTreeMap<&str, usize> = BSTreeMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// assert_eq!(map["poneyland"], 12);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default function if empty,
    /// and returns a mutable reference to the value in the entry.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of the default function.
    ///
    /// The default function is given a reference to the key that was moved
    /// into the `.entry(key)` call.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map: BSTreeMap<&str, usize> = BSTreeMap::new();
    ///
    /// map.entry("poneyland").or_insert_with_key(|key| key.chars().count());
    ///
    /// assert_eq!(map["poneyland"], 9);
    /// ```
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let value = default(&v.key);
                v.insert(value)
            }
        }
    }

    /// Returns a reference to this entry's key.
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(o) => o.key(),
            Entry::Vacant(v) => v.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map: BSTreeMap<&str, usize> = BSTreeMap::new();
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map["poneyland"], 42);
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map["poneyland"], 43);
    /// ```
    #[allow(clippy::return_self_not_must_use)]
    pub fn and_modify<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        if let Entry::Occupied(ref mut o) = self {
            f(o.get_mut());
        }
        self
    }

    /// Sets the value of the entry, and returns an `OccupiedEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map: BSTreeMap<&str, String> = BSTreeMap::new();
    /// let entry = map.entry("poneyland").insert_entry("hoho".to_string());
    ///
    /// assert_eq!(entry.key(), &"poneyland");
    /// ```
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        match self {
            Entry::Occupied(mut o) => {
                o.insert(value);
                o
            }
            Entry::Vacant(v) => v.insert_entry(value),
        }
    }
}

impl<'a, K, V: Default> Entry<'a, K, V> {
    /// Ensures a value is in the entry by inserting the default value if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// This is the inserting lookup: a missing key gets `V::default()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map: BSTreeMap<&str, Option<usize>> = BSTreeMap::new();
    /// map.entry("poneyland").or_default();
    ///
    /// assert_eq!(map["poneyland"], None);
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(V::default()),
        }
    }
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value
    /// through the `VacantEntry`.
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    /// use bstree::bstree_map::Entry;
    ///
    /// let mut map: BSTreeMap<String, usize> = BSTreeMap::new();
    ///
    /// if let Entry::Vacant(v) = map.entry("poneyland".to_string()) {
    ///     assert_eq!(v.into_key(), "poneyland");
    /// }
    /// assert!(map.is_empty());
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    /// use bstree::bstree_map::Entry;
    ///
    /// let mut map: BSTreeMap<&str, u32> = BSTreeMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry("poneyland") {
    ///     o.insert(37);
    /// }
    /// assert_eq!(map["poneyland"], 37);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1), the position was found by `entry`.
    pub fn insert(self, value: V) -> &'a mut V {
        self.insert_entry(value).into_mut()
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns an `OccupiedEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    /// use bstree::bstree_map::Entry;
    ///
    /// let mut map: BSTreeMap<&str, u32> = BSTreeMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry("poneyland") {
    ///     let entry = o.insert_entry(37);
    ///     assert_eq!(entry.get(), &37);
    /// }
    /// assert_eq!(map["poneyland"], 37);
    /// ```
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        let handle = self.tree.attach(self.parent, self.side, self.key, value);
        OccupiedEntry { handle, tree: self.tree }
    }
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    ///
    /// This is the key stored in the map, not the one used to probe the entry.
    #[must_use]
    pub fn key(&self) -> &K {
        self.tree.key(self.handle)
    }

    /// Take ownership of the key and value from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    /// use bstree::bstree_map::Entry;
    ///
    /// let mut map: BSTreeMap<&str, usize> = BSTreeMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     assert_eq!(o.remove_entry(), ("poneyland", 12));
    /// }
    /// assert!(!map.contains_key("poneyland"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth) to find the in-order successor.
    #[allow(clippy::must_use_candidate)]
    pub fn remove_entry(self) -> (K, V) {
        self.tree.remove_node(self.handle)
    }

    /// Gets a reference to the value in the entry.
    #[must_use]
    pub fn get(&self) -> &V {
        self.tree.value(self.handle)
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// If you need a reference to the `OccupiedEntry` that may outlive the
    /// destruction of the `Entry` value, see [`into_mut`].
    ///
    /// [`into_mut`]: OccupiedEntry::into_mut
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    /// use bstree::bstree_map::Entry;
    ///
    /// let mut map: BSTreeMap<&str, usize> = BSTreeMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(mut o) = map.entry("poneyland") {
    ///     *o.get_mut() += 10;
    ///     assert_eq!(*o.get(), 22);
    ///     *o.get_mut() += 2;
    /// }
    /// assert_eq!(map["poneyland"], 24);
    /// ```
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.value_mut(self.handle)
    }

    /// Converts the entry into a mutable reference to its value.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_mut(self) -> &'a mut V {
        self.tree.value_mut(self.handle)
    }

    /// Sets the value of the entry and returns the entry's old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    /// use bstree::bstree_map::Entry;
    ///
    /// let mut map: BSTreeMap<&str, usize> = BSTreeMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(mut o) = map.entry("poneyland") {
    ///     assert_eq!(o.insert(15), 12);
    /// }
    /// assert_eq!(map["poneyland"], 15);
    /// ```
    pub fn insert(&mut self, value: V) -> V {
        self.tree.replace_value(self.handle, value)
    }

    /// Takes the value of the entry out of the map, and returns it.
    #[allow(clippy::must_use_candidate)]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::BSTreeMap;
    use crate::bstree_map::Entry;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn vacant_insert_attaches_at_the_probed_leaf() {
        let mut map: BSTreeMap<i32, i32> = [50, 25, 75, 10, 35].into_iter().map(|k| (k, k)).collect();
        for key in [30, 40, 5, 80, 60] {
            match map.entry(key) {
                Entry::Vacant(v) => {
                    *v.insert(0) += key;
                }
                Entry::Occupied(_) => panic!("{key} should be vacant"),
            }
            map.validate_invariants();
        }
        let keys: Vec<i32> = map.keys().copied().collect();
        assert_eq!(keys, [5, 10, 25, 30, 35, 40, 50, 60, 75, 80]);
        assert_eq!(map[&40], 40);
    }

    #[test]
    fn vacant_entry_into_empty_map_becomes_root() {
        let mut map: BSTreeMap<String, u8> = BSTreeMap::new();
        let entry = map.entry(String::from("root")).insert_entry(1);
        assert_eq!(entry.key(), "root");
        map.validate_invariants();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn occupied_remove_keeps_tree_valid() {
        let mut map: BSTreeMap<i32, ()> = [4, 2, 6, 1, 3, 5, 7].into_iter().map(|k| (k, ())).collect();
        for key in [4, 2, 7] {
            match map.entry(key) {
                Entry::Occupied(o) => assert_eq!(o.remove_entry(), (key, ())),
                Entry::Vacant(_) => panic!("{key} should be occupied"),
            }
            map.validate_invariants();
        }
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3, 5, 6]);
    }

    #[test]
    fn or_default_counts() {
        let mut counts: BSTreeMap<char, usize> = BSTreeMap::new();
        for c in "abracadabra".chars() {
            *counts.entry(c).or_default() += 1;
        }
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            [('a', 5), ('b', 2), ('c', 1), ('d', 1), ('r', 2)]
        );
    }
}
