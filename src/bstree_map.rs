use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ops::Index;

use crate::Error;
use crate::raw::{Arena, Node, RawBSTree, Slot, Walk};

mod capacity;
mod cursor;
mod entry;

pub use cursor::{Cursor, CursorMut};
pub use entry::{Entry, OccupiedEntry, VacantEntry};

/// An ordered map based on an unbalanced [binary search tree].
///
/// Given a key type with a [total order], an ordered map stores its entries in key order.
/// That means that keys must be of a type that implements the [`Ord`] trait,
/// such that two keys can always be compared to determine their [`Ordering`].
///
/// Every entry lives in its own tree node. A node's left subtree holds only
/// smaller keys and its right subtree only larger keys; each node also links
/// back to its parent, which is how [`Cursor`]s and iterators find the next or
/// previous key without a stack.
///
/// The tree never rebalances. Lookups, insertions, and removals take time
/// proportional to the depth of the tree, which is logarithmic for keys that
/// arrive in random order but linear for keys that arrive sorted.
///
/// Unlike [`BTreeMap::insert`](alloc::collections::BTreeMap::insert),
/// [`BSTreeMap::insert`] never replaces the value of a key that is already
/// present; use [`BSTreeMap::insert_or_assign`] for that.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `BSTreeMap` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use bstree::BSTreeMap;
///
/// let mut movie_reviews = BSTreeMap::new();
///
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.insert("The Godfather",      "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // A second review of the same film is ignored...
/// let (_, inserted) = movie_reviews.insert("Pulp Fiction", "Meh.");
/// assert!(!inserted);
/// // ...unless we ask for it to replace the first one.
/// movie_reviews.insert_or_assign("Pulp Fiction", "Still a masterpiece.");
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers");
///
/// // `at` reports missing keys as an error instead of panicking.
/// assert!(movie_reviews.at("Up!").is_err());
/// assert_eq!(movie_reviews.at("The Godfather"), Ok(&"Very enjoyable."));
///
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
///
/// A `BSTreeMap` with a known list of items can be initialized from an array:
///
/// ```
/// use bstree::BSTreeMap;
///
/// let solar_distance = BSTreeMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.len(), 4);
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct BSTreeMap<K, V> {
    raw: RawBSTree<K, V>,
}

/// An iterator over the entries of a `BSTreeMap`.
///
/// This `struct` is created by the [`iter`] method on [`BSTreeMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use bstree::BSTreeMap;
///
/// let map = BSTreeMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: BSTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawBSTree<K, V>,
    walk: Walk,
}

/// A mutable iterator over the entries of a `BSTreeMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`BSTreeMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use bstree::BSTreeMap;
///
/// let mut map = BSTreeMap::from([(1, 10), (2, 20)]);
/// for (_, value) in map.iter_mut() {
///     *value += 1;
/// }
/// let values: Vec<_> = map.values().copied().collect();
/// assert_eq!(values, [11, 21]);
/// ```
///
/// [`iter_mut`]: BSTreeMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    nodes: &'a Arena<Node<K>>,
    values: *mut Option<V>,
    walk: Walk,
    _marker: PhantomData<&'a mut V>,
}

// SAFETY: IterMut hands out `&K` and `&mut V`, like `(&K, &mut V)` would.
unsafe impl<K: Sync, V: Send> Send for IterMut<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a `BSTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`BSTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `BSTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`BSTreeMap`].
///
/// [`keys`]: BSTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `BSTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`BSTreeMap`].
///
/// [`values`]: BSTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `BSTreeMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`BSTreeMap`].
///
/// [`values_mut`]: BSTreeMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K, V> BSTreeMap<K, V> {
    /// Makes a new, empty `BSTreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> BSTreeMap<K, V> {
        BSTreeMap { raw: RawBSTree::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// The map stays usable and keeps its allocated storage.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents of two maps.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.raw, &mut other.raw);
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.value(handle))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.value_mut(handle))
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.key_value(handle))
    }

    /// Returns a reference to the value for `key`, or [`Error::KeyNotFound`] if
    /// the key is absent.
    ///
    /// Never inserts anything; see [`BSTreeMap::entry`] for the inserting
    /// variant.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when no entry has an equal key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{BSTreeMap, Error};
    ///
    /// let map = BSTreeMap::from([(1, "a")]);
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value for `key`, or
    /// [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when no entry has an equal key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{BSTreeMap, Error};
    ///
    /// let mut map = BSTreeMap::from([("apples", 3)]);
    /// *map.at_mut("apples")? += 1;
    /// assert_eq!(map["apples"], 4);
    /// assert!(map.at_mut("pears").is_err());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let first = self.raw.first()?;
        Some(self.raw.key_value(first))
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let last = self.raw.last()?;
        Some(self.raw.key_value(last))
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Inserts a key-value pair into the map unless the key is already present.
    ///
    /// Returns a cursor at the entry holding the key, and `true` if the entry
    /// was newly created. If the key was already present, the map is left
    /// unchanged (the existing value is kept and `key` and `value` are dropped)
    /// and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// let (cursor, inserted) = map.insert(37, "a");
    /// assert!(inserted);
    /// assert_eq!(cursor.key_value(), Some((&37, &"a")));
    ///
    /// let (cursor, inserted) = map.insert(37, "b");
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(), Some(&"a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn insert(&mut self, key: K, value: V) -> (Cursor<'_, K, V>, bool)
    where
        K: Ord,
    {
        let (handle, inserted) = self.raw.insert(key, value);
        (Cursor::new(&self.raw, Some(handle)), inserted)
    }

    /// Inserts a key-value pair, overwriting the value if the key is already
    /// present.
    ///
    /// Returns a cursor at the entry and `true` if the key was newly inserted,
    /// `false` if an existing value was replaced. The stored key is not
    /// replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::from([(1, "a")]);
    /// let (cursor, inserted) = map.insert_or_assign(1, "z");
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(), Some(&"z"));
    /// assert!(map.insert_or_assign(2, "b").1);
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Cursor<'_, K, V>, bool)
    where
        K: Ord,
    {
        let (handle, inserted) = self.raw.insert_or_assign(key, value);
        (Cursor::new(&self.raw, Some(handle)), inserted)
    }

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// `map.entry(key).or_default()` is the inserting lookup: it creates a
    /// default value for a missing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut count: BSTreeMap<&str, usize> = BSTreeMap::new();
    ///
    /// // count the number of occurrences of letters in the vec
    /// for x in ["a", "b", "a", "c", "a", "b"] {
    ///     *count.entry(x).or_default() += 1;
    /// }
    ///
    /// assert_eq!(count["a"], 3);
    /// assert_eq!(count["b"], 2);
    /// assert_eq!(count["c"], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V>
    where
        K: Ord,
    {
        match self.raw.locate(&key) {
            Slot::Occupied(handle) => Entry::Occupied(OccupiedEntry {
                handle,
                tree: &mut self.raw,
            }),
            Slot::Vacant { parent, side } => Entry::Vacant(VacantEntry {
                key,
                parent,
                side,
                tree: &mut self.raw,
            }),
        }
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.remove_node(handle))
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(&k, &mut v)` returns `false`.
    /// The elements are visited in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map: BSTreeMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.retain(f);
    }

    /// Moves every entry of `other` whose key is not in `self` into `self`.
    ///
    /// Entries whose keys are already present stay in `other`, and `self`
    /// keeps its own values for those keys. Afterwards `self` holds the union
    /// of both key sets and `other` holds exactly the keys that collided.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::from([(1, "a"), (3, "c"), (5, "e")]);
    /// let mut b = BSTreeMap::from([(2, "B"), (3, "C"), (4, "D"), (6, "F")]);
    ///
    /// a.merge(&mut b);
    ///
    /// assert_eq!(a.keys().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
    /// assert_eq!(a[&3], "c");
    /// assert_eq!(b.into_iter().collect::<Vec<_>>(), [(3, "C")]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m * depth), where m is the size of `other`.
    pub fn merge(&mut self, other: &mut Self)
    where
        K: Ord,
    {
        self.raw.merge(&mut other.raw);
    }

    /// Returns a cursor at the entry for `key`, or at the end position if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let map = BSTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.find(&2).value(), Some(&"b"));
    /// assert_eq!(map.find(&3), map.end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        Cursor::new(&self.raw, self.raw.search(key))
    }

    /// Returns a mutable cursor at the entry for `key`, or at the end position
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
    /// let mut cursor = map.find_mut(&2);
    /// assert_eq!(cursor.remove_current(), Some((2, "b")));
    /// assert_eq!(cursor.key(), Some(&3));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let current = self.raw.search(key);
        CursorMut::new(&mut self.raw, current)
    }

    /// Returns a cursor at the smallest key, or at the end position if the map
    /// is empty.
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, self.raw.first())
    }

    /// Returns a mutable cursor at the smallest key, or at the end position if
    /// the map is empty.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        let current = self.raw.first();
        CursorMut::new(&mut self.raw, current)
    }

    /// Returns a cursor at the end position.
    ///
    /// The end position holds no entry. Moving back from it reaches the
    /// largest key.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, None)
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut map = BSTreeMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &self.raw,
            walk: self.raw.walk(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let walk = self.raw.walk();
        let (nodes, values) = self.raw.split_values_mut();
        IterMut {
            nodes,
            values,
            walk,
            _marker: PhantomData,
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let mut a = BSTreeMap::new();
    /// a.insert(1, String::from("hello"));
    /// a.insert(2, String::from("goodbye"));
    ///
    /// for value in a.values_mut() {
    ///     value.push_str("!");
    /// }
    ///
    /// let values: Vec<String> = a.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"), String::from("goodbye!")]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn validate_invariants(&self)
    where
        K: Ord,
    {
        self.raw.validate_invariants();
    }
}

impl<K: Clone, V: Clone> Clone for BSTreeMap<K, V> {
    fn clone(&self) -> Self {
        BSTreeMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash> Hash for BSTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for BSTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for BSTreeMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for BSTreeMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for BSTreeMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BSTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for BSTreeMap<K, V> {
    fn default() -> Self {
        BSTreeMap::new()
    }
}

/// Builds a map from a sequence of pairs. For repeated keys the first pair
/// wins, as with [`BSTreeMap::insert`].
impl<K: Ord, V> FromIterator<(K, V)> for BSTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = BSTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BSTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.raw.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for BSTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.raw.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BSTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut BSTreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for BSTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeMap;
    ///
    /// let map = BSTreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for BSTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `BSTreeMap`; use
    /// [`BSTreeMap::at`] for a fallible lookup.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BSTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.walk.next(self.tree.nodes())?;
        Some(self.tree.key_value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.len(), Some(self.walk.len()))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = self.walk.next_back(self.tree.nodes())?;
        Some(self.tree.key_value(handle))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.walk.len()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            walk: self.walk,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.walk.next(self.nodes)?;
        let node = self.nodes.get(handle);
        // SAFETY: `values` points into the value arena of the tree mutably borrowed for 'a,
        // which cannot be resized meanwhile. The walk yields each node, and so each value
        // handle, at most once.
        let value = unsafe { Arena::get_mut_raw(self.values, node.value()) };
        Some((node.key(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.len(), Some(self.walk.len()))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = self.walk.next_back(self.nodes)?;
        let node = self.nodes.get(handle);
        // SAFETY: As in `next`; the front and back share one `remaining` count, so they
        // never yield the same node.
        let value = unsafe { Arena::get_mut_raw(self.values, node.value()) };
        Some((node.key(), value))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.walk.len()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.walk.len()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.len()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn cursor_symmetry_at_every_position() {
        let map: BSTreeMap<i32, ()> = [50, 25, 75, 10, 35, 60, 80].into_iter().map(|k| (k, ())).collect();

        let mut position = map.end();
        for _ in 0..=map.len() {
            let mut forward = position;
            forward.move_next();
            forward.move_prev();
            assert_eq!(forward, position);

            let mut backward = position;
            backward.move_prev();
            backward.move_next();
            assert_eq!(backward, position);

            position.move_next();
        }
        assert!(position.is_end());
    }

    #[test]
    fn end_steps_to_both_extremes() {
        let map = BSTreeMap::from([(2, 'b'), (1, 'a'), (3, 'c')]);
        let mut back = map.end();
        back.move_prev();
        assert_eq!(back.key(), Some(&3));
        let mut front = map.end();
        front.move_next();
        assert_eq!(front, map.begin());
        assert_eq!(map.end().peek_prev(), Some((&3, &'c')));
        assert_eq!(map.begin().peek_prev(), None);
    }

    #[test]
    fn cursors_of_different_maps_differ() {
        let a = BSTreeMap::from([(1, 1)]);
        let b = BSTreeMap::from([(1, 1)]);
        assert_ne!(a.begin(), b.begin());
        assert_ne!(a.end(), b.end());
        assert_eq!(a.find(&1), a.begin());
    }

    #[test]
    fn empty_map_cursors() {
        let mut map: BSTreeMap<i32, i32> = BSTreeMap::new();
        assert_eq!(map.begin(), map.end());
        let mut cursor = map.end();
        cursor.move_next();
        assert!(cursor.is_end());
        cursor.move_prev();
        assert!(cursor.is_end());
        assert_eq!(cursor.key_value(), None);
        assert_eq!(map.begin_mut().remove_current(), None);
        map.validate_invariants();
    }

    #[test]
    fn cursor_mut_keeps_walking_after_removal() {
        let mut map: BSTreeMap<i32, i32> = (0..20).map(|k| ((k * 7) % 20, k)).collect();
        let mut cursor = map.begin_mut();
        let mut removed = Vec::new();
        while let Some(&key) = cursor.key() {
            if key % 3 == 0 {
                removed.push(cursor.remove_current().map(|(k, _)| k));
            } else {
                cursor.move_next();
            }
        }
        cursor.move_prev();
        assert_eq!(cursor.key(), Some(&19));
        map.validate_invariants();
        assert_eq!(removed, [0, 3, 6, 9, 12, 15, 18].map(Some));
        assert!(map.keys().all(|k| k % 3 != 0));
    }

    #[test]
    fn iter_mut_meets_in_the_middle() {
        let mut map: BSTreeMap<i32, i32> = (0..9).map(|k| (k, 0)).collect();
        let mut iter = map.iter_mut();
        while let (Some((_, front)), back) = (iter.next(), iter.next_back()) {
            *front += 1;
            if let Some((_, back)) = back {
                *back += 1;
            }
        }
        assert!(map.values().all(|&v| v == 1));
    }
}
