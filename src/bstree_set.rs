use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::BSTreeMap;
use crate::bstree_map::{self, Keys};

mod capacity;
mod cursor;

pub use cursor::{Cursor, CursorMut};

/// An ordered set based on an unbalanced binary search tree.
///
/// See [`BSTreeMap`]'s documentation for a detailed discussion of this
/// collection's performance benefits and drawbacks.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
///
/// Iterators returned by [`BSTreeSet::iter`] and [`BSTreeSet::into_iter`] produce their items in
/// order.
///
/// # Examples
///
/// ```
/// use bstree::BSTreeSet;
///
/// let mut books = BSTreeSet::new();
///
/// // Add some books.
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// // Check for a specific one.
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// // Remove a book.
/// books.remove("The Odyssey");
///
/// // Iterate over everything.
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct BSTreeSet<T> {
    map: BSTreeMap<T, ()>,
}

/// An iterator over the items of a `BSTreeSet`.
///
/// This `struct` is created by the [`iter`] method on [`BSTreeSet`].
///
/// [`iter`]: BSTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: Keys<'a, T, ()>,
}

/// An owning iterator over the items of a `BSTreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`BSTreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: BSTreeSet#method.into_iter
pub struct IntoIter<T> {
    inner: bstree_map::IntoIter<T, ()>,
}

impl<T> BSTreeSet<T> {
    /// Makes a new, empty `BSTreeSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let mut set: BSTreeSet<i32> = BSTreeSet::new();
    /// ```
    #[must_use]
    pub const fn new() -> BSTreeSet<T> {
        BSTreeSet { map: BSTreeMap::new() }
    }

    /// Clears the set, removing all elements.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Exchanges the contents of two sets in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.map.swap(&mut other.map);
    }

    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let set = BSTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to
    /// the value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// Returns a reference to the first element in the set, if any.
    /// This element is always the minimum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, ())| k)
    }

    /// Returns a reference to the last element in the set, if any.
    /// This element is always the maximum of all elements in the set.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, ())| k)
    }

    /// Removes the first element from the set and returns it, if any.
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(k, ())| k)
    }

    /// Removes the last element from the set and returns it, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(k, ())| k)
    }

    /// Adds a value to the set unless an equal value is already present.
    ///
    /// Returns a cursor at the element equal to `value` and whether the value
    /// was newly inserted. An existing element is never replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::new();
    ///
    /// assert!(set.insert(2).1);
    /// let (cursor, inserted) = set.insert(2);
    /// assert!(!inserted);
    /// assert_eq!(cursor.get(), Some(&2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> (Cursor<'_, T>, bool)
    where
        T: Ord,
    {
        let (inner, inserted) = self.map.insert(value, ());
        (Cursor { inner }, inserted)
    }

    /// If the set contains an element equal to the value, removes it from the
    /// set and drops it. Returns whether such an element was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to
    /// the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.remove_entry(value).map(|(k, ())| k)
    }

    /// Retains only the elements specified by the predicate, visiting them in
    /// ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::from([1, 2, 3, 4, 5, 6]);
    /// // Keep only the even numbers.
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.iter().eq([2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.map.retain(|k, ()| f(k));
    }

    /// Moves every element of `other` that is not in `self` into `self`.
    ///
    /// Elements that were already present stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let mut a = BSTreeSet::from([1, 3, 5]);
    /// let mut b = BSTreeSet::from([2, 3, 4, 6]);
    ///
    /// a.merge(&mut b);
    ///
    /// assert!(a.iter().eq([1, 2, 3, 4, 5, 6].iter()));
    /// assert!(b.iter().eq([3].iter()));
    /// ```
    pub fn merge(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        self.map.merge(&mut other.map);
    }

    /// Returns a cursor at the element equal to `value`, or at the end
    /// position if there is none.
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        Cursor {
            inner: self.map.find(value),
        }
    }

    /// Returns a mutable cursor at the element equal to `value`, or at the end
    /// position if there is none.
    pub fn find_mut<Q>(&mut self, value: &Q) -> CursorMut<'_, T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        CursorMut {
            inner: self.map.find_mut(value),
        }
    }

    /// Returns a cursor at the smallest element, or at the end position if the
    /// set is empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor { inner: self.map.begin() }
    }

    /// Returns a mutable cursor at the smallest element.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            inner: self.map.begin_mut(),
        }
    }

    /// Returns a cursor at the end position.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor { inner: self.map.end() }
    }

    /// Gets an iterator that visits the elements in the `BSTreeSet` in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let set = BSTreeSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next_back(), Some(&3));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.map.keys() }
    }

    /// Returns the number of elements in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T: Hash> Hash for BSTreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<T: PartialEq> PartialEq for BSTreeSet<T> {
    fn eq(&self, other: &BSTreeSet<T>) -> bool {
        self.map.eq(&other.map)
    }
}

impl<T: Eq> Eq for BSTreeSet<T> {}

impl<T: PartialOrd> PartialOrd for BSTreeSet<T> {
    fn partial_cmp(&self, other: &BSTreeSet<T>) -> Option<Ordering> {
        self.map.partial_cmp(&other.map)
    }
}

impl<T: Ord> Ord for BSTreeSet<T> {
    fn cmp(&self, other: &BSTreeSet<T>) -> Ordering {
        self.map.cmp(&other.map)
    }
}

impl<T: Clone> Clone for BSTreeSet<T> {
    fn clone(&self) -> Self {
        BSTreeSet { map: self.map.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for BSTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for BSTreeSet<T> {
    fn default() -> BSTreeSet<T> {
        BSTreeSet::new()
    }
}

impl<T: Ord> FromIterator<T> for BSTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> BSTreeSet<T> {
        BSTreeSet {
            map: iter.into_iter().map(|k| (k, ())).collect(),
        }
    }
}

impl<T: Ord> Extend<T> for BSTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for BSTreeSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BSTreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for BSTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `BSTreeSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let set = BSTreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a BSTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}
