use core::fmt;
use core::ptr;

use crate::raw::{Handle, RawBSTree};

/// A read-only position in a [`BSTreeMap`](crate::BSTreeMap).
///
/// A cursor either points at an entry or sits at the *end* position, which
/// behaves like a ghost element between the largest and the smallest key:
///
/// - [`move_next`](Cursor::move_next) from the largest key reaches the end, and
///   from the end reaches the smallest key;
/// - [`move_prev`](Cursor::move_prev) from the smallest key reaches the end, and
///   from the end reaches the largest key.
///
/// Stepping back and forth therefore always returns to where it started.
/// Each step follows child and parent links only, in O(depth) worst case and
/// amortized O(1) over a full traversal.
///
/// Two cursors are equal when they point at the same entry of the same map, or
/// are both at the end of the same map; keys are never compared.
///
/// # Examples
///
/// ```
/// use bstree::BSTreeMap;
///
/// let map = BSTreeMap::from([(2, "b"), (1, "a"), (3, "c")]);
///
/// let mut cursor = map.begin();
/// assert_eq!(cursor.key_value(), Some((&1, &"a")));
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor.key(), Some(&3));
/// cursor.move_next();
/// assert_eq!(cursor, map.end());
/// cursor.move_prev();
/// assert_eq!(cursor, map.find(&3));
/// ```
pub struct Cursor<'a, K, V> {
    pub(crate) tree: &'a RawBSTree<K, V>,
    pub(crate) current: Option<Handle>,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) const fn new(tree: &'a RawBSTree<K, V>, current: Option<Handle>) -> Self {
        Cursor { tree, current }
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the key at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.current.map(|handle| self.tree.key(handle))
    }

    /// Returns the value at the cursor, or `None` at the end position.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.current.map(|handle| self.tree.value(handle))
    }

    /// Returns the entry at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.current.map(|handle| self.tree.key_value(handle))
    }

    /// Moves to the next entry in key order (the in-order successor).
    ///
    /// From the largest key this moves to the end position; from the end
    /// position it moves to the smallest key.
    pub fn move_next(&mut self) {
        self.current = match self.current {
            Some(handle) => self.tree.successor(handle),
            None => self.tree.first(),
        };
    }

    /// Moves to the previous entry in key order (the in-order predecessor).
    ///
    /// From the smallest key this moves to the end position; from the end
    /// position it moves to the largest key.
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            Some(handle) => self.tree.predecessor(handle),
            None => self.tree.last(),
        };
    }

    /// Returns the entry after the cursor without moving it.
    #[must_use]
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let mut next = *self;
        next.move_next();
        next.key_value()
    }

    /// Returns the entry before the cursor without moving it.
    #[must_use]
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        let mut prev = *self;
        prev.move_prev();
        prev.key_value()
    }
}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}

/// A position in a [`BSTreeMap`](crate::BSTreeMap) that can modify values and
/// remove entries.
///
/// Moves exactly like [`Cursor`]. Removing the current entry moves the cursor
/// to the entry that followed it.
///
/// # Examples
///
/// ```
/// use bstree::BSTreeMap;
///
/// let mut map: BSTreeMap<i32, i32> = (1..=6).map(|k| (k, k * 10)).collect();
///
/// let mut cursor = map.begin_mut();
/// while let Some(&key) = cursor.key() {
///     if key % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         *cursor.value_mut().unwrap() += 1;
///         cursor.move_next();
///     }
/// }
///
/// assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, 11), (3, 31), (5, 51)]);
/// ```
pub struct CursorMut<'a, K, V> {
    pub(crate) tree: &'a mut RawBSTree<K, V>,
    pub(crate) current: Option<Handle>,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) const fn new(tree: &'a mut RawBSTree<K, V>, current: Option<Handle>) -> Self {
        CursorMut { tree, current }
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the key at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.current.map(|handle| self.tree.key(handle))
    }

    /// Returns the value at the cursor, or `None` at the end position.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.current.map(|handle| self.tree.value(handle))
    }

    /// Returns a mutable reference to the value at the cursor, or `None` at the
    /// end position.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        let handle = self.current?;
        Some(self.tree.value_mut(handle))
    }

    /// Returns the key and a mutable reference to the value at the cursor.
    pub fn key_value_mut(&mut self) -> Option<(&K, &mut V)> {
        let handle = self.current?;
        Some(self.tree.key_value_mut(handle))
    }

    /// Converts the cursor into a mutable reference to its value, with the
    /// lifetime of the map borrow.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let handle = self.current?;
        Some(self.tree.value_mut(handle))
    }

    /// See [`Cursor::move_next`].
    pub fn move_next(&mut self) {
        self.current = match self.current {
            Some(handle) => self.tree.successor(handle),
            None => self.tree.first(),
        };
    }

    /// See [`Cursor::move_prev`].
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            Some(handle) => self.tree.predecessor(handle),
            None => self.tree.last(),
        };
    }

    /// Removes the entry at the cursor and returns it, moving the cursor to the
    /// following entry (or the end position).
    ///
    /// Does nothing and returns `None` at the end position.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let handle = self.current?;
        self.current = self.tree.successor(handle);
        Some(self.tree.remove_node(handle))
    }

    /// Returns a read-only cursor at the same position, borrowing this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.tree, self.current)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.as_cursor().key_value()).finish()
    }
}
