use core::fmt;

use crate::bstree_map;

/// A read-only position in a [`BSTreeSet`](crate::BSTreeSet).
///
/// Moves like [`bstree_map::Cursor`]: the end position sits between the
/// largest and the smallest element.
///
/// # Examples
///
/// ```
/// use bstree::BSTreeSet;
///
/// let set = BSTreeSet::from([20, 10, 30]);
/// let mut cursor = set.end();
/// cursor.move_prev();
/// assert_eq!(cursor.get(), Some(&30));
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&10));
/// ```
pub struct Cursor<'a, T> {
    pub(crate) inner: bstree_map::Cursor<'a, T, ()>,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {
    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// Returns the element at the cursor, or `None` at the end position.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.inner.key()
    }

    /// Moves to the next element, wrapping through the end position.
    pub fn move_next(&mut self) {
        self.inner.move_next();
    }

    /// Moves to the previous element, wrapping through the end position.
    pub fn move_prev(&mut self) {
        self.inner.move_prev();
    }

    /// Returns the element after the cursor without moving it.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a T> {
        self.inner.peek_next().map(|(t, ())| t)
    }

    /// Returns the element before the cursor without moving it.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a T> {
        self.inner.peek_prev().map(|(t, ())| t)
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// A position in a [`BSTreeSet`](crate::BSTreeSet) that can remove elements.
///
/// Elements cannot be modified in place, since that could break their order.
pub struct CursorMut<'a, T> {
    pub(crate) inner: bstree_map::CursorMut<'a, T, ()>,
}

impl<T> CursorMut<'_, T> {
    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// Returns the element at the cursor, or `None` at the end position.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.inner.key()
    }

    /// See [`Cursor::move_next`].
    pub fn move_next(&mut self) {
        self.inner.move_next();
    }

    /// See [`Cursor::move_prev`].
    pub fn move_prev(&mut self) {
        self.inner.move_prev();
    }

    /// Removes the element at the cursor and returns it, moving the cursor to
    /// the following element. Returns `None` at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::BSTreeSet;
    ///
    /// let mut set = BSTreeSet::from([1, 2, 3]);
    /// let mut cursor = set.find_mut(&2);
    /// assert_eq!(cursor.remove_current(), Some(2));
    /// assert_eq!(cursor.get(), Some(&3));
    /// ```
    pub fn remove_current(&mut self) -> Option<T> {
        self.inner.remove_current().map(|(t, ())| t)
    }

    /// Returns a read-only cursor at the same position, borrowing this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor {
            inner: self.inner.as_cursor(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}
