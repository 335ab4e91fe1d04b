use super::handle::Handle;

/// Which child slot of a parent a node occupies (or would occupy).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single tree element.
///
/// `left` and `right` are owning links in the sense that a node is reachable
/// from the root only through them; `parent` is a back-reference used for
/// upward traversal and is never followed to free anything.
pub(crate) struct Node<K> {
    key: K,
    value: Handle,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<K> Node<K> {
    /// Creates a detached node owning the value at `value`.
    pub(crate) const fn new(key: K, value: Handle, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    /// Handle of this node's value in the tree's value arena.
    #[inline]
    pub(crate) const fn value(&self) -> Handle {
        self.value
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Consumes the node, returning its key and value handle.
    pub(crate) fn into_parts(self) -> (K, Handle) {
        (self.key, self.value)
    }
}
