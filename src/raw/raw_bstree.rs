use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// The unbalanced binary search tree backing `BSTreeMap` and `BSTreeSet`.
pub(crate) struct RawBSTree<K, V> {
    /// Arena owning every node; links between nodes are handles into it.
    nodes: Arena<Node<K>>,
    /// Arena owning every value, kept apart so values can be borrowed mutably
    /// while the link structure is read.
    values: Arena<V>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of nodes reachable from `root`.
    len: usize,
}

/// Where a key lives, or would be attached, in the tree.
pub(crate) enum Slot {
    /// A node with an equal key exists.
    Occupied(Handle),
    /// No equal key; a new node belongs on `side` of `parent` (or at the root).
    Vacant { parent: Option<Handle>, side: Side },
}

/// Descends from `handle` as far as possible toward `side`.
fn extreme<K>(nodes: &Arena<Node<K>>, mut handle: Handle, side: Side) -> Handle {
    while let Some(child) = nodes.get(handle).child(side) {
        handle = child;
    }
    handle
}

/// In-order neighbour of `handle`: the successor when `toward` is `Right`, the
/// predecessor when it is `Left`. Walks parent links; no stack is kept.
pub(crate) fn step<K>(nodes: &Arena<Node<K>>, handle: Handle, toward: Side) -> Option<Handle> {
    let away = toward.opposite();
    if let Some(child) = nodes.get(handle).child(toward) {
        return Some(extreme(nodes, child, away));
    }

    let mut current = handle;
    while let Some(parent) = nodes.get(current).parent {
        if nodes.get(parent).child(away) == Some(current) {
            return Some(parent);
        }
        current = parent;
    }
    None
}

/// A double-ended walk over node handles in key order.
///
/// Holds no borrow; each step is given the node arena it walks.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Walk {
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl Walk {
    pub(crate) fn next<K>(&mut self, nodes: &Arena<Node<K>>) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = step(nodes, handle, Side::Right);
        Some(handle)
    }

    pub(crate) fn next_back<K>(&mut self, nodes: &Arena<Node<K>>) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = step(nodes, handle, Side::Left);
        Some(handle)
    }

    pub(crate) const fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> RawBSTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new, empty tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity().min(self.values.capacity())
    }

    /// The most entries a tree can ever hold.
    pub(crate) const fn max_size() -> usize {
        Handle::MAX + 1
    }

    /// Drops every node and value. The tree stays usable.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn nodes(&self) -> &Arena<Node<K>> {
        &self.nodes
    }

    /// Splits the tree into its read-only link structure and a raw pointer to the
    /// value slots, for iterators that hand out `&mut V` while walking links.
    pub(crate) fn split_values_mut(&mut self) -> (&Arena<Node<K>>, *mut Option<V>) {
        (&self.nodes, self.values.slots_mut_ptr())
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &V {
        self.values.get(self.nodes.get(handle).value())
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        let value = self.nodes.get(handle).value();
        self.values.get_mut(value)
    }

    pub(crate) fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get(node.value()))
    }

    pub(crate) fn key_value_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get_mut(node.value()))
    }

    /// Replaces the value of an existing node, returning the old one.
    pub(crate) fn replace_value(&mut self, handle: Handle, value: V) -> V {
        mem::replace(self.value_mut(handle), value)
    }

    /// Leftmost node, or `None` for an empty tree.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| extreme(&self.nodes, root, Side::Left))
    }

    /// Rightmost node, or `None` for an empty tree.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| extreme(&self.nodes, root, Side::Right))
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        step(&self.nodes, handle, Side::Right)
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        step(&self.nodes, handle, Side::Left)
    }

    /// A walk over every node in key order.
    pub(crate) fn walk(&self) -> Walk {
        Walk {
            front: self.first(),
            back: self.last(),
            remaining: self.len,
        }
    }

    /// Allocates a node for `key`/`value` and hangs it on `side` of `parent`,
    /// or makes it the root when `parent` is `None`.
    pub(crate) fn attach(&mut self, parent: Option<Handle>, side: Side, key: K, value: V) -> Handle {
        let value = self.values.alloc(value);
        let handle = self.nodes.alloc(Node::new(key, value, parent));
        match parent {
            Some(parent) => {
                debug_assert!(self.nodes.get(parent).child(side).is_none(), "attaching over a live child");
                self.nodes.get_mut(parent).set_child(side, Some(handle));
            }
            None => {
                debug_assert!(self.root.is_none(), "attaching a second root");
                self.root = Some(handle);
            }
        }
        self.len += 1;
        handle
    }

    /// Puts `replacement` where `old` hangs under its parent (or at the root) and
    /// re-points the replacement's parent link. `old`'s own links are untouched.
    fn replace_in_parent(&mut self, old: Handle, replacement: Option<Handle>) {
        let parent = self.nodes.get(old).parent;
        match parent {
            Some(parent) => {
                let parent_node = self.nodes.get_mut(parent);
                if parent_node.left == Some(old) {
                    parent_node.left = replacement;
                } else {
                    parent_node.right = replacement;
                }
            }
            None => self.root = replacement,
        }
        if let Some(replacement) = replacement {
            self.nodes.get_mut(replacement).parent = parent;
        }
    }

    /// Unlinks the node at `handle`, frees it, and returns its key and value.
    ///
    /// Every other node keeps its handle: with two children the in-order
    /// successor is relinked into the removed node's place rather than copied.
    pub(crate) fn remove_node(&mut self, handle: Handle) -> (K, V) {
        let node = self.nodes.get(handle);
        match (node.left, node.right) {
            (None, None) => {
                trace!("erase: leaf");
                self.replace_in_parent(handle, None);
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("erase: single child");
                self.replace_in_parent(handle, Some(child));
            }
            (Some(left), Some(right)) => {
                let successor = extreme(&self.nodes, right, Side::Left);
                trace!("erase: two children, successor is right child: {}", successor == right);
                if successor != right {
                    // The successor has no left child; its right subtree moves up first.
                    let successor_right = self.nodes.get(successor).right;
                    self.replace_in_parent(successor, successor_right);
                    self.nodes.get_mut(successor).right = Some(right);
                    self.nodes.get_mut(right).parent = Some(successor);
                }
                self.nodes.get_mut(successor).left = Some(left);
                self.nodes.get_mut(left).parent = Some(successor);
                self.replace_in_parent(handle, Some(successor));
            }
        }

        let (key, value) = self.nodes.take(handle).into_parts();
        self.len -= 1;
        (key, self.values.take(value))
    }

    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first()?;
        Some(self.remove_node(first))
    }

    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last()?;
        Some(self.remove_node(last))
    }

    /// Keeps only the entries for which `f` returns `true`, visiting in key order.
    pub(crate) fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            // Removal relinks rather than moves, so the successor's handle stays valid.
            cursor = self.successor(handle);
            let (key, value) = self.key_value_mut(handle);
            if !f(key, value) {
                self.remove_node(handle);
            }
        }
    }

    /// Moves every entry out in key order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut handles = Vec::with_capacity(self.len);
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            handles.push(handle);
            cursor = self.successor(handle);
        }

        let entries = handles
            .into_iter()
            .map(|handle| {
                let (key, value) = self.nodes.take(handle).into_parts();
                (key, self.values.take(value))
            })
            .collect();
        debug_assert_eq!(self.nodes.len(), 0, "drained tree still owns nodes");
        self.clear();
        entries
    }
}

impl<K: Ord, V> RawBSTree<K, V> {
    /// Descends from the root comparing against `key`.
    pub(crate) fn locate<Q>(&self, key: &Q) -> Slot
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            side = match key.cmp(node.key().borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Slot::Occupied(handle),
            };
            parent = Some(handle);
            current = node.child(side);
        }
        Slot::Vacant { parent, side }
    }

    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.locate(key) {
            Slot::Occupied(handle) => Some(handle),
            Slot::Vacant { .. } => None,
        }
    }

    /// Inserts `key` unless an equal key is present. Returns the node holding the
    /// key and whether it was newly inserted; an existing value is left alone.
    pub(crate) fn insert(&mut self, key: K, value: V) -> (Handle, bool) {
        match self.locate(&key) {
            Slot::Occupied(handle) => (handle, false),
            Slot::Vacant { parent, side } => (self.attach(parent, side, key, value), true),
        }
    }

    /// Like [`RawBSTree::insert`], but overwrites the value of an existing key.
    pub(crate) fn insert_or_assign(&mut self, key: K, value: V) -> (Handle, bool) {
        match self.locate(&key) {
            Slot::Occupied(handle) => {
                self.replace_value(handle, value);
                (handle, false)
            }
            Slot::Vacant { parent, side } => (self.attach(parent, side, key, value), true),
        }
    }

    /// Moves every entry of `other` whose key is absent here into `self`.
    ///
    /// Entries with colliding keys stay in `other` untouched, and `self` keeps
    /// its own values for them.
    pub(crate) fn merge(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            debug!("merge: moved {} entries into an empty tree", other.len);
            mem::swap(self, other);
            return;
        }

        let mut moved = 0usize;
        let mut cursor = other.first();
        while let Some(handle) = cursor {
            cursor = other.successor(handle);
            if let Slot::Vacant { parent, side } = self.locate(other.key(handle)) {
                let (key, value) = other.remove_node(handle);
                self.attach(parent, side, key, value);
                moved += 1;
            }
        }
        debug!("merge: moved {moved} entries, {} colliding entries left behind", other.len);
    }
}

impl<K: Clone, V: Clone> Clone for RawBSTree<K, V> {
    /// Deep-copies the tree in pre-order into a fresh, compact arena, re-deriving
    /// every parent link. Uses an explicit stack, so degenerate trees are fine.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        let Some(root) = self.root else {
            return copy;
        };

        // (source node, parent in the copy, side under that parent)
        let mut pending: SmallVec<[(Handle, Option<Handle>, Side); 32]> = SmallVec::new();
        pending.push((root, None, Side::Left));

        while let Some((source, parent, side)) = pending.pop() {
            let node = self.nodes.get(source);
            let value = self.values.get(node.value()).clone();
            let handle = copy.attach(parent, side, node.key().clone(), value);
            if let Some(right) = node.right {
                pending.push((right, Some(handle), Side::Right));
            }
            if let Some(left) = node.left {
                pending.push((left, Some(handle), Side::Left));
            }
        }

        debug!("clone: copied {} nodes", copy.len);
        copy
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use proptest::prelude::*;

    impl<K: Ord, V> RawBSTree<K, V> {
        /// Checks ordering, parent links, and counts. Panics listing every violation.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            if self.root.is_none() {
                assert_eq!(self.len, 0, "Empty tree should have len 0");
                assert_eq!(self.nodes.len(), 0, "Empty tree should own no nodes");
                assert_eq!(self.values.len(), 0, "Empty tree should own no values");
                return;
            }

            let root = self.root.unwrap();
            if let Some(parent) = self.nodes.get(root).parent {
                errors.push(format!("root {root:?} has parent {parent:?}"));
            }

            // (node, exclusive lower bound, exclusive upper bound)
            let mut stack: Vec<(Handle, Option<&K>, Option<&K>)> = vec![(root, None, None)];
            let mut visited = 0usize;
            while let Some((handle, lower, upper)) = stack.pop() {
                visited += 1;
                let node = self.nodes.get(handle);
                let key = node.key();
                if lower.is_some_and(|lower| key <= lower) || upper.is_some_and(|upper| key >= upper) {
                    errors.push(format!("node {handle:?} breaks the ordering of its subtree bounds"));
                }
                for child in [node.left, node.right].into_iter().flatten() {
                    let child_parent = self.nodes.get(child).parent;
                    if child_parent != Some(handle) {
                        errors.push(format!("child {child:?} of {handle:?} points at parent {child_parent:?}"));
                    }
                }
                if let Some(left) = node.left {
                    stack.push((left, lower, Some(key)));
                }
                if let Some(right) = node.right {
                    stack.push((right, Some(key), upper));
                }
            }

            if visited != self.len {
                errors.push(format!("len mismatch: self.len={}, reachable={visited}", self.len));
            }
            if self.nodes.len() != self.len || self.values.len() != self.len {
                errors.push(format!(
                    "arena mismatch: len={}, nodes={}, values={}",
                    self.len,
                    self.nodes.len(),
                    self.values.len()
                ));
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        fn in_order_keys(&self) -> Vec<&K> {
            let mut walk = self.walk();
            let mut keys = Vec::new();
            while let Some(handle) = walk.next(&self.nodes) {
                keys.push(self.key(handle));
            }
            keys
        }
    }

    fn tree_of(keys: &[i32]) -> RawBSTree<i32, i32> {
        let mut tree = RawBSTree::new();
        for &key in keys {
            tree.insert(key, key * 10);
        }
        tree
    }

    fn remove_key(tree: &mut RawBSTree<i32, i32>, key: i32) -> Option<(i32, i32)> {
        let handle = tree.search(&key)?;
        Some(tree.remove_node(handle))
    }

    #[test]
    fn empty_tree() {
        let tree: RawBSTree<i32, i32> = RawBSTree::new();
        tree.validate_invariants();
        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert_eq!(tree.search(&1), None);
        assert!(matches!(tree.locate(&1), Slot::Vacant { parent: None, .. }));
    }

    #[test]
    fn insert_keeps_existing_value() {
        let mut tree = RawBSTree::new();
        let (first, inserted) = tree.insert(5, "five");
        assert!(inserted);
        let (again, inserted) = tree.insert(5, "FIVE");
        assert!(!inserted);
        assert_eq!(first, again);
        assert_eq!(*tree.value(first), "five");
        assert_eq!(tree.len(), 1);

        let (assigned, inserted) = tree.insert_or_assign(5, "FIVE");
        assert!(!inserted);
        assert_eq!(assigned, first);
        assert_eq!(*tree.value(first), "FIVE");
        tree.validate_invariants();
    }

    #[test]
    fn deletion_topologies() {
        let mut tree = tree_of(&[50, 25, 75, 10, 35, 60, 80, 15, 40, 70, 90, 20]);
        tree.validate_invariants();

        let eighty = tree.search(&80).unwrap();
        let thirty_five = tree.search(&35).unwrap();

        assert_eq!(remove_key(&mut tree, 70), Some((70, 700)));
        tree.validate_invariants();

        // Two children, successor is the right child.
        assert_eq!(remove_key(&mut tree, 75), Some((75, 750)));
        tree.validate_invariants();
        assert_eq!(tree.nodes.get(eighty).left, tree.search(&60));
        assert_eq!(tree.nodes.get(eighty).parent, tree.search(&50));

        assert_eq!(remove_key(&mut tree, 25), Some((25, 250)));
        tree.validate_invariants();
        assert_eq!(tree.nodes.get(tree.root.unwrap()).left, Some(thirty_five));

        assert_eq!(tree.in_order_keys(), [&10, &15, &20, &35, &40, &50, &60, &80, &90]);
        assert_eq!(tree.len(), 9);
    }

    #[test]
    fn two_children_with_deep_successor() {
        // 20's successor is 22, two levels down and carrying a right child.
        let mut tree = tree_of(&[10, 5, 20, 15, 30, 25, 22, 23, 35]);
        let root = tree.root;
        assert_eq!(remove_key(&mut tree, 20), Some((20, 200)));
        tree.validate_invariants();

        let twenty_two = tree.search(&22).unwrap();
        assert_eq!(tree.nodes.get(root.unwrap()).right, Some(twenty_two));
        assert_eq!(tree.nodes.get(twenty_two).left, tree.search(&15));
        assert_eq!(tree.nodes.get(twenty_two).right, tree.search(&30));
        assert_eq!(tree.nodes.get(tree.search(&25).unwrap()).left, tree.search(&23));
        assert_eq!(tree.in_order_keys(), [&5, &10, &15, &22, &23, &25, &30, &35]);
    }

    #[test]
    fn removing_the_root_in_every_shape() {
        let mut leaf_root = tree_of(&[1]);
        assert_eq!(remove_key(&mut leaf_root, 1), Some((1, 10)));
        leaf_root.validate_invariants();
        assert!(leaf_root.root.is_none());

        let mut left_only = tree_of(&[5, 3, 1]);
        remove_key(&mut left_only, 5);
        left_only.validate_invariants();
        assert_eq!(left_only.root, left_only.search(&3));

        let mut right_only = tree_of(&[5, 7, 9]);
        remove_key(&mut right_only, 5);
        right_only.validate_invariants();
        assert_eq!(right_only.root, right_only.search(&7));

        let mut both = tree_of(&[5, 3, 8, 7, 9, 6]);
        remove_key(&mut both, 5);
        both.validate_invariants();
        assert_eq!(both.root, both.search(&6));
        assert_eq!(both.in_order_keys(), [&3, &6, &7, &8, &9]);
    }

    #[test]
    fn erase_then_reinsert_restores_membership() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        for key in 1..=7 {
            remove_key(&mut tree, key);
            assert_eq!(tree.len(), 6);
            assert_eq!(tree.search(&key), None);
            tree.insert(key, key);
            assert_eq!(tree.len(), 7);
            assert!(tree.search(&key).is_some());
            tree.validate_invariants();
        }
    }

    #[test]
    fn merge_moves_only_missing_keys() {
        let mut a = tree_of(&[1, 3, 5]);
        let mut b: RawBSTree<i32, i32> = RawBSTree::new();
        for key in [2, 3, 4, 6] {
            b.insert(key, -key);
        }
        a.merge(&mut b);
        a.validate_invariants();
        b.validate_invariants();

        assert_eq!(a.in_order_keys(), [&1, &2, &3, &4, &5, &6]);
        assert_eq!(*a.value(a.search(&3).unwrap()), 30);
        assert_eq!(*a.value(a.search(&4).unwrap()), -4);
        assert_eq!(b.in_order_keys(), [&3]);
        assert_eq!(*b.value(b.search(&3).unwrap()), -3);
    }

    #[test]
    fn merge_into_empty_takes_everything() {
        let mut a: RawBSTree<i32, i32> = RawBSTree::new();
        let mut b = tree_of(&[2, 1, 3]);
        a.merge(&mut b);
        a.validate_invariants();
        b.validate_invariants();
        assert_eq!(a.len(), 3);
        assert!(b.is_empty());
    }

    #[test]
    fn neighbours_round_trip() {
        let tree = tree_of(&[50, 25, 75, 10, 35, 60, 80, 15, 40, 70, 90, 20]);
        let mut cursor = tree.first();
        let mut seen = Vec::new();
        while let Some(handle) = cursor {
            seen.push(*tree.key(handle));
            if let Some(next) = tree.successor(handle) {
                assert_eq!(tree.predecessor(next), Some(handle));
            }
            cursor = tree.successor(handle);
        }
        assert_eq!(seen, [10, 15, 20, 25, 35, 40, 50, 60, 70, 75, 80, 90]);
        assert_eq!(tree.predecessor(tree.first().unwrap()), None);
        assert_eq!(tree.successor(tree.last().unwrap()), None);
    }

    #[test]
    fn clone_is_deep_and_compact() {
        let mut source = tree_of(&[8, 4, 12, 2, 6, 10, 14]);
        remove_key(&mut source, 4);
        remove_key(&mut source, 12);

        let mut copy = source.clone();
        copy.validate_invariants();
        assert_eq!(copy.in_order_keys(), source.in_order_keys());

        *copy.value_mut(copy.search(&8).unwrap()) = 0;
        copy.insert(100, 100);
        remove_key(&mut copy, 2);

        source.validate_invariants();
        assert_eq!(source.in_order_keys(), [&2, &6, &8, &10, &14]);
        assert_eq!(*source.value(source.search(&8).unwrap()), 80);
    }

    #[test]
    fn degenerate_chain_is_handled_iteratively() {
        let mut tree = RawBSTree::new();
        for key in 0..10_000 {
            tree.insert(key, ());
        }
        let copy = tree.clone();
        copy.validate_invariants();
        assert_eq!(copy.last().map(|handle| *copy.key(handle)), Some(9_999));

        tree.retain(|key, ()| key % 2 == 0);
        tree.validate_invariants();
        assert_eq!(tree.len(), 5_000);

        let drained = tree.drain_to_vec();
        assert_eq!(drained.len(), 5_000);
        assert!(drained.windows(2).all(|pair| pair[0].0 < pair[1].0));
        tree.validate_invariants();
    }

    #[test]
    fn clear_leaves_a_usable_tree() {
        let mut tree = tree_of(&[3, 1, 2]);
        tree.clear();
        tree.validate_invariants();
        tree.insert(9, 9);
        tree.validate_invariants();
        assert_eq!(tree.len(), 1);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
        PopFirst,
        PopLast,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0i32..400).prop_map(Op::Insert),
            3 => (0i32..400).prop_map(Op::Remove),
            1 => Just(Op::PopFirst),
            1 => Just(Op::PopLast),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree: RawBSTree<i32, i32> = RawBSTree::new();
            let mut model = alloc::collections::BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        let (_, inserted) = tree.insert(key, key);
                        prop_assert_eq!(inserted, model.insert(key, key).is_none());
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(remove_key(&mut tree, key), model.remove_entry(&key));
                    }
                    Op::PopFirst => prop_assert_eq!(tree.pop_first(), model.pop_first()),
                    Op::PopLast => prop_assert_eq!(tree.pop_last(), model.pop_last()),
                }
                tree.validate_invariants();
            }

            let keys: Vec<i32> = tree.in_order_keys().into_iter().copied().collect();
            let expected: Vec<i32> = model.keys().copied().collect();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn walk_meets_in_the_middle(keys in prop::collection::vec(0i32..1000, 0..200), split in 0usize..200) {
            let tree = tree_of(&keys);
            let mut walk = tree.walk();
            let mut front = Vec::new();
            let mut back = Vec::new();
            for _ in 0..split {
                match walk.next(&tree.nodes) {
                    Some(handle) => front.push(*tree.key(handle)),
                    None => break,
                }
            }
            while let Some(handle) = walk.next_back(&tree.nodes) {
                back.push(*tree.key(handle));
            }
            prop_assert_eq!(walk.len(), 0);
            back.reverse();
            front.extend(back);
            let expected: Vec<i32> = tree.in_order_keys().into_iter().copied().collect();
            prop_assert_eq!(front, expected);
        }

        #[test]
        fn merge_is_union_with_leftover_collisions(
            left in prop::collection::vec(0i32..300, 0..150),
            right in prop::collection::vec(0i32..300, 0..150),
        ) {
            let mut a = tree_of(&left);
            let mut b: RawBSTree<i32, i32> = RawBSTree::new();
            for &key in &right {
                b.insert(key, -key);
            }
            let a_keys: alloc::collections::BTreeSet<i32> = left.iter().copied().collect();
            let b_keys: alloc::collections::BTreeSet<i32> = right.iter().copied().collect();

            a.merge(&mut b);
            a.validate_invariants();
            b.validate_invariants();

            let union: Vec<i32> = a_keys.union(&b_keys).copied().collect();
            let collisions: Vec<i32> = a_keys.intersection(&b_keys).copied().collect();
            prop_assert_eq!(a.in_order_keys().into_iter().copied().collect::<Vec<_>>(), union);
            prop_assert_eq!(b.in_order_keys().into_iter().copied().collect::<Vec<_>>(), collisions);
            for key in a_keys {
                prop_assert_eq!(*a.value(a.search(&key).unwrap()), key * 10);
            }
        }
    }
}
