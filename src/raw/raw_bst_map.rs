use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use crate::compare::Compare;

/// Worklist for the iterative traversals (deep copy, rebuild, height).
///
/// Inline capacity covers a balanced tree of about 2^32 entries without spilling.
type Worklist<T> = SmallVec<[T; 32]>;

/// The core binary search tree backing `BstMap`.
pub(crate) struct RawBstMap<K, V, C> {
    /// Arena owning every node. Links between nodes are handles into it.
    nodes: Arena<Node<K>>,
    /// Arena owning every value, kept apart from the links for `IterMut`.
    values: Arena<V>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total order used to place keys.
    comparator: C,
}

impl<K, V, C> RawBstMap<K, V, C> {
    /// Creates a new, empty tree ordered by `comparator`.
    pub(crate) const fn new(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            comparator,
        }
    }

    /// Creates a new tree with room for `capacity` entries before reallocating.
    pub(crate) fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            comparator,
        }
    }

    /// Returns the number of entries, i.e. the number of live nodes.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Releases every node and value. Storage is kept for reuse.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    /// Returns the value of the node at `handle`.
    pub(crate) fn value(&self, handle: Handle) -> &V {
        self.values.get(self.nodes.get(handle).value())
    }

    /// Returns the value of the node at `handle` mutably.
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        let value = self.nodes.get(handle).value();
        self.values.get_mut(value)
    }

    /// Returns the key of the node at `handle` together with its mutable value.
    pub(crate) fn key_value_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get_mut(node.value()))
    }

    /// Splits the tree into its (shared) node arena and a raw pointer to the value slots.
    ///
    /// Used by `IterMut`, which walks the links while handing out `&mut V` for distinct nodes.
    pub(crate) fn split_values_mut(&mut self) -> (&Arena<Node<K>>, *mut Option<V>) {
        (&self.nodes, self.values.as_mut_ptr())
    }

    /// Returns the node holding the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    /// Returns the node holding the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// Follows `side` links from `handle` until there are none left.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.nodes.get(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Returns the in-order successor of `handle`, or `None` if it holds the largest key.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        step(&self.nodes, handle, Side::Right)
    }

    /// Returns the in-order predecessor of `handle`, or `None` if it holds the smallest key.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        step(&self.nodes, handle, Side::Left)
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Worklist<(Handle, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((handle, depth)) = pending.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            pending.extend(node.left().map(|left| (left, depth + 1)));
            pending.extend(node.right().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Removes every entry and returns them in ascending order.
    ///
    /// Handles are gathered with the successor walk first, since taking nodes out of the arena
    /// as we go would break the parent links the walk climbs.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.successor(handle);
        }

        let entries = order
            .into_iter()
            .map(|handle| {
                let node = self.nodes.take(handle);
                let value = self.values.take(node.value());
                (node.into_key(), value)
            })
            .collect();

        self.clear();
        entries
    }

    /// Attaches a fresh node for `key`/`value` below `parent` on `side` (or as the root).
    fn attach(&mut self, key: K, value: V, parent: Option<(Handle, Side)>) -> Handle {
        let value = self.values.alloc(value);
        let handle = self.nodes.alloc(Node::new(key, value, parent.map(|(parent, _)| parent)));
        match parent {
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, handle),
            None => self.root = Some(handle),
        }
        handle
    }
}

/// One in-order step from `handle` towards `forward` (`Right` = successor, `Left` = predecessor).
///
/// With a subtree on the `forward` side, the answer is that subtree's extreme in the opposite
/// direction. Otherwise climb while we are the parent's `forward` child; the first parent we
/// reach from its other side is the answer, and running out of parents means there is none.
fn step<K>(nodes: &Arena<Node<K>>, handle: Handle, forward: Side) -> Option<Handle> {
    let node = nodes.get(handle);

    if let Some(mut current) = node.child(forward) {
        while let Some(next) = nodes.get(current).child(forward.opposite()) {
            current = next;
        }
        return Some(current);
    }

    let mut current = handle;
    let mut parent = node.parent();
    while let Some(up) = parent {
        let up_node = nodes.get(up);
        if nodes.get(current).side_of(up_node, current) != forward {
            break;
        }
        current = up;
        parent = up_node.parent();
    }
    parent
}

/// `step` over a bare node arena, for iterators that do not hold the whole tree.
pub(crate) fn successor_in<K>(nodes: &Arena<Node<K>>, handle: Handle) -> Option<Handle> {
    step(nodes, handle, Side::Right)
}

/// `step` over a bare node arena, for iterators that do not hold the whole tree.
pub(crate) fn predecessor_in<K>(nodes: &Arena<Node<K>>, handle: Handle) -> Option<Handle> {
    step(nodes, handle, Side::Left)
}

impl<K, V, C> RawBstMap<K, V, C> {
    /// Searches for `key` from the root and returns its node, if present.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match self.comparator.compare(key, node.key().borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.search(key).map(|handle| self.value(handle))
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let handle = self.search(key)?;
        Some(self.value_mut(handle))
    }
}

impl<K, V, C: Compare<K>> RawBstMap<K, V, C> {
    /// Inserts a key-value pair, overwriting the value in place if the key is present.
    ///
    /// Returns the node now holding `key` and the previous value, if any. The shape is only ever
    /// extended by one leaf; nothing is restructured.
    pub(crate) fn insert(&mut self, key: K, value: V) -> (Handle, Option<V>) {
        let Some(mut current) = self.root else {
            return (self.attach(key, value, None), None);
        };

        loop {
            let node = self.nodes.get(current);
            let side = match self.comparator.compare(&key, node.key()) {
                Ordering::Equal => {
                    let old = core::mem::replace(self.value_mut(current), value);
                    return (current, Some(old));
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };

            match node.child(side) {
                Some(child) => current = child,
                None => return (self.attach(key, value, Some((current, side))), None),
            }
        }
    }

    /// Rebuilds the tree from its sorted contents so its height is minimal.
    ///
    /// Entries are drained in ascending order, then re-inserted midpoint first: for each range
    /// `[start, end)` the entry at `(start + end) / 2` goes in, then the left range is processed,
    /// then the right one. Every insert still descends from the root.
    pub(crate) fn balance(&mut self) {
        if self.root.is_none() {
            return;
        }

        let before = self.height();
        let mut entries: Vec<Option<(K, V)>> = self.drain_to_vec().into_iter().map(Some).collect();
        self.nodes.reserve(entries.len());
        self.values.reserve(entries.len());

        let mut ranges: Worklist<(usize, usize)> = SmallVec::new();
        ranges.push((0, entries.len()));

        while let Some((start, end)) = ranges.pop() {
            if start == end {
                continue;
            }
            let mid = start + (end - start) / 2;
            if let Some((key, value)) = entries[mid].take() {
                self.insert(key, value);
            }
            // Popped in reverse: the left range is rebuilt before the right one.
            ranges.push((mid + 1, end));
            ranges.push((start, mid));
        }

        tracing::debug!(len = entries.len(), before, after = self.height(), "rebalanced tree");
    }
}

impl<K: Clone, V: Clone, C: Compare<K>> RawBstMap<K, V, C> {
    /// Replaces the contents of `self` with a deep copy of `source`.
    ///
    /// Source nodes are visited pre-order (node, left subtree, right subtree) and inserted one by
    /// one, which reproduces the source shape when both trees share an ordering.
    pub(crate) fn copy_from<C2>(&mut self, source: &RawBstMap<K, V, C2>) {
        self.clear();
        self.nodes.reserve(source.len());
        self.values.reserve(source.len());

        let mut pending: Worklist<Handle> = source.root.into_iter().collect();
        while let Some(handle) = pending.pop() {
            let node = source.node(handle);
            self.insert(node.key().clone(), source.value(handle).clone());
            // Popped in reverse: the left subtree is copied before the right one.
            pending.extend(node.right());
            pending.extend(node.left());
        }
    }
}

impl<K: Clone, V: Clone, C: Compare<K> + Clone> Clone for RawBstMap<K, V, C> {
    fn clone(&self) -> Self {
        let mut copy = RawBstMap::with_capacity(self.len(), self.comparator.clone());
        copy.copy_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.comparator.clone_from(&source.comparator);
        self.copy_from(source);
    }
}
