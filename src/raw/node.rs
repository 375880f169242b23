use super::handle::Handle;

/// Which child slot of a node a link occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A binary search tree node.
///
/// Children are owned through the tree's node arena; `parent` only observes. The value lives in
/// a separate arena so that mutable value iterators never alias the links they navigate by.
pub(crate) struct Node<K> {
    key: K,
    value: Handle,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K> Node<K> {
    /// Creates a childless node hanging off `parent` (`None` for a root).
    pub(crate) const fn new(key: K, value: Handle, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    pub(crate) const fn value(&self) -> Handle {
        self.value
    }

    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Attaches `child` on `side`. The slot must be empty; nodes are never re-parented.
    pub(crate) fn set_child(&mut self, side: Side, child: Handle) {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        debug_assert!(slot.is_none(), "`Node::set_child()` - {side:?} child is already set!");
        *slot = Some(child);
    }

    /// Returns which side of `parent` this node hangs on, given its own handle.
    pub(crate) fn side_of(&self, parent: &Self, this: Handle) -> Side {
        debug_assert!(self.parent.is_some(), "`Node::side_of()` - node is a root!");
        if parent.left == Some(this) { Side::Left } else { Side::Right }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_leaf() {
        let node = Node::new("k", Handle::from_index(3), Some(Handle::from_index(1)));
        assert_eq!(*node.key(), "k");
        assert_eq!(node.value(), Handle::from_index(3));
        assert_eq!(node.parent(), Some(Handle::from_index(1)));
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
    }

    #[test]
    fn children_by_side() {
        let mut node = Node::new(5, Handle::from_index(0), None);
        node.set_child(Side::Left, Handle::from_index(1));
        node.set_child(Side::Right, Handle::from_index(2));
        assert_eq!(node.child(Side::Left), Some(Handle::from_index(1)));
        assert_eq!(node.child(Side::Right), Some(Handle::from_index(2)));
        assert_eq!(Side::Left.opposite(), Side::Right);

        let child = Node::new(3, Handle::from_index(1), Some(Handle::from_index(0)));
        assert_eq!(child.side_of(&node, Handle::from_index(1)), Side::Left);
        assert_eq!(child.side_of(&node, Handle::from_index(2)), Side::Right);
        assert_eq!(child.into_key(), 3);
    }
}
