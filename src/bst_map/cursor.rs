use core::fmt;

use crate::compare::Natural;
use crate::error::{Error, Result};
use crate::raw::{Handle, RawBstMap};

/// A read-only position in a [`BstMap`](super::BstMap).
///
/// A cursor either points at an entry or is the *end sentinel*, which is where iteration stops
/// and what [`find`](super::BstMap::find) returns for a missing key. Moving a cursor walks the
/// tree in key order through child and parent links.
///
/// A cursor borrows its map, so the map cannot be cleared, rebalanced or otherwise mutated while
/// the cursor is alive.
///
/// Two cursors compare equal when they point at the same entry of the same map, or when both
/// are at the end.
///
/// # Examples
///
/// ```
/// use bst_map::{BstMap, Error};
///
/// let map = BstMap::from([(2, 'b'), (1, 'a'), (3, 'c')]);
///
/// let mut cursor = map.cursor_first();
/// let mut seen = Vec::new();
/// while let Some((k, v)) = cursor.key_value() {
///     seen.push((*k, *v));
///     cursor.move_next().unwrap();
/// }
/// assert_eq!(seen, [(1, 'a'), (2, 'b'), (3, 'c')]);
///
/// assert!(cursor.is_end());
/// assert_eq!(cursor, map.cursor_end());
/// assert_eq!(cursor.move_next(), Err(Error::EndOfSequence));
/// ```
pub struct Cursor<'a, K, V, C = Natural> {
    tree: &'a RawBstMap<K, V, C>,
    node: Option<Handle>,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    pub(super) const fn new(tree: &'a RawBstMap<K, V, C>, node: Option<Handle>) -> Self {
        Self { tree, node }
    }

    /// Returns `true` if the cursor is the end sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Returns the key at the cursor, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.node.map(|handle| self.tree.key(handle))
    }

    /// Returns the value at the cursor, or `None` at the end.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.node.map(|handle| self.tree.value(handle))
    }

    /// Returns the entry at the cursor, or `None` at the end.
    #[must_use]
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.node.map(|handle| (self.tree.key(handle), self.tree.value(handle)))
    }

    /// Moves to the entry with the next larger key, or to the end after the last one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndOfSequence`] if the cursor is already at the end; it stays there.
    pub fn move_next(&mut self) -> Result<()> {
        let handle = self.node.ok_or(Error::EndOfSequence)?;
        self.node = self.tree.successor(handle);
        Ok(())
    }

    /// Moves to the entry with the next smaller key, or to the end before the first one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndOfSequence`] if the cursor is already at the end; it stays there.
    pub fn move_prev(&mut self) -> Result<()> {
        let handle = self.node.ok_or(Error::EndOfSequence)?;
        self.node = self.tree.predecessor(handle);
        Ok(())
    }
}

impl<K, V, C> Clone for Cursor<'_, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for Cursor<'_, K, V, C> {}

impl<'b, K, V, C> PartialEq<Cursor<'b, K, V, C>> for Cursor<'_, K, V, C> {
    fn eq(&self, other: &Cursor<'b, K, V, C>) -> bool {
        self.node == other.node && (self.node.is_none() || core::ptr::eq(self.tree, other.tree))
    }
}

impl<K, V, C> Eq for Cursor<'_, K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Cursor<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}

/// A read-write position in a [`BstMap`](super::BstMap).
///
/// Navigation matches [`Cursor`]; in addition the value at the cursor can be modified. Keys are
/// never handed out mutably since that could break the ordering.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let mut map = BstMap::from([(1, 10), (2, 20)]);
/// let mut cursor = map.cursor_first_mut();
/// if let Some((k, v)) = cursor.key_value_mut() {
///     *v += *k;
/// }
/// assert_eq!(map[&1], 11);
/// ```
pub struct CursorMut<'a, K, V, C = Natural> {
    tree: &'a mut RawBstMap<K, V, C>,
    node: Option<Handle>,
}

impl<'a, K, V, C> CursorMut<'a, K, V, C> {
    pub(super) fn new(tree: &'a mut RawBstMap<K, V, C>, node: Option<Handle>) -> Self {
        Self { tree, node }
    }

    /// Returns `true` if the cursor is the end sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Returns the key at the cursor, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.node.map(|handle| self.tree.key(handle))
    }

    /// Returns the value at the cursor, or `None` at the end.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.node.map(|handle| self.tree.value(handle))
    }

    /// Returns the value at the cursor mutably, or `None` at the end.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        let handle = self.node?;
        Some(self.tree.value_mut(handle))
    }

    /// Returns the key at the cursor together with its mutable value, or `None` at the end.
    pub fn key_value_mut(&mut self) -> Option<(&K, &mut V)> {
        let handle = self.node?;
        Some(self.tree.key_value_mut(handle))
    }

    /// Converts the cursor into a mutable reference to its value, for the map's full borrow.
    #[must_use]
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let handle = self.node?;
        Some(self.tree.value_mut(handle))
    }

    /// Returns a read-only cursor at the same position, borrowing this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self.tree, self.node)
    }

    /// Moves to the entry with the next larger key, or to the end after the last one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndOfSequence`] if the cursor is already at the end; it stays there.
    pub fn move_next(&mut self) -> Result<()> {
        let handle = self.node.ok_or(Error::EndOfSequence)?;
        self.node = self.tree.successor(handle);
        Ok(())
    }

    /// Moves to the entry with the next smaller key, or to the end before the first one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndOfSequence`] if the cursor is already at the end; it stays there.
    pub fn move_prev(&mut self) -> Result<()> {
        let handle = self.node.ok_or(Error::EndOfSequence)?;
        self.node = self.tree.predecessor(handle);
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for CursorMut<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.as_cursor().key_value()).finish()
    }
}
