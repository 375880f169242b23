use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use crate::compare::{Compare, Natural};
use crate::error::{Error, Result};
use crate::raw::{Arena, Handle, Node, RawBstMap, predecessor_in, successor_in};

mod capacity;
mod cursor;

pub use cursor::{Cursor, CursorMut};

/// An ordered map based on a plain [binary search tree] that is rebalanced only on request.
///
/// Entries are kept in key order as defined by the map's comparator (by default the key's
/// [`Ord`] implementation, see [`Natural`]). Each entry lives in its own node; a node owns its
/// two children and holds a non-owning link back to its parent, which lets iterators and cursors
/// walk the tree in order without a stack.
///
/// Insertion never restructures the tree: a new key always becomes a leaf. Inserting keys in
/// sorted order therefore degrades lookups to O(n). Call [`BstMap::balance`] after such a load
/// to rebuild the tree with minimal height in O(n log n).
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to any
/// other key changes while it is in the map. The behavior resulting from such a logic error is
/// not specified, but will be encapsulated to the `BstMap` that observed it and not result in
/// undefined behavior.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let mut stock = BstMap::new();
/// for (item, count) in [("pears", 3), ("apples", 12), ("plums", 0)] {
///     stock.insert(item, count);
/// }
///
/// // `[]` on a mutable map inserts a default value for missing keys...
/// stock[&"cherries"] += 40;
/// assert_eq!(stock.get(&"cherries"), Some(&40));
///
/// // ...while `try_get` never inserts.
/// assert!(stock.try_get(&"figs").is_err());
///
/// // Sorted input makes a degenerate tree; `balance` fixes that.
/// let mut skewed: BstMap<u32, u32> = (0..1000).map(|i| (i, i)).collect();
/// assert_eq!(skewed.height(), 1000);
/// skewed.balance();
/// assert_eq!(skewed.height(), 10);
///
/// for (item, count) in &stock {
///     println!("{item}: {count}");
/// }
/// ```
///
/// A `BstMap` with a known list of items can be initialized from an array:
///
/// ```
/// use bst_map::BstMap;
///
/// let solar_distance = BstMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance[&"Earth"], 1.0);
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
pub struct BstMap<K, V, C = Natural> {
    raw: RawBstMap<K, V, C>,
}

/// An iterator over the entries of a `BstMap`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`BstMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let map = BstMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: BstMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, C = Natural> {
    tree: Option<&'a RawBstMap<K, V, C>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// A mutable iterator over the entries of a `BstMap`, in key order.
///
/// This `struct` is created by the [`iter_mut`] method on [`BstMap`]. See its
/// documentation for more.
///
/// [`iter_mut`]: BstMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    nodes: Option<&'a Arena<Node<K>>>,
    values: *mut Option<V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
    _marker: PhantomData<&'a mut V>,
}

// SAFETY: IterMut hands out `&K` and `&mut V`, like `(&K, &mut V)` itself.
unsafe impl<K: Sync, V: Send> Send for IterMut<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a `BstMap`, in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`BstMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `BstMap`.
///
/// This `struct` is created by the [`keys`] method on [`BstMap`].
///
/// [`keys`]: BstMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, C = Natural> {
    inner: Iter<'a, K, V, C>,
}

/// An iterator over the values of a `BstMap`.
///
/// This `struct` is created by the [`values`] method on [`BstMap`].
///
/// [`values`]: BstMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, C = Natural> {
    inner: Iter<'a, K, V, C>,
}

/// A mutable iterator over the values of a `BstMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`BstMap`].
///
/// [`values_mut`]: BstMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K, V> BstMap<K, V> {
    /// Makes a new, empty `BstMap` ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> BstMap<K, V> {
        BstMap {
            raw: RawBstMap::new(Natural),
        }
    }
}

impl<K, V, C> BstMap<K, V, C> {
    /// Makes a new, empty `BstMap` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut by_length = BstMap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// by_length.insert("three", 3);
    /// by_length.insert("one", 1);
    /// // "two" has the same length as "one", so it replaces its value.
    /// by_length.insert("two", 2);
    ///
    /// assert_eq!(by_length.len(), 2);
    /// assert_eq!(by_length.get(&"six"), Some(&2));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        BstMap {
            raw: RawBstMap::new(comparator),
        }
    }

    /// Returns the comparator ordering this map.
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// An empty map has height 0. After [`balance`](BstMap::balance) the height of a map with
    /// `n` entries is `⌈log2(n + 1)⌉`.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Clears the map, removing all elements.
    ///
    /// Clearing an empty map does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        if self.raw.is_empty() {
            return;
        }
        tracing::debug!(len = self.raw.len(), "clearing tree");
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, as long as the comparator can
    /// order it.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.get(key)
    }

    /// Returns a reference to the value corresponding to the key, failing if it is absent.
    ///
    /// This is the read-only counterpart of indexed access: it never inserts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the map does not contain `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::{BstMap, Error};
    ///
    /// let map = BstMap::from([(4, 4)]);
    /// assert_eq!(map.try_get(&4), Ok(&4));
    /// assert_eq!(map.try_get(&99), Err(Error::KeyNotFound));
    /// ```
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        match self.raw.get(key) {
            Some(value) => Ok(value),
            None => {
                tracing::trace!(len = self.raw.len(), "read-only lookup missed");
                Err(Error::KeyNotFound)
            }
        }
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.find(key).key_value()
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.search(key).is_some()
    }

    /// Returns a cursor at the entry for `key`, or the end cursor if there is none.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(1, "a"), (5, "e"), (9, "i")]);
    ///
    /// let mut cursor = map.find(&5);
    /// assert_eq!(cursor.key_value(), Some((&5, &"e")));
    /// cursor.move_next().unwrap();
    /// assert_eq!(cursor.key(), Some(&9));
    ///
    /// assert_eq!(map.find(&4), map.cursor_end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        Cursor::new(&self.raw, self.raw.search(key))
    }

    /// Returns a read-write cursor at the entry for `key`, or at the end if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::from([(1, 10), (2, 20), (3, 30)]);
    /// let mut cursor = map.find_mut(&2);
    /// while let Some(value) = cursor.value_mut() {
    ///     *value += 1;
    ///     cursor.move_next().unwrap();
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [10, 21, 31]);
    /// ```
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, C>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let node = self.raw.search(key);
        CursorMut::new(&mut self.raw, node)
    }

    /// Returns a cursor at the entry with the smallest key, or the end cursor if the map is empty.
    pub fn cursor_first(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(&self.raw, self.raw.first())
    }

    /// Returns a cursor at the entry with the largest key, or the end cursor if the map is empty.
    pub fn cursor_last(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(&self.raw, self.raw.last())
    }

    /// Returns the end cursor: the position past the last entry, also returned by failed finds.
    pub fn cursor_end(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(&self.raw, None)
    }

    /// Returns a read-write cursor at the entry with the smallest key.
    pub fn cursor_first_mut(&mut self) -> CursorMut<'_, K, V, C> {
        let node = self.raw.first();
        CursorMut::new(&mut self.raw, node)
    }

    /// Returns the first key-value pair in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.cursor_first().key_value()
    }

    /// Returns the last key-value pair in the map.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.cursor_last().key_value()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// Each step follows at most one child link down or a chain of parent links up.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: Some(&self.raw),
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map[&"c"], 13);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let front = self.raw.first();
        let back = self.raw.last();
        let remaining = self.raw.len();
        let (nodes, values) = self.raw.split_values_mut();
        IterMut {
            nodes: Some(nodes),
            values,
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::from([(1, String::from("hello")), (2, String::from("goodbye"))]);
    /// for value in map.values_mut() {
    ///     value.push('!');
    /// }
    /// let values: Vec<_> = map.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"), String::from("goodbye!")]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }
}

impl<K, V, C: Compare<K>> BstMap<K, V, C> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, a new leaf is added and `None` is returned.
    /// If the key was present, its value is overwritten in place and the old value is
    /// returned; the stored key is not updated. The tree is never restructured by an insert.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value).1
    }

    /// Returns a mutable reference to the value for `key`, inserting `V::default()` first if
    /// the key is absent.
    ///
    /// This is what `map[&key]` does in a mutable context.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut counts: BstMap<char, usize> = BstMap::new();
    /// for c in "hello".chars() {
    ///     *counts.get_or_insert_default(c) += 1;
    /// }
    /// assert_eq!(counts[&'l'], 2);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns a mutable reference to the value for `key`, inserting `f()` first if the key is
    /// absent.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, f: F) -> &mut V {
        let handle = match self.raw.search(&key) {
            Some(handle) => handle,
            None => self.raw.insert(key, f()).0,
        };
        self.raw.value_mut(handle)
    }

    /// Rebuilds the tree so that its height is minimal for its length.
    ///
    /// All entries are collected in ascending order, the tree is cleared, and the entries are
    /// re-inserted midpoint first, so each subtree's root is the median of its range. The
    /// entries themselves are moved, never cloned. Does nothing on an empty map.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map: BstMap<i32, i32> = (0..=10).map(|k| (k, k)).collect();
    /// assert_eq!(map.height(), 11);
    ///
    /// map.balance();
    /// assert_eq!(map.height(), 4);
    /// assert!(map.keys().copied().eq(0..=10));
    /// ```
    pub fn balance(&mut self) {
        self.raw.balance();
    }
}

impl<K: Clone, V: Clone, C: Compare<K> + Clone> Clone for BstMap<K, V, C> {
    /// Deep-copies the map, node by node, reproducing its shape.
    fn clone(&self) -> Self {
        BstMap { raw: self.raw.clone() }
    }

    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<K: Hash, V: Hash, C> Hash for BstMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for BstMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, C> Eq for BstMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for BstMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, C> Ord for BstMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for BstMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Prints one `key: value` line per entry, in key order.
///
/// ```
/// use bst_map::BstMap;
///
/// let map = BstMap::from([(20, "b"), (10, "a")]);
/// assert_eq!(map.to_string(), "10: a\n20: b\n");
/// ```
impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for BstMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in self {
            writeln!(f, "{k}: {v}")?;
        }
        Ok(())
    }
}

impl<K, V, C: Default> Default for BstMap<K, V, C> {
    /// Creates an empty map. `core::mem::take` relies on this to move a map out, leaving an
    /// empty one behind.
    fn default() -> Self {
        BstMap::with_comparator(C::default())
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for BstMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = BstMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for BstMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Copy, V: Copy, C: Compare<K>> Extend<(&'a K, &'a V)> for BstMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a BstMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Iter<'a, K, V, C> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut BstMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for BstMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
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

impl<K, Q, V, C> Index<&Q> for BstMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Compare<Q>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map. Use [`BstMap::try_get`] for a fallible
    /// lookup.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Clone, V: Default, C: Compare<K>> IndexMut<&K> for BstMap<K, V, C> {
    /// Returns a mutable reference to the value for `key`, inserting `V::default()` if absent.
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map: BstMap<i32, i32> = BstMap::new();
    /// map[&4] = 4;
    /// assert_eq!(map[&4], 4);
    /// ```
    fn index_mut(&mut self, key: &K) -> &mut V {
        self.get_or_insert_default(key.clone())
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let tree = self.tree?;
        let handle = self.front?;
        self.remaining -= 1;
        self.front = tree.successor(handle);
        Some((tree.key(handle), tree.value(handle)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let tree = self.tree?;
        let handle = self.back?;
        self.remaining -= 1;
        self.back = tree.predecessor(handle);
        Some((tree.key(handle), tree.value(handle)))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Iter<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V, C> Default for Iter<'_, K, V, C> {
    /// Creates an empty `Iter`.
    ///
    /// ```
    /// use bst_map::bst_map;
    ///
    /// let iter: bst_map::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            tree: None,
            front: None,
            back: None,
            remaining: 0,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes?;
        let handle = self.front?;
        let node = nodes.get(handle);
        // SAFETY: `values` was taken from the tree borrowed mutably for 'a, which is not touched
        // otherwise meanwhile. `remaining` ensures each node, and so each value slot, is yielded
        // at most once, so the returned references are disjoint.
        let value = unsafe { Arena::get_raw_mut(self.values, node.value()) };
        self.remaining -= 1;
        self.front = successor_in(nodes, handle);
        Some((node.key(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes?;
        let handle = self.back?;
        let node = nodes.get(handle);
        // SAFETY: As in `next`; the front and back walks never yield the same node because
        // together they yield exactly `remaining` nodes.
        let value = unsafe { Arena::get_raw_mut(self.values, node.value()) };
        self.remaining -= 1;
        self.back = predecessor_in(nodes, handle);
        Some((node.key(), value))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.remaining).finish_non_exhaustive()
    }
}

impl<K, V> Default for IterMut<'_, K, V> {
    /// Creates an empty `IterMut`.
    fn default() -> Self {
        IterMut {
            nodes: None,
            values: core::ptr::null_mut(),
            front: None,
            back: None,
            remaining: 0,
            _marker: PhantomData,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
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

impl<K, V> Default for IntoIter<K, V> {
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::Vec::new().into_iter(),
        }
    }
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Keys<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, C> FusedIterator for Keys<'_, K, V, C> {}

impl<K, V, C> Clone for Keys<'_, K, V, C> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V, C> fmt::Debug for Keys<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Values<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, C> ExactSizeIterator for Values<'_, K, V, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, C> FusedIterator for Values<'_, K, V, C> {}

impl<K, V, C> Clone for Values<'_, K, V, C> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug, C> fmt::Debug for Values<'_, K, V, C> {
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
        f.debug_struct("ValuesMut").field("remaining", &self.inner.remaining).finish_non_exhaustive()
    }
}
