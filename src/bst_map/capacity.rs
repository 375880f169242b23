use super::BstMap;
use crate::compare::Natural;
use crate::raw::RawBstMap;

impl<K, V> BstMap<K, V, Natural> {
    /// Creates an empty map with room for at least `capacity` entries.
    ///
    /// Nodes are stored contiguously, so a known size up front avoids reallocating while the
    /// map is filled, and while [`balance`](BstMap::balance) rebuilds it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map: BstMap<i32, i32> = BstMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> BstMap<K, V, C> {
    /// Creates an empty map ordered by `comparator` with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        BstMap {
            raw: RawBstMap::with_capacity(capacity, comparator),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
