use core::cmp::Ordering;

/// A total order over keys, used by a [`BstMap`](crate::BstMap) to place and find entries.
///
/// The default strategy is [`Natural`], which defers to [`Ord`]. Any
/// `Fn(&T, &T) -> Ordering` closure is also a comparator.
///
/// It is a logic error for a comparator to not be a total order, or for its answers to change
/// while keys it has placed are in a map.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let mut map = BstMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.insert(1, "one");
/// map.insert(3, "three");
/// map.insert(2, "two");
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
pub trait Compare<T: ?Sized> {
    /// Compares `lhs` against `rhs`.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// The natural [`Ord`] ordering of keys.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: ?Sized + Ord> Compare<T> for Natural {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}
