use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage that owns every node (or value) of a tree.
///
/// Slots are only appended. Individual slots are emptied by [`Arena::take`] while a tree is
/// drained, after which the whole arena is [`clear`](Arena::clear)ed, so there is no free list.
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) const fn len(&self) -> usize {
        self.live
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        // The new slot index must still fit in a `Handle`.
        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX + 1
        );
        self.slots.push(Some(element));
        self.live += 1;
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.live -= 1;
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }

    /// Returns a pointer to the first slot, for handing out disjoint `&mut T` by handle.
    ///
    /// The pointer is valid until the arena is next reallocated, cleared or dropped.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut Option<T> {
        self.slots.as_mut_ptr()
    }

    /// Returns a mutable reference to an element through a pointer from [`Arena::as_mut_ptr`].
    ///
    /// # Safety
    /// - `base` must come from `as_mut_ptr()` on an arena that has not been mutated since.
    /// - `handle` must be a live handle of that arena.
    /// - No other reference to the same element may exist for `'a`.
    #[inline]
    pub(crate) unsafe fn get_raw_mut<'a>(base: *mut Option<T>, handle: Handle) -> &'a mut T {
        // SAFETY: Caller guarantees `base + index` is an in-bounds, exclusively accessed slot.
        unsafe { (*base.add(handle.to_index())).as_mut().expect("`Arena::get_raw_mut()` - `handle` is invalid!") }
    }
}
