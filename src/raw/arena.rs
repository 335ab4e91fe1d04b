use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage that owns every node (or value) of one tree.
///
/// Freed slots go on a free list and are handed out again by [`Arena::alloc`].
/// A handle is only ever reachable from the tree while its slot is occupied, so
/// stale handles are never followed; [`Arena::get`] still panics on one.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(element);
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns a raw pointer to the first slot, for handing out disjoint `&mut T`s
    /// one handle at a time.
    ///
    /// The pointer is valid until the arena is next resized or dropped.
    pub(crate) fn slots_mut_ptr(&mut self) -> *mut Option<T> {
        self.slots.as_mut_ptr()
    }

    /// Returns a mutable reference to the element at `handle` through a pointer
    /// obtained from [`Arena::slots_mut_ptr`].
    ///
    /// # Safety
    /// - `slots` must come from `slots_mut_ptr` on an arena that has not been
    ///   resized since, and `handle` must be occupied in that arena.
    /// - No other reference to the same slot may be live for `'a`.
    #[inline]
    pub(crate) unsafe fn get_mut_raw<'a>(slots: *mut Option<T>, handle: Handle) -> &'a mut T {
        // SAFETY: Caller guarantees `handle` is in bounds of the allocation and that the
        // slot is not aliased. Only this one element is reborrowed, never the whole Vec.
        unsafe { (*slots.add(handle.to_index())).as_mut().expect("`Arena::get_mut_raw()` - `handle` is invalid!") }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
