//! Debug-only detection of re-entrant calls into a hash table.
//!
//! The tables call user `Hash`/`Eq` impls while their slots are mid-update.
//! A key impl that calls back into the same table would observe a torn
//! state, so every public table method holds an `EntryGuard` for its
//! duration. Debug builds panic on nested entry; release builds carry a
//! zero-sized marker only.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct ReentrancyCheck {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // Tables are single-threaded: keep them !Send + !Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl ReentrancyCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Mark the owning table as busy until the returned guard drops.
    #[inline]
    pub(crate) fn enter(&self) -> EntryGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "re-entrant call into hash table from a key's Hash or Eq impl"
            );
            EntryGuard { active: &self.active }
        }

        #[cfg(not(debug_assertions))]
        {
            EntryGuard { _lt: PhantomData }
        }
    }
}

impl Default for ReentrancyCheck {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct EntryGuard<'a> {
    #[cfg(debug_assertions)]
    active: &'a Cell<bool>,
    #[cfg(not(debug_assertions))]
    _lt: PhantomData<&'a ()>,
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.active.set(false);
    }
}
