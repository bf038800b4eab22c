//! Per-instance lazy delegate slots.
//!
//! One slot per callback index. A slot goes from empty to filled once and
//! stays filled for the instance's lifetime. Concurrent first calls block on
//! the slot; the first successful load wins and every caller sees it. A failed
//! load leaves the slot empty. A loader that re-enters its own slot while
//! filling it deadlocks.

use once_cell::sync::OnceCell;
use proxen_core::Value;

pub(crate) struct LazySlots {
    slots: Box<[OnceCell<Value>]>,
}

impl LazySlots {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| OnceCell::new()).collect(),
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&OnceCell<Value>> {
        self.slots.get(index)
    }

    pub(crate) fn is_filled(&self, index: usize) -> bool {
        self.get(index).is_some_and(|slot| slot.get().is_some())
    }
}
