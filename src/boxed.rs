//! `PBox<T>` — a single-cell boxed value sharing one heap allocation across
//! copies. A standalone facade over the same [`MemoryPolicy`] abstraction
//! the tree engines use, for callers who want copy-on-write semantics for a
//! single value without reaching for a whole tree.

use std::fmt;

use crate::policy::{MemoryPolicy, RcPolicy};
use crate::transient::TransientState;

/// A persistent box: cloning a `PBox` bumps a reference rather than copying
/// `T`, and [`PBox::map`] produces a new box sharing the old allocation until
/// it actually needs to diverge.
pub struct PBox<T, MP: MemoryPolicy = RcPolicy> {
    ptr: MP::Ptr<T>,
}

impl<T, MP: MemoryPolicy> Clone for PBox<T, MP> {
    fn clone(&self) -> Self {
        PBox { ptr: self.ptr.clone() }
    }
}

impl<T, MP: MemoryPolicy> PBox<T, MP> {
    pub fn new(value: T) -> Self {
        PBox { ptr: MP::new_ptr(value) }
    }

    pub fn get(&self) -> &T {
        &self.ptr
    }
}

impl<T: Clone, MP: MemoryPolicy> PBox<T, MP> {
    /// Returns a new box holding `f(&old value)`, cloning the pointee only if
    /// another box still shares this allocation (the same `make_mut`
    /// clone-on-write every tree node in this crate goes through).
    pub fn map(&self, f: impl FnOnce(&T) -> T) -> Self {
        let mut ptr = self.ptr.clone();
        let slot = MP::make_mut(&mut ptr);
        let new_value = f(slot);
        *slot = new_value;
        PBox { ptr }
    }

    /// Starts a mutable, uniquely-owned editing session.
    pub fn transient(&self) -> PBoxTransient<T, MP> {
        PBoxTransient { state: TransientState::new(self.ptr.clone()) }
    }
}

impl<T: Default, MP: MemoryPolicy> Default for PBox<T, MP> {
    fn default() -> Self {
        PBox::new(T::default())
    }
}

impl<T: fmt::Debug, MP: MemoryPolicy> fmt::Debug for PBox<T, MP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PBox").field(self.get()).finish()
    }
}

impl<T: PartialEq, MP: MemoryPolicy> PartialEq for PBox<T, MP> {
    fn eq(&self, other: &Self) -> bool {
        *self.get() == *other.get()
    }
}

impl<T: Eq, MP: MemoryPolicy> Eq for PBox<T, MP> {}

/// A mutable, uniquely-owned editing session over a [`PBox`].
pub struct PBoxTransient<T: Clone, MP: MemoryPolicy = RcPolicy> {
    state: TransientState<MP::Ptr<T>>,
}

impl<T: Clone, MP: MemoryPolicy> PBoxTransient<T, MP> {
    pub fn get(&self) -> crate::error::Result<&T> {
        Ok(&**self.state.get()?)
    }

    pub fn set(&mut self, value: T) -> crate::error::Result<()> {
        let ptr = self.state.get_mut()?;
        *MP::make_mut(ptr) = value;
        Ok(())
    }

    /// Ends the editing session, returning an immutable snapshot.
    pub fn persistent(&mut self) -> crate::error::Result<PBox<T, MP>> {
        Ok(PBox { ptr: self.state.take()? })
    }
}
