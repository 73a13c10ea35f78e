//! The transient protocol shared by every container's `*Transient` type.
//!
//! A transient exposes the same exclusive-ownership trick the tree engines
//! use internally (mutate in place when the refcount is 1, clone otherwise,
//! via [`crate::policy::MemoryPolicy::make_mut`]) as a value a caller can
//! hold onto across many edits instead of paying a fresh `Rc`/`Arc`
//! bump-then-maybe-clone on every single call.
//!
//! `persistent()` does not consume the transient by value — it takes the
//! tree out and leaves the transient empty. Any further mutating call on a
//! spent transient is a programmer error surfaced as
//! [`crate::error::Error::TransientMisuse`] rather than a panic, since
//! nothing at the type level stops a caller from holding onto the transient
//! past that point.

use crate::error::{Error, Result};

pub(crate) struct TransientState<Tree> {
    inner: Option<Tree>,
}

impl<Tree> TransientState<Tree> {
    pub(crate) fn new(tree: Tree) -> Self {
        TransientState { inner: Some(tree) }
    }

    pub(crate) fn get(&self) -> Result<&Tree> {
        self.inner.as_ref().ok_or(Error::TransientMisuse)
    }

    pub(crate) fn get_mut(&mut self) -> Result<&mut Tree> {
        self.inner.as_mut().ok_or(Error::TransientMisuse)
    }

    /// Takes the tree out, spending the transient. A second call returns
    /// `TransientMisuse` instead of panicking.
    pub(crate) fn take(&mut self) -> Result<Tree> {
        self.inner.take().ok_or(Error::TransientMisuse)
    }
}
