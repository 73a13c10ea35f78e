//! The memory policy abstraction.
//!
//! A policy fixes the heap/refcount axis of the memory model by choosing a
//! smart pointer type. Every tree engine in this crate is generic over a
//! `MemoryPolicy`, so the same node and traversal code serves both a
//! single-thread and a thread-safe pointer representation.
//!
//! Only the refcounted axis is modeled: `RcPolicy` (single-thread, the
//! default) and `ArcPolicy` (atomic). A tracing-GC policy is not offered —
//! see `DESIGN.md` for why.

use std::rc::Rc;
use std::sync::Arc;

/// Chooses the smart pointer backing every tree node.
///
/// `make_mut` is the load-bearing operation: a node may be mutated in place
/// only while its reference count is 1, and is cloned first otherwise. The
/// transient protocol (`transient` module) is built directly on top of it.
pub trait MemoryPolicy: Clone + Default {
    /// The pointer type used to share a node across containers.
    type Ptr<T>: Clone + std::ops::Deref<Target = T>;

    /// Allocates a fresh, uniquely-owned pointer.
    fn new_ptr<T>(value: T) -> Self::Ptr<T>;

    /// Returns a mutable reference to the pointee, cloning it first if it is
    /// shared. This is the single primitive the transient protocol needs.
    fn make_mut<T: Clone>(ptr: &mut Self::Ptr<T>) -> &mut T;
}

/// Single-thread refcounted policy built on [`std::rc::Rc`].
///
/// The fast path: no atomic traffic on clone or drop. Containers built on
/// this policy are not `Send`/`Sync`, which falls directly out of `Rc`'s own
/// auto-trait (non-)impls — no manual `unsafe impl` is needed or wanted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RcPolicy;

impl MemoryPolicy for RcPolicy {
    type Ptr<T> = Rc<T>;

    fn new_ptr<T>(value: T) -> Rc<T> {
        Rc::new(value)
    }

    fn make_mut<T: Clone>(ptr: &mut Rc<T>) -> &mut T {
        Rc::make_mut(ptr)
    }
}

/// Atomic-refcounted policy built on [`std::sync::Arc`].
///
/// Distinct threads may freely read any container built on this policy and
/// construct derived containers from it; concurrent reads only synchronize
/// on the refcount itself. Send/Sync again come for free from `Arc`'s own
/// impls whenever the element type is `Send + Sync`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArcPolicy;

impl MemoryPolicy for ArcPolicy {
    type Ptr<T> = Arc<T>;

    fn new_ptr<T>(value: T) -> Arc<T> {
        Arc::new(value)
    }

    fn make_mut<T: Clone>(ptr: &mut Arc<T>) -> &mut T {
        Arc::make_mut(ptr)
    }
}
