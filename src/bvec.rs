//! `BVec<T>` — a persistent vector backed by the regular (non-relaxed) radix
//! tree engine.
//!
//! Every operation below clones the (pointer-sized) [`RadixTree`] before
//! mutating the clone, which is what turns the engine's in-place
//! clone-on-write into persistent, non-destructive semantics: the receiver
//! is left exactly as it was, and the new value shares every node it didn't
//! have to touch.

use std::fmt;

use crate::error::Result;
use crate::policy::{MemoryPolicy, RcPolicy};
use crate::radix::RadixTree;
use crate::transient::TransientState;

/// A persistent vector with amortized O(1) `push_back`/`pop_back` and
/// O(log n) indexed access, structured as a wide (`2^B`-ary) tree plus a
/// tail buffer.
pub struct BVec<T: Clone, MP: MemoryPolicy = RcPolicy, const B: usize = 5> {
    tree: RadixTree<T, MP, B>,
}

impl<T: Clone, MP: MemoryPolicy, const B: usize> Clone for BVec<T, MP, B> {
    fn clone(&self) -> Self {
        BVec { tree: self.tree.clone() }
    }
}

impl<T: Clone, MP: MemoryPolicy, const B: usize> Default for BVec<T, MP, B> {
    fn default() -> Self {
        BVec { tree: RadixTree::new() }
    }
}

impl<T: Clone, MP: MemoryPolicy, const B: usize> BVec<T, MP, B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.tree.get(index)
    }

    /// Returns a copy with `index` replaced by `value`, or `Err` if `index`
    /// is out of bounds (the receiver is left untouched either way).
    pub fn set(&self, index: usize, value: T) -> Result<Self> {
        let mut tree = self.tree.clone();
        tree.set_mut(index, value)?;
        Ok(BVec { tree })
    }

    /// Returns a copy with `index` replaced by `f(&old_value)`.
    pub fn update(&self, index: usize, f: impl FnOnce(&T) -> T) -> Result<Self> {
        let mut tree = self.tree.clone();
        tree.update_mut(index, f)?;
        Ok(BVec { tree })
    }

    /// Returns a copy with `value` appended.
    pub fn push_back(&self, value: T) -> Self {
        let mut tree = self.tree.clone();
        tree.push_back_mut(value);
        BVec { tree }
    }

    /// Returns a copy with the last element removed, along with that
    /// element. `None` if the vector was already empty.
    pub fn pop_back(&self) -> (Self, Option<T>) {
        let mut tree = self.tree.clone();
        let popped = tree.pop_back_mut();
        (BVec { tree }, popped)
    }

    /// Returns a copy truncated to its first `n` elements.
    pub fn take(&self, n: usize) -> Result<Self> {
        let mut tree = self.tree.clone();
        tree.take_mut(n)?;
        Ok(BVec { tree })
    }

    pub fn iter(&self) -> Iter<'_, T, MP, B> {
        crate::radix::ElementIter::new(&self.tree)
    }

    /// Starts a mutable, uniquely-owned editing session seeded from this
    /// vector's current contents.
    pub fn transient(&self) -> BVecTransient<T, MP, B> {
        BVecTransient { state: TransientState::new(self.tree.clone()) }
    }
}

impl<T: Clone, MP: MemoryPolicy, const B: usize> fmt::Debug for BVec<T, MP, B>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + PartialEq, MP: MemoryPolicy, const B: usize> PartialEq for BVec<T, MP, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Clone + Eq, MP: MemoryPolicy, const B: usize> Eq for BVec<T, MP, B> {}

impl<T: Clone, MP: MemoryPolicy, const B: usize> FromIterator<T> for BVec<T, MP, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RadixTree::new();
        for value in iter {
            tree.push_back_mut(value);
        }
        BVec { tree }
    }
}

impl<'a, T: Clone, MP: MemoryPolicy, const B: usize> IntoIterator for &'a BVec<T, MP, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, MP, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`BVec`]'s elements: forward, reverse (`rev()`), and
/// exact-sized, built by flattening the engine's leaf slices from both ends
/// at once (see [`crate::radix::ElementIter`]).
pub type Iter<'a, T, MP, const B: usize> = crate::radix::ElementIter<'a, T, MP, B>;

/// A mutable, uniquely-owned editing session over a [`BVec`].
pub struct BVecTransient<T: Clone, MP: MemoryPolicy = RcPolicy, const B: usize = 5> {
    state: TransientState<RadixTree<T, MP, B>>,
}

impl<T: Clone, MP: MemoryPolicy, const B: usize> BVecTransient<T, MP, B> {
    pub fn len(&self) -> usize {
        self.state.get().map(RadixTree::len).unwrap_or(0)
    }

    pub fn get(&self, index: usize) -> Result<Option<&T>> {
        Ok(self.state.get()?.get(index))
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.state.get_mut()?.set_mut(index, value)
    }

    pub fn push_back(&mut self, value: T) -> Result<()> {
        self.state.get_mut()?.push_back_mut(value);
        Ok(())
    }

    pub fn pop_back(&mut self) -> Result<Option<T>> {
        Ok(self.state.get_mut()?.pop_back_mut())
    }

    /// Ends the editing session, returning an immutable snapshot of its
    /// current contents. Any further mutating call on `self` after this
    /// returns `Err(TransientMisuse)`.
    pub fn persistent(&mut self) -> Result<BVec<T, MP, B>> {
        Ok(BVec { tree: self.state.take()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn build(n: usize) -> BVec<i32> {
        (0..n as i32).collect()
    }

    #[test]
    fn from_iter_and_get_agree_with_push_back() {
        let a = build(1_000);
        let mut b = BVec::new();
        for i in 0..1_000 {
            b = b.push_back(i as i32);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn set_is_non_destructive() {
        let a = build(64);
        let b = a.set(0, 99).unwrap();
        assert_eq!(*a.get(0).unwrap(), 0);
        assert_eq!(*b.get(0).unwrap(), 99);
    }

    #[test]
    fn update_applies_function_to_old_value() {
        let a = build(10);
        let b = a.update(5, |v| v * 10).unwrap();
        assert_eq!(*b.get(5).unwrap(), 50);
    }

    #[test]
    fn pop_back_yields_none_on_empty() {
        let empty: BVec<i32> = BVec::new();
        let (still_empty, popped) = empty.pop_back();
        assert_eq!(popped, None);
        assert!(still_empty.is_empty());
    }

    #[test]
    fn out_of_bounds_set_reports_len() {
        let a = build(3);
        assert_eq!(a.set(3, 0), Err(Error::OutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn take_truncates_to_prefix() {
        let a = build(1_000);
        let b = a.take(300).unwrap();
        assert_eq!(b.len(), 300);
        for i in 0..300 {
            assert_eq!(a.get(i), b.get(i));
        }
        assert_eq!(a.len(), 1_000);
    }

    #[test]
    fn take_past_len_reports_error() {
        let a = build(5);
        assert_eq!(a.take(6), Err(Error::OutOfRange { index: 6, len: 5 }));
    }

    #[test]
    fn transient_bulk_build_matches_persistent_equivalent() {
        let mut t = BVec::<i32>::new().transient();
        for i in 0..500 {
            t.push_back(i).unwrap();
        }
        let built = t.persistent().unwrap();
        assert_eq!(built, build(500));
    }

    #[test]
    fn iter_yields_elements_in_order() {
        let a = build(50);
        let collected: Vec<i32> = a.iter().copied().collect();
        assert_eq!(collected, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn iter_supports_reverse_and_reports_exact_len() {
        let a = build(50);
        assert_eq!(a.iter().len(), 50);
        let collected: Vec<i32> = a.iter().rev().copied().collect();
        assert_eq!(collected, (0..50).rev().collect::<Vec<_>>());
    }
}
