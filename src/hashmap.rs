//! `HashMap<K, V>` — a persistent associative container backed by CHAMP.

use std::fmt;
use std::hash::Hash;

use crate::champ::{ChampTree, Keyed};
use crate::policy::{MemoryPolicy, RcPolicy};
use crate::transient::TransientState;

struct Entry<K, V>(K, V);

impl<K: Clone, V: Clone> Clone for Entry<K, V> {
    fn clone(&self) -> Self {
        Entry(self.0.clone(), self.1.clone())
    }
}

impl<K: Hash + Eq, V> Keyed for Entry<K, V> {
    type Key = K;
    fn key(&self) -> &K {
        &self.0
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

/// A persistent hash map with O(log n) expected-time lookup, insert, update,
/// and erase, keyed by `K`'s `Hash`/`Eq` implementation.
pub struct HashMap<K, V, MP: MemoryPolicy = RcPolicy, const B: usize = 5> {
    tree: ChampTree<Entry<K, V>, MP, B>,
}

impl<K: Clone, V: Clone, MP: MemoryPolicy, const B: usize> Clone for HashMap<K, V, MP, B> {
    fn clone(&self) -> Self {
        HashMap { tree: self.tree.clone() }
    }
}

impl<K: Hash + Eq + Clone, V: Clone, MP: MemoryPolicy, const B: usize> Default for HashMap<K, V, MP, B> {
    fn default() -> Self {
        HashMap { tree: ChampTree::new() }
    }
}

impl<K: Hash + Eq + Clone, V: Clone, MP: MemoryPolicy, const B: usize> HashMap<K, V, MP, B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find(key).map(|e| &e.1)
    }

    /// Returns a copy with `key` mapped to `value`, overwriting any prior
    /// mapping for `key`.
    pub fn set(&self, key: K, value: V) -> Self {
        let mut tree = self.tree.clone();
        tree.set_mut(Entry(key, value));
        HashMap { tree }
    }

    /// Returns a copy with `key` mapped to `f(old)`, where `old` is the
    /// prior value for `key` or `None` if it was absent.
    pub fn update(&self, key: K, f: impl FnOnce(Option<&V>) -> V) -> Self {
        let mut tree = self.tree.clone();
        tree.update_mut(&key.clone(), |existing| {
            let value = f(existing.map(|e| &e.1));
            Entry(key.clone(), value)
        });
        HashMap { tree }
    }

    /// Returns a copy with `key` removed, if present.
    pub fn erase(&self, key: &K) -> Self {
        let mut tree = self.tree.clone();
        tree.erase_mut(key);
        HashMap { tree }
    }

    pub fn iter(&self) -> Iter<'_, K, V, MP, B> {
        Iter { inner: self.tree.iter() }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Starts a mutable, uniquely-owned editing session.
    pub fn transient(&self) -> HashMapTransient<K, V, MP, B> {
        HashMapTransient { state: TransientState::new(self.tree.clone()) }
    }
}

impl<K: Hash + Eq + Clone + fmt::Debug, V: Clone + fmt::Debug, MP: MemoryPolicy, const B: usize> fmt::Debug
    for HashMap<K, V, MP, B>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq + Clone, V: Clone + PartialEq, MP: MemoryPolicy, const B: usize> PartialEq for HashMap<K, V, MP, B> {
    fn eq(&self, other: &Self) -> bool {
        self.tree.tree_eq(&other.tree)
    }
}

impl<K: Hash + Eq + Clone, V: Clone + Eq, MP: MemoryPolicy, const B: usize> Eq for HashMap<K, V, MP, B> {}

impl<K: Hash + Eq + Clone, V: Clone, MP: MemoryPolicy, const B: usize> FromIterator<(K, V)> for HashMap<K, V, MP, B> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = ChampTree::new();
        for (k, v) in iter {
            tree.set_mut(Entry(k, v));
        }
        HashMap { tree }
    }
}

pub struct Iter<'a, K, V, MP: MemoryPolicy, const B: usize> {
    inner: crate::champ::ChampIter<'a, Entry<K, V>, MP, B>,
}

impl<'a, K, V, MP: MemoryPolicy, const B: usize> Iterator for Iter<'a, K, V, MP, B> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|e| (&e.0, &e.1))
    }
}

impl<'a, K: Hash + Eq + Clone, V: Clone, MP: MemoryPolicy, const B: usize> IntoIterator for &'a HashMap<K, V, MP, B> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, MP, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A mutable, uniquely-owned editing session over a [`HashMap`].
pub struct HashMapTransient<K, V, MP: MemoryPolicy = RcPolicy, const B: usize = 5> {
    state: TransientState<ChampTree<Entry<K, V>, MP, B>>,
}

impl<K: Hash + Eq + Clone, V: Clone, MP: MemoryPolicy, const B: usize> HashMapTransient<K, V, MP, B> {
    pub fn len(&self) -> usize {
        self.state.get().map(ChampTree::len).unwrap_or(0)
    }

    pub fn get(&self, key: &K) -> crate::error::Result<Option<&V>> {
        Ok(self.state.get()?.find(key).map(|e| &e.1))
    }

    pub fn set(&mut self, key: K, value: V) -> crate::error::Result<()> {
        self.state.get_mut()?.set_mut(Entry(key, value));
        Ok(())
    }

    pub fn erase(&mut self, key: &K) -> crate::error::Result<()> {
        self.state.get_mut()?.erase_mut(key);
        Ok(())
    }

    /// Ends the editing session, returning an immutable snapshot.
    pub fn persistent(&mut self) -> crate::error::Result<HashMap<K, V, MP, B>> {
        Ok(HashMap { tree: self.state.take()? })
    }
}
