//! The CHAMP engine shared by `HashMap`, `HashSet`, and `HashTable`.
//!
//! Every mutating operation here is a path copy from the root down to the
//! affected slot, in the same shape as `radix`'s `tree_take`/`merge_trees`:
//! rather than `MemoryPolicy::make_mut`-ing through a live path, a fresh
//! branch is built bottom-up and spliced back in, because an insert or erase
//! can change a branch's slot composition (a data slot promoted to a child,
//! or the reverse) rather than just a single leaf's value — there is no
//! single "the node this index lives in" to mutate in place the way a radix
//! leaf is.

mod iter;
mod node;

pub(crate) use iter::ChampIter;
use node::{bit_for, compact_index, fragment, max_depth, BranchNode, CollisionNode, Node};

use crate::hash::hash_key;
use crate::policy::MemoryPolicy;

/// Projects an entry onto the key CHAMP hashes and compares by.
///
/// `HashMap<K, V>` and `HashSet<T>` supply this internally; `HashTable<T>`
/// requires the caller to implement it for `T` directly — exactly
/// `immer::table`'s "value keyed by a projected field" container
/// (`original_source/immer/table_transient.hpp`).
pub trait Keyed {
    type Key: std::hash::Hash + Eq;
    fn key(&self) -> &Self::Key;
}

pub(crate) struct ChampTree<E, MP: MemoryPolicy, const B: usize> {
    root: Option<Node<E, MP, B>>,
    len: usize,
}

impl<E, MP: MemoryPolicy, const B: usize> Clone for ChampTree<E, MP, B> {
    fn clone(&self) -> Self {
        ChampTree { root: self.root.clone(), len: self.len }
    }
}

impl<E: Keyed + Clone, MP: MemoryPolicy, const B: usize> ChampTree<E, MP, B> {
    pub(crate) fn new() -> Self {
        const { assert!(B >= 1 && B <= 6, "branching factor must fit a 64-bit bitmap") };
        ChampTree { root: None, len: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn find(&self, key: &E::Key) -> Option<&E> {
        let node = self.root.as_ref()?;
        find_rec::<E, MP, B>(node, hash_key(key), 0, key)
    }

    /// Inserts or overwrites the entry keyed by `entry.key()`. Returns
    /// `true` iff this was a new key (the container grew by one).
    pub(crate) fn set_mut(&mut self, entry: E) -> bool {
        let hash = hash_key(entry.key());
        match &self.root {
            None => {
                self.root = Some(single_entry_branch::<E, MP, B>(hash, 0, entry));
                self.len += 1;
                true
            }
            Some(node) => {
                let (new_node, inserted_new) = insert_rec::<E, MP, B>(node, hash, 0, entry);
                self.root = Some(new_node);
                if inserted_new {
                    self.len += 1;
                }
                inserted_new
            }
        }
    }

    /// Replaces the entry at `key` with `f(old)`, where `old` is `None` if
    /// the key was absent. `f`'s result must report the same key.
    pub(crate) fn update_mut(&mut self, key: &E::Key, f: impl FnOnce(Option<&E>) -> E) {
        let new_entry = {
            let existing = self.find(key);
            f(existing)
        };
        self.set_mut(new_entry);
    }

    /// Removes the entry at `key`, preserving canonical form (a branch left
    /// with exactly one entry and no children is inlined into its parent).
    /// Returns `true` iff a key was actually removed.
    pub(crate) fn erase_mut(&mut self, key: &E::Key) -> bool {
        let Some(node) = self.root.as_ref() else {
            return false;
        };
        let hash = hash_key(key);
        match erase_rec::<E, MP, B>(node, hash, 0, key) {
            None => false,
            Some(EraseOutcome::Gone) => {
                self.root = None;
                self.len -= 1;
                true
            }
            Some(EraseOutcome::Singleton(e)) => {
                self.root = Some(single_entry_branch::<E, MP, B>(hash_key(e.key()), 0, e));
                self.len -= 1;
                true
            }
            Some(EraseOutcome::Node(n)) => {
                self.root = Some(n);
                self.len -= 1;
                true
            }
        }
    }

    pub(crate) fn iter(&self) -> ChampIter<'_, E, MP, B> {
        ChampIter::new(self.root.as_ref())
    }
}

fn single_entry_branch<E, MP: MemoryPolicy, const B: usize>(hash: u64, depth: usize, entry: E) -> Node<E, MP, B> {
    let frag = fragment::<B>(hash, depth);
    Node::Branch(MP::new_ptr(BranchNode {
        datamap: bit_for::<B>(frag),
        nodemap: 0,
        content: vec![entry],
        children: Vec::new(),
    }))
}

fn find_rec<'a, E: Keyed, MP: MemoryPolicy, const B: usize>(
    node: &'a Node<E, MP, B>,
    hash: u64,
    depth: usize,
    key: &E::Key,
) -> Option<&'a E> {
    match node {
        Node::Collision(c) => c.entries.iter().find(|e| e.key() == key),
        Node::Branch(b) => {
            let bit = bit_for::<B>(fragment::<B>(hash, depth));
            if b.datamap & bit != 0 {
                let entry = &b.content[compact_index(b.datamap, bit)];
                (entry.key() == key).then_some(entry)
            } else if b.nodemap & bit != 0 {
                let child = &b.children[compact_index(b.nodemap, bit)];
                find_rec::<E, MP, B>(child, hash, depth + 1, key)
            } else {
                None
            }
        }
    }
}

/// Builds the subtree holding two entries that collided at `depth`, walking
/// deeper until their fragments diverge (an ordinary two-entry branch) or
/// hash bits are exhausted (a collision node, invariant 4).
fn build_two_entry_branch<E, MP: MemoryPolicy, const B: usize>(
    a: E,
    a_hash: u64,
    b: E,
    b_hash: u64,
    depth: usize,
) -> Node<E, MP, B> {
    if depth >= max_depth::<B>() {
        return Node::Collision(MP::new_ptr(CollisionNode { hash: a_hash, entries: vec![a, b] }));
    }
    let fa = fragment::<B>(a_hash, depth);
    let fb = fragment::<B>(b_hash, depth);
    if fa == fb {
        let child = build_two_entry_branch::<E, MP, B>(a, a_hash, b, b_hash, depth + 1);
        Node::Branch(MP::new_ptr(BranchNode {
            datamap: 0,
            nodemap: bit_for::<B>(fa),
            content: Vec::new(),
            children: vec![child],
        }))
    } else {
        let (lo_frag, lo_entry, hi_frag, hi_entry) = if fa < fb { (fa, a, fb, b) } else { (fb, b, fa, a) };
        Node::Branch(MP::new_ptr(BranchNode {
            datamap: bit_for::<B>(lo_frag) | bit_for::<B>(hi_frag),
            nodemap: 0,
            content: vec![lo_entry, hi_entry],
            children: Vec::new(),
        }))
    }
}

fn insert_rec<E: Keyed + Clone, MP: MemoryPolicy, const B: usize>(
    node: &Node<E, MP, B>,
    hash: u64,
    depth: usize,
    entry: E,
) -> (Node<E, MP, B>, bool) {
    match node {
        Node::Collision(c) => {
            let mut entries = c.entries.clone();
            match entries.iter().position(|e| e.key() == entry.key()) {
                Some(i) => {
                    entries[i] = entry;
                    (Node::Collision(MP::new_ptr(CollisionNode { hash: c.hash, entries })), false)
                }
                None => {
                    entries.push(entry);
                    (Node::Collision(MP::new_ptr(CollisionNode { hash: c.hash, entries })), true)
                }
            }
        }
        Node::Branch(b) => {
            let bit = bit_for::<B>(fragment::<B>(hash, depth));
            if b.datamap & bit != 0 {
                let idx = compact_index(b.datamap, bit);
                if b.content[idx].key() == entry.key() {
                    let mut content = b.content.clone();
                    content[idx] = entry;
                    let branch = BranchNode { datamap: b.datamap, nodemap: b.nodemap, content, children: b.children.clone() };
                    (Node::Branch(MP::new_ptr(branch)), false)
                } else {
                    let mut content = b.content.clone();
                    let existing = content.remove(idx);
                    let existing_hash = hash_key(existing.key());
                    let child = if depth + 1 >= max_depth::<B>() {
                        Node::Collision(MP::new_ptr(CollisionNode { hash, entries: vec![existing, entry] }))
                    } else {
                        build_two_entry_branch::<E, MP, B>(existing, existing_hash, entry, hash, depth + 1)
                    };
                    let new_nodemap = b.nodemap | bit;
                    let nidx = compact_index(new_nodemap, bit);
                    let mut children = b.children.clone();
                    children.insert(nidx, child);
                    let branch = BranchNode { datamap: b.datamap & !bit, nodemap: new_nodemap, content, children };
                    (Node::Branch(MP::new_ptr(branch)), true)
                }
            } else if b.nodemap & bit != 0 {
                let nidx = compact_index(b.nodemap, bit);
                let (new_child, inserted_new) = insert_rec::<E, MP, B>(&b.children[nidx], hash, depth + 1, entry);
                let mut children = b.children.clone();
                children[nidx] = new_child;
                let branch = BranchNode { datamap: b.datamap, nodemap: b.nodemap, content: b.content.clone(), children };
                (Node::Branch(MP::new_ptr(branch)), inserted_new)
            } else {
                let idx = compact_index(b.datamap, bit);
                let mut content = b.content.clone();
                content.insert(idx, entry);
                let branch = BranchNode { datamap: b.datamap | bit, nodemap: b.nodemap, content, children: b.children.clone() };
                (Node::Branch(MP::new_ptr(branch)), true)
            }
        }
    }
}

/// What erasing a key from a subtree leaves behind, reported to the parent
/// so it can preserve canonical form: a child subnode that would carry
/// exactly one value and no nodes is inlined into the parent's `datamap`
/// instead of kept as a one-entry child.
enum EraseOutcome<E, MP: MemoryPolicy, const B: usize> {
    /// The subtree is now empty.
    Gone,
    /// The subtree collapsed to exactly one entry; the parent should store
    /// it as an inline data slot rather than keep a child pointer.
    Singleton(E),
    /// The subtree remains a genuine multi-entry node.
    Node(Node<E, MP, B>),
}

fn erase_rec<E: Keyed + Clone, MP: MemoryPolicy, const B: usize>(
    node: &Node<E, MP, B>,
    hash: u64,
    depth: usize,
    key: &E::Key,
) -> Option<EraseOutcome<E, MP, B>> {
    match node {
        Node::Collision(c) => {
            let pos = c.entries.iter().position(|e| e.key() == key)?;
            let mut entries = c.entries.clone();
            entries.remove(pos);
            if entries.len() == 1 {
                Some(EraseOutcome::Singleton(entries.pop().expect("len checked above")))
            } else {
                Some(EraseOutcome::Node(Node::Collision(MP::new_ptr(CollisionNode { hash: c.hash, entries }))))
            }
        }
        Node::Branch(b) => {
            let bit = bit_for::<B>(fragment::<B>(hash, depth));
            if b.datamap & bit != 0 {
                let idx = compact_index(b.datamap, bit);
                if b.content[idx].key() != key {
                    return None;
                }
                let mut content = b.content.clone();
                content.remove(idx);
                let new_datamap = b.datamap & !bit;
                if content.is_empty() && b.children.is_empty() {
                    Some(EraseOutcome::Gone)
                } else if content.len() == 1 && b.children.is_empty() {
                    Some(EraseOutcome::Singleton(content.pop().expect("len checked above")))
                } else {
                    let branch = BranchNode { datamap: new_datamap, nodemap: b.nodemap, content, children: b.children.clone() };
                    Some(EraseOutcome::Node(Node::Branch(MP::new_ptr(branch))))
                }
            } else if b.nodemap & bit != 0 {
                let nidx = compact_index(b.nodemap, bit);
                let outcome = erase_rec::<E, MP, B>(&b.children[nidx], hash, depth + 1, key)?;
                Some(splice_child_erase::<E, MP, B>(b, bit, nidx, outcome))
            } else {
                None
            }
        }
    }
}

fn splice_child_erase<E: Clone, MP: MemoryPolicy, const B: usize>(
    b: &BranchNode<E, MP, B>,
    bit: u64,
    nidx: usize,
    outcome: EraseOutcome<E, MP, B>,
) -> EraseOutcome<E, MP, B> {
    match outcome {
        EraseOutcome::Gone => {
            let mut children = b.children.clone();
            children.remove(nidx);
            let new_nodemap = b.nodemap & !bit;
            if b.content.is_empty() && children.is_empty() {
                EraseOutcome::Gone
            } else if b.content.len() == 1 && children.is_empty() {
                EraseOutcome::Singleton(b.content[0].clone())
            } else {
                let branch = BranchNode { datamap: b.datamap, nodemap: new_nodemap, content: b.content.clone(), children };
                EraseOutcome::Node(Node::Branch(MP::new_ptr(branch)))
            }
        }
        EraseOutcome::Singleton(e) => {
            let mut children = b.children.clone();
            children.remove(nidx);
            let new_nodemap = b.nodemap & !bit;
            let new_datamap = b.datamap | bit;
            let didx = compact_index(new_datamap, bit);
            let mut content = b.content.clone();
            content.insert(didx, e);
            // The inlined entry may leave this branch itself down to exactly
            // one value and no children, which must bubble up the same way
            // the `Gone` arm above does, so canonicality holds at every
            // level rather than just the level directly above the erase.
            if content.len() == 1 && children.is_empty() {
                EraseOutcome::Singleton(content.pop().expect("len checked above"))
            } else {
                let branch = BranchNode { datamap: new_datamap, nodemap: new_nodemap, content, children };
                EraseOutcome::Node(Node::Branch(MP::new_ptr(branch)))
            }
        }
        EraseOutcome::Node(new_child) => {
            let mut children = b.children.clone();
            children[nidx] = new_child;
            let branch = BranchNode { datamap: b.datamap, nodemap: b.nodemap, content: b.content.clone(), children };
            EraseOutcome::Node(Node::Branch(MP::new_ptr(branch)))
        }
    }
}

impl<E: Keyed + Clone + PartialEq, MP: MemoryPolicy, const B: usize> ChampTree<E, MP, B> {
    /// Structural equality: same size and every element matches.
    pub(crate) fn tree_eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|e| other.find(e.key()) == Some(e))
    }
}
