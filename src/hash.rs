//! Seeded hashing for the CHAMP engine.
//!
//! The SipHash key is drawn from the system RNG once per process, the first
//! time any hash-trie container computes a digest, so that adversarial
//! inputs can't pin the tree's shape in advance. The key lives behind a
//! [`std::sync::OnceLock`], keeping the module free of `unsafe`.
//!
//! Hash quality is otherwise unenforced; a degenerate `Hash` impl degrades
//! performance, never correctness.

use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::OnceLock;

use siphasher::sip::SipHasher13;

fn seed() -> (u64, u64) {
    static SEED: OnceLock<(u64, u64)> = OnceLock::new();
    *SEED.get_or_init(|| {
        use rand::RngCore;
        let mut rng = rand::thread_rng();
        (rng.next_u64(), rng.next_u64())
    })
}

/// A [`BuildHasher`] seeded once per process with process-local entropy.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RandomSipState;

impl BuildHasher for RandomSipState {
    type Hasher = SipHasher13;

    fn build_hasher(&self) -> SipHasher13 {
        let (k0, k1) = seed();
        SipHasher13::new_with_keys(k0, k1)
    }
}

/// Hashes `key` with the process-seeded SipHash, returning the 64-bit digest
/// the CHAMP engine consumes `B` bits at a time.
pub(crate) fn hash_key<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = RandomSipState.build_hasher();
    key.hash(&mut hasher);
    hasher.finish()
}
