#![doc = include_str!("../README.md")]

mod boxed;
mod bvec;
mod champ;
mod error;
mod hash;
mod hashmap;
mod hashset;
mod hashtable;
mod policy;
mod radix;
mod rrbvec;
mod transient;

pub use boxed::{PBox, PBoxTransient};
pub use bvec::{BVec, BVecTransient};
pub use champ::Keyed;
pub use error::{Error, Result};
pub use hashmap::{HashMap, HashMapTransient};
pub use hashset::{HashSet, HashSetTransient};
pub use hashtable::{HashTable, HashTableTransient};
pub use policy::{ArcPolicy, MemoryPolicy, RcPolicy};
pub use rrbvec::{RRBVec, RRBVecTransient};
