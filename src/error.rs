//! Error kinds surfaced by mutating and indexing operations.

use std::fmt;

/// Recoverable failures produced by the container operations in this crate.
///
/// Mutating operations are all-or-nothing: on `Err`, the receiver's
/// container value is left observably unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `at`/`set`/`update`/`take`/`drop` called with an index beyond the
    /// container's current bounds.
    OutOfRange {
        /// The index that was requested.
        index: usize,
        /// The container's size at the time of the request.
        len: usize,
    },
    /// A construction would exceed the theoretical maximum size addressable
    /// by the tree's branching arithmetic. Unreachable in practice on a
    /// 64-bit target before `usize` itself would overflow.
    CapacityExceeded,
    /// A mutating call was made on a transient after `persistent()` had
    /// already converted it back into an immutable container.
    TransientMisuse,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for container of length {len}")
            }
            Error::CapacityExceeded => write!(f, "container capacity exceeded"),
            Error::TransientMisuse => {
                write!(f, "mutating operation on a transient after persistent() was called")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias used throughout the crate's public operations.
pub type Result<T> = std::result::Result<T, Error>;
