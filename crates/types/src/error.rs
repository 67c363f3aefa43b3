use alloc::vec::Vec;

use crate::Hash;

/// Errors raised by tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A key was presented with the wrong byte length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// The key length the tree was instantiated with.
        expected: usize,
        /// The length of the key that was presented.
        actual: usize,
    },

    /// The queried or removed key is not present in the tree.
    #[error("key not found")]
    KeyNotFound {
        /// The key that was not found.
        key: Vec<u8>,
    },

    /// The traversal needed information that was pruned from the tree.
    #[error("tree is pruned at depth {depth} for operation {op}")]
    Pruned {
        /// The operation being attempted (`"get"`, `"set"`, `"remove"`, `"prove"`).
        op: &'static str,
        /// The depth at which a pruned node was encountered.
        depth: usize,
    },

    /// `merge` was attempted on trees with different root hashes.
    #[error("cannot merge trees with different root hashes")]
    HashMismatch {
        /// The root hash of the left-hand tree.
        left: Hash,
        /// The root hash of the right-hand tree.
        right: Hash,
    },
}
