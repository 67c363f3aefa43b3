use alloc::sync::Arc;
use alloc::vec::Vec;

use mbrt_types::{Hash, Key, TreeHasher};

/// A node in a merklized binary radix tree.
///
/// Every node is immutable once built and carries its own hash, computed eagerly at construction
/// time so that `Node` stays `Send + Sync` without interior mutability.
pub enum Node<const N: usize, H: TreeHasher> {
    /// Absence of any key below this point. There is conceptually a single such value per
    /// `(N, H)` instantiation; see [`Node::empty`].
    Empty(Hash),

    /// A present key with its value in hand.
    FullLeaf {
        /// The leaf's key.
        key: Key<N>,
        /// The leaf's value.
        value: Vec<u8>,
        /// The node's hash, `H(H(value) ‖ key ‖ TAG_LEAF)`.
        hash: Hash,
    },

    /// A present key whose value has been withheld; only its hash is retained.
    PrunedLeaf {
        /// The leaf's key.
        key: Key<N>,
        /// The hash of the withheld value.
        value_hash: Hash,
        /// The node's hash, `H(value_hash ‖ key ‖ TAG_LEAF)` — identical to the equivalent
        /// `FullLeaf`'s hash.
        hash: Hash,
    },

    /// A branch. `left` holds the subtree for bit `1`, `right` the subtree for bit `0`.
    Inner {
        /// The left subtree.
        left: Arc<Node<N, H>>,
        /// The right subtree.
        right: Arc<Node<N, H>>,
        /// The node's hash, `H(left.hash ‖ right.hash ‖ TAG_INNER)`.
        hash: Hash,
    },

    /// An opaque placeholder standing in for a subtree whose hash is known but whose contents
    /// were pruned.
    PrunedInner {
        /// The hash of the subtree this node replaces.
        hash: Hash,
    },
}

impl<const N: usize, H: TreeHasher> Node<N, H> {
    /// Returns the node's hash.
    pub fn hash(&self) -> Hash {
        match self {
            Node::Empty(hash) => *hash,
            Node::FullLeaf { hash, .. } => *hash,
            Node::PrunedLeaf { hash, .. } => *hash,
            Node::Inner { hash, .. } => *hash,
            Node::PrunedInner { hash } => *hash,
        }
    }

    /// Returns `true` if this node is a leaf variant (`FullLeaf` or `PrunedLeaf`).
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::FullLeaf { .. } | Node::PrunedLeaf { .. })
    }

    /// Returns the key carried by a leaf variant, if any.
    pub fn leaf_key(&self) -> Option<&Key<N>> {
        match self {
            Node::FullLeaf { key, .. } | Node::PrunedLeaf { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Returns the exact byte layout hashed to produce this node's hash (see the per-variant
    /// formulas this type's construction enforces). Exposed so a collaborator can serialize a
    /// node without reaching into private fields.
    pub fn preimage(&self) -> Vec<u8> {
        match self {
            Node::Empty(_) => alloc::vec![mbrt_types::TAG_EMPTY],
            Node::Inner { left, right, .. } => {
                let mut buf = Vec::with_capacity(2 * mbrt_types::HASH_LEN + 1);
                buf.extend_from_slice(&left.hash());
                buf.extend_from_slice(&right.hash());
                buf.push(mbrt_types::TAG_INNER);
                buf
            }
            Node::FullLeaf { key, value, .. } => {
                let value_hash = H::hash_value(value);
                let mut buf = Vec::with_capacity(mbrt_types::HASH_LEN + N + 1);
                buf.extend_from_slice(&value_hash);
                buf.extend_from_slice(key.as_ref());
                buf.push(mbrt_types::TAG_LEAF);
                buf
            }
            Node::PrunedLeaf {
                key, value_hash, ..
            } => {
                let mut buf = Vec::with_capacity(mbrt_types::HASH_LEN + N + 1);
                buf.extend_from_slice(value_hash);
                buf.extend_from_slice(key.as_ref());
                buf.push(mbrt_types::TAG_LEAF);
                buf
            }
            Node::PrunedInner { hash } => hash.to_vec(),
        }
    }

    /// Builds the empty node.
    ///
    /// Every call produces a fresh allocation, but all `Empty` nodes for a given `(N, H)` are
    /// hash-identical and interchangeable per the tree's singleton-empty invariant; callers
    /// should not rely on pointer identity between two calls to this function.
    pub fn empty() -> Arc<Node<N, H>> {
        Arc::new(Node::Empty(H::hash_empty()))
    }

    /// Builds a `FullLeaf` node.
    pub fn full_leaf(key: Key<N>, value: Vec<u8>) -> Arc<Node<N, H>> {
        let value_hash = H::hash_value(&value);
        let hash = H::hash_leaf(key.as_ref(), &value_hash);

        Arc::new(Node::FullLeaf { key, value, hash })
    }

    /// Builds a `PrunedLeaf` node from a key and a value hash.
    pub fn pruned_leaf(key: Key<N>, value_hash: Hash) -> Arc<Node<N, H>> {
        let hash = H::hash_leaf(key.as_ref(), &value_hash);

        Arc::new(Node::PrunedLeaf {
            key,
            value_hash,
            hash,
        })
    }

    /// Derives the `PrunedLeaf` equivalent of a `FullLeaf`, preserving its hash.
    pub fn prune_leaf(&self) -> Arc<Node<N, H>> {
        match self {
            Node::FullLeaf { key, value, hash } => Arc::new(Node::PrunedLeaf {
                key: *key,
                value_hash: H::hash_value(value),
                hash: *hash,
            }),
            Node::PrunedLeaf { .. } => {
                unreachable!("prune_leaf called on an already-pruned leaf")
            }
            _ => unreachable!("prune_leaf called on a non-leaf node"),
        }
    }

    /// Builds a `PrunedInner` node standing in for a subtree of the given hash.
    pub fn pruned_inner(hash: Hash) -> Arc<Node<N, H>> {
        Arc::new(Node::PrunedInner { hash })
    }

    /// The smart `Inner` constructor: enforces compactness by collapsing any combination
    /// involving an `Empty` child.
    pub fn inner(left: Arc<Node<N, H>>, right: Arc<Node<N, H>>) -> Arc<Node<N, H>> {
        match (&*left, &*right) {
            (Node::Empty(_), Node::Empty(_)) => Node::empty(),
            (Node::Empty(_), _) => right,
            (_, Node::Empty(_)) => left,
            _ => {
                let hash = H::hash_inner(&left.hash(), &right.hash());
                Arc::new(Node::Inner { left, right, hash })
            }
        }
    }
}
