use alloc::vec::Vec;

use mbrt_types::{Error, Key, TreeHasher};

use crate::node::Node;

/// Looks up a key, descending the tree bit by bit from `depth`.
pub fn get<const N: usize, H: TreeHasher>(
    node: &Node<N, H>,
    key: &Key<N>,
    depth: usize,
) -> Result<Vec<u8>, Error> {
    match node {
        Node::Empty(_) => Err(not_found(key)),

        Node::FullLeaf { key: k, value, .. } => {
            if k == key {
                Ok(value.clone())
            } else {
                Err(not_found(key))
            }
        }

        Node::PrunedLeaf { key: k, .. } => {
            if k == key {
                Err(Error::Pruned { op: "get", depth })
            } else {
                Err(not_found(key))
            }
        }

        Node::Inner { left, right, .. } => {
            if key.side(depth) {
                get(left, key, depth + 1)
            } else {
                get(right, key, depth + 1)
            }
        }

        Node::PrunedInner { .. } => Err(Error::Pruned { op: "get", depth }),
    }
}

/// Reports whether a key is present, without requiring its value.
///
/// A `PrunedLeaf` matching the key counts as present (unlike `get`, which cannot retrieve its
/// withheld value and so fails with `Pruned`).
pub fn contains<const N: usize, H: TreeHasher>(
    node: &Node<N, H>,
    key: &Key<N>,
    depth: usize,
) -> Result<bool, Error> {
    match node {
        Node::Empty(_) => Ok(false),

        Node::FullLeaf { key: k, .. } | Node::PrunedLeaf { key: k, .. } => Ok(k == key),

        Node::Inner { left, right, .. } => {
            if key.side(depth) {
                contains(left, key, depth + 1)
            } else {
                contains(right, key, depth + 1)
            }
        }

        Node::PrunedInner { .. } => Err(Error::Pruned { op: "contains", depth }),
    }
}

fn not_found<const N: usize>(key: &Key<N>) -> Error {
    Error::KeyNotFound {
        key: key.as_ref().to_vec(),
    }
}
