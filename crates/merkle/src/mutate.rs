use alloc::sync::Arc;
use alloc::vec::Vec;

use mbrt_types::{Error, Key, TreeHasher};

use crate::build::from_leaf_nodes;
use crate::node::Node;

/// A single requested change to a key, the shared primitive behind `put`, `put_value_hash`, and
/// `remove`.
pub(crate) enum Change<const N: usize, H: TreeHasher> {
    /// Replace (or insert) the key with the given leaf node.
    Put(Arc<Node<N, H>>),
    /// Delete the key; fails with `KeyNotFound` if it was not present.
    Remove,
}

/// Applies a batch of key changes, rebuilding the path from `node` down and re-normalizing with
/// the smart `Inner` constructor on the way back up.
///
/// All entries in `changes` are known to route to `node` at `depth`; the caller has already
/// split the batch by the bits above this level.
pub(crate) fn apply<const N: usize, H: TreeHasher>(
    node: &Arc<Node<N, H>>,
    depth: usize,
    changes: Vec<(Key<N>, Change<N, H>)>,
    op: &'static str,
) -> Result<Arc<Node<N, H>>, Error> {
    if changes.is_empty() {
        return Ok(Arc::clone(node));
    }

    match &**node {
        Node::Empty(_) => {
            let mut leaves = Vec::with_capacity(changes.len());

            for (key, change) in changes {
                match change {
                    Change::Put(leaf) => leaves.push(leaf),
                    Change::Remove => {
                        return Err(Error::KeyNotFound {
                            key: key.as_ref().to_vec(),
                        })
                    }
                }
            }

            Ok(from_leaf_nodes(leaves, depth))
        }

        Node::FullLeaf { key: own_key, .. } | Node::PrunedLeaf { key: own_key, .. } => {
            let own_key = *own_key;
            let mut leaves = Vec::with_capacity(changes.len() + 1);
            let mut own_replaced = false;

            for (key, change) in changes {
                if key == own_key {
                    own_replaced = true;

                    if let Change::Put(leaf) = change {
                        leaves.push(leaf);
                    }
                } else {
                    match change {
                        Change::Put(leaf) => leaves.push(leaf),
                        Change::Remove => {
                            return Err(Error::KeyNotFound {
                                key: key.as_ref().to_vec(),
                            })
                        }
                    }
                }
            }

            if !own_replaced {
                leaves.push(Arc::clone(node));
            }

            Ok(from_leaf_nodes(leaves, depth))
        }

        Node::Inner { left, right, .. } => {
            let mut left_changes = Vec::new();
            let mut right_changes = Vec::new();

            for (key, change) in changes {
                if key.side(depth) {
                    left_changes.push((key, change));
                } else {
                    right_changes.push((key, change));
                }
            }

            let new_left = apply(left, depth + 1, left_changes, op)?;
            let new_right = apply(right, depth + 1, right_changes, op)?;

            if Arc::ptr_eq(&new_left, left) && Arc::ptr_eq(&new_right, right) {
                Ok(Arc::clone(node))
            } else {
                Ok(Node::inner(new_left, new_right))
            }
        }

        Node::PrunedInner { .. } => Err(Error::Pruned { op, depth }),
    }
}

#[cfg(test)]
mod tests {
    use mbrt_types::Sha256Hasher;

    use super::*;
    use crate::build::from_items;

    fn key(b: u8) -> Key<4> {
        Key::from([b, 0, 0, 0])
    }

    #[test]
    fn put_into_empty_tree() {
        let root = Node::<4, Sha256Hasher>::empty();
        let leaf = Node::full_leaf(key(1), alloc::vec![7]);
        let changes = alloc::vec![(key(1), Change::Put(leaf))];

        let root = apply(&root, 0, changes, "set").unwrap();

        match &*root {
            Node::FullLeaf { value, .. } => assert_eq!(value, &alloc::vec![7]),
            _ => panic!("expected a full leaf"),
        }
    }

    #[test]
    fn remove_absent_key_fails() {
        let root = Node::<4, Sha256Hasher>::empty();
        let changes = alloc::vec![(key(1), Change::Remove)];

        assert!(matches!(
            apply(&root, 0, changes, "remove"),
            Err(Error::KeyNotFound { .. })
        ));
    }

    #[test]
    fn put_then_remove_restores_hash() {
        let root: Arc<Node<4, Sha256Hasher>> = from_items([]);
        let original_hash = root.hash();

        let leaf = Node::full_leaf(key(1), alloc::vec![1]);
        let root = apply(&root, 0, alloc::vec![(key(1), Change::Put(leaf))], "set").unwrap();
        let root = apply(&root, 0, alloc::vec![(key(1), Change::Remove)], "remove").unwrap();

        assert_eq!(root.hash(), original_hash);
    }

    #[test]
    fn unrelated_subtree_is_shared_by_identity() {
        let a = Node::full_leaf(key(0b1000_0000), alloc::vec![1]);
        let b = Node::full_leaf(key(0b0000_0000), alloc::vec![2]);
        let root = Node::inner(a, b);

        let left_before = match &*root {
            Node::Inner { left, .. } => Arc::clone(left),
            _ => panic!("expected inner node"),
        };

        let new_value = Node::full_leaf(key(0b0000_0000), alloc::vec![3]);
        let changes = alloc::vec![(key(0b0000_0000), Change::Put(new_value))];
        let root = apply(&root, 0, changes, "set").unwrap();

        let left_after = match &*root {
            Node::Inner { left, .. } => Arc::clone(left),
            _ => panic!("expected inner node"),
        };

        assert!(Arc::ptr_eq(&left_before, &left_after));
    }
}
