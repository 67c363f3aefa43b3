use alloc::sync::Arc;
use alloc::vec::Vec;

use mbrt_types::{Error, Key, TreeHasher};

use crate::node::Node;

/// Produces a tree with the same root hash as `node`, pruned so it retains only the information
/// needed to answer `contains` for every key in `keys`.
pub fn prove<const N: usize, H: TreeHasher>(
    node: &Arc<Node<N, H>>,
    keys: &[Key<N>],
    depth: usize,
) -> Result<Arc<Node<N, H>>, Error> {
    if keys.is_empty() {
        return Ok(prune_fully(node));
    }

    match &**node {
        Node::Empty(_) => Ok(Arc::clone(node)),

        Node::FullLeaf { key, .. } => {
            if keys.contains(key) {
                Ok(Arc::clone(node))
            } else {
                Ok(node.prune_leaf())
            }
        }

        Node::PrunedLeaf { .. } => Ok(Arc::clone(node)),

        Node::Inner { left, right, .. } => {
            let (left_keys, right_keys): (Vec<Key<N>>, Vec<Key<N>>) =
                keys.iter().copied().partition(|k| k.side(depth));

            let new_left = if left_keys.is_empty() {
                prune_fully(left)
            } else {
                prove(left, &left_keys, depth + 1)?
            };

            let new_right = if right_keys.is_empty() {
                prune_fully(right)
            } else {
                prove(right, &right_keys, depth + 1)?
            };

            if Arc::ptr_eq(&new_left, left) && Arc::ptr_eq(&new_right, right) {
                Ok(Arc::clone(node))
            } else {
                Ok(Node::inner(new_left, new_right))
            }
        }

        Node::PrunedInner { .. } => Err(Error::Pruned { op: "prove", depth }),
    }
}

/// Collapses a subtree to its most-pruned equivalent, leaving already-pruned or terminal nodes
/// untouched (by identity) so unaffected branches cost nothing to prove against.
fn prune_fully<const N: usize, H: TreeHasher>(node: &Arc<Node<N, H>>) -> Arc<Node<N, H>> {
    match &**node {
        Node::Empty(_) => Arc::clone(node),
        Node::FullLeaf { .. } => node.prune_leaf(),
        Node::PrunedLeaf { .. } => Arc::clone(node),
        Node::Inner { .. } => Node::pruned_inner(node.hash()),
        Node::PrunedInner { .. } => Arc::clone(node),
    }
}
