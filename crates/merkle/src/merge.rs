use alloc::sync::Arc;

use mbrt_types::{Error, TreeHasher};

use crate::node::Node;

/// Combines two pruned views of the same tree (same root hash) into the richer of the two at
/// every point where they disagree on how much information to retain.
pub fn merge<const N: usize, H: TreeHasher>(
    a: &Arc<Node<N, H>>,
    b: &Arc<Node<N, H>>,
) -> Result<Arc<Node<N, H>>, Error> {
    let (ha, hb) = (a.hash(), b.hash());

    if ha != hb {
        return Err(Error::HashMismatch {
            left: ha,
            right: hb,
        });
    }

    if Arc::ptr_eq(a, b) {
        return Ok(Arc::clone(a));
    }

    match (&**a, &**b) {
        (Node::Inner { left: al, right: ar, .. }, Node::Inner { left: bl, right: br, .. }) => {
            let left = merge(al, bl)?;
            let right = merge(ar, br)?;

            Ok(Node::inner(left, right))
        }

        (Node::Inner { .. }, Node::PrunedInner { .. }) => Ok(Arc::clone(a)),
        (Node::PrunedInner { .. }, Node::Inner { .. }) => Ok(Arc::clone(b)),

        (Node::FullLeaf { .. }, _) => Ok(Arc::clone(a)),
        (_, Node::FullLeaf { .. }) => Ok(Arc::clone(b)),

        (Node::PrunedLeaf { .. }, Node::PrunedLeaf { .. }) => Ok(Arc::clone(a)),
        (Node::PrunedInner { .. }, Node::PrunedInner { .. }) => Ok(Arc::clone(a)),
        (Node::Empty(_), Node::Empty(_)) => Ok(Arc::clone(a)),

        _ => unreachable!("nodes with equal hash must share shape modulo pruning"),
    }
}
