use alloc::sync::Arc;
use alloc::vec::Vec;

use mbrt_types::{Key, TreeHasher};

use crate::node::Node;

/// Builds a canonical tree from a set of (key, value) pairs.
///
/// Duplicate keys resolve last-wins: if the same key appears more than once, the value from its
/// last occurrence in `items` is kept.
pub fn from_items<const N: usize, H: TreeHasher>(
    items: impl IntoIterator<Item = (Key<N>, Vec<u8>)>,
) -> Arc<Node<N, H>> {
    let mut pairs: Vec<(Key<N>, Vec<u8>)> = items.into_iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut deduped: Vec<(Key<N>, Vec<u8>)> = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match deduped.last_mut() {
            Some(last) if last.0 == pair.0 => *last = pair,
            _ => deduped.push(pair),
        }
    }

    let leaves = deduped
        .into_iter()
        .map(|(key, value)| Node::full_leaf(key, value))
        .collect();

    from_leaf_nodes(leaves, 0)
}

/// Recursively partitions a set of leaf nodes by bit side at `depth`, combining via the smart
/// `Inner` constructor so the result is always canonical.
pub(crate) fn from_leaf_nodes<const N: usize, H: TreeHasher>(
    leaves: Vec<Arc<Node<N, H>>>,
    depth: usize,
) -> Arc<Node<N, H>> {
    match leaves.len() {
        0 => Node::empty(),
        1 => leaves.into_iter().next().expect("checked len == 1"),
        _ => {
            let mut left = Vec::new();
            let mut right = Vec::new();

            for leaf in leaves {
                let side = leaf
                    .leaf_key()
                    .expect("from_leaf_nodes only accepts leaf nodes")
                    .side(depth);

                if side {
                    left.push(leaf);
                } else {
                    right.push(leaf);
                }
            }

            let left = from_leaf_nodes(left, depth + 1);
            let right = from_leaf_nodes(right, depth + 1);

            Node::inner(left, right)
        }
    }
}
