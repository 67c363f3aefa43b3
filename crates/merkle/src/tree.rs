use alloc::sync::Arc;
use alloc::vec::Vec;

use mbrt_types::{Error, Hash, Key, TreeHasher};

use crate::build;
use crate::iter::Items;
use crate::merge;
use crate::mutate::{self, Change};
use crate::node::Node;
use crate::prove;
use crate::query;

/// An immutable, content-addressed, canonical-shape associative map.
///
/// `N` is the fixed key width in bytes; `H` supplies the hash primitive. Every operation returns
/// a new `Tree` that shares unmodified subtrees with the one it was derived from.
#[derive(Clone)]
pub struct Tree<const N: usize, H: TreeHasher> {
    root: Arc<Node<N, H>>,
}

impl<const N: usize, H: TreeHasher> Tree<N, H> {
    /// The empty tree.
    pub fn empty() -> Self {
        Self { root: Node::empty() }
    }

    /// Builds a canonical tree from a set of (key, value) pairs. Duplicate keys resolve
    /// last-wins.
    pub fn from_items(items: impl IntoIterator<Item = (Key<N>, Vec<u8>)>) -> Self {
        Self {
            root: build::from_items(items),
        }
    }

    /// The tree's root hash.
    pub fn hash(&self) -> Hash {
        self.root.hash()
    }

    /// Looks up `key`'s value.
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>, Error> {
        let key = Key::<N>::try_from(key)?;

        query::get(&self.root, &key, 0)
    }

    /// Reports whether `key` is present.
    pub fn contains(&self, key: &[u8]) -> Result<bool, Error> {
        let key = Key::<N>::try_from(key)?;

        query::contains(&self.root, &key, 0)
    }

    /// Inserts or replaces `key` with `value`.
    #[tracing::instrument(level = "trace", skip(self, value))]
    pub fn put(&self, key: &[u8], value: Vec<u8>) -> Result<Self, Error> {
        let key = Key::<N>::try_from(key)?;
        let leaf = Node::full_leaf(key, value);
        let root = mutate::apply(&self.root, 0, alloc::vec![(key, Change::Put(leaf))], "set")?;

        tracing::trace!(hash = %hex::encode(root.hash()), "put applied");

        Ok(Self { root })
    }

    /// Inserts or replaces `key` with a withheld value, retaining only its hash.
    ///
    /// The resulting tree answers `contains(key)` with `true` and `get(key)` with `Pruned`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn put_value_hash(&self, key: &[u8], value_hash: Hash) -> Result<Self, Error> {
        let key = Key::<N>::try_from(key)?;
        let leaf = Node::pruned_leaf(key, value_hash);
        let root = mutate::apply(&self.root, 0, alloc::vec![(key, Change::Put(leaf))], "set")?;

        Ok(Self { root })
    }

    /// Removes `key`. Fails with `KeyNotFound` if it was not present.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn remove(&self, key: &[u8]) -> Result<Self, Error> {
        let key = Key::<N>::try_from(key)?;
        let root = mutate::apply(&self.root, 0, alloc::vec![(key, Change::Remove)], "remove")?;

        tracing::trace!(hash = %hex::encode(root.hash()), "remove applied");

        Ok(Self { root })
    }

    /// Produces a tree with the same root hash, pruned so it retains only the information
    /// needed to answer `contains` for every key in `keys`.
    #[tracing::instrument(level = "trace", skip(self, keys))]
    pub fn prove_contains(&self, keys: &[&[u8]]) -> Result<Self, Error> {
        let keys = keys
            .iter()
            .map(|k| Key::<N>::try_from(*k))
            .collect::<Result<Vec<_>, _>>()?;

        let root = prove::prove(&self.root, &keys, 0)?;

        Ok(Self { root })
    }

    /// Combines two pruned views of the same tree (same root hash) into the richer of the two.
    #[tracing::instrument(level = "trace", skip(self, other))]
    pub fn merge(&self, other: &Self) -> Result<Self, Error> {
        let root = merge::merge(&self.root, &other.root)?;

        Ok(Self { root })
    }

    /// Iterates over every (key, value) pair reachable in the tree. A withheld value is
    /// represented as `None`. Pruned subtrees contribute nothing.
    pub fn items(&self) -> impl Iterator<Item = (&[u8], Option<&[u8]>)> {
        Items::new(&self.root).map(|(key, value)| (key.as_ref(), value))
    }

    /// Iterates over every key reachable in the tree.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        Items::new(&self.root).map(|(key, _)| key.as_ref())
    }

    /// Iterates over the values of every `FullLeaf` reachable in the tree, skipping keys whose
    /// value has been withheld.
    pub fn values(&self) -> impl Iterator<Item = &[u8]> {
        Items::new(&self.root).filter_map(|(_, value)| value)
    }
}

impl<const N: usize, H: TreeHasher> Default for Tree<N, H> {
    fn default() -> Self {
        Self::empty()
    }
}
