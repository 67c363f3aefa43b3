/// The hash output byte-length used throughout the tree.
pub const HASH_LEN: usize = 32;

/// The hash output array produced by a [`TreeHasher`].
pub type Hash = [u8; HASH_LEN];

/// Domain tag appended to the preimage of an empty node.
pub const TAG_EMPTY: u8 = 0x00;

/// Domain tag appended to the preimage of an inner node.
pub const TAG_INNER: u8 = 0x01;

/// Domain tag appended to the preimage of a leaf node.
pub const TAG_LEAF: u8 = 0x02;

/// A deterministic, fixed-output hash primitive for the tree.
///
/// Implementors provide only [`TreeHasher::digest`]; the node-hash formulas are derived from it,
/// so every backend gets domain separation between node variants for free and cannot omit the
/// tag byte by accident.
pub trait TreeHasher: Clone {
    /// Consumes the provided iterator, hashing the concatenation of its elements.
    fn digest<'a>(data: impl IntoIterator<Item = &'a [u8]>) -> Hash;

    /// Hash of the singleton empty node.
    fn hash_empty() -> Hash {
        Self::digest([&[TAG_EMPTY][..]])
    }

    /// Hash of an inner node from its children's hashes.
    fn hash_inner(left: &Hash, right: &Hash) -> Hash {
        Self::digest([&left[..], &right[..], &[TAG_INNER][..]])
    }

    /// Hash of a leaf node from its key and the hash of its value.
    ///
    /// Shared by `FullLeaf` and `PrunedLeaf`, which are hash-equivalent.
    fn hash_leaf(key: &[u8], value_hash: &Hash) -> Hash {
        Self::digest([&value_hash[..], key, &[TAG_LEAF][..]])
    }

    /// Hash of a value. Carries no domain tag, matching the reference implementation, which
    /// hashes values with the bare hash function.
    fn hash_value(value: &[u8]) -> Hash {
        Self::digest([value])
    }
}

/// A [`TreeHasher`] backed by BLAKE3.
#[cfg(feature = "blake3")]
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3Hasher;

#[cfg(feature = "blake3")]
impl TreeHasher for Blake3Hasher {
    fn digest<'a>(data: impl IntoIterator<Item = &'a [u8]>) -> Hash {
        let mut h = ::blake3::Hasher::new();

        data.into_iter().for_each(|d| {
            h.update(d);
        });

        h.finalize().into()
    }
}

/// A [`TreeHasher`] backed by SHA-256, matching the original reference implementation's choice
/// of primitive.
#[cfg(feature = "sha2")]
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Hasher;

#[cfg(feature = "sha2")]
impl TreeHasher for Sha256Hasher {
    fn digest<'a>(data: impl IntoIterator<Item = &'a [u8]>) -> Hash {
        use sha2::Digest as _;

        let mut h = ::sha2::Sha256::new();

        data.into_iter().for_each(|d| {
            h.update(d);
        });

        let out = h.finalize();
        let mut hash = Hash::default();

        hash.copy_from_slice(out.as_slice());
        hash
    }
}
