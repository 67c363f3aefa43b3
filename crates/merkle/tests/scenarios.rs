use mbrt_tree::Tree;
use mbrt_types::{Error, Key, Sha256Hasher, TreeHasher as _};
use proptest::collection;
use proptest::prelude::*;

type T = Tree<32, Sha256Hasher>;

fn key(seed: &[u8]) -> Key<32> {
    let mut bytes = [0u8; 32];
    let n = seed.len().min(32);

    bytes[..n].copy_from_slice(&seed[..n]);

    Key::from(bytes)
}

#[test]
fn s1_empty_tree() {
    let tree = T::empty();

    assert!(matches!(
        tree.get(&[0u8; 32]),
        Err(Error::KeyNotFound { .. })
    ));
    assert!(!tree.contains(&[0u8; 32]).unwrap());
}

#[test]
fn s2_single_put_get() {
    let tree = T::empty();
    let k = key(b"Two roads diverged in a wood");
    let tree = tree.put(k.as_ref(), b"and I took the one less traveled by".to_vec()).unwrap();

    assert_eq!(
        tree.get(k.as_ref()).unwrap(),
        b"and I took the one less traveled by".to_vec()
    );
    assert!(tree.contains(k.as_ref()).unwrap());
}

#[test]
fn s3_two_key_split() {
    // keys chosen so their first bit disagrees, forcing a single-level split at the root.
    let a = key(&[0b1000_0000]);
    let b = key(&[0b0000_0000]);

    let tree = T::from_items([(a, b"left".to_vec()), (b, b"right".to_vec())]);

    assert_eq!(tree.get(a.as_ref()).unwrap(), b"left".to_vec());
    assert_eq!(tree.get(b.as_ref()).unwrap(), b"right".to_vec());
}

#[test]
fn s4_eight_bit_deep_collision() {
    // a and b agree on every bit of the first byte and differ only in the second, forcing eight
    // levels of inner nodes before the tree can split them.
    //
    //        R
    //       / \
    //      _   o
    //         / \
    //        ... (6 more levels)
    //           / \
    //          a   b
    let a = key(&[0x00, 0x00]);
    let b = key(&[0x00, 0x80]);

    let tree = T::from_items([(a, b"a".to_vec()), (b, b"b".to_vec())]);

    assert_eq!(tree.get(a.as_ref()).unwrap(), b"a".to_vec());
    assert_eq!(tree.get(b.as_ref()).unwrap(), b"b".to_vec());
}

#[test]
fn s5_hash_is_canonical_under_permutation() {
    let a = key(b"Hope is the thing with feathers");
    let b = key(b"Shall I compare thee to a summer's day?");
    let c = key(b"And miles to go before I sleep.");

    let forward = T::from_items([
        (a, b"1".to_vec()),
        (b, b"2".to_vec()),
        (c, b"3".to_vec()),
    ]);

    let reverse = T::from_items([
        (c, b"3".to_vec()),
        (b, b"2".to_vec()),
        (a, b"1".to_vec()),
    ]);

    let via_put = T::empty()
        .put(b.as_ref(), b"2".to_vec())
        .unwrap()
        .put(a.as_ref(), b"1".to_vec())
        .unwrap()
        .put(c.as_ref(), b"3".to_vec())
        .unwrap();

    assert_eq!(forward.hash(), reverse.hash());
    assert_eq!(forward.hash(), via_put.hash());
}

#[test]
fn s6_proof_round_trip_with_shared_sibling() {
    let a = key(&[0b1000_0000]);
    let b = key(&[0b0000_0000]);

    let tree = T::from_items([(a, b"a".to_vec()), (b, b"b".to_vec())]);
    let proof = tree.prove_contains(&[a.as_ref()]).unwrap();

    assert_eq!(proof.hash(), tree.hash());
    assert_eq!(proof.get(a.as_ref()).unwrap(), b"a".to_vec());
    assert!(proof.contains(b.as_ref()).unwrap());
    assert!(matches!(proof.get(b.as_ref()), Err(Error::Pruned { .. })));
}

#[test]
fn s7_proof_of_absence() {
    let a = key(&[0b1000_0000]);
    let absent = key(&[0b1000_0001]);

    let tree = T::from_items([(a, b"a".to_vec())]);
    let proof = tree.prove_contains(&[absent.as_ref()]).unwrap();

    assert_eq!(proof.hash(), tree.hash());
    assert!(!proof.contains(absent.as_ref()).unwrap());
}

proptest! {
    #[test]
    fn s8_soak_matches_incremental_build(seeds in collection::vec(any::<u32>(), 1..200)) {
        let mut incremental = T::empty();
        let mut items = Vec::with_capacity(seeds.len());

        for seed in &seeds {
            let k = key(&seed.to_le_bytes());
            let value = Sha256Hasher::hash_value(&seed.to_le_bytes()).to_vec();

            incremental = incremental.put(k.as_ref(), value.clone()).unwrap();
            items.push((k, value));
        }

        let bulk = T::from_items(items.iter().cloned());

        prop_assert_eq!(incremental.hash(), bulk.hash());

        for (k, value) in &items {
            prop_assert_eq!(&incremental.get(k.as_ref()).unwrap(), value);
        }

        let mut removed = incremental.clone();
        let mut seen = alloc_seen(&items);

        for k in seen.drain(..) {
            removed = removed.remove(k.as_ref()).unwrap();
        }

        prop_assert_eq!(removed.hash(), T::empty().hash());
    }
}

fn alloc_seen(items: &[(Key<32>, Vec<u8>)]) -> Vec<Key<32>> {
    let mut seen = Vec::new();

    for (k, _) in items {
        if !seen.contains(k) {
            seen.push(*k);
        }
    }

    seen
}
