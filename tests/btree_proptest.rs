//! Property tests: random operation sequences checked against
//! `std::collections::BTreeMap` and the tree's own invariant checker.

use std::collections::BTreeMap;

use btree_index::BTree;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16, u32),
    Delete(i16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Narrow key range so deletes hit present keys often.
    prop_oneof![
        3 => (0i16..128, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0i16..128).prop_map(Op::Delete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_matches_reference_model(
        max_keys in 1usize..=7,
        ops in prop::collection::vec(op_strategy(), 0..400),
    ) {
        let mut tree = BTree::new(max_keys);
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let fresh = !model.contains_key(&key);
                    if fresh {
                        model.insert(key, value);
                    }
                    prop_assert_eq!(tree.insert(key, value), fresh);
                }
                Op::Delete(key) => {
                    prop_assert_eq!(tree.delete(&key).ok(), model.remove(&key));
                }
            }
            prop_assert!(tree.validate().is_ok(), "{:?}", tree.validate());
        }

        prop_assert_eq!(tree.len(), model.len());
        let keys: Vec<i16> = tree.keys().into_iter().copied().collect();
        let expected: Vec<i16> = model.keys().copied().collect();
        prop_assert_eq!(keys, expected);

        for key in 0i16..128 {
            prop_assert_eq!(tree.search(&key), model.get(&key));
        }
    }

    #[test]
    fn prop_insert_then_delete_all_empties(
        max_keys in 1usize..=8,
        keys in prop::collection::hash_set(any::<i32>(), 0..300),
    ) {
        let keys: Vec<i32> = keys.into_iter().collect();
        let mut tree = BTree::new(max_keys);
        for &key in &keys {
            prop_assert!(tree.insert(key, ()));
        }
        prop_assert!(tree.validate().is_ok());

        for key in &keys {
            prop_assert!(tree.delete(key).is_ok());
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.height(), 0);
    }

    #[test]
    fn prop_duplicate_insert_is_noop(
        max_keys in 2usize..=6,
        keys in prop::collection::vec(0u16..500, 1..200),
    ) {
        let mut tree = BTree::new(max_keys);
        for &key in &keys {
            tree.insert(key, u32::from(key));
        }
        let before = tree.dump();
        let stats = tree.stats();

        for &key in &keys {
            prop_assert!(!tree.insert(key, u32::MAX));
        }

        prop_assert_eq!(tree.dump(), before);
        prop_assert_eq!(tree.stats(), stats);
        for &key in &keys {
            prop_assert_eq!(tree.search(&key), Some(&u32::from(key)));
        }
    }

    #[test]
    fn prop_height_is_logarithmic(
        max_keys in 2usize..=8,
        count in 1usize..2000,
    ) {
        let mut tree = BTree::new(max_keys);
        for key in 0..count {
            tree.insert(key, ());
        }

        // Every non-root node has at least max_keys / 2 entries, so at
        // least max_keys / 2 + 1 children.
        let fanout = (max_keys / 2 + 1) as f64;
        let bound = ((count as f64 + 1.0).ln() / fanout.ln()).floor() as usize + 1;
        prop_assert!(tree.height() <= bound, "height {} > {}", tree.height(), bound);
    }
}
