#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can run
// without exposing extra test hooks.

use crate::hashers::{additive_hash, weighted_hash};
use crate::ChainedHashMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Clear,
    Resize(usize),
    Keys,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Clear),
            // Includes 0 to exercise the silent resize guard.
            (0usize..=24).prop_map(OpI::Resize),
            Just(OpI::Keys),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Shared state-machine driver checked against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Round-trip: `put` then `get` observes the stored value; overwrite keeps
//   size stable.
// - `remove` returns the model's value and decrements size; absent keys
//   no-op.
// - `resize_table(0)` leaves capacity, size, and content untouched; any
//   positive target preserves every entry and sets capacity.
// - `keys` yields each live key exactly once.
// - After every op: len parity with the model, `table_load == len/capacity`,
//   and `empty_buckets + non-empty buckets == capacity`.
fn run_scenario<H: Fn(&str) -> u64>(
    hash_fn: H,
    capacity: usize,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut sut: ChainedHashMap<i32, H> =
        ChainedHashMap::new(capacity, hash_fn).expect("positive capacity");
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                let before = sut.len();
                let existed = model.contains_key(k);
                sut.put(k, v);
                model.insert(k.clone(), v);
                prop_assert_eq!(sut.get(k), Some(&v));
                prop_assert_eq!(sut.len(), if existed { before } else { before + 1 });
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let got = sut.remove(k);
                let expected = model.remove(k);
                prop_assert_eq!(got, expected);
                prop_assert!(!sut.contains_key(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match sut.get_mut(k) {
                    Some(v) => {
                        *v = v.saturating_add(d);
                        let mv = model.get_mut(k).expect("model in sync");
                        *mv = mv.saturating_add(d);
                    }
                    None => prop_assert!(!model.contains_key(k)),
                }
            }
            OpI::Clear => {
                let cap = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap);
                prop_assert_eq!(sut.empty_buckets(), cap);
            }
            OpI::Resize(c) => {
                let (cap, len) = (sut.capacity(), sut.len());
                sut.resize_table(c);
                if c == 0 {
                    prop_assert_eq!(sut.capacity(), cap);
                } else {
                    prop_assert_eq!(sut.capacity(), c);
                }
                prop_assert_eq!(sut.len(), len);
                // Content survives the rehash.
                for (k, v) in &model {
                    prop_assert_eq!(sut.get(k), Some(v));
                }
            }
            OpI::Keys => {
                let mut got: Vec<_> = sut.keys().map(str::to_owned).collect();
                let mut expected: Vec<_> = model.keys().cloned().collect();
                got.sort();
                expected.sort();
                prop_assert_eq!(got, expected);
            }
        }

        // Post-conditions after each op.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        let lambda = sut.len() as f64 / sut.capacity() as f64;
        prop_assert!((sut.table_load() - lambda).abs() < f64::EPSILON);
        let non_empty = sut.capacity() - sut.empty_buckets();
        prop_assert!(non_empty <= sut.len());
        prop_assert!(sut.empty_buckets() + non_empty == sut.capacity());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    // Property: state-machine equivalence under the position-weighted hash.
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), capacity in 1usize..=16) {
        run_scenario(weighted_hash, capacity, pool, ops)?;
    }

    // Property: same invariants under the anagram-colliding additive hash.
    #[test]
    fn prop_state_machine_additive((pool, ops) in arb_scenario(), capacity in 1usize..=16) {
        run_scenario(additive_hash, capacity, pool, ops)?;
    }

    // Property: same invariants under worst-case distribution (constant
    // hash): every entry shares one chain and correctness must hold with
    // lookups degrading to a linear scan.
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), capacity in 1usize..=16) {
        run_scenario(|_key: &str| 0, capacity, pool, ops)?;
    }
}
