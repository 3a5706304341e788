// Property tests shared by both hash map engines.
//
// Each property drives the maps through the `HashTable` trait and, where state matters,
// compares them with a `std::collections::HashMap` model:
//  - round-trip: every put key reads back its last value
//  - open addressing keeps its load factor below 0.5 after every put
//  - capacities stay prime through construction and resizing
//  - removing then re-inserting a key restores size and presence
//  - resizing keeps present keys present and absent keys absent
//  - clearing twice is the same as clearing once
use std::collections::HashMap;

use chainprobe::{
    ChainingMap, HashTable, MAX_LOAD_FACTOR, OpenAddressingMap, additive_hash, is_prime,
    positional_hash,
};
use proptest::prelude::*;

// Short keys over a small alphabet, so collisions and repeats are common.
fn key() -> impl Strategy<Value = String> {
    "[a-f]{1,3}"
}

fn check_against_model(
    table: &mut dyn HashTable<u32>,
    ops: &[(u8, String, u32)],
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, u32> = HashMap::new();

    for (op, key, value) in ops {
        match op % 4 {
            0 | 1 => {
                prop_assert_eq!(table.put(key, *value), model.insert(key.clone(), *value));
            }
            2 => {
                prop_assert_eq!(table.remove(key), model.remove(key).is_some());
            }
            _ => {
                prop_assert_eq!(table.get(key), model.get(key));
                prop_assert_eq!(table.contains_key(key), model.contains_key(key));
            }
        }
        prop_assert_eq!(table.size(), model.len());
        prop_assert!(is_prime(table.capacity()));
    }

    for (key, value) in &model {
        prop_assert_eq!(table.get(key), Some(value));
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_open_addressing_matches_model(
        capacity in 1usize..40,
        ops in prop::collection::vec((any::<u8>(), key(), any::<u32>()), 1..300),
    ) {
        let mut map = OpenAddressingMap::<u32, _>::with_hasher(capacity, additive_hash)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        check_against_model(&mut map, &ops)?;
    }

    #[test]
    fn prop_chaining_matches_model(
        capacity in 1usize..40,
        ops in prop::collection::vec((any::<u8>(), key(), any::<u32>()), 1..300),
    ) {
        let mut map = ChainingMap::<u32, _>::with_hasher(capacity, positional_hash)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        check_against_model(&mut map, &ops)?;
    }

    #[test]
    fn prop_round_trip(pairs in prop::collection::hash_map("[a-z0-9]{1,8}", any::<i64>(), 0..200)) {
        let mut open = OpenAddressingMap::default();
        let mut chained = ChainingMap::default();
        for (key, value) in &pairs {
            open.put(key.as_str(), *value);
            chained.put(key.as_str(), *value);
        }

        prop_assert_eq!(open.size(), pairs.len());
        prop_assert_eq!(chained.size(), pairs.len());
        for (key, value) in &pairs {
            prop_assert_eq!(open.get(key), Some(value));
            prop_assert_eq!(chained.get(key), Some(value));
            prop_assert!(open.contains_key(key));
            prop_assert!(chained.contains_key(key));
        }
    }

    #[test]
    fn prop_open_addressing_load_stays_below_limit(
        capacity in 1usize..100,
        keys in prop::collection::vec(key(), 0..300),
    ) {
        let mut map = OpenAddressingMap::new(capacity)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        for (index, key) in keys.iter().enumerate() {
            map.put(key.as_str(), index);
            prop_assert!(map.table_load() < MAX_LOAD_FACTOR);
            if index % 3 == 0 {
                map.remove(key);
            }
        }
    }

    #[test]
    fn prop_tombstone_transparency(
        keys in prop::collection::hash_set("[a-z]{1,4}", 1..60),
        pick in any::<prop::sample::Index>(),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let victim = pick.get(&keys);
        let mut map = OpenAddressingMap::with_hasher(7, additive_hash)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        for key in &keys {
            map.put(key.as_str(), key.len());
        }
        let size = map.size();

        prop_assert!(map.remove(victim));
        prop_assert!(!map.contains_key(victim));
        prop_assert_eq!(map.size(), size - 1);

        map.put(victim.as_str(), victim.len());
        prop_assert!(map.contains_key(victim));
        prop_assert_eq!(map.size(), size);
        for key in &keys {
            prop_assert_eq!(map.get(key), Some(&key.len()));
        }
    }

    #[test]
    fn prop_resize_preserves_contents(
        keys in prop::collection::hash_set("[a-z]{1,4}", 0..80),
        absent in prop::collection::vec("[A-Z]{1,4}", 0..20),
        targets in prop::collection::vec(0usize..300, 1..6),
    ) {
        let mut open = OpenAddressingMap::new(11)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let mut chained = ChainingMap::new(11)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        for key in &keys {
            open.put(key.as_str(), key.clone());
            chained.put(key.as_str(), key.clone());
        }

        for target in targets {
            open.resize_table(target);
            chained.resize_table(target);
            prop_assert!(is_prime(open.capacity()));
            prop_assert!(is_prime(chained.capacity()));
            prop_assert!(open.capacity() >= keys.len());
            if target >= 1 {
                prop_assert!(chained.capacity() >= target);
            }

            prop_assert_eq!(open.size(), keys.len());
            prop_assert_eq!(chained.size(), keys.len());
            for key in &keys {
                prop_assert_eq!(open.get(key), Some(key));
                prop_assert_eq!(chained.get(key), Some(key));
            }
            for key in &absent {
                prop_assert!(!open.contains_key(key));
                prop_assert!(!chained.contains_key(key));
            }
        }
    }

    #[test]
    fn prop_clear_is_idempotent(keys in prop::collection::vec(key(), 0..100)) {
        let mut open = OpenAddressingMap::default();
        let mut chained = ChainingMap::default();
        for key in &keys {
            open.put(key.as_str(), 1u8);
            chained.put(key.as_str(), 1u8);
        }
        let open_capacity = open.capacity();
        let chained_capacity = chained.capacity();

        open.clear();
        chained.clear();
        let once = (open.size(), open.empty_buckets(), chained.size(), chained.empty_buckets());
        open.clear();
        chained.clear();
        let twice = (open.size(), open.empty_buckets(), chained.size(), chained.empty_buckets());

        prop_assert_eq!(once, twice);
        prop_assert_eq!(once, (0, open_capacity, 0, chained_capacity));
        for key in &keys {
            prop_assert!(!open.contains_key(key));
            prop_assert!(!chained.contains_key(key));
        }
    }
}
