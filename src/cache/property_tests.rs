//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the cache's behavioral guarantees over generated
//! operation sequences.

use proptest::prelude::*;

use crate::cache::MemoryCache;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_TTL_MS: u64 = 300_000;

// == Strategies ==
/// Generates valid cache keys
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,64}"
}

/// Generates cache values
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,256}"
}

/// A single cache operation for sequence testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* valid key-value pair, storing the pair and then retrieving it
    // (before expiration) returns the exact value that was stored.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut store = MemoryCache::new(TEST_MAX_ENTRIES, TEST_TTL_MS);

        store.set(key.clone(), value.clone(), None);

        prop_assert_eq!(store.get(&key), Some(value), "Round-trip value mismatch");
    }

    // *For any* key, storing V1 then V2 under the same key results in GET
    // returning V2, with no change in entry count.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in valid_value_strategy(),
        value2 in valid_value_strategy()
    ) {
        let mut store = MemoryCache::new(TEST_MAX_ENTRIES, TEST_TTL_MS);

        store.set(key.clone(), value1, None);
        store.set(key.clone(), value2.clone(), None);

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // *For any* key present in the cache, a DELETE followed by a GET reports
    // the key absent.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut store = MemoryCache::new(TEST_MAX_ENTRIES, TEST_TTL_MS);

        store.set(key.clone(), value, None);
        prop_assert!(store.has(&key), "Key should exist before delete");

        prop_assert!(store.delete(&key));
        prop_assert_eq!(store.get(&key), None, "Key should not exist after delete");
    }

    // *For any* sequence of insertions, the entry count never exceeds the
    // configured maximum.
    #[test]
    fn prop_capacity_never_exceeded(
        max in 1usize..20,
        ops in prop::collection::vec((valid_key_strategy(), valid_value_strategy()), 1..200)
    ) {
        let mut store = MemoryCache::new(max, TEST_TTL_MS);

        for (key, value) in ops {
            store.set(key, value, None);
            prop_assert!(store.len() <= max, "Capacity invariant violated");
        }
    }

    // *For any* capacity N, inserting N+1 distinct keys evicts exactly the
    // first-inserted key; all later keys remain retrievable.
    #[test]
    fn prop_fifo_evicts_earliest_insertion(max in 1usize..20) {
        let mut store = MemoryCache::new(max, TEST_TTL_MS);

        for i in 0..=max {
            store.set(format!("key{}", i), i, None);
        }

        prop_assert_eq!(store.get("key0"), None, "Earliest key should be evicted");
        for i in 1..=max {
            prop_assert_eq!(store.get(&format!("key{}", i)), Some(i));
        }
        prop_assert_eq!(store.stats().evictions, 1);
    }

    // *For any* sequence of cache operations, the hit and miss counters
    // reflect exactly the GET outcomes that occurred.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = MemoryCache::new(TEST_MAX_ENTRIES, TEST_TTL_MS);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key, value, None);
                }
                CacheOp::Get { key } => {
                    match store.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }
}
