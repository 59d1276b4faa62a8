//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify bookkeeping and budget invariants of the in-memory
//! store under arbitrary operation sequences.

use proptest::prelude::*;

use crate::cache::{ImageKind, ImageStore};

// == Test Configuration ==
const TEST_MAX_BYTES: u64 = 4096;
const TEST_MAX_ENTRIES: usize = 32;

// == Strategies ==
/// Generates valid path-like cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9_-]{1,24}\\.webp",
        "humans/[a-z0-9]{1,16}\\.webp",
        "cats/[a-z0-9]{1,16}\\.webp",
    ]
}

/// Generates image payloads of assorted sizes, including empty
fn data_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

/// A sequence of store operations
#[derive(Debug, Clone)]
enum StoreOp {
    Insert { key: String, data: Vec<u8> },
    Lookup { key: String },
    Remove { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), data_strategy())
            .prop_map(|(key, data)| StoreOp::Insert { key, data }),
        key_strategy().prop_map(|key| StoreOp::Lookup { key }),
        key_strategy().prop_map(|key| StoreOp::Remove { key }),
    ]
}

fn apply(store: &mut ImageStore, op: StoreOp) {
    match op {
        StoreOp::Insert { key, data } => {
            let size = data.len() as u64;
            let kind = ImageKind::from_key(&key);
            let _ = store.insert(key, data, size, kind);
        }
        StoreOp::Lookup { key } => {
            let _ = store.lookup(&key);
        }
        StoreOp::Remove { key } => {
            let _ = store.remove(&key);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any operation sequence, the running size total equals the sum of
    // recorded entry sizes reported by the stats snapshot.
    #[test]
    fn prop_size_bookkeeping_consistent(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let mut store = ImageStore::new(TEST_MAX_BYTES, TEST_MAX_ENTRIES);

        for op in ops {
            apply(&mut store, op);
        }

        let stats = store.stats();
        prop_assert_eq!(stats.total_bytes, store.current_size());
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // For any operation sequence, the store never ends up over its byte
    // budget or entry ceiling.
    #[test]
    fn prop_budget_always_satisfied(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let mut store = ImageStore::new(TEST_MAX_BYTES, TEST_MAX_ENTRIES);

        for op in ops {
            apply(&mut store, op);
        }

        prop_assert!(store.current_size() <= TEST_MAX_BYTES);
        prop_assert!(store.len() <= TEST_MAX_ENTRIES);
    }

    // Inserting and then looking up a key (with a budget large enough that
    // the insert survives) returns the exact bytes stored.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), data in data_strategy()) {
        let mut store = ImageStore::new(TEST_MAX_BYTES, TEST_MAX_ENTRIES);

        let size = data.len() as u64;
        let evicted = store.insert(key.clone(), data.clone(), size, ImageKind::from_key(&key));
        prop_assert!(evicted.is_empty());

        let retrieved = store.lookup(&key);
        prop_assert_eq!(retrieved, Some(data));
    }

    // Overwriting a key leaves exactly one entry whose recorded size matches
    // the newer payload.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        first in data_strategy(),
        second in data_strategy(),
    ) {
        let mut store = ImageStore::new(TEST_MAX_BYTES, TEST_MAX_ENTRIES);

        let kind = ImageKind::from_key(&key);
        let _ = store.insert(key.clone(), first.clone(), first.len() as u64, kind);
        let _ = store.insert(key.clone(), second.clone(), second.len() as u64, kind);

        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.recorded_size(&key), Some(second.len() as u64));
        prop_assert_eq!(store.current_size(), second.len() as u64);
        prop_assert_eq!(store.lookup(&key), Some(second));
    }

    // Removing a key makes subsequent lookups miss and releases its bytes.
    #[test]
    fn prop_remove_releases_bytes(key in key_strategy(), data in data_strategy()) {
        let mut store = ImageStore::new(TEST_MAX_BYTES, TEST_MAX_ENTRIES);

        let size = data.len() as u64;
        let _ = store.insert(key.clone(), data, size, ImageKind::from_key(&key));
        store.remove(&key);

        prop_assert!(store.lookup(&key).is_none());
        prop_assert_eq!(store.current_size(), 0);
    }
}
