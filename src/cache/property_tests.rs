//! Property-Based Tests for the Cache and Middleware
//!
//! Uses proptest; async calls run through `tokio_test::block_on`.

use proptest::prelude::*;

use crate::cache::{ScalarCache, STORE_OPERATION};
use crate::history::{call_count, replay};
use crate::middleware::{operation_fn, wrap_with_instrumentation, HistoryText, Operation};
use crate::store::{KeyValueStore, MemoryStore};
use crate::value::{StoredValue, ValueKind};

// == Strategies ==
/// Generates any scalar value
fn stored_value_strategy() -> impl Strategy<Value = StoredValue> {
    prop_oneof![
        ".{0,64}".prop_map(StoredValue::Text),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(StoredValue::Bytes),
        any::<i64>().prop_map(StoredValue::Integer),
        any::<f64>()
            .prop_filter("finite", |x| x.is_finite())
            .prop_map(StoredValue::Float),
    ]
}

/// Generates call arguments for a text operation
fn argument_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 '\\\\]{0,16}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Round-trip: reading a stored value back with its own kind yields the same value
    #[test]
    fn prop_roundtrip_storage(value in stored_value_strategy()) {
        let cache = ScalarCache::new(MemoryStore::new());
        let read = tokio_test::block_on(async {
            let key = cache.store(value.clone()).await.unwrap();
            cache.get_value(&key, value.kind()).await.unwrap()
        });
        prop_assert_eq!(read, Some(value));
    }

    // Keys that were never stored read as absent
    #[test]
    fn prop_unknown_keys_are_absent(key in "[a-z0-9-]{1,40}") {
        let cache = ScalarCache::new(MemoryStore::new());
        let read = tokio_test::block_on(cache.get_value(&key, ValueKind::Text)).unwrap();
        prop_assert_eq!(read, None);
    }

    // n sequential calls: counter is n, both logs hold n entries matching the calls
    #[test]
    fn prop_instrumentation_counts_and_logs(args in prop::collection::vec(argument_strategy(), 0..20)) {
        let store = MemoryStore::new();
        let op = wrap_with_instrumentation(
            operation_fn(|s: String| async move { Ok(s.len() as i64) }),
            "len",
            store.clone(),
        );

        let (count, records, inputs, outputs) = tokio_test::block_on(async {
            for arg in &args {
                op.call(arg.clone()).await.unwrap();
            }
            (
                call_count(&store, "len").await.unwrap(),
                replay(&store, "len").await.unwrap(),
                store.read_list_range("len:inputs", 0, -1).await.unwrap(),
                store.read_list_range("len:outputs", 0, -1).await.unwrap(),
            )
        });

        prop_assert_eq!(count, args.len() as u64);
        prop_assert_eq!(inputs.len(), args.len());
        prop_assert_eq!(outputs.len(), args.len());
        prop_assert_eq!(records.len(), args.len());
        for (record, arg) in records.iter().zip(&args) {
            prop_assert_eq!(&record.input, &format!("({},)", arg.repr()));
            prop_assert_eq!(&record.output, &arg.len().to_string());
        }
    }

    // The instrumented store logs each value's representation in call order
    #[test]
    fn prop_instrumented_store_logs_in_order(values in prop::collection::vec(stored_value_strategy(), 1..10)) {
        let cache = ScalarCache::new(MemoryStore::new());
        let store_op = cache.instrumented_store();

        let (keys, records, count) = tokio_test::block_on(async {
            let mut keys = Vec::new();
            for value in &values {
                keys.push(store_op.call(value.clone()).await.unwrap());
            }
            (
                keys,
                replay(cache.store_handle(), STORE_OPERATION).await.unwrap(),
                call_count(cache.store_handle(), STORE_OPERATION).await.unwrap(),
            )
        });

        prop_assert_eq!(count, values.len() as u64);
        for ((record, value), key) in records.iter().zip(&values).zip(&keys) {
            prop_assert_eq!(&record.input, &format!("({},)", value.repr()));
            prop_assert_eq!(&record.output, key);
        }
    }

    // LRANGE over the whole list returns every appended item in order
    #[test]
    fn prop_list_append_preserves_order(items in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..8), 0..30)) {
        let store = MemoryStore::new();
        let read = tokio_test::block_on(async {
            for item in &items {
                store.append_list("l", item.clone()).await.unwrap();
            }
            store.read_list_range("l", 0, -1).await.unwrap()
        });
        prop_assert_eq!(read, items);
    }

    // A window [start, end] never yields more than end - start + 1 items
    #[test]
    fn prop_list_range_window(len in 0usize..20, start in -25isize..25, end in -25isize..25) {
        let store = MemoryStore::new();
        let read = tokio_test::block_on(async {
            for i in 0..len {
                store.append_list("l", vec![i as u8]).await.unwrap();
            }
            store.read_list_range("l", start, end).await.unwrap()
        });

        let n = len as isize;
        let lo = if start < 0 { (start + n).max(0) } else { start };
        let hi = if end < 0 { end + n } else { end.min(n - 1) };
        let expected = if lo > hi || lo >= n { 0 } else { (hi - lo + 1) as usize };
        prop_assert_eq!(read.len(), expected);
        if let Some(first) = read.first() {
            prop_assert_eq!(first[0] as isize, lo);
        }
    }
}
