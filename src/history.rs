//! History Replay
//!
//! Read-only views over the counters and call logs the middleware writes.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::keys::{count_key, counter_key, inputs_key, outputs_key};
use crate::store::KeyValueStore;
use crate::value::decode_integer;

// == Call Record ==
/// One recorded call: serialized arguments and serialized result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

/// Pairs the input and output logs of `name`, oldest first.
///
/// When the logs differ in length (failed calls log no output) the result is
/// truncated to the shorter one.
pub async fn replay<S: KeyValueStore>(store: &S, name: &str) -> Result<Vec<CallRecord>> {
    let inputs = store.read_list_range(&inputs_key(name), 0, -1).await?;
    let outputs = store.read_list_range(&outputs_key(name), 0, -1).await?;

    Ok(inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| CallRecord {
            input: String::from_utf8_lossy(&input).into_owned(),
            output: String::from_utf8_lossy(&output).into_owned(),
        })
        .collect())
}

/// Invocation count of `name`; 0 when it was never called.
pub async fn call_count<S: KeyValueStore>(store: &S, name: &str) -> Result<u64> {
    read_counter(store, &counter_key(name)).await
}

/// How many times `argument` went through an access counter; 0 when never.
pub async fn access_count<S: KeyValueStore>(store: &S, argument: &str) -> Result<u64> {
    read_counter(store, &count_key(argument)).await
}

async fn read_counter<S: KeyValueStore>(store: &S, key: &str) -> Result<u64> {
    match store.get(key).await? {
        Some(raw) => Ok(decode_integer(key, raw)?.max(0) as u64),
        None => Ok(0),
    }
}

// == Report ==
/// Call count plus replayed records, printable as a call trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallHistoryReport {
    pub name: String,
    pub calls: u64,
    pub records: Vec<CallRecord>,
}

impl CallHistoryReport {
    /// Reads the counter and both logs of `name`.
    pub async fn load<S: KeyValueStore>(store: &S, name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            calls: call_count(store, name).await?,
            records: replay(store, name).await?,
        })
    }
}

impl fmt::Display for CallHistoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.name, self.calls)?;
        for record in &self.records {
            writeln!(f, "{}(*{}) -> {}", self.name, record.input, record.output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::store::MemoryStore;

    async fn push(store: &MemoryStore, key: &str, items: &[&str]) {
        for item in items {
            store.append_list(key, item.as_bytes().to_vec()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_replay_pairs_in_order() {
        let store = MemoryStore::new();
        push(&store, "op:inputs", &["(1,)", "(2,)", "(3,)"]).await;
        push(&store, "op:outputs", &["a", "b", "c"]).await;

        let records = replay(&store, "op").await.unwrap();
        let inputs: Vec<_> = records.iter().map(|r| r.input.as_str()).collect();
        let outputs: Vec<_> = records.iter().map(|r| r.output.as_str()).collect();
        assert_eq!(inputs, vec!["(1,)", "(2,)", "(3,)"]);
        assert_eq!(outputs, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_replay_truncates_to_shorter_log() {
        let store = MemoryStore::new();
        push(&store, "op:inputs", &["(1,)", "(2,)"]).await;
        push(&store, "op:outputs", &["a"]).await;

        assert_eq!(replay(&store, "op").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replay_unknown_operation_is_empty() {
        let store = MemoryStore::new();
        assert!(replay(&store, "nothing").await.unwrap().is_empty());
        assert_eq!(call_count(&store, "nothing").await.unwrap(), 0);
        assert_eq!(access_count(&store, "http://x").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_replay_has_no_side_effects() {
        let store = MemoryStore::new();
        push(&store, "op:inputs", &["(1,)"]).await;
        push(&store, "op:outputs", &["a"]).await;

        replay(&store, "op").await.unwrap();
        replay(&store, "op").await.unwrap();

        assert_eq!(store.len().await, 2);
        assert_eq!(call_count(&store, "op").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_counter_is_a_decode_error() {
        let store = MemoryStore::new();
        store.set("op", b"many".to_vec()).await.unwrap();
        let result = call_count(&store, "op").await;
        assert!(matches!(result, Err(CacheError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_report_display() {
        let store = MemoryStore::new();
        store.increment("Cache.store").await.unwrap();
        push(&store, "Cache.store:inputs", &["('foo',)"]).await;
        push(&store, "Cache.store:outputs", &["k1"]).await;

        let report = CallHistoryReport::load(&store, "Cache.store").await.unwrap();
        assert_eq!(
            report.to_string(),
            "Cache.store was called 1 times:\nCache.store(*('foo',)) -> k1\n"
        );
    }

    #[tokio::test]
    async fn test_report_serializes() {
        let report = CallHistoryReport {
            name: "op".to_string(),
            calls: 1,
            records: vec![CallRecord {
                input: "(1,)".to_string(),
                output: "2".to_string(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["calls"], 1);
        assert_eq!(json["records"][0]["output"], "2");
    }
}
