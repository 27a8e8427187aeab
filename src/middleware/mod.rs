//! Middleware Module
//!
//! Composable layers around an [`Operation`]. Each layer implements
//! `Operation` itself and owns what it wraps, so stacks are built by nesting:
//!
//! ```ignore
//! let get_page = fetch
//!     .fetch_cached(store.clone(), 10)   // inner: memoize
//!     .access_counted(store.clone());    // outer: count every request
//! ```

mod fetch;
mod instrument;
mod operation;
mod text;

pub use fetch::{
    cached_fetcher, wrap_with_fetch_cache, AccessCounter, CachedFetcher, FetchCache,
};
pub use instrument::{wrap_with_instrumentation, CallCounter, CallHistory, Instrumented};
pub use operation::{operation_fn, FnOperation, Operation};
pub use text::{argument_list, HistoryText};

use crate::store::KeyValueStore;

// == Builder ==
/// Construction-time helpers for stacking layers onto an operation.
pub trait OperationExt: Operation + Sized {
    /// Counts invocations under `name`.
    fn counted<S: KeyValueStore>(self, name: impl AsRef<str>, store: S) -> CallCounter<Self, S> {
        CallCounter::new(self, name, store)
    }

    /// Logs inputs and outputs under `name`.
    fn with_history<S: KeyValueStore>(
        self,
        name: impl Into<String>,
        store: S,
    ) -> CallHistory<Self, S> {
        CallHistory::new(self, name, store)
    }

    /// Counts and logs under `name`.
    fn instrumented<S>(self, name: impl Into<String>, store: S) -> Instrumented<Self, S>
    where
        S: KeyValueStore,
        Self::Input: HistoryText,
        Self::Output: HistoryText,
    {
        wrap_with_instrumentation(self, name, store)
    }

    /// Memoizes results for `ttl_seconds`.
    fn fetch_cached<S: KeyValueStore>(self, store: S, ttl_seconds: u64) -> FetchCache<Self, S>
    where
        Self: Operation<Input = String, Output = String>,
    {
        FetchCache::with_ttl(self, store, ttl_seconds)
    }

    /// Counts accesses per argument.
    fn access_counted<S: KeyValueStore>(self, store: S) -> AccessCounter<Self, S>
    where
        Self: Operation<Input = String>,
    {
        AccessCounter::new(self, store)
    }
}

impl<O: Operation> OperationExt for O {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{access_count, call_count, replay};
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_builder_stacks_layers() {
        let store = MemoryStore::new();
        let get_page = operation_fn(|url: String| async move { Ok(format!("<body for {url}>")) })
            .fetch_cached(store.clone(), 10)
            .access_counted(store.clone())
            .instrumented("get_page", store.clone());

        get_page.call("http://x".to_string()).await.unwrap();
        get_page.call("http://x".to_string()).await.unwrap();

        assert_eq!(call_count(&store, "get_page").await.unwrap(), 2);
        assert_eq!(access_count(&store, "http://x").await.unwrap(), 2);
        let records = replay(&store, "get_page").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].input, "('http://x',)");
        assert_eq!(records[1].output, "<body for http://x>");
    }
}
