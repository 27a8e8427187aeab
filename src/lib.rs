//! Instrumented Cache - a key-value cache client with call instrumentation
//!
//! Stores typed scalars in an external key-value store, counts and logs calls
//! of wrapped operations, and memoizes external fetches with a TTL.

pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod keys;
pub mod logging;
pub mod middleware;
pub mod store;
pub mod tasks;
pub mod value;

pub use cache::{ScalarCache, STORE_OPERATION};
pub use config::Config;
pub use error::{CacheError, Result};
pub use history::{access_count, call_count, replay, CallHistoryReport, CallRecord};
pub use logging::init_tracing;
pub use middleware::{
    cached_fetcher, operation_fn, wrap_with_fetch_cache, wrap_with_instrumentation, Operation,
    OperationExt,
};
pub use store::{KeyValueStore, MemoryStore, RedisStore};
pub use tasks::spawn_cleanup_task;
pub use value::{StoredValue, ValueKind};
