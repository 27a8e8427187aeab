//! Store Adapter Module
//!
//! The minimal key-value protocol the client depends on, and its adapters.
//!
//! Every command is expected to be atomic on the store side. Adapters add no
//! locking of their own and perform no retries: a transport or protocol
//! failure surfaces as [`CacheError::StoreUnavailable`](crate::error::CacheError).

mod entry;
mod memory_store;
mod redis_store;

use async_trait::async_trait;

use crate::error::Result;

pub(crate) use entry::StoreEntry;
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

// == Key Value Store ==
/// Handle to an external key-value store.
///
/// Handles are cheap to clone; clones talk to the same store.
#[async_trait]
pub trait KeyValueStore: Clone + Send + Sync + 'static {
    /// GET: raw bytes under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// SET: writes `value` under `key` with no expiration.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// SET .. EX: writes `value` under `key`, expiring after `ttl_seconds`.
    async fn set_with_expiration(&self, key: &str, value: Vec<u8>, ttl_seconds: u64)
        -> Result<()>;

    /// INCR: atomically adds one and returns the new value (absent counts as 0).
    async fn increment(&self, key: &str) -> Result<i64>;

    /// RPUSH: appends to the tail of the list and returns its new length.
    async fn append_list(&self, key: &str, value: Vec<u8>) -> Result<u64>;

    /// LRANGE: inclusive range, negative indices count from the tail.
    async fn read_list_range(&self, key: &str, start: isize, end: isize)
        -> Result<Vec<Vec<u8>>>;

    /// FLUSHDB: removes every key of the selected database.
    async fn flush(&self) -> Result<()>;
}
