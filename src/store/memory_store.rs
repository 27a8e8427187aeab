//! In-Process Store Module
//!
//! A HashMap-backed store speaking the same command set as the external store,
//! with lazy TTL expiration and an optional background sweep.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, StoreEntry};

const WRONG_TYPE: &str =
    "WRONGTYPE Operation against a key holding the wrong kind of value";
const NOT_AN_INTEGER: &str = "ERR value is not an integer or out of range";
const INVALID_EXPIRE: &str = "ERR invalid expire time in 'setex' command";

// == Slot ==
/// What a key holds.
#[derive(Debug, Clone)]
enum Slot {
    Scalar(StoreEntry),
    List(Vec<Vec<u8>>),
}

impl Slot {
    fn is_expired(&self) -> bool {
        match self {
            Slot::Scalar(entry) => entry.is_expired(),
            Slot::List(_) => false,
        }
    }
}

// == Memory Store ==
/// In-process key-value store shared by all of its clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut slots = self.slots.write().await;
        let before = slots.len();
        slots.retain(|_, slot| !slot.is_expired());
        before - slots.len()
    }

    // == Time To Live ==
    /// Remaining TTL of a live scalar in seconds, `None` when it has none or is absent.
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        let slots = self.slots.read().await;
        match slots.get(key) {
            Some(Slot::Scalar(entry)) if !entry.is_expired() => entry.ttl_remaining(),
            _ => None,
        }
    }

    // == Length ==
    /// Returns the number of keys currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: an expired entry is removed on access
        let mut slots = self.slots.write().await;
        if slots.get(key).is_some_and(Slot::is_expired) {
            slots.remove(key);
            debug!(key, "expired on read");
            return Ok(None);
        }

        match slots.get(key) {
            Some(Slot::Scalar(entry)) => Ok(Some(entry.value.clone())),
            Some(Slot::List(_)) => Err(CacheError::StoreUnavailable(WRONG_TYPE.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), Slot::Scalar(StoreEntry::persistent(value)));
        Ok(())
    }

    async fn set_with_expiration(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: u64,
    ) -> Result<()> {
        let entry = match ttl_seconds {
            0 => None,
            ttl => StoreEntry::new(value, Some(ttl)),
        }
        .ok_or_else(|| CacheError::StoreUnavailable(INVALID_EXPIRE.to_string()))?;

        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), Slot::Scalar(entry));
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut slots = self.slots.write().await;
        if slots.get(key).is_some_and(Slot::is_expired) {
            slots.remove(key);
        }

        match slots.get_mut(key) {
            Some(Slot::Scalar(entry)) => {
                let current: i64 = std::str::from_utf8(&entry.value)
                    .ok()
                    .and_then(|text| text.parse().ok())
                    .ok_or_else(|| CacheError::StoreUnavailable(NOT_AN_INTEGER.to_string()))?;
                let next = current
                    .checked_add(1)
                    .ok_or_else(|| CacheError::StoreUnavailable(NOT_AN_INTEGER.to_string()))?;
                // INCR keeps the existing expiration
                entry.value = next.to_string().into_bytes();
                Ok(next)
            }
            Some(Slot::List(_)) => Err(CacheError::StoreUnavailable(WRONG_TYPE.to_string())),
            None => {
                slots.insert(
                    key.to_string(),
                    Slot::Scalar(StoreEntry::persistent(b"1".to_vec())),
                );
                Ok(1)
            }
        }
    }

    async fn append_list(&self, key: &str, value: Vec<u8>) -> Result<u64> {
        let mut slots = self.slots.write().await;
        if slots.get(key).is_some_and(Slot::is_expired) {
            slots.remove(key);
        }

        let slot = slots
            .entry(key.to_string())
            .or_insert_with(|| Slot::List(Vec::new()));
        match slot {
            Slot::List(items) => {
                items.push(value);
                Ok(items.len() as u64)
            }
            Slot::Scalar(_) => Err(CacheError::StoreUnavailable(WRONG_TYPE.to_string())),
        }
    }

    async fn read_list_range(
        &self,
        key: &str,
        start: isize,
        end: isize,
    ) -> Result<Vec<Vec<u8>>> {
        let slots = self.slots.read().await;
        match slots.get(key) {
            Some(Slot::List(items)) => Ok(list_range(items, start, end).to_vec()),
            Some(Slot::Scalar(entry)) if !entry.is_expired() => {
                Err(CacheError::StoreUnavailable(WRONG_TYPE.to_string()))
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn flush(&self) -> Result<()> {
        self.slots.write().await.clear();
        Ok(())
    }
}

// == Range Resolution ==
/// Resolves an inclusive LRANGE window the way the store protocol does.
fn list_range(items: &[Vec<u8>], start: isize, end: isize) -> &[Vec<u8>] {
    let len = items.len() as isize;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let end = if end < 0 { end + len } else { end.min(len - 1) };

    if start > end || start >= len {
        return &[];
    }
    &items[start as usize..=end as usize]
}
