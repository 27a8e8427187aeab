//! Redis Store Module
//!
//! Store adapter over a Redis-protocol server.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::info;

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

// == Redis Store ==
/// Connection handle to a Redis-protocol store.
///
/// Clones share one multiplexed connection.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    // == Connect ==
    /// Opens a connection using the configured URL.
    ///
    /// Flushes the selected database when `flush_on_start` is set.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = Client::open(config.redis_url.as_str()).map_err(|e| {
            CacheError::InvalidConfig(format!("bad store url '{}': {}", config.redis_url, e))
        })?;
        let connection = ConnectionManager::new(client).await?;
        info!("Connected to store at {}", config.redis_url);

        let store = Self { connection };
        if config.flush_on_start {
            store.flush().await?;
            info!("Store database flushed on start");
        }
        Ok(store)
    }

    // == Close ==
    /// Releases this handle. The connection closes once every clone is gone.
    pub fn close(self) {
        drop(self.connection);
        info!("Store handle closed");
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut con = self.connection.clone();
        let value: Option<Vec<u8>> = con.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut con = self.connection.clone();
        let _: () = con.set(key, value).await?;
        Ok(())
    }

    async fn set_with_expiration(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: u64,
    ) -> Result<()> {
        let mut con = self.connection.clone();
        let _: () = con.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut con = self.connection.clone();
        let count: i64 = con.incr(key, 1_i64).await?;
        Ok(count)
    }

    async fn append_list(&self, key: &str, value: Vec<u8>) -> Result<u64> {
        let mut con = self.connection.clone();
        let len: u64 = con.rpush(key, value).await?;
        Ok(len)
    }

    async fn read_list_range(
        &self,
        key: &str,
        start: isize,
        end: isize,
    ) -> Result<Vec<Vec<u8>>> {
        let mut con = self.connection.clone();
        let items: Vec<Vec<u8>> = con.lrange(key, start, end).await?;
        Ok(items)
    }

    async fn flush(&self) -> Result<()> {
        let mut con = self.connection.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut con).await?;
        Ok(())
    }
}
