//! Fetch Cache Middleware
//!
//! Memoizes an external fetch (argument -> content) in the store with a TTL,
//! and counts accesses per argument.
//!
//! A cache key moves from absent to fresh on a miss and back to absent when the
//! store expires it. Failed fetches are never cached.

use async_trait::async_trait;
use tracing::debug;

use crate::config::{Config, DEFAULT_TTL_SECONDS};
use crate::error::Result;
use crate::keys::{cache_key, count_key};
use crate::middleware::Operation;
use crate::store::KeyValueStore;
use crate::value::decode_text;

// == Fetch Cache ==
/// Serves `cache:<argument>` while it lives, otherwise fetches and stores it.
#[derive(Debug, Clone)]
pub struct FetchCache<F, S> {
    fetch: F,
    store: S,
    ttl_seconds: u64,
}

impl<F, S> FetchCache<F, S> {
    /// Wraps `fetch` with the default TTL.
    pub fn new(fetch: F, store: S) -> Self {
        Self::with_ttl(fetch, store, DEFAULT_TTL_SECONDS)
    }

    /// Wraps `fetch` with the TTL from `config`.
    pub fn from_config(fetch: F, store: S, config: &Config) -> Self {
        Self::with_ttl(fetch, store, config.ttl_seconds)
    }

    /// Wraps `fetch`; results live for `ttl_seconds` (0 disables caching).
    pub fn with_ttl(fetch: F, store: S, ttl_seconds: u64) -> Self {
        Self {
            fetch,
            store,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}

#[async_trait]
impl<F, S> Operation for FetchCache<F, S>
where
    F: Operation<Input = String, Output = String>,
    S: KeyValueStore,
{
    type Input = String;
    type Output = String;

    async fn call(&self, argument: String) -> Result<String> {
        let key = cache_key(&argument);

        if let Some(raw) = self.store.get(&key).await? {
            debug!(key = %key, "fetch cache hit");
            return decode_text(&key, raw);
        }

        debug!(key = %key, "fetch cache miss");
        let content = self.fetch.call(argument).await?;

        if self.ttl_seconds > 0 {
            self.store
                .set_with_expiration(&key, content.clone().into_bytes(), self.ttl_seconds)
                .await?;
        } else {
            debug!(key = %key, "ttl is zero, result not cached");
        }
        Ok(content)
    }
}

/// Memoizes `fetch` in `store` for `ttl_seconds`.
pub fn wrap_with_fetch_cache<F, S>(fetch: F, ttl_seconds: u64, store: S) -> FetchCache<F, S>
where
    F: Operation<Input = String, Output = String>,
    S: KeyValueStore,
{
    FetchCache::with_ttl(fetch, store, ttl_seconds)
}

// == Access Counter ==
/// Increments `count:<argument>` on every call, hit or miss.
#[derive(Debug, Clone)]
pub struct AccessCounter<O, S> {
    inner: O,
    store: S,
}

impl<O, S> AccessCounter<O, S> {
    pub fn new(inner: O, store: S) -> Self {
        Self { inner, store }
    }

    /// The wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O, S> Operation for AccessCounter<O, S>
where
    O: Operation<Input = String>,
    S: KeyValueStore,
{
    type Input = String;
    type Output = O::Output;

    async fn call(&self, argument: String) -> Result<Self::Output> {
        let key = count_key(&argument);
        let count = self.store.increment(&key).await?;
        debug!(key = %key, count, "access counted");
        self.inner.call(argument).await
    }
}

/// Counting outside, caching inside: every request is counted, only misses fetch.
pub type CachedFetcher<F, S> = AccessCounter<FetchCache<F, S>, S>;

/// Builds the access-counted, memoized form of `fetch`, cached for `config.ttl_seconds`.
pub fn cached_fetcher<F, S>(fetch: F, store: S, config: &Config) -> CachedFetcher<F, S>
where
    F: Operation<Input = String, Output = String>,
    S: KeyValueStore,
{
    AccessCounter::new(FetchCache::from_config(fetch, store.clone(), config), store)
}
