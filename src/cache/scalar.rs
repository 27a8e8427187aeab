//! Scalar Cache Module
//!
//! Writes scalar values under fresh random keys and reads them back, raw or decoded.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::cache::STORE_OPERATION;
use crate::error::Result;
use crate::middleware::{wrap_with_instrumentation, Instrumented, Operation};
use crate::store::KeyValueStore;
use crate::value::{
    decode_bytes, decode_float, decode_integer, decode_text, StoredValue, ValueKind,
};

// == Scalar Cache ==
/// Stores scalars under UUID keys in the shared store.
#[derive(Debug, Clone)]
pub struct ScalarCache<S> {
    store: S,
}

impl<S: KeyValueStore> ScalarCache<S> {
    // == Constructor ==
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store_handle(&self) -> &S {
        &self.store
    }

    // == Store ==
    /// Writes `value` under a new random v4 UUID and returns that key.
    ///
    /// 122 random bits make a collision with an existing key negligible.
    pub async fn store(&self, value: impl Into<StoredValue>) -> Result<String> {
        let value = value.into();
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, value.encode()).await?;
        debug!(key = %key, kind = ?value.kind(), "value stored");
        Ok(key)
    }

    // == Get ==
    /// Raw bytes under `key`, `None` when absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Reads `key` and applies `decoder` to the raw bytes.
    ///
    /// Absent keys yield `Ok(None)` without calling the decoder. A decoder
    /// failure is returned as is; the stored bytes are left untouched.
    pub async fn get_with<T, D>(&self, key: &str, decoder: D) -> Result<Option<T>>
    where
        D: FnOnce(&str, Vec<u8>) -> Result<T>,
    {
        match self.store.get(key).await? {
            Some(raw) => decoder(key, raw).map(Some),
            None => Ok(None),
        }
    }

    /// Reads `key` as UTF-8 text.
    pub async fn get_as_text(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode_text).await
    }

    /// Reads `key` as a base-10 integer.
    pub async fn get_as_integer(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, decode_integer).await
    }

    /// Reads `key` as a float.
    pub async fn get_as_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, decode_float).await
    }

    /// Reads `key` as raw bytes.
    pub async fn get_as_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.get_with(key, decode_bytes).await
    }

    /// Reads `key` back as a [`StoredValue`] of the given kind.
    pub async fn get_value(&self, key: &str, kind: ValueKind) -> Result<Option<StoredValue>> {
        self.get_with(key, |key, raw| StoredValue::decode(key, kind, raw))
            .await
    }

    // == Operations ==
    /// `store` as an [`Operation`], ready to be layered.
    pub fn store_operation(&self) -> StoreValue<S> {
        StoreValue {
            cache: self.clone(),
        }
    }

    /// `store` counted and logged under [`STORE_OPERATION`].
    pub fn instrumented_store(&self) -> Instrumented<StoreValue<S>, S> {
        wrap_with_instrumentation(self.store_operation(), STORE_OPERATION, self.store.clone())
    }
}

// == Store Value Operation ==
/// The `store` call of a [`ScalarCache`] behind the [`Operation`] interface.
#[derive(Debug, Clone)]
pub struct StoreValue<S> {
    cache: ScalarCache<S>,
}

#[async_trait]
impl<S: KeyValueStore> Operation for StoreValue<S> {
    type Input = StoredValue;
    type Output = String;

    async fn call(&self, value: StoredValue) -> Result<String> {
        self.cache.store(value).await
    }
}
