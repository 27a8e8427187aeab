//! Call Instrumentation Middleware
//!
//! Layers that count invocations of a named operation and log its inputs and
//! outputs to the store.
//!
//! On every call the counter is incremented first, then the input is appended,
//! then the wrapped operation runs, and only a successful result is appended
//! to the output list. A failed call therefore leaves one more input than
//! output behind. Under sequential calls the k-th input pairs with the k-th
//! output; concurrent calls may interleave.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::keys::{counter_key, inputs_key, outputs_key};
use crate::middleware::text::{argument_list, HistoryText};
use crate::middleware::Operation;
use crate::store::KeyValueStore;

// == Call Counter ==
/// Increments the invocation counter of `name` before every call.
#[derive(Debug, Clone)]
pub struct CallCounter<O, S> {
    inner: O,
    key: String,
    store: S,
}

impl<O, S> CallCounter<O, S> {
    pub fn new(inner: O, name: impl AsRef<str>, store: S) -> Self {
        Self {
            inner,
            key: counter_key(name.as_ref()),
            store,
        }
    }

    /// The wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O, S> Operation for CallCounter<O, S>
where
    O: Operation,
    S: KeyValueStore,
{
    type Input = O::Input;
    type Output = O::Output;

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let count = self.store.increment(&self.key).await?;
        debug!(counter = %self.key, count, "invocation counted");
        self.inner.call(input).await
    }
}

// == Call History ==
/// Appends the serialized arguments and result of every call of `name`.
#[derive(Debug, Clone)]
pub struct CallHistory<O, S> {
    inner: O,
    name: String,
    inputs_key: String,
    outputs_key: String,
    store: S,
}

impl<O, S> CallHistory<O, S> {
    pub fn new(inner: O, name: impl Into<String>, store: S) -> Self {
        let name = name.into();
        Self {
            inner,
            inputs_key: inputs_key(&name),
            outputs_key: outputs_key(&name),
            name,
            store,
        }
    }

    /// The wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O, S> Operation for CallHistory<O, S>
where
    O: Operation,
    O::Input: HistoryText,
    O::Output: HistoryText,
    S: KeyValueStore,
{
    type Input = O::Input;
    type Output = O::Output;

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let arguments = argument_list(&input.arguments());
        self.store
            .append_list(&self.inputs_key, arguments.into_bytes())
            .await?;

        let output = match self.inner.call(input).await {
            Ok(output) => output,
            Err(err) => {
                warn!(operation = %self.name, error = %err, "call failed, no output recorded");
                return Err(err);
            }
        };

        self.store
            .append_list(&self.outputs_key, output.display().into_bytes())
            .await?;
        debug!(operation = %self.name, "call recorded");
        Ok(output)
    }
}

// == Instrumented ==
/// Counting over history over the operation.
pub type Instrumented<O, S> = CallCounter<CallHistory<O, S>, S>;

/// Wraps `operation` so each call is counted under `name` and logged to
/// `name:inputs` / `name:outputs`.
pub fn wrap_with_instrumentation<O, S>(
    operation: O,
    name: impl Into<String>,
    store: S,
) -> Instrumented<O, S>
where
    O: Operation,
    O::Input: HistoryText,
    O::Output: HistoryText,
    S: KeyValueStore,
{
    let name = name.into();
    CallCounter::new(CallHistory::new(operation, name.clone(), store.clone()), name, store)
}
