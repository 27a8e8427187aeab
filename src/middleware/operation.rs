//! Operation Module
//!
//! The call interface shared by plain operations and every middleware layer.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

// == Operation ==
/// A named unit of work that the middleware layers wrap.
///
/// Layers implement this trait themselves and own the operation they wrap,
/// so a stack of layers is still an `Operation`.
#[async_trait]
pub trait Operation: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Runs the operation.
    async fn call(&self, input: Self::Input) -> Result<Self::Output>;
}

#[async_trait]
impl<T: Operation> Operation for Arc<T> {
    type Input = T::Input;
    type Output = T::Output;

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        self.as_ref().call(input).await
    }
}

// == Fn Operation ==
/// Adapts an async closure into an [`Operation`].
pub struct FnOperation<F, I, O> {
    f: F,
    _marker: PhantomData<fn(I) -> O>,
}

impl<F, I, O> std::fmt::Debug for FnOperation<F, I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOperation").finish_non_exhaustive()
    }
}

/// Wraps `f` so it can be layered like any other operation.
///
/// # Example
/// ```ignore
/// let fetch = operation_fn(|url: String| async move { Ok(format!("<body for {url}>")) });
/// ```
pub fn operation_fn<F, Fut, I, O>(f: F) -> FnOperation<F, I, O>
where
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O>> + Send + 'static,
{
    FnOperation {
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, I, O> Operation for FnOperation<F, I, O>
where
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O>> + Send + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    type Input = I;
    type Output = O;

    async fn call(&self, input: I) -> Result<O> {
        (self.f)(input).await
    }
}
