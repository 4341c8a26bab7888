//! Runnable abstraction: a named unit of work with invoke, stream, and batch.
//!
//! Every unit in strand implements [`Runnable`]: arithmetic steps, JSON glue,
//! prompt formatting, the plan executor itself. [`RunnableExt::pipe`] chains two
//! runnables into a flat [`RunnableSequence`].
//!
//! # Main types
//!
//! - [`Runnable`]: async trait with `invoke`; `stream` and `batch` have defaults.
//! - [`RunConfig`]: per-call configuration, including the plan results context.
//! - [`RunnableSequence`]: pipeline built by `pipe`; nested pipes flatten.
//! - [`DeferredRunnable`]: builds its runnable from the config at invocation time.
//! - [`RunnableLambda`], [`DictRunnable`]: closure and fan-out adapters.

mod config;
mod deferred;
mod dict;
mod lambda;
mod sequence;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::RunnableError;

pub use config::RunConfig;
pub use deferred::DeferredRunnable;
pub use dict::DictRunnable;
pub use lambda::RunnableLambda;
pub use sequence::RunnableSequence;

use sequence::Step;

/// Keeps the pipeline hook on [`Runnable`] callable and overridable only in this crate.
mod sealed {
    pub struct Token;
}

/// Boxed runnable; what factories return.
pub type BoxRunnable<I, O> = Box<dyn Runnable<I, O>>;

/// A named, reusable unit of work from `I` to `O`.
///
/// Only [`invoke`](Runnable::invoke) is required. The default `stream` yields the
/// single invoke result; the default `batch` invokes each input under one shared
/// config and keeps input order.
#[async_trait]
pub trait Runnable<I, O>: Send + Sync
where
    I: Send + 'static,
    O: Send + 'static,
{
    /// Display name; sequences join these with `" | "`.
    fn name(&self) -> &str;

    async fn invoke(&self, input: I, config: &RunConfig) -> Result<O, RunnableError>;

    fn stream<'a>(
        &'a self,
        input: I,
        config: &'a RunConfig,
    ) -> BoxStream<'a, Result<O, RunnableError>> {
        futures::stream::once(self.invoke(input, config)).boxed()
    }

    /// Invokes every input; the output at position i belongs to input i.
    ///
    /// `None` uses [`RunConfig::default`]. The first failure fails the batch.
    async fn batch(
        &self,
        inputs: Vec<I>,
        config: Option<RunConfig>,
    ) -> Result<Vec<O>, RunnableError> {
        let config = config.unwrap_or_default();
        futures::future::try_join_all(inputs.into_iter().map(|input| self.invoke(input, &config)))
            .await
    }

    /// Steps to splice into a pipeline; `None` means "pipe me as one step".
    #[doc(hidden)]
    fn steps(&self, _: sealed::Token) -> Option<Vec<Step>> {
        None
    }
}

/// Steps `runnable` contributes to a pipeline: its own steps if it is (or
/// wraps) a sequence, otherwise itself.
fn pipeline_steps<I, O, R>(runnable: R) -> Vec<Step>
where
    I: Send + 'static,
    O: Send + 'static,
    R: Runnable<I, O> + 'static,
{
    match runnable.steps(sealed::Token) {
        Some(steps) => steps,
        None => vec![Step::new(runnable)],
    }
}

/// Composition helpers for every sized runnable.
pub trait RunnableExt<I, O>: Runnable<I, O> + Sized + 'static
where
    I: Send + 'static,
    O: Send + 'static,
{
    /// `self | next`: feeds this runnable's output into `next`.
    ///
    /// Sequences on either side are spliced in, so `(a | b) | c` and
    /// `a | (b | c)` both hold the steps `[a, b, c]`.
    fn pipe<O2, R>(self, next: R) -> RunnableSequence<I, O2>
    where
        O2: Send + 'static,
        R: Runnable<O, O2> + 'static,
    {
        let mut steps = pipeline_steps::<I, O, Self>(self);
        steps.extend(pipeline_steps::<O, O2, R>(next));
        RunnableSequence::from_steps(steps)
    }
}

impl<I, O, R> RunnableExt<I, O> for R
where
    I: Send + 'static,
    O: Send + 'static,
    R: Runnable<I, O> + Sized + 'static,
{
}

#[async_trait]
impl<I, O, R> Runnable<I, O> for Box<R>
where
    I: Send + 'static,
    O: Send + 'static,
    R: Runnable<I, O> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn invoke(&self, input: I, config: &RunConfig) -> Result<O, RunnableError> {
        (**self).invoke(input, config).await
    }

    fn stream<'a>(
        &'a self,
        input: I,
        config: &'a RunConfig,
    ) -> BoxStream<'a, Result<O, RunnableError>> {
        (**self).stream(input, config)
    }

    fn steps(&self, token: sealed::Token) -> Option<Vec<Step>> {
        (**self).steps(token)
    }
}

#[async_trait]
impl<I, O, R> Runnable<I, O> for std::sync::Arc<R>
where
    I: Send + 'static,
    O: Send + 'static,
    R: Runnable<I, O> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn invoke(&self, input: I, config: &RunConfig) -> Result<O, RunnableError> {
        (**self).invoke(input, config).await
    }

    fn stream<'a>(
        &'a self,
        input: I,
        config: &'a RunConfig,
    ) -> BoxStream<'a, Result<O, RunnableError>> {
        (**self).stream(input, config)
    }

    fn steps(&self, token: sealed::Token) -> Option<Vec<Step>> {
        (**self).steps(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct SlowDouble;

    #[async_trait]
    impl Runnable<u64, u64> for SlowDouble {
        fn name(&self) -> &str {
            "SlowDouble"
        }

        async fn invoke(&self, input: u64, _config: &RunConfig) -> Result<u64, RunnableError> {
            // Larger inputs finish first.
            tokio::time::sleep(Duration::from_millis(40 - input * 10)).await;
            Ok(input * 2)
        }
    }

    /// **Scenario**: batch output order follows input order even when later inputs finish first.
    #[tokio::test]
    async fn batch_preserves_input_order() {
        let out = SlowDouble.batch(vec![1, 2, 3], None).await.unwrap();
        assert_eq!(out, vec![2, 4, 6]);
    }

    /// **Scenario**: default stream yields exactly the invoke result.
    #[tokio::test]
    async fn default_stream_yields_single_item() {
        let config = RunConfig::default();
        let items: Vec<_> = SlowDouble.stream(3, &config).collect().await;
        assert_eq!(items.len(), 1);
        assert_eq!(*items[0].as_ref().unwrap(), 6);
    }

    /// **Scenario**: boxed runnables delegate name and invoke.
    #[tokio::test]
    async fn boxed_runnable_delegates() {
        let boxed: BoxRunnable<u64, u64> = Box::new(SlowDouble);
        assert_eq!(boxed.name(), "SlowDouble");
        assert_eq!(boxed.invoke(2, &RunConfig::default()).await.unwrap(), 4);
    }
}
