//! Flat runnable pipelines.
//!
//! Steps are stored type-erased so `a | b | c` with three different
//! input/output types lives in one `Vec`. The typed [`RunnableExt::pipe`](super::RunnableExt::pipe)
//! API guarantees adjacent steps agree, so a downcast failure means a bug and is
//! reported as [`RunnableError::ExecutionFailed`].

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::RunnableError;

use super::sealed::Token;
use super::{RunConfig, Runnable};

type AnyValue = Box<dyn Any + Send>;

#[async_trait]
trait ErasedRunnable: Send + Sync {
    fn name(&self) -> &str;

    async fn invoke_any(&self, input: AnyValue, config: &RunConfig)
        -> Result<AnyValue, RunnableError>;

    fn stream_any<'a>(
        &'a self,
        input: AnyValue,
        config: &'a RunConfig,
    ) -> BoxStream<'a, Result<AnyValue, RunnableError>>;
}

struct Erased<I, O, R> {
    inner: R,
    _marker: PhantomData<fn(I) -> O>,
}

#[async_trait]
impl<I, O, R> ErasedRunnable for Erased<I, O, R>
where
    I: Send + 'static,
    O: Send + 'static,
    R: Runnable<I, O>,
{
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn invoke_any(
        &self,
        input: AnyValue,
        config: &RunConfig,
    ) -> Result<AnyValue, RunnableError> {
        let input = downcast::<I>(input, self.inner.name())?;
        let output = self.inner.invoke(input, config).await?;
        Ok(Box::new(output))
    }

    fn stream_any<'a>(
        &'a self,
        input: AnyValue,
        config: &'a RunConfig,
    ) -> BoxStream<'a, Result<AnyValue, RunnableError>> {
        match downcast::<I>(input, self.inner.name()) {
            Ok(input) => self
                .inner
                .stream(input, config)
                .map(|item| item.map(|output| Box::new(output) as AnyValue))
                .boxed(),
            Err(e) => error_stream(e),
        }
    }
}

fn downcast<T: 'static>(value: AnyValue, step: &str) -> Result<T, RunnableError> {
    value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        RunnableError::ExecutionFailed(format!("type mismatch at pipeline step {}", step))
    })
}

fn error_stream<'a, T: Send + 'a>(err: RunnableError) -> BoxStream<'a, Result<T, RunnableError>> {
    futures::stream::once(futures::future::ready(Err(err))).boxed()
}

/// One type-erased pipeline step.
#[derive(Clone)]
pub struct Step(Arc<dyn ErasedRunnable>);

impl Step {
    pub(crate) fn new<I, O, R>(runnable: R) -> Self
    where
        I: Send + 'static,
        O: Send + 'static,
        R: Runnable<I, O> + 'static,
    {
        Self(Arc::new(Erased {
            inner: runnable,
            _marker: PhantomData,
        }))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }
}

/// Ordered pipeline `I → … → O`. Build with [`RunnableExt::pipe`](super::RunnableExt::pipe).
///
/// `Display` renders the step names joined by `" | "`.
#[derive(Clone)]
pub struct RunnableSequence<I, O> {
    steps: Vec<Step>,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O> RunnableSequence<I, O> {
    pub(crate) fn from_steps(steps: Vec<Step>) -> Self {
        Self {
            steps,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }
}

impl<I, O> fmt::Display for RunnableSequence<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.step_names().join(" | "))
    }
}

impl<I, O> fmt::Debug for RunnableSequence<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnableSequence")
            .field("steps", &self.step_names())
            .finish()
    }
}

#[async_trait]
impl<I, O> Runnable<I, O> for RunnableSequence<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn name(&self) -> &str {
        "RunnableSequence"
    }

    async fn invoke(&self, input: I, config: &RunConfig) -> Result<O, RunnableError> {
        let mut value: AnyValue = Box::new(input);
        for step in &self.steps {
            tracing::trace!(step = step.name(), "sequence step");
            value = step.0.invoke_any(value, config).await?;
        }
        downcast::<O>(value, "output")
    }

    /// Invokes every step but the last, then streams the last step.
    fn stream<'a>(
        &'a self,
        input: I,
        config: &'a RunConfig,
    ) -> BoxStream<'a, Result<O, RunnableError>> {
        let Some((last, init)) = self.steps.split_last() else {
            return error_stream(RunnableError::ExecutionFailed(
                "empty sequence".to_string(),
            ));
        };
        let prelude = async move {
            let mut value: AnyValue = Box::new(input);
            for step in init {
                value = step.0.invoke_any(value, config).await?;
            }
            Ok::<_, RunnableError>(value)
        };
        futures::stream::once(prelude)
            .map(move |prepared| match prepared {
                Ok(value) => last.0.stream_any(value, config),
                Err(e) => error_stream(e),
            })
            .flatten()
            .map(|item| item.and_then(|value| downcast::<O>(value, "output")))
            .boxed()
    }

    fn steps(&self, _: Token) -> Option<Vec<Step>> {
        Some(self.steps.clone())
    }
}
