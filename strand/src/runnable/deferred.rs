//! Runnables whose construction is postponed until invocation.
//!
//! A [`DeferredRunnable`] stores a factory plus accessors over the [`RunConfig`].
//! At `invoke` time it reads the constructor argument from the config, builds the
//! inner runnable, and invokes it with either the caller's input or a value read
//! from the config. Plan atoms use this to bind operands that only exist once
//! their dependencies have run.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RunnableError;

use super::{BoxRunnable, RunConfig, Runnable};

type Factory<I, O, A> = Arc<dyn Fn(A) -> BoxRunnable<I, O> + Send + Sync>;
type ConfigAccessor<T> = Arc<dyn Fn(&RunConfig) -> Result<T, RunnableError> + Send + Sync>;

/// Deferred unit: `factory(constructor_arg(config)).invoke(invoke_arg(config) or input)`.
pub struct DeferredRunnable<I, O, A>
where
    I: Send + 'static,
    O: Send + 'static,
{
    name: String,
    factory: Factory<I, O, A>,
    constructor_arg: ConfigAccessor<A>,
    invoke_arg: Option<ConfigAccessor<I>>,
}

impl<I, O, A> DeferredRunnable<I, O, A>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn new<F, C>(factory: F, constructor_arg: C) -> Self
    where
        F: Fn(A) -> BoxRunnable<I, O> + Send + Sync + 'static,
        C: Fn(&RunConfig) -> Result<A, RunnableError> + Send + Sync + 'static,
    {
        Self {
            name: "DeferredRunnable".to_string(),
            factory: Arc::new(factory),
            constructor_arg: Arc::new(constructor_arg),
            invoke_arg: None,
        }
    }

    /// Reads the invoke input from the config instead of using the caller's input.
    pub fn with_invoke_arg<G>(mut self, invoke_arg: G) -> Self
    where
        G: Fn(&RunConfig) -> Result<I, RunnableError> + Send + Sync + 'static,
    {
        self.invoke_arg = Some(Arc::new(invoke_arg));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<I, O, A> Clone for DeferredRunnable<I, O, A>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            factory: Arc::clone(&self.factory),
            constructor_arg: Arc::clone(&self.constructor_arg),
            invoke_arg: self.invoke_arg.clone(),
        }
    }
}

#[async_trait]
impl<I, O, A> Runnable<I, O> for DeferredRunnable<I, O, A>
where
    I: Send + 'static,
    O: Send + 'static,
    A: 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: I, config: &RunConfig) -> Result<O, RunnableError> {
        let runnable = (self.factory)((self.constructor_arg)(config)?);
        let input = match &self.invoke_arg {
            Some(read) => read(config)?,
            None => input,
        };
        tracing::trace!(deferred = %self.name, inner = runnable.name(), "materialized");
        runnable.invoke(input, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::{Number, Operation};

    /// **Scenario**: the constructor argument is read from the config at invoke time.
    #[tokio::test]
    async fn constructor_arg_comes_from_config() {
        let deferred = DeferredRunnable::new(Operation::Multiply.factory(), |config: &RunConfig| {
            config
                .results
                .get(1)
                .ok_or_else(|| RunnableError::ExecutionFailed("atom 1 not done".into()))
        });

        let mut config = RunConfig::default();
        assert!(deferred.invoke(3.into(), &config).await.is_err());

        config.results.record(1, 22.into()).unwrap();
        let out = deferred.invoke(3.into(), &config).await.unwrap();
        assert_eq!(out, Number::Int(66));
    }

    /// **Scenario**: with an invoke-argument accessor the caller's input is ignored.
    #[tokio::test]
    async fn invoke_arg_overrides_caller_input() {
        let deferred = DeferredRunnable::new(Operation::Subtract.factory(), |_: &RunConfig| {
            Ok(Number::Int(10))
        })
        .with_invoke_arg(|config: &RunConfig| {
            config
                .results
                .get(2)
                .ok_or_else(|| RunnableError::ExecutionFailed("atom 2 not done".into()))
        })
        .with_name("SubtractionRunnable#3");

        let mut config = RunConfig::default();
        config.results.record(2, 66.into()).unwrap();
        let out = deferred.invoke(1000.into(), &config).await.unwrap();
        assert_eq!(out, Number::Int(56));
        assert_eq!(deferred.name(), "SubtractionRunnable#3");
    }
}
