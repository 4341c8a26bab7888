use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RunnableError;

use super::{RunConfig, Runnable};

type LambdaFn<I, O> = Arc<dyn Fn(I) -> Result<O, RunnableError> + Send + Sync>;

/// Wraps a synchronous closure as a runnable.
pub struct RunnableLambda<I, O> {
    name: String,
    func: LambdaFn<I, O>,
}

impl<I: 'static, O: 'static> RunnableLambda<I, O> {
    /// Infallible closure.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(move |input: I| -> Result<O, RunnableError> { Ok(func(input)) }),
        }
    }

    /// Closure that may fail with a [`RunnableError`].
    pub fn fallible<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(I) -> Result<O, RunnableError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }
}

impl<I, O> Clone for RunnableLambda<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

#[async_trait]
impl<I, O> Runnable<I, O> for RunnableLambda<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: I, _config: &RunConfig) -> Result<O, RunnableError> {
        (self.func)(input)
    }
}
