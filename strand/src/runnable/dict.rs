use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RunnableError;

use super::{RunConfig, Runnable};

enum DictEntry<I: Send + 'static> {
    Runnable(Arc<dyn Runnable<I, Value>>),
    Nested(DictRunnable<I>),
    Value(Value),
}

/// Fans one input out to named runnables and collects a JSON object.
///
/// Each runnable entry is invoked with a clone of the input; nested dicts get
/// the same input and config at every level; plain values are copied into the
/// output unchanged.
pub struct DictRunnable<I: Send + 'static> {
    entries: Vec<(String, DictEntry<I>)>,
}

impl<I: Send + 'static> Default for DictRunnable<I> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<I> DictRunnable<I>
where
    I: Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key: runnable(input)`; the output is serialized to JSON.
    pub fn with_runnable<O, R>(mut self, key: impl Into<String>, runnable: R) -> Self
    where
        O: Serialize + Send + 'static,
        R: Runnable<I, O> + 'static,
    {
        let entry = ToJson {
            inner: runnable,
            _marker: PhantomData,
        };
        self.entries
            .push((key.into(), DictEntry::Runnable(Arc::new(entry))));
        self
    }

    /// Adds `key: {...}`, a nested dict evaluated with the same input.
    pub fn with_dict(mut self, key: impl Into<String>, dict: DictRunnable<I>) -> Self {
        self.entries.push((key.into(), DictEntry::Nested(dict)));
        self
    }

    /// Adds a constant `key: value`.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries
            .push((key.into(), DictEntry::Value(value.into())));
        self
    }
}

#[async_trait]
impl<I> Runnable<I, Value> for DictRunnable<I>
where
    I: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "DictRunnable"
    }

    async fn invoke(&self, input: I, config: &RunConfig) -> Result<Value, RunnableError> {
        let mut out = Map::new();
        for (key, entry) in &self.entries {
            let value = match entry {
                DictEntry::Runnable(runnable) => runnable.invoke(input.clone(), config).await?,
                DictEntry::Nested(dict) => dict.invoke(input.clone(), config).await?,
                DictEntry::Value(value) => value.clone(),
            };
            out.insert(key.clone(), value);
        }
        Ok(Value::Object(out))
    }
}

struct ToJson<I, O, R> {
    inner: R,
    _marker: PhantomData<fn(I) -> O>,
}

#[async_trait]
impl<I, O, R> Runnable<I, Value> for ToJson<I, O, R>
where
    I: Send + 'static,
    O: Serialize + Send + 'static,
    R: Runnable<I, O>,
{
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn invoke(&self, input: I, config: &RunConfig) -> Result<Value, RunnableError> {
        let output = self.inner.invoke(input, config).await?;
        serde_json::to_value(output)
            .map_err(|e| RunnableError::ExecutionFailed(format!("{}: {}", self.inner.name(), e)))
    }
}
