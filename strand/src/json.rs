//! JSON glue runnables: parse text into a value, wrap a result into `{"result": ...}`.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::RunnableError;
use crate::runnable::{RunConfig, Runnable};

/// Parses JSON text into a [`Value`].
///
/// Empty (or whitespace-only) input and malformed JSON are
/// [`RunnableError::InvalidInput`]; `with_error_message` replaces the parser's
/// message with a fixed one.
#[derive(Debug, Clone, Default)]
pub struct JsonParserRunnable {
    error_message: Option<String>,
}

impl JsonParserRunnable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    fn fail(&self, detail: impl Into<String>) -> RunnableError {
        let message = self.error_message.clone().unwrap_or_else(|| detail.into());
        RunnableError::invalid_input(self.name(), message)
    }
}

#[async_trait]
impl Runnable<String, Value> for JsonParserRunnable {
    fn name(&self) -> &str {
        "JsonParserRunnable"
    }

    async fn invoke(&self, input: String, _config: &RunConfig) -> Result<Value, RunnableError> {
        if input.trim().is_empty() {
            return Err(self.fail("empty input"));
        }
        serde_json::from_str(&input).map_err(|e| self.fail(e.to_string()))
    }
}

/// Serializes any value as `{"result": value}` text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBuilderRunnable;

impl JsonBuilderRunnable {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<T> Runnable<T, String> for JsonBuilderRunnable
where
    T: Serialize + Send + 'static,
{
    fn name(&self) -> &str {
        "JsonBuilderRunnable"
    }

    async fn invoke(&self, input: T, _config: &RunConfig) -> Result<String, RunnableError> {
        let value = serde_json::to_value(&input)
            .map_err(|e| RunnableError::ExecutionFailed(format!("JsonBuilderRunnable: {}", e)))?;
        Ok(serde_json::json!({ "result": value }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// **Scenario**: valid JSON text parses to the matching value.
    #[tokio::test]
    async fn parser_reads_object() {
        let parser = JsonParserRunnable::new();
        let out = parser
            .invoke(r#"{"a": 1, "b": [true]}"#.to_string(), &RunConfig::default())
            .await
            .unwrap();
        assert_eq!(out, json!({"a": 1, "b": [true]}));
    }

    /// **Scenario**: empty and malformed input are invalid input; a custom message wins.
    #[tokio::test]
    async fn parser_rejects_empty_and_malformed() {
        let parser = JsonParserRunnable::new();
        let err = parser.invoke("   ".into(), &RunConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("empty input"), "{}", err);

        let parser = JsonParserRunnable::new().with_error_message("model did not return JSON");
        let err = parser.invoke("{oops".into(), &RunConfig::default()).await.unwrap_err();
        match err {
            RunnableError::InvalidInput { runnable, message } => {
                assert_eq!(runnable, "JsonParserRunnable");
                assert_eq!(message, "model did not return JSON");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    /// **Scenario**: the builder wraps any serializable value under "result".
    #[tokio::test]
    async fn builder_wraps_result() {
        let builder = JsonBuilderRunnable::new();
        let out = Runnable::<f64, String>::invoke(&builder, 4.824, &RunConfig::default())
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!({"result": 4.824}));
    }
}
