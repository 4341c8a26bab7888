//! Prompt templates with `{key}` placeholders filled from a JSON object.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::error::RunnableError;
use crate::runnable::{RunConfig, Runnable};

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Fills `{key}` placeholders from a JSON object.
///
/// String values are inserted as-is, other values as JSON text. Placeholders
/// with no matching key are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFormatterRunnable {
    template: String,
}

impl PromptFormatterRunnable {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Renders the template against `values`.
    pub fn format(&self, values: &Map<String, Value>) -> String {
        placeholder_pattern()
            .replace_all(&self.template, |caps: &Captures<'_>| match values.get(&caps[1]) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

#[async_trait]
impl Runnable<Value, String> for PromptFormatterRunnable {
    fn name(&self) -> &str {
        "PromptFormatterRunnable"
    }

    async fn invoke(&self, input: Value, _config: &RunConfig) -> Result<String, RunnableError> {
        match input {
            Value::Object(values) => Ok(self.format(&values)),
            Value::Null => Ok(self.format(&Map::new())),
            other => Err(RunnableError::invalid_input(
                self.name(),
                format!("expected a JSON object, got {}", other),
            )),
        }
    }
}
