//! LLM client abstraction for the chat runner.
//!
//! The chat runner needs a callable that turns a message list into assistant
//! text; this module defines that trait, a runnable adapter, and a scripted mock.

mod mock;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RunnableError;
use crate::message::Message;
use crate::runnable::{RunConfig, Runnable};

pub use mock::MockLlm;

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from an LLM completion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmResponse {
    /// Assistant message content (plain text, may include a `<think>` block).
    pub content: String,
    /// Token usage for this call, when the provider reports it.
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }
}

/// LLM client: given messages, returns the assistant reply.
///
/// Implementations: [`MockLlm`] (scripted replies). Provider clients live
/// outside this crate and implement the same trait.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, RunnableError>;
}

/// Adapts an [`LlmClient`] to `Runnable<Vec<Message>, LlmResponse>` so it can sit in a pipeline.
#[derive(Clone)]
pub struct ChatModelRunnable {
    client: Arc<dyn LlmClient>,
}

impl ChatModelRunnable {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Runnable<Vec<Message>, LlmResponse> for ChatModelRunnable {
    fn name(&self) -> &str {
        "ChatModelRunnable"
    }

    async fn invoke(
        &self,
        input: Vec<Message>,
        _config: &RunConfig,
    ) -> Result<LlmResponse, RunnableError> {
        if input.is_empty() {
            return Err(RunnableError::invalid_input(self.name(), "no messages"));
        }
        let response = self.client.invoke(&input).await?;
        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "llm usage"
            );
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubLlm {
        content: String,
    }

    #[async_trait]
    impl LlmClient for StubLlm {
        async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, RunnableError> {
            Ok(LlmResponse {
                content: format!("{} ({} messages)", self.content, messages.len()),
                usage: Some(LlmUsage {
                    prompt_tokens: 3,
                    completion_tokens: 2,
                    total_tokens: 5,
                }),
            })
        }
    }

    /// **Scenario**: the runnable adapter forwards messages and returns the reply.
    #[tokio::test]
    async fn chat_model_runnable_forwards_messages() {
        let model = ChatModelRunnable::new(Arc::new(StubLlm {
            content: "ok".into(),
        }));
        let reply = model
            .invoke(
                vec![Message::system("s"), Message::user("u")],
                &RunConfig::default(),
            )
            .await
            .unwrap();
        assert_eq!(reply.content, "ok (2 messages)");
        assert_eq!(reply.usage.map(|u| u.total_tokens), Some(5));
    }

    /// **Scenario**: an empty message list is rejected before calling the client.
    #[tokio::test]
    async fn empty_messages_are_invalid_input() {
        let model = ChatModelRunnable::new(Arc::new(StubLlm {
            content: "ok".into(),
        }));
        let err = model.invoke(vec![], &RunConfig::default()).await.unwrap_err();
        assert!(matches!(err, RunnableError::InvalidInput { .. }));
    }
}
