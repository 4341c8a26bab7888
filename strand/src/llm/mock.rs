//! Mock LLM for tests: replays scripted replies and records what it was sent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::RunnableError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

/// Mock LLM: returns `replies[n]` on the n-th call, repeating the last reply
/// once the script runs out.
///
/// Every call's message list is recorded; see [`MockLlm::received`].
pub struct MockLlm {
    replies: Vec<String>,
    call_count: AtomicUsize,
    received: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Scripted mock; an empty script fails every call.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            call_count: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Mock that always answers `content`.
    pub fn with_reply(content: impl Into<String>) -> Self {
        Self::new([content.into()])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Message lists passed to each call, oldest first.
    pub fn received(&self) -> Vec<Vec<Message>> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, RunnableError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(messages.to_vec());
        let reply = self
            .replies
            .get(n)
            .or_else(|| self.replies.last())
            .ok_or_else(|| RunnableError::Llm("mock has no scripted replies".to_string()))?;
        Ok(LlmResponse::text(reply.clone()))
    }
}
