//! Chat loop: history → model → (plan → executor → tool message → model)*.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::RunnableError;
use crate::llm::{ChatModelRunnable, LlmClient};
use crate::message::Message;
use crate::plan::{PlanDocument, PlanExecutor};
use crate::runnable::{RunConfig, Runnable};

use super::prompt::calculator_system_prompt;
use super::reply::{extract_plan, split_thinking};
use super::{ChatHistory, ChatSettings};

/// Drives a conversation and executes the atom plans the model writes.
///
/// For every non-system message the model is queried with the full history.
/// When its reply carries a plan, the plan runs and its result (or error) goes
/// back as a [`Message::Tool`], and the model is queried again, at most
/// `max_plan_rounds` times per message.
pub struct ChatRunner {
    model: ChatModelRunnable,
    executor: PlanExecutor,
    history: ChatHistory,
    settings: ChatSettings,
    config: RunConfig,
}

impl ChatRunner {
    pub fn new(llm: Arc<dyn LlmClient>, settings: ChatSettings) -> Self {
        Self {
            model: ChatModelRunnable::new(llm),
            executor: PlanExecutor::new(),
            history: ChatHistory::from_settings(&settings),
            settings,
            config: RunConfig::default(),
        }
    }

    /// Starts the history with the calculator system prompt.
    pub fn with_calculator_prompt(mut self) -> Self {
        let prompt = calculator_system_prompt(&self.settings);
        self.history.add_message(Message::system(prompt));
        self
    }

    /// Metadata passed to the model and plan runs.
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Appends `messages` in order, answering each non-system one.
    ///
    /// Returns the assistant and tool messages produced, in order. An LLM
    /// failure aborts; plan failures are reported to the model instead.
    pub async fn add_messages(
        &mut self,
        messages: Vec<Message>,
    ) -> Result<Vec<Message>, RunnableError> {
        let mut produced = Vec::new();
        for message in messages {
            let answer = !message.is_system();
            tracing::debug!(role = message.role().as_str(), "chat message added");
            self.history.add_message(message);
            if answer {
                self.respond(&mut produced).await?;
            }
        }
        Ok(produced)
    }

    async fn respond(&mut self, produced: &mut Vec<Message>) -> Result<(), RunnableError> {
        let mut rounds = 0;
        loop {
            let response = self
                .model
                .invoke(self.history.messages(), &self.config)
                .await?;
            let (thinking, answer) = split_thinking(&response.content);
            if let Some(thinking) = thinking {
                tracing::debug!(thinking, "model reasoning");
            }
            let plan = extract_plan(
                answer,
                &self.settings.plan_open_tag,
                &self.settings.plan_close_tag,
            )
            .map(str::to_string);
            self.record(Message::assistant(answer), produced);

            let Some(plan) = plan else {
                return Ok(());
            };
            if rounds == self.settings.max_plan_rounds {
                tracing::warn!(rounds, "plan round limit reached, not executing");
                return Ok(());
            }
            rounds += 1;
            let result = self.run_plan(plan).await;
            self.record(result, produced);
        }
    }

    async fn run_plan(&self, plan: String) -> Message {
        let call_id = format!("call_{}", Uuid::new_v4().simple());
        let content = match self
            .executor
            .execute_with_config(PlanDocument::from(plan), &self.config)
            .await
        {
            Ok(value) => value.format_fixed(self.settings.result_precision),
            Err(e) => {
                tracing::warn!(error = %e, "plan from model failed");
                format!("error: {}", e)
            }
        };
        Message::tool(content, call_id)
    }

    fn record(&mut self, message: Message, produced: &mut Vec<Message>) {
        self.history.add_message(message.clone());
        produced.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    /// **Scenario**: a system message alone never queries the model.
    #[tokio::test]
    async fn system_message_is_not_answered() {
        let llm = Arc::new(MockLlm::with_reply("hi"));
        let mut runner = ChatRunner::new(llm.clone(), ChatSettings::default());
        let produced = runner
            .add_messages(vec![Message::system("be brief")])
            .await
            .unwrap();
        assert!(produced.is_empty());
        assert_eq!(llm.call_count(), 0);
        assert_eq!(runner.history().len(), 1);
    }

    /// **Scenario**: the think block is stripped before the reply is stored.
    #[tokio::test]
    async fn stores_answer_without_thinking() {
        let llm = Arc::new(MockLlm::with_reply("<think>hmm</think>\n\nBlue light scatters."));
        let mut runner = ChatRunner::new(llm, ChatSettings::default());
        let produced = runner
            .add_messages(vec![Message::user("Why is the sky blue?")])
            .await
            .unwrap();
        assert_eq!(produced, vec![Message::assistant("Blue light scatters.")]);
    }
}
