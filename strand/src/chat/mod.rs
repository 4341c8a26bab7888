//! Chat glue: bounded history, settings, reply parsing, and the plan-executing runner.

mod history;
mod prompt;
mod reply;
mod runner;
mod settings;

pub use history::{ChatEntry, ChatHistory};
pub use prompt::{calculator_system_prompt, CALCULATOR_SYSTEM_PROMPT};
pub use reply::{extract_plan, split_thinking};
pub use runner::ChatRunner;
pub use settings::{
    ChatSettings, ENV_MAX_CHAT_LENGTH, ENV_MAX_PLAN_ROUNDS, ENV_PLAN_CLOSE_TAG, ENV_PLAN_OPEN_TAG,
    ENV_PRESERVE_SYSTEM_MESSAGE, ENV_RESULT_PRECISION,
};
