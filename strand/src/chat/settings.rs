//! Chat runner settings, read from the environment.
//!
//! Sources follow the `config` crate's priority: existing env > project `.env` >
//! `~/.config/strand/config.toml` `[env]` table. Unset variables keep the defaults.

use std::path::Path;

use env_config::LoadError;

pub const ENV_MAX_CHAT_LENGTH: &str = "STRAND_MAX_CHAT_LENGTH";
pub const ENV_PRESERVE_SYSTEM_MESSAGE: &str = "STRAND_PRESERVE_SYSTEM_MESSAGE";
pub const ENV_PLAN_OPEN_TAG: &str = "STRAND_PLAN_OPEN_TAG";
pub const ENV_PLAN_CLOSE_TAG: &str = "STRAND_PLAN_CLOSE_TAG";
pub const ENV_MAX_PLAN_ROUNDS: &str = "STRAND_MAX_PLAN_ROUNDS";
pub const ENV_RESULT_PRECISION: &str = "STRAND_RESULT_PRECISION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    /// Most messages kept in history.
    pub max_chat_length: usize,
    /// Pin the first system message when trimming.
    pub preserve_system_message: bool,
    /// Tags delimiting an atom plan inside a model reply.
    pub plan_open_tag: String,
    pub plan_close_tag: String,
    /// Plans executed per user message before the runner stops re-querying.
    pub max_plan_rounds: usize,
    /// Decimals in plan results reported back to the model.
    pub result_precision: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_chat_length: 50,
            preserve_system_message: true,
            plan_open_tag: "<atom_plan>".to_string(),
            plan_close_tag: "</atom_plan>".to_string(),
            max_plan_rounds: 3,
            result_precision: 2,
        }
    }
}

impl ChatSettings {
    /// Applies `.env` and XDG config to the environment, then reads settings.
    ///
    /// `dotenv_dir` overrides where `.env` is looked up (default: current directory).
    pub fn load(dotenv_dir: Option<&Path>) -> Result<Self, LoadError> {
        env_config::load_and_apply("strand", dotenv_dir)?;
        Self::from_env()
    }

    /// Reads settings from the process environment only.
    pub fn from_env() -> Result<Self, LoadError> {
        let mut settings = Self::default();
        if let Some(v) = env_config::env_value(ENV_MAX_CHAT_LENGTH)? {
            settings.max_chat_length = v;
        }
        if let Some(v) = env_config::env_value(ENV_PRESERVE_SYSTEM_MESSAGE)? {
            settings.preserve_system_message = v;
        }
        if let Some(v) = env_config::env_value(ENV_PLAN_OPEN_TAG)? {
            settings.plan_open_tag = v;
        }
        if let Some(v) = env_config::env_value(ENV_PLAN_CLOSE_TAG)? {
            settings.plan_close_tag = v;
        }
        if let Some(v) = env_config::env_value(ENV_MAX_PLAN_ROUNDS)? {
            settings.max_plan_rounds = v;
        }
        if let Some(v) = env_config::env_value(ENV_RESULT_PRECISION)? {
            settings.result_precision = v;
        }
        tracing::debug!(?settings, "chat settings loaded");
        Ok(settings)
    }
}
