//! Runnable execution error types.
//!
//! Returned by `Runnable::invoke` and every runnable built on it (sequences,
//! deferred units, the plan executor, the chat runner).

use thiserror::Error;

use crate::plan::PlanError;

/// Runnable execution error.
///
/// Plan failures keep their typed [`PlanError`]; other runnables report
/// invalid input or a generic failure message.
#[derive(Debug, Error)]
pub enum RunnableError {
    /// Atom plan validation, resolution or execution failed.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// An arithmetic runnable was asked to divide by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The input handed to a runnable has the wrong shape for it.
    #[error("invalid input for {runnable}: {message}")]
    InvalidInput { runnable: String, message: String },

    /// The language model call failed.
    #[error("llm call failed: {0}")]
    Llm(String),

    /// Execution failed with a message.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

impl RunnableError {
    /// Shorthand for [`RunnableError::InvalidInput`].
    pub fn invalid_input(runnable: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            runnable: runnable.into(),
            message: message.into(),
        }
    }
}
