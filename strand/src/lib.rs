//! # Strand
//!
//! Composable async runnables and an atom-plan execution engine. A language model
//! writes a small JSON plan of arithmetic steps ("atoms"); strand validates it,
//! orders it by its dependencies, runs each step as a deferred runnable, and
//! reports the final value back to the model.
//!
//! ## Design principles
//!
//! - **One unit abstraction**: everything is a [`Runnable`] with `invoke`, `stream`
//!   and `batch`; [`RunnableExt::pipe`] chains units into a flat [`RunnableSequence`].
//! - **Validate first**: a plan is fully checked (shape, operations, references)
//!   before any atom runs. See [`plan::validate`].
//! - **Late binding**: each tool atom becomes a [`DeferredRunnable`] that reads its
//!   operands from the results of atoms that already ran.
//! - **Sequential and deterministic**: the same plan always runs in the same order.
//!
//! ## Main modules
//!
//! - [`plan`]: [`AtomPlan`], [`PlanExecutor`], [`topological_order`], [`PlanError`].
//! - [`runnable`]: [`Runnable`], [`RunConfig`], [`RunnableSequence`], [`DeferredRunnable`],
//!   [`RunnableLambda`], [`DictRunnable`].
//! - [`arith`]: [`Number`], [`Operation`], [`ArithmeticRunnable`].
//! - [`json`], [`prompt`]: JSON parse/build and prompt-template runnables.
//! - [`message`], [`llm`], [`chat`]: [`Message`], [`LlmClient`] with [`MockLlm`], and
//!   [`ChatRunner`], which executes the plans a model writes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use strand::{Number, PlanExecutor};
//!
//! # async fn demo() -> Result<(), strand::PlanError> {
//! let plan = serde_json::json!({"atoms": [
//!     {"id": 1, "kind": "tool", "name": "add", "input": {"a": 15, "b": 7}, "dependsOn": []},
//!     {"id": 2, "kind": "tool", "name": "multiply", "input": {"a": "<result_of_1>", "b": 3}, "dependsOn": [1]},
//!     {"id": 3, "kind": "tool", "name": "subtract", "input": {"a": "<result_of_2>", "b": 10}, "dependsOn": [2]},
//!     {"id": 4, "kind": "final", "name": "report", "dependsOn": [3]}
//! ]});
//! let result = PlanExecutor::new().execute(plan).await?;
//! assert_eq!(result, Number::Int(56));
//! # Ok(())
//! # }
//! ```

pub mod arith;
pub mod chat;
pub mod error;
pub mod json;
pub mod llm;
pub mod message;
pub mod plan;
pub mod prompt;
pub mod runnable;

pub use arith::{ArithmeticRunnable, Number, Operation};
pub use chat::{ChatHistory, ChatRunner, ChatSettings, CALCULATOR_SYSTEM_PROMPT};
pub use error::RunnableError;
pub use json::{JsonBuilderRunnable, JsonParserRunnable};
pub use llm::{ChatModelRunnable, LlmClient, LlmResponse, LlmUsage, MockLlm};
pub use message::{Message, Role};
pub use plan::{
    topological_order, Atom, AtomPlan, PlanDocument, PlanError, PlanExecutor, ResultsContext,
    ValidationError,
};
pub use prompt::PromptFormatterRunnable;
pub use runnable::{
    BoxRunnable, DeferredRunnable, DictRunnable, RunConfig, Runnable, RunnableExt,
    RunnableLambda, RunnableSequence,
};

#[cfg(test)]
mod test_logging {
    use ctor::ctor;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::Layer;

    #[ctor]
    fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter),
            )
            .try_init();
    }
}
