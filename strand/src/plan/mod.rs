//! Atom plans: a JSON DAG of arithmetic steps, validated, ordered, and executed.
//!
//! A plan is `{"atoms": [...]}`. Tool atoms name an operation and two operands,
//! each a literal or `<result_of_N>`; the last atom is `final` and reports the
//! result of its first dependency.
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), strand::plan::PlanError> {
//! use strand::plan::PlanExecutor;
//!
//! let plan = r#"{"atoms": [
//!   {"id": 1, "kind": "tool", "name": "add", "input": {"a": 15, "b": 7}, "dependsOn": []},
//!   {"id": 2, "kind": "final", "name": "report", "dependsOn": [1]}
//! ]}"#;
//! let result = PlanExecutor::new().execute(plan).await?;
//! assert_eq!(result.to_string(), "22");
//! # Ok(())
//! # }
//! ```

mod atom;
mod context;
mod engine;
mod error;
pub mod logging;
mod resolve;
mod validate;

pub use atom::{Atom, AtomBody, AtomId, AtomInput, AtomKind, AtomPlan, InputValue};
pub use context::ResultsContext;
pub use engine::{AtomUnit, ExecutionPlan, PlanDocument, PlanExecutor, ScheduledAtom};
pub use error::{PlanError, ValidationError};
pub use resolve::topological_order;
pub use validate::{parse_reference, validate};
