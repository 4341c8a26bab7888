//! Plan execution: validate → order → build one deferred unit per tool atom →
//! run the units in order, recording each result → report the final atom's value.

use async_trait::async_trait;
use serde_json::Value;

use crate::arith::{Number, Operation};
use crate::error::RunnableError;
use crate::runnable::{DeferredRunnable, RunConfig, Runnable};

use super::logging::{
    log_atom_complete, log_atom_start, log_plan_complete, log_plan_error, log_plan_start,
};
use super::{
    topological_order, validate, AtomBody, AtomId, AtomInput, AtomPlan, PlanError, ResultsContext,
    ValidationError,
};

/// Plan input: JSON text, a parsed JSON value, or an already validated plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanDocument {
    Text(String),
    Json(Value),
    Parsed(AtomPlan),
}

impl PlanDocument {
    /// Validates the document into an [`AtomPlan`].
    pub fn into_plan(self) -> Result<AtomPlan, PlanError> {
        match self {
            Self::Text(text) => AtomPlan::from_json_str(&text),
            Self::Json(value) => validate(&value),
            Self::Parsed(plan) => Ok(plan),
        }
    }
}

impl From<&str> for PlanDocument {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PlanDocument {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for PlanDocument {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<AtomPlan> for PlanDocument {
    fn from(plan: AtomPlan) -> Self {
        Self::Parsed(plan)
    }
}

/// Deferred arithmetic unit for one tool atom.
///
/// Materializes `operation(b)` and invokes it with `a`; both operands are read
/// from the results context at invocation time.
pub type AtomUnit = DeferredRunnable<Number, Number, Number>;

/// One tool atom ready to run.
#[derive(Clone)]
pub struct ScheduledAtom {
    pub atom: AtomId,
    pub unit: AtomUnit,
}

/// Tool atoms in execution order plus what the final atom reports.
#[derive(Clone)]
pub struct ExecutionPlan {
    pub steps: Vec<ScheduledAtom>,
    pub final_atom: AtomId,
    /// First dependency of the final atom; `None` fails at report time.
    pub report: Option<AtomId>,
}

impl ExecutionPlan {
    pub fn order(&self) -> Vec<AtomId> {
        self.steps.iter().map(|step| step.atom).collect()
    }
}

/// Executes atom plans. Stateless; every execution gets a fresh results context.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanExecutor;

impl PlanExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Validates, orders, and runs a plan; returns the value the final atom reports.
    pub async fn execute(&self, document: impl Into<PlanDocument>) -> Result<Number, PlanError> {
        self.execute_with_config(document.into(), &RunConfig::default())
            .await
    }

    /// Like [`execute`](Self::execute), keeping the caller's metadata.
    pub async fn execute_with_config(
        &self,
        document: PlanDocument,
        config: &RunConfig,
    ) -> Result<Number, PlanError> {
        let result = Self::validate_and_run(document, config).await;
        match &result {
            Ok(value) => log_plan_complete(*value),
            Err(e) => log_plan_error(e),
        }
        result
    }

    async fn validate_and_run(
        document: PlanDocument,
        config: &RunConfig,
    ) -> Result<Number, PlanError> {
        let plan = document.into_plan()?;
        let scheduled = Self::prepare(&plan)?;
        Self::run(&scheduled, config).await
    }

    /// Orders the plan's tool atoms and builds their deferred units.
    pub fn prepare(plan: &AtomPlan) -> Result<ExecutionPlan, PlanError> {
        let final_atom = plan
            .final_atom()
            .ok_or(ValidationError::Empty)?;
        let order = topological_order(plan.atoms())?;

        let steps = order
            .into_iter()
            .filter_map(|atom| match &atom.body {
                AtomBody::Tool { operation, input } => Some(ScheduledAtom {
                    atom: atom.id,
                    unit: atom_unit(atom.id, *operation, *input),
                }),
                AtomBody::Final => None,
            })
            .collect();

        Ok(ExecutionPlan {
            steps,
            final_atom: final_atom.id,
            report: final_atom.depends_on.first().copied(),
        })
    }

    /// Runs prepared steps under a config of its own: `config`'s metadata plus a
    /// fresh results context that each step's value is recorded into.
    pub async fn run(scheduled: &ExecutionPlan, config: &RunConfig) -> Result<Number, PlanError> {
        log_plan_start(scheduled.steps.len() + 1, &scheduled.order());
        let mut run_config = RunConfig {
            metadata: config.metadata.clone(),
            results: ResultsContext::new(),
        };

        for step in &scheduled.steps {
            log_atom_start(step.atom, step.unit.name());
            let value = step
                .unit
                .invoke(Number::default(), &run_config)
                .await
                .map_err(|e| attribute(step.atom, e))?;
            run_config.results.record(step.atom, value)?;
            log_atom_complete(step.atom, value);
        }

        let reference = scheduled.report.ok_or(PlanError::MissingFinalReference {
            atom: scheduled.final_atom,
        })?;
        run_config
            .results
            .get(reference)
            .ok_or(PlanError::UnresolvedReference {
                atom: scheduled.final_atom,
                reference,
            })
    }
}

fn atom_unit(atom: AtomId, operation: Operation, input: AtomInput) -> AtomUnit {
    let (a, b) = (input.a, input.b);
    DeferredRunnable::new(operation.factory(), move |config: &RunConfig| {
        Ok(config.results.resolve(atom, &b)?)
    })
    .with_invoke_arg(move |config: &RunConfig| Ok(config.results.resolve(atom, &a)?))
    .with_name(format!("{}#{}", operation.runnable_name(), atom))
}

/// Attaches the atom id to a step failure.
fn attribute(atom: AtomId, err: RunnableError) -> PlanError {
    match err {
        RunnableError::Plan(e) => e,
        RunnableError::DivisionByZero => PlanError::DivisionByZero { atom },
        other => PlanError::StepFailed {
            atom,
            message: other.to_string(),
        },
    }
}

#[async_trait]
impl Runnable<PlanDocument, Number> for PlanExecutor {
    fn name(&self) -> &str {
        "PlanExecutor"
    }

    async fn invoke(&self, input: PlanDocument, config: &RunConfig) -> Result<Number, RunnableError> {
        Ok(self.execute_with_config(input, config).await?)
    }
}
