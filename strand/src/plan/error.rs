//! Plan errors: structural validation failures and resolution/execution failures.

use thiserror::Error;

use super::AtomId;

/// A plan document failed structural validation. Nothing was executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("plan must be a JSON object")]
    NotAnObject,

    #[error("missing 'atoms' key")]
    MissingAtoms,

    #[error("'atoms' must be an array")]
    AtomsNotArray,

    #[error("plan has no atoms")]
    Empty,

    #[error("atom at index {index} must be an object")]
    AtomNotObject { index: usize },

    #[error("missing key '{key}' in atom at index {index}")]
    MissingKey { index: usize, key: &'static str },

    #[error("atom at index {index} has invalid kind {kind:?} (expected \"tool\" or \"final\")")]
    InvalidKind { index: usize, kind: String },

    #[error("atom at index {index} has a non-integer id")]
    InvalidId { index: usize },

    #[error("atom {atom} has a non-string name")]
    InvalidName { atom: AtomId },

    #[error("atom {atom}: dependsOn must be a list of integer ids")]
    InvalidDependsOn { atom: AtomId },

    #[error("tool atom {atom} is missing 'input'")]
    MissingInput { atom: AtomId },

    #[error("tool atom {atom}: 'input' must be an object")]
    InputNotObject { atom: AtomId },

    #[error("tool atom {atom}: missing input key '{key}'")]
    MissingInputKey { atom: AtomId, key: &'static str },

    #[error("tool atom {atom}: input '{key}' must be a number or <result_of_N>, got {value}")]
    InvalidInputValue {
        atom: AtomId,
        key: &'static str,
        value: String,
    },

    #[error("atom {atom} uses <result_of_{reference}> but does not list {reference} in dependsOn")]
    UndeclaredReference { atom: AtomId, reference: AtomId },

    #[error("last atom must be final, atom {atom} is a tool")]
    LastNotFinal { atom: AtomId },

    #[error("plan has more than one final atom ({first} and {second})")]
    MultipleFinal { first: AtomId, second: AtomId },

    #[error("atom {atom} depends on final atom {final_atom}")]
    DependsOnFinal { atom: AtomId, final_atom: AtomId },
}

/// Anything that can go wrong between receiving a plan and returning its result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("invalid plan: {0}")]
    Validation(#[from] ValidationError),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("cyclic dependency: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<AtomId> },

    #[error("duplicate atom id {0}")]
    DuplicateAtom(AtomId),

    #[error("atom {atom} depends on unknown atom {dependency}")]
    UnknownDependency { atom: AtomId, dependency: AtomId },

    #[error("atom {atom} needs the result of atom {reference}, which has not run")]
    UnresolvedReference { atom: AtomId, reference: AtomId },

    #[error("division by zero in atom {atom}")]
    DivisionByZero { atom: AtomId },

    #[error("final atom {atom} has no dependency to report")]
    MissingFinalReference { atom: AtomId },

    /// A step failed for a reason other than the ones above.
    #[error("atom {atom} failed: {message}")]
    StepFailed { atom: AtomId, message: String },
}

fn format_cycle(cycle: &[AtomId]) -> String {
    cycle
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
