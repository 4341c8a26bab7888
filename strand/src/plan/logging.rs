//! Logging utilities for plan execution.
//!
//! Structured events for plan start/finish and per-atom execution.

use crate::arith::Number;

use super::{AtomId, PlanError};

/// Log plan execution start, after validation and ordering.
pub fn log_plan_start(atom_count: usize, order: &[AtomId]) {
    tracing::info!(atom_count, ?order, "Starting plan execution");
}

/// Log atom execution start.
pub fn log_atom_start(atom: AtomId, unit: &str) {
    tracing::debug!(atom, unit, "Starting atom execution");
}

/// Log atom execution completion with its recorded value.
pub fn log_atom_complete(atom: AtomId, value: Number) {
    tracing::debug!(atom, %value, "Atom execution complete");
}

/// Log plan execution completion.
pub fn log_plan_complete(result: Number) {
    tracing::info!(%result, "Plan execution complete");
}

/// Log plan execution error.
pub fn log_plan_error(error: &PlanError) {
    tracing::error!(?error, "Plan execution error");
}
