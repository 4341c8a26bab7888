use std::collections::HashMap;

use crate::arith::Number;

use super::{AtomId, InputValue, PlanError};

/// Results of executed atoms, keyed by atom id. Each id is written once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsContext {
    values: HashMap<AtomId, Number>,
}

impl ResultsContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: AtomId) -> Option<Number> {
        self.values.get(&id).copied()
    }

    pub fn contains(&self, id: AtomId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stores `value` for `id`; a second write for the same id is an error.
    pub fn record(&mut self, id: AtomId, value: Number) -> Result<(), PlanError> {
        if self.values.contains_key(&id) {
            return Err(PlanError::DuplicateAtom(id));
        }
        self.values.insert(id, value);
        Ok(())
    }

    /// Literal as-is; a reference reads the recorded result or fails with
    /// [`PlanError::UnresolvedReference`] on behalf of `atom`.
    pub fn resolve(&self, atom: AtomId, value: &InputValue) -> Result<Number, PlanError> {
        match *value {
            InputValue::Literal(n) => Ok(n),
            InputValue::Reference(reference) => self
                .get(reference)
                .ok_or(PlanError::UnresolvedReference { atom, reference }),
        }
    }
}
