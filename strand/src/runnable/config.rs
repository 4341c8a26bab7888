use serde_json::{Map, Value};

use crate::plan::ResultsContext;

/// Configuration handed to every `invoke`.
///
/// `results` carries the plan's results context: the plan executor owns a
/// config for the whole run and records each atom's value here before invoking
/// the next deferred unit, whose accessors read it back. Runnables outside a
/// plan see an empty context.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Free-form caller metadata (tags, run names); never interpreted by strand.
    pub metadata: Map<String, Value>,
    /// Results of atoms executed so far in the current plan run.
    pub results: ResultsContext,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_results(mut self, results: ResultsContext) -> Self {
        self.results = results;
        self
    }
}
