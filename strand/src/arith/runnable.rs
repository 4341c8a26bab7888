//! Single-operand arithmetic runnable: the second operand is fixed at construction.

use async_trait::async_trait;

use crate::error::RunnableError;
use crate::runnable::{BoxRunnable, RunConfig, Runnable};

use super::{Number, Operation};

/// Computes `input op operand`.
///
/// Plans build one per tool atom: the operand comes from input `b` and is bound
/// when the atom's deferred unit materializes; input `a` arrives at invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArithmeticRunnable {
    operation: Operation,
    operand: Number,
}

impl ArithmeticRunnable {
    pub fn new(operation: Operation, operand: impl Into<Number>) -> Self {
        Self {
            operation,
            operand: operand.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operand(&self) -> Number {
        self.operand
    }
}

impl Operation {
    /// Factory for this operation's runnable; the argument becomes the bound operand.
    pub fn factory(self) -> impl Fn(Number) -> BoxRunnable<Number, Number> + Send + Sync + 'static {
        move |operand| Box::new(ArithmeticRunnable::new(self, operand))
    }
}

#[async_trait]
impl Runnable<Number, Number> for ArithmeticRunnable {
    fn name(&self) -> &str {
        self.operation.runnable_name()
    }

    async fn invoke(&self, input: Number, _config: &RunConfig) -> Result<Number, RunnableError> {
        self.operation.apply(input, self.operand)
    }
}
