//! The fixed operation table: name → pure binary function on [`Number`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RunnableError;

use super::Number;

/// Binary operation a tool atom can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Name used in plan documents (`"add"`, `"subtract"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Display name of the runnable that performs this operation.
    pub fn runnable_name(self) -> &'static str {
        match self {
            Self::Add => "AdditionRunnable",
            Self::Subtract => "SubtractionRunnable",
            Self::Multiply => "MultiplicationRunnable",
            Self::Divide => "DivisionRunnable",
        }
    }

    /// `a op b`.
    ///
    /// Two integers stay an integer for add/subtract/multiply unless the result
    /// overflows `i64`, in which case the float result is returned. Divide always
    /// yields a float and fails on a zero divisor.
    pub fn apply(self, a: Number, b: Number) -> Result<Number, RunnableError> {
        if let (Number::Int(x), Number::Int(y)) = (a, b) {
            let exact = match self {
                Self::Add => x.checked_add(y),
                Self::Subtract => x.checked_sub(y),
                Self::Multiply => x.checked_mul(y),
                Self::Divide => None,
            };
            if let Some(v) = exact {
                return Ok(Number::Int(v));
            }
        }
        let (x, y) = (a.as_f64(), b.as_f64());
        let v = match self {
            Self::Add => x + y,
            Self::Subtract => x - y,
            Self::Multiply => x * y,
            Self::Divide => {
                if b.is_zero() {
                    return Err(RunnableError::DivisionByZero);
                }
                x / y
            }
        };
        Ok(Number::Float(v))
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown operation: {} (use add, subtract, multiply, or divide)",
                    s
                )
            })
    }
}
