//! Mixed integer/float scalar used by plans and arithmetic runnables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A plan scalar: integers stay integers until an operation needs a float.
///
/// Deserializes from any JSON number (integers that fit `i64` become `Int`,
/// everything else `Float`) and serializes back as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Reads a JSON number. Returns `None` for anything else (strings, bools, null).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Self::Int(i)),
                None => n.as_f64().map(Self::Float),
            },
            _ => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(i) => i == 0,
            Self::Float(f) => f == 0.0,
        }
    }

    /// Fixed-point text with `precision` decimals, e.g. `56.00`.
    pub fn format_fixed(self, precision: usize) -> String {
        format!("{:.*}", precision, self.as_f64())
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_keeps_integers_and_floats_apart() {
        assert_eq!(Number::from_json(&json!(15)), Some(Number::Int(15)));
        assert_eq!(Number::from_json(&json!(-3)), Some(Number::Int(-3)));
        assert_eq!(Number::from_json(&json!(2.5)), Some(Number::Float(2.5)));
        assert_eq!(Number::from_json(&json!("15")), None);
        assert_eq!(Number::from_json(&json!(true)), None);
    }

    #[test]
    fn deserialize_untagged() {
        let n: Number = serde_json::from_str("7").unwrap();
        assert_eq!(n, Number::Int(7));
        let n: Number = serde_json::from_str("0.8").unwrap();
        assert_eq!(n, Number::Float(0.8));
        assert_eq!(serde_json::to_string(&Number::Int(56)).unwrap(), "56");
    }

    #[test]
    fn display_and_fixed_formatting() {
        assert_eq!(Number::Int(56).to_string(), "56");
        assert_eq!(Number::Float(0.25).to_string(), "0.25");
        assert_eq!(Number::Int(56).format_fixed(2), "56.00");
        assert_eq!(Number::Float(2.0 / 3.0).format_fixed(2), "0.67");
    }

    #[test]
    fn zero_detection_covers_both_variants() {
        assert!(Number::Int(0).is_zero());
        assert!(Number::Float(0.0).is_zero());
        assert!(Number::Float(-0.0).is_zero());
        assert!(!Number::Float(1e-12).is_zero());
    }
}
