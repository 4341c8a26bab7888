//! Plan document validation: JSON in, [`AtomPlan`] out.
//!
//! Checks run per atom in document order, then across the whole plan. The first
//! failure is returned; nothing is executed for an invalid plan.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::arith::{Number, Operation};

use super::{Atom, AtomBody, AtomId, AtomInput, AtomPlan, InputValue, PlanError, ValidationError};

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*<\s*result_of_(-?\d+)\s*>\s*$").expect("reference pattern is valid")
    })
}

/// Parses `<result_of_N>` into `N`.
pub fn parse_reference(text: &str) -> Option<AtomId> {
    reference_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

impl AtomPlan {
    /// Parses and validates a plan from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, PlanError> {
        let document: Value =
            serde_json::from_str(text).map_err(|e| ValidationError::Json(e.to_string()))?;
        validate(&document)
    }

    /// Validates an already-parsed plan document.
    pub fn from_value(document: &Value) -> Result<Self, PlanError> {
        validate(document)
    }
}

/// Validates a plan document of the form `{"atoms": [...]}`.
///
/// Per atom: required keys `id`, `kind`, `name`, `dependsOn`; tool atoms need an
/// `input` object with `a` and `b`, each a number or `<result_of_N>` listed in
/// `dependsOn`, and a known operation name. Across the plan: the last atom is the
/// only final atom and no atom depends on it.
pub fn validate(document: &Value) -> Result<AtomPlan, PlanError> {
    let root = document.as_object().ok_or(ValidationError::NotAnObject)?;
    let raw_atoms = root
        .get("atoms")
        .ok_or(ValidationError::MissingAtoms)?
        .as_array()
        .ok_or(ValidationError::AtomsNotArray)?;
    if raw_atoms.is_empty() {
        return Err(ValidationError::Empty.into());
    }

    let atoms = raw_atoms
        .iter()
        .enumerate()
        .map(|(index, raw)| validate_atom(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    check_final(&atoms)?;
    Ok(AtomPlan::from_validated(atoms))
}

fn validate_atom(index: usize, raw: &Value) -> Result<Atom, PlanError> {
    let obj = raw
        .as_object()
        .ok_or(ValidationError::AtomNotObject { index })?;
    for key in ["id", "kind", "name", "dependsOn"] {
        if !obj.contains_key(key) {
            return Err(ValidationError::MissingKey { index, key }.into());
        }
    }

    let id = obj["id"]
        .as_i64()
        .ok_or(ValidationError::InvalidId { index })?;
    let kind = obj["kind"].as_str().unwrap_or_default();
    let name = obj["name"]
        .as_str()
        .ok_or(ValidationError::InvalidName { atom: id })?
        .to_string();
    let depends_on = obj["dependsOn"]
        .as_array()
        .and_then(|deps| deps.iter().map(Value::as_i64).collect::<Option<Vec<_>>>())
        .ok_or(ValidationError::InvalidDependsOn { atom: id })?;

    let body = match kind {
        "final" => AtomBody::Final,
        "tool" => {
            let input = validate_input(id, obj, &depends_on)?;
            let operation = name
                .parse::<Operation>()
                .map_err(|_| PlanError::UnknownOperation(name.clone()))?;
            AtomBody::Tool { operation, input }
        }
        _ => {
            return Err(ValidationError::InvalidKind {
                index,
                kind: obj["kind"].to_string(),
            }
            .into())
        }
    };

    Ok(Atom {
        id,
        name,
        body,
        depends_on,
    })
}

fn validate_input(
    atom: AtomId,
    obj: &Map<String, Value>,
    depends_on: &[AtomId],
) -> Result<AtomInput, PlanError> {
    let input = obj
        .get("input")
        .ok_or(ValidationError::MissingInput { atom })?
        .as_object()
        .ok_or(ValidationError::InputNotObject { atom })?;

    let operand = |key: &'static str| -> Result<InputValue, PlanError> {
        let raw = input
            .get(key)
            .ok_or(ValidationError::MissingInputKey { atom, key })?;
        let value = parse_input_value(raw).ok_or_else(|| ValidationError::InvalidInputValue {
            atom,
            key,
            value: raw.to_string(),
        })?;
        if let Some(reference) = value.reference() {
            if !depends_on.contains(&reference) {
                return Err(ValidationError::UndeclaredReference { atom, reference }.into());
            }
        }
        Ok(value)
    };

    Ok(AtomInput {
        a: operand("a")?,
        b: operand("b")?,
    })
}

fn parse_input_value(raw: &Value) -> Option<InputValue> {
    match raw {
        Value::String(text) => parse_reference(text).map(InputValue::Reference),
        other => Number::from_json(other).map(InputValue::Literal),
    }
}

fn check_final(atoms: &[Atom]) -> Result<(), PlanError> {
    let mut finals = atoms.iter().filter(|atom| atom.is_final());
    if let (Some(first), Some(second)) = (finals.next(), finals.next()) {
        return Err(ValidationError::MultipleFinal {
            first: first.id,
            second: second.id,
        }
        .into());
    }

    let Some(last) = atoms.last() else {
        return Err(ValidationError::Empty.into());
    };
    if !last.is_final() {
        return Err(ValidationError::LastNotFinal { atom: last.id }.into());
    }

    if let Some(dependent) = atoms.iter().find(|atom| atom.depends_on.contains(&last.id)) {
        return Err(ValidationError::DependsOnFinal {
            atom: dependent.id,
            final_atom: last.id,
        }
        .into());
    }
    Ok(())
}
