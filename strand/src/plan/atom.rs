//! Atom plan model: validated atoms, their inputs, and the plan container.

use std::fmt;

use crate::arith::{Number, Operation};

/// Atom identifier, unique within a plan.
pub type AtomId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    Tool,
    Final,
}

impl AtomKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tool => "tool",
            Self::Final => "final",
        }
    }
}

/// One operand of a tool atom: a literal or `<result_of_N>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    Literal(Number),
    Reference(AtomId),
}

impl InputValue {
    pub fn reference(&self) -> Option<AtomId> {
        match self {
            Self::Reference(id) => Some(*id),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(n) => write!(f, "{}", n),
            Self::Reference(id) => write!(f, "<result_of_{}>", id),
        }
    }
}

/// Operands of a tool atom; the result is `a op b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomInput {
    pub a: InputValue,
    pub b: InputValue,
}

/// What an atom does.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomBody {
    Tool {
        operation: Operation,
        input: AtomInput,
    },
    /// Reports the result of its first dependency.
    Final,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub id: AtomId,
    pub name: String,
    pub body: AtomBody,
    pub depends_on: Vec<AtomId>,
}

impl Atom {
    pub fn kind(&self) -> AtomKind {
        match self.body {
            AtomBody::Tool { .. } => AtomKind::Tool,
            AtomBody::Final => AtomKind::Final,
        }
    }

    pub fn is_final(&self) -> bool {
        self.kind() == AtomKind::Final
    }

    /// Atom ids named by `<result_of_N>` inputs, `a` before `b`.
    pub fn references(&self) -> impl Iterator<Item = AtomId> + '_ {
        let refs = match &self.body {
            AtomBody::Tool { input, .. } => [input.a.reference(), input.b.reference()],
            AtomBody::Final => [None, None],
        };
        refs.into_iter().flatten()
    }
}

/// A validated plan. The last atom is the single final atom.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomPlan {
    atoms: Vec<Atom>,
}

impl AtomPlan {
    /// Wraps atoms already checked by [`validate`](super::validate).
    pub(crate) fn from_validated(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The final atom. `None` only for a plan that was never validated.
    pub fn final_atom(&self) -> Option<&Atom> {
        self.atoms.last().filter(|atom| atom.is_final())
    }

    pub fn tool_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(|atom| !atom.is_final())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(id: AtomId, a: InputValue, b: InputValue, deps: Vec<AtomId>) -> Atom {
        Atom {
            id,
            name: "add".into(),
            body: AtomBody::Tool {
                operation: Operation::Add,
                input: AtomInput { a, b },
            },
            depends_on: deps,
        }
    }

    #[test]
    fn references_lists_a_then_b() {
        let atom = tool(
            3,
            InputValue::Reference(2),
            InputValue::Reference(1),
            vec![1, 2],
        );
        assert_eq!(atom.references().collect::<Vec<_>>(), vec![2, 1]);

        let literal = tool(1, InputValue::Literal(1.into()), InputValue::Literal(2.into()), vec![]);
        assert_eq!(literal.references().count(), 0);
    }

    #[test]
    fn input_value_display_round_trips_reference_syntax() {
        assert_eq!(InputValue::Reference(4).to_string(), "<result_of_4>");
        assert_eq!(InputValue::Literal(Number::Float(0.8)).to_string(), "0.8");
    }

    #[test]
    fn final_atom_is_last() {
        let plan = AtomPlan::from_validated(vec![
            tool(1, InputValue::Literal(1.into()), InputValue::Literal(2.into()), vec![]),
            Atom {
                id: 2,
                name: "final".into(),
                body: AtomBody::Final,
                depends_on: vec![1],
            },
        ]);
        assert_eq!(plan.final_atom().map(|a| a.id), Some(2));
        assert_eq!(plan.tool_atoms().count(), 1);
        assert_eq!(plan.atoms()[0].kind().as_str(), "tool");
    }
}
