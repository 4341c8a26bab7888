//! Dependency resolution: a deterministic topological order over plan atoms.

use std::collections::HashMap;

use super::{Atom, AtomId, PlanError};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Orders atoms so every atom comes after all of its dependencies.
///
/// Depth-first from each atom in document order, visiting `dependsOn` in list
/// order, emitting an atom once all its dependencies are emitted. The same plan
/// always yields the same order. Uses an explicit stack, so deep chains do not
/// grow the call stack.
///
/// Fails with [`PlanError::DuplicateAtom`], [`PlanError::UnknownDependency`], or
/// [`PlanError::CyclicDependency`] (path from the repeated atom back to itself).
pub fn topological_order(atoms: &[Atom]) -> Result<Vec<&Atom>, PlanError> {
    let mut by_id: HashMap<AtomId, &Atom> = HashMap::with_capacity(atoms.len());
    for atom in atoms {
        if by_id.insert(atom.id, atom).is_some() {
            return Err(PlanError::DuplicateAtom(atom.id));
        }
    }
    for atom in atoms {
        if let Some(&dependency) = atom.depends_on.iter().find(|d| !by_id.contains_key(d)) {
            return Err(PlanError::UnknownDependency {
                atom: atom.id,
                dependency,
            });
        }
    }

    let mut marks: HashMap<AtomId, Mark> = HashMap::with_capacity(atoms.len());
    let mut order = Vec::with_capacity(atoms.len());

    for root in atoms {
        if marks.contains_key(&root.id) {
            continue;
        }
        marks.insert(root.id, Mark::Visiting);
        // (atom, index of the next dependency to visit)
        let mut stack: Vec<(&Atom, usize)> = vec![(root, 0)];

        while let Some(top) = stack.last_mut() {
            let atom = top.0;
            let next = atom.depends_on.get(top.1).copied();
            top.1 += 1;

            let Some(dependency) = next else {
                marks.insert(atom.id, Mark::Done);
                order.push(atom);
                stack.pop();
                continue;
            };
            match marks.get(&dependency) {
                Some(Mark::Done) => {}
                Some(Mark::Visiting) => {
                    let start = stack
                        .iter()
                        .position(|(a, _)| a.id == dependency)
                        .unwrap_or(0);
                    let mut cycle: Vec<AtomId> = stack[start..].iter().map(|(a, _)| a.id).collect();
                    cycle.push(dependency);
                    return Err(PlanError::CyclicDependency { cycle });
                }
                None => {
                    marks.insert(dependency, Mark::Visiting);
                    stack.push((by_id[&dependency], 0));
                }
            }
        }
    }

    Ok(order)
}
