//! Critical pairs between rewrite rules.

use crate::syntax::{Equation, Position, Rule, Term, Var, VarNames};
use crate::unify::{unify, Substitution};

/// An overlap of one rule's left side into another's, reified as an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPair {
    /// Where the inner rule's left side overlaps the outer rule's left side.
    pub position: Position,
    pub equation: Equation,
    /// Identities introduced by renaming apart, paired with the ones they replace.
    pub fresh: Vec<(Var, Var)>,
}

/// Copy `rule` with its variables renamed to identities starting at `first_free`.
pub fn rename_apart(rule: &Rule, first_free: usize) -> (Rule, Vec<(Var, Var)>) {
    let mut renaming = Substitution::empty();
    let mut fresh = Vec::new();
    for (offset, var) in rule.variables().into_iter().enumerate() {
        let new_var = Var::new(first_free + offset);
        renaming.bind(var, Term::Var(new_var));
        fresh.push((new_var, var));
    }
    (rule.instantiate(&renaming), fresh)
}

/// All critical pairs from overlapping `inner` into non-variable positions of
/// `outer`'s left side.
///
/// `inner` is renamed apart from identities at or above `first_free`. For a
/// rule overlapping itself the root position is skipped. The equation's left
/// side is the outer rule applied to the whole overlapped term, its right
/// side the inner rule applied at the overlap.
pub fn critical_pairs(
    outer: &Rule,
    inner: &Rule,
    first_free: usize,
    self_overlap: bool,
) -> Vec<CriticalPair> {
    let (renamed, fresh) = rename_apart(inner, first_free);
    outer
        .lhs
        .non_variable_positions()
        .into_iter()
        .filter(|position| !(self_overlap && position.is_root()))
        .filter_map(|position| {
            let overlapped = outer.lhs.subterm(&position)?;
            let sigma = unify(overlapped, &renamed.lhs).success()?;
            let inner_step = outer.lhs.replace_at(&position, renamed.rhs.clone())?;
            let equation = Equation::new(
                sigma.apply_to_term(&outer.rhs),
                sigma.apply_to_term(&inner_step),
            );
            Some(CriticalPair {
                position,
                equation,
                fresh: fresh.clone(),
            })
        })
        .collect()
}

/// Re-allocate temporary identities through `names`.
///
/// `present` lists the variables of the item the identities ended up in. Each
/// temporary identity among them gets a real one named after the variable it
/// stands for with a prime, distinct from the other names in `present`.
pub fn adopt_fresh(names: &mut VarNames, present: &[Var], fresh: &[(Var, Var)]) -> Substitution {
    let mut taken: Vec<Var> = present
        .iter()
        .copied()
        .filter(|v| !fresh.iter().any(|(f, _)| f == v))
        .collect();
    let mut renaming = Substitution::empty();
    for (temp, original) in fresh {
        if !present.contains(temp) {
            continue;
        }
        let base = names
            .name(*original)
            .map(str::to_string)
            .unwrap_or_else(|| original.to_string());
        let name = names.primed_name(&base, &taken);
        let var = names.fresh(name);
        taken.push(var);
        renaming.bind(*temp, Term::Var(var));
    }
    renaming
}
