//! One-step rewriting with confirmed rules.

use super::critical::adopt_fresh;
use crate::syntax::{Position, Rule, Term, Var, VarNames};
use crate::unify::match_term;

/// A single rewrite step applied somewhere inside a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub position: Position,
    pub result: Term,
    /// Identities given to right-side variables the match left unbound,
    /// paired with the rule variables they stand for.
    pub fresh: Vec<(Var, Var)>,
}

/// Rewrite the subterm at `position` with `rule`, if its left side matches there.
///
/// A rule may mention variables on its right side that its left side lacks.
/// Those get identities from `first_free` upward, so the rewritten term never
/// shares a variable with the rule.
pub fn rewrite_at(term: &Term, rule: &Rule, position: &Position, first_free: usize) -> Option<Rewrite> {
    let redex = term.subterm(position)?;
    let mut sigma = match_term(&rule.lhs, redex)?;
    let mut fresh = Vec::new();
    for var in rule.rhs.variables() {
        if sigma.lookup(var).is_none() {
            let new_var = Var::new(first_free + fresh.len());
            sigma.bind(var, Term::Var(new_var));
            fresh.push((new_var, var));
        }
    }
    let result = term.replace_at(position, sigma.apply_to_term(&rule.rhs))?;
    Some(Rewrite {
        position: position.clone(),
        result,
        fresh,
    })
}

/// Rewrite at the leftmost-outermost position where `rule` applies.
pub fn rewrite_once(term: &Term, rule: &Rule, first_free: usize) -> Option<Rewrite> {
    term.positions()
        .into_iter()
        .find_map(|position| rewrite_at(term, rule, &position, first_free))
}

/// Outcome of rewriting a term with a rule set until nothing applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub term: Term,
    pub steps: usize,
    /// False when the step limit stopped rewriting before a normal form.
    pub complete: bool,
}

/// Rewrite `term` with the first applicable rule until none applies or
/// `limit` steps have been taken.
///
/// `names` must cover every identity in `term` and `rules`; variables a step
/// introduces are allocated from it.
pub fn normalize(term: &Term, rules: &[Rule], limit: usize, names: &mut VarNames) -> Normalized {
    let mut current = term.clone();
    let mut steps = 0;
    while steps < limit {
        let first_free = names.high_water();
        match rules
            .iter()
            .find_map(|rule| rewrite_once(&current, rule, first_free))
        {
            Some(rewrite) => {
                let renaming = adopt_fresh(names, &rewrite.result.variables(), &rewrite.fresh);
                current = renaming.apply_to_term(&rewrite.result);
                steps += 1;
            }
            None => {
                return Normalized {
                    term: current,
                    steps,
                    complete: true,
                }
            }
        }
    }
    let first_free = names.high_water();
    let complete = rules
        .iter()
        .all(|rule| rewrite_once(&current, rule, first_free).is_none());
    Normalized {
        term: current,
        steps,
        complete,
    }
}
