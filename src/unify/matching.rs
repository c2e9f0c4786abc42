//! One-way matching for rewriting.

use super::Substitution;
use crate::syntax::Term;

/// Find σ with `pattern`σ = `term`, binding only the pattern's variables.
///
/// Variables of `term` are treated as constants, so the pattern and the term
/// may share variable identities.
pub fn match_term(pattern: &Term, term: &Term) -> Option<Substitution> {
    let mut subst = Substitution::empty();
    match_with_subst(pattern, term, &mut subst).then_some(subst)
}

fn match_with_subst(pattern: &Term, term: &Term, subst: &mut Substitution) -> bool {
    match (pattern, term) {
        (Term::Var(v), t) => match subst.lookup(*v) {
            Some(bound) => bound == t,
            None => {
                subst.bind(*v, t.clone());
                true
            }
        },
        (Term::App(f, xs), Term::App(g, ys)) => {
            f == g
                && xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|(x, y)| match_with_subst(x, y, subst))
        }
        (Term::App(..), Term::Var(_)) => false,
    }
}
