//! Unification algorithm: syntactic most general unifiers with argument threading.

use thiserror::Error;

use super::{CompositionError, Substitution};
use crate::syntax::{Term, Var};

/// Result of a unification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyResult {
    /// Unification succeeded with the given most general unifier.
    Success(Substitution),
    /// Unification failed.
    Failure(UnifyError),
}

impl UnifyResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UnifyResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UnifyResult::Failure(_))
    }

    /// The unifier, if there is one.
    pub fn success(self) -> Option<Substitution> {
        match self {
            UnifyResult::Success(subst) => Some(subst),
            UnifyResult::Failure(_) => None,
        }
    }
}

/// Reasons why unification can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    /// Function symbols don't match.
    #[error("symbol clash: {expected} vs {found}")]
    SymbolClash { expected: String, found: String },
    /// Same symbol applied to a different number of arguments.
    #[error("arity mismatch for {symbol}: {expected} vs {found}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },
    /// Occurs check failed: the variable would be bound to a term containing it.
    #[error("cyclic binding: {var} occurs in {term}")]
    Cyclic { var: Var, term: Term },
    /// Threading produced overlapping bindings. Never expected.
    #[error(transparent)]
    Composition(#[from] CompositionError),
}

/// Compute the most general unifier of two terms.
///
/// Arguments are unified left to right. Each position is instantiated under
/// the bindings found so far before it is unified, and its bindings are then
/// composed on top, so `f(X, X)` against `f(a, b)` fails at the second
/// position.
pub fn unify(lhs: &Term, rhs: &Term) -> UnifyResult {
    match unify_terms(lhs, rhs) {
        Ok(subst) => UnifyResult::Success(subst),
        Err(e) => UnifyResult::Failure(e),
    }
}

fn unify_terms(lhs: &Term, rhs: &Term) -> Result<Substitution, UnifyError> {
    match (lhs, rhs) {
        (Term::Var(a), Term::Var(b)) if a == b => Ok(Substitution::empty()),
        (Term::Var(var), other) | (other, Term::Var(var)) => bind(*var, other),
        (Term::App(f, xs), Term::App(g, ys)) => {
            if f != g {
                return Err(UnifyError::SymbolClash {
                    expected: f.clone(),
                    found: g.clone(),
                });
            }
            if xs.len() != ys.len() {
                return Err(UnifyError::ArityMismatch {
                    symbol: f.clone(),
                    expected: xs.len(),
                    found: ys.len(),
                });
            }
            unify_args(xs, ys)
        }
    }
}

fn bind(var: Var, term: &Term) -> Result<Substitution, UnifyError> {
    if term.occurs(var) {
        return Err(UnifyError::Cyclic {
            var,
            term: term.clone(),
        });
    }
    Ok(Substitution::singleton(var, term.clone()))
}

fn unify_args(lhs: &[Term], rhs: &[Term]) -> Result<Substitution, UnifyError> {
    let mut subst = Substitution::empty();
    for (l, r) in lhs.iter().zip(rhs) {
        let fst = subst.apply_to_term(l);
        let snd = subst.apply_to_term(r);
        let step = unify_terms(&fst, &snd)?;
        subst = subst.compose(&step)?;
    }
    Ok(subst)
}
