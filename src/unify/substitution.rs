//! Substitution: mapping variables to terms.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use crate::syntax::{Render, Term, Var, VarNames};

/// Composition was asked to bind a variable that is already bound.
///
/// A well-formed unification derivation never rebinds a variable, so this
/// signals a defect in the caller rather than a user error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("substitution composition rebinds {var}: domains must be disjoint")]
pub struct CompositionError {
    pub var: Var,
}

/// A substitution σ = {X₁ ↦ t₁, ..., Xₙ ↦ tₙ}.
///
/// Bindings keep their insertion order, which is the order unification
/// discovered them in. Equality ignores that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    bindings: IndexMap<Var, Term>,
}

impl Substitution {
    /// Create an empty substitution (identity).
    pub fn empty() -> Self {
        Substitution {
            bindings: IndexMap::new(),
        }
    }

    /// Create a substitution with a single binding.
    pub fn singleton(var: Var, term: Term) -> Self {
        let mut bindings = IndexMap::new();
        bindings.insert(var, term);
        Substitution { bindings }
    }

    /// Add a binding, replacing any previous binding of `var`.
    pub fn bind(&mut self, var: Var, term: Term) {
        self.bindings.insert(var, term);
    }

    /// Look up a variable in this substitution.
    pub fn lookup(&self, var: Var) -> Option<&Term> {
        self.bindings.get(&var)
    }

    /// Replace every bound variable of `term` with its binding.
    ///
    /// Unbound variables are left untouched. Bindings are applied once, not
    /// iterated to a fixpoint.
    pub fn apply_to_term(&self, term: &Term) -> Term {
        match term {
            Term::Var(var) => match self.bindings.get(var) {
                Some(t) => t.clone(),
                None => term.clone(),
            },
            Term::App(name, args) => {
                Term::App(name.clone(), args.iter().map(|a| self.apply_to_term(a)).collect())
            }
        }
    }

    /// Extend `self` (the older substitution) with `newer` bindings.
    ///
    /// Older bindings keep their keys with right-hand sides instantiated under
    /// `newer`; newer bindings are added with right-hand sides instantiated
    /// under `self`. The domains must be disjoint.
    pub fn compose(&self, newer: &Substitution) -> Result<Substitution, CompositionError> {
        if let Some(var) = newer.bindings.keys().find(|v| self.bindings.contains_key(*v)) {
            return Err(CompositionError { var: *var });
        }

        let mut result = Substitution::empty();
        for (var, term) in &self.bindings {
            result.bind(*var, newer.apply_to_term(term));
        }
        for (var, term) in &newer.bindings {
            result.bind(*var, self.apply_to_term(term));
        }
        Ok(result)
    }

    /// Iterate over the bindings in this substitution.
    pub fn bindings(&self) -> impl Iterator<Item = (Var, &Term)> {
        self.bindings.iter().map(|(v, t)| (*v, t))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if this substitution is empty (has no bindings).
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(Var, Term)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Var, Term)>>(iter: I) -> Self {
        Substitution {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} ↦ {}", var, term)?;
        }
        write!(f, "}}")
    }
}

impl Render for Substitution {
    fn render(&self, names: &VarNames, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            var.render(names, f)?;
            write!(f, " ↦ ")?;
            term.render(names, f)?;
        }
        write!(f, "}}")
    }
}
