//! Equations (unoriented) and rewrite rules (oriented).

use std::fmt;

use super::{Term, Var};
use crate::unify::Substitution;

/// One side of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Lhs,
    Rhs,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Lhs => write!(f, "lhs"),
            Side::Rhs => write!(f, "rhs"),
        }
    }
}

/// A claim that two terms are equal.
///
/// Stored as an ordered pair for determinism; semantically symmetric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Equation {
    pub label: Option<String>,
    pub lhs: Term,
    pub rhs: Term,
}

impl Equation {
    pub fn new(lhs: Term, rhs: Term) -> Self {
        Equation {
            label: None,
            lhs,
            rhs,
        }
    }

    pub fn labeled(label: impl Into<String>, lhs: Term, rhs: Term) -> Self {
        Equation {
            label: Some(label.into()),
            lhs,
            rhs,
        }
    }

    pub fn side(&self, side: Side) -> &Term {
        match side {
            Side::Lhs => &self.lhs,
            Side::Rhs => &self.rhs,
        }
    }

    /// A copy with one side replaced.
    pub fn with_side(&self, side: Side, term: Term) -> Equation {
        let mut eq = self.clone();
        match side {
            Side::Lhs => eq.lhs = term,
            Side::Rhs => eq.rhs = term,
        }
        eq
    }

    /// Both sides instantiated; the label is kept.
    pub fn instantiate(&self, subst: &Substitution) -> Equation {
        Equation {
            label: self.label.clone(),
            lhs: subst.apply_to_term(&self.lhs),
            rhs: subst.apply_to_term(&self.rhs),
        }
    }

    /// Variables of both sides, lhs first.
    pub fn variables(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        self.lhs.collect_variables(&mut vars);
        self.rhs.collect_variables(&mut vars);
        vars
    }
}

/// An oriented rewrite step: `lhs` rewrites to `rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub label: Option<String>,
    pub lhs: Term,
    pub rhs: Term,
}

impl Rule {
    pub fn new(lhs: Term, rhs: Term) -> Self {
        Rule {
            label: None,
            lhs,
            rhs,
        }
    }

    pub fn labeled(label: impl Into<String>, lhs: Term, rhs: Term) -> Self {
        Rule {
            label: Some(label.into()),
            lhs,
            rhs,
        }
    }

    pub fn variables(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        self.lhs.collect_variables(&mut vars);
        self.rhs.collect_variables(&mut vars);
        vars
    }

    pub fn instantiate(&self, subst: &Substitution) -> Rule {
        Rule {
            label: self.label.clone(),
            lhs: subst.apply_to_term(&self.lhs),
            rhs: subst.apply_to_term(&self.rhs),
        }
    }
}
