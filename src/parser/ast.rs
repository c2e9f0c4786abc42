//! Parsed statements and directives.

use crate::order::Combine;
use crate::syntax::Formula;

/// A statement in an equation file or at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `label: lhs = rhs` or `lhs = rhs`
    Equation {
        label: Option<String>,
        lhs: Formula,
        rhs: Formula,
    },
    Directive(Directive),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Load statements from a file
    Load(String),
    Set(Setting),
    /// Replace the measure list of the reduction order
    Order(Vec<String>),
    /// Set how a symbol's weight combines its arguments
    Weight { symbol: String, combine: Combine },
    /// Run the automatic strategy
    Auto,
    /// Normalize a formula with the confirmed rules
    Reduce(Formula),
    State,
    Actions,
    History,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    MaxSteps(Option<usize>),
    MaxRewrites(usize),
    VarWeight(u64),
    Unknown { key: String, value: String },
}
