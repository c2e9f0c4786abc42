//! Term measures: the building blocks of a reduction order.

use std::collections::HashMap;
use std::fmt;

use crate::syntax::Term;

/// A total function from terms to non-negative numbers.
///
/// Completion only terminates if every measure is well-founded on the terms
/// it is asked about; nothing here checks that.
pub trait Measure {
    fn name(&self) -> &str;
    fn measure(&self, term: &Term) -> u64;
}

/// Number of symbol and variable occurrences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Size;

impl Measure for Size {
    fn name(&self) -> &str {
        "size"
    }

    fn measure(&self, term: &Term) -> u64 {
        term.size() as u64
    }
}

/// Nesting depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Depth;

impl Measure for Depth {
    fn name(&self) -> &str {
        "depth"
    }

    fn measure(&self, term: &Term) -> u64 {
        term.depth() as u64
    }
}

/// How a symbol's weight is computed from its arguments' weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// `base + w(t1) + ... + w(tn)`
    Sum { base: u64 },
    /// `base * w(t1) * ... * w(tn)`
    Product { base: u64 },
}

impl Combine {
    fn apply(self, weights: impl Iterator<Item = u64>) -> u64 {
        match self {
            Combine::Sum { base } => weights.fold(base, u64::saturating_add),
            Combine::Product { base } => weights.fold(base, u64::saturating_mul),
        }
    }
}

impl fmt::Display for Combine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combine::Sum { base } => write!(f, "sum {}", base),
            Combine::Product { base } => write!(f, "product {}", base),
        }
    }
}

/// Weight measure with a per-symbol combinator.
///
/// Symbols without an entry use the default combinator (`sum 1`). Variables
/// weigh `variable_weight` (default 2, so products of variables grow).
#[derive(Debug, Clone)]
pub struct Weight {
    variable_weight: u64,
    default: Combine,
    symbols: HashMap<String, Combine>,
}

impl Default for Weight {
    fn default() -> Self {
        Weight {
            variable_weight: 2,
            default: Combine::Sum { base: 1 },
            symbols: HashMap::new(),
        }
    }
}

impl Weight {
    pub fn new() -> Self {
        Weight::default()
    }

    pub fn with_variable_weight(mut self, weight: u64) -> Self {
        self.variable_weight = weight;
        self
    }

    pub fn with_symbol(mut self, name: impl Into<String>, combine: Combine) -> Self {
        self.symbols.insert(name.into(), combine);
        self
    }

    pub fn set_symbol(&mut self, name: impl Into<String>, combine: Combine) {
        self.symbols.insert(name.into(), combine);
    }

    pub fn set_variable_weight(&mut self, weight: u64) {
        self.variable_weight = weight;
    }

    pub fn variable_weight(&self) -> u64 {
        self.variable_weight
    }

    pub fn combine_for(&self, symbol: &str) -> Combine {
        self.symbols.get(symbol).copied().unwrap_or(self.default)
    }

    /// Symbol entries, sorted by name.
    pub fn symbols(&self) -> Vec<(&str, Combine)> {
        let mut entries: Vec<_> = self.symbols.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Measure for Weight {
    fn name(&self) -> &str {
        "weight"
    }

    fn measure(&self, term: &Term) -> u64 {
        match term {
            Term::Var(_) => self.variable_weight,
            Term::App(name, args) => self
                .combine_for(name)
                .apply(args.iter().map(|arg| self.measure(arg))),
        }
    }
}

/// A measure backed by a closure.
pub struct FnMeasure<F> {
    name: String,
    f: F,
}

impl<F: Fn(&Term) -> u64> FnMeasure<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        FnMeasure {
            name: name.into(),
            f,
        }
    }
}

impl<F: Fn(&Term) -> u64> Measure for FnMeasure<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn measure(&self, term: &Term) -> u64 {
        (self.f)(term)
    }
}
