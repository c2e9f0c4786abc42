//! Reduction orders: lexicographic combinations of term measures.

mod measure;

pub use measure::{Combine, Depth, FnMeasure, Measure, Size, Weight};

use std::fmt;

use crate::syntax::Term;

/// Outcome of comparing two terms under a reduction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermCmp {
    Greater,
    Less,
    /// Every measure tied; the pair cannot be oriented.
    Incomparable,
}

impl TermCmp {
    /// `1`, `-1` or `0`.
    pub fn sign(self) -> i8 {
        match self {
            TermCmp::Greater => 1,
            TermCmp::Less => -1,
            TermCmp::Incomparable => 0,
        }
    }

    pub fn is_comparable(self) -> bool {
        self != TermCmp::Incomparable
    }
}

/// An ordered list of measures compared lexicographically.
///
/// Not necessarily total: when every measure ties the terms are
/// [`TermCmp::Incomparable`], which is an ordinary outcome.
#[derive(Default)]
pub struct ReductionOrder {
    measures: Vec<Box<dyn Measure>>,
}

impl ReductionOrder {
    pub fn new() -> Self {
        ReductionOrder::default()
    }

    /// Builder form of [`ReductionOrder::push`].
    pub fn with(mut self, measure: impl Measure + 'static) -> Self {
        self.push(measure);
        self
    }

    /// Append a measure; it is consulted only when all earlier ones tie.
    pub fn push(&mut self, measure: impl Measure + 'static) {
        self.measures.push(Box::new(measure));
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    pub fn measure_names(&self) -> Vec<&str> {
        self.measures.iter().map(|m| m.name()).collect()
    }

    /// Sign of the first nonzero `measure(lhs) - measure(rhs)`.
    pub fn compare(&self, lhs: &Term, rhs: &Term) -> TermCmp {
        for measure in &self.measures {
            let l = measure.measure(lhs);
            let r = measure.measure(rhs);
            if l > r {
                return TermCmp::Greater;
            }
            if l < r {
                return TermCmp::Less;
            }
        }
        TermCmp::Incomparable
    }
}

impl fmt::Debug for ReductionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReductionOrder")
            .field("measures", &self.measure_names())
            .finish()
    }
}
