//! Unification: most general unifiers, substitutions and one-way matching.

mod matching;
mod substitution;
mod unify;

pub use matching::match_term;
pub use substitution::{CompositionError, Substitution};
pub use unify::{unify, UnifyError, UnifyResult};
