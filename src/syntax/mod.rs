//! Syntax types: terms, positions, equations, rules and formula literals.

mod equation;
mod formula;
mod names;
mod position;
mod term;

pub use equation::{Equation, Rule, Side};
pub use formula::{Formula, FormulaScope};
pub use names::{Named, Render, VarNames};
pub use position::Position;
pub use term::{Term, Var};
