//! kbcomplete: syntactic unification and Knuth-Bendix completion
//!
//! Equations between first-order terms are turned into a rewrite system by
//! repeatedly listing the applicable completion steps (Delete, Orient,
//! Simplify, Compose, Collapse, Deduce) and performing one of them, either
//! chosen at a prompt or by the automatic strategy.

pub mod syntax;
pub mod unify;
pub mod order;
pub mod completion;
pub mod parser;
pub mod session;
pub mod repl;

#[cfg(test)]
mod tests;
