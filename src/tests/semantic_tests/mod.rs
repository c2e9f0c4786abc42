//! Semantic tests for unification and completion.
//!
//! These check the properties the engine promises rather than surface
//! behavior: soundness of unifiers, the lexicographic reduction order, the
//! applicability conditions of each completion step and atomicity of
//! `perform`.
//!
//! # References
//!
//! - Knuth, D.E., Bendix, P.B. "Simple Word Problems in Universal Algebras."
//!   Computational Problems in Abstract Algebra, pp. 263-297 (1970).
//! - Baader, F., Nipkow, T. "Term Rewriting and All That." Cambridge
//!   University Press (1998), chapters 4 (unification) and 7 (completion).
//! - Bachmair, L., Dershowitz, N. "Equational Inference, Canonical Proofs, and
//!   Proof Orderings." J. ACM 41(2), 236-276 (1994).

use crate::completion::{Action, ActionKind, CompletionState};
use crate::order::{Combine, ReductionOrder, Size, Weight};
use crate::syntax::{Equation, Formula, Rule, Term, Var};
use crate::unify::{unify, Substitution, UnifyError, UnifyResult};

fn x(id: usize) -> Term {
    Term::var(id)
}

fn c(name: &str) -> Term {
    Term::constant(name)
}

fn app(name: &str, args: Vec<Term>) -> Term {
    Term::app(name, args)
}

fn fv(name: &str) -> Formula {
    Formula::var(name)
}

fn fa(name: &str, args: Vec<Formula>) -> Formula {
    Formula::app(name, args)
}

/// Weight order where `inst` multiplies and `comp`/`app` add.
fn substitution_calculus_order() -> ReductionOrder {
    ReductionOrder::new()
        .with(
            Weight::new()
                .with_symbol("inst", Combine::Product { base: 1 })
                .with_symbol("comp", Combine::Sum { base: 1 })
                .with_symbol("app", Combine::Sum { base: 1 }),
        )
        .with(Size)
}

fn actions_of(state: &CompletionState, kind: ActionKind) -> Vec<Action> {
    state.list_actions().filter(|a| a.kind() == kind).collect()
}

mod completion_semantics;
mod proptests;
