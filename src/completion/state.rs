//! Completion state: pending equations, confirmed rules and the action protocol.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, trace};

use super::critical::{adopt_fresh, critical_pairs};
use super::rewrite::{normalize, rewrite_once, Normalized};
use super::trace::TraceStep;
use super::{Action, ActionKind};
use crate::order::{ReductionOrder, TermCmp};
use crate::syntax::{
    Equation, Formula, FormulaScope, Named, Position, Render, Rule, Side, Term, VarNames,
};
use crate::unify::{unify, UnifyResult};

/// An action referred to an equation or rule the state no longer holds.
///
/// Only happens when an action is performed after the state it was listed
/// from has changed; it indicates a driver defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{action}: equation `{equation}` is not pending")]
    MissingEquation {
        action: ActionKind,
        equation: String,
    },
    #[error("{action}: rule `{rule}` is not confirmed")]
    MissingRule { action: ActionKind, rule: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct OverlapKey {
    outer: Rule,
    inner: Rule,
    position: Position,
}

/// Mutable state of one completion run.
///
/// [`CompletionState::list_actions`] is read-only and may be called any number
/// of times; [`CompletionState::perform`] applies exactly one action or fails
/// without changing anything. Actions must be re-listed after every perform.
#[derive(Debug)]
pub struct CompletionState {
    equations: Vec<Equation>,
    rules: Vec<Rule>,
    names: VarNames,
    order: ReductionOrder,
    deduced: HashSet<OverlapKey>,
    history: Vec<TraceStep>,
}

impl CompletionState {
    /// Create an empty state oriented by `order`.
    pub fn new(order: ReductionOrder) -> Self {
        CompletionState {
            equations: Vec::new(),
            rules: Vec::new(),
            names: VarNames::new(),
            order,
            deduced: HashSet::new(),
            history: Vec::new(),
        }
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn names(&self) -> &VarNames {
        &self.names
    }

    pub fn order(&self) -> &ReductionOrder {
        &self.order
    }

    pub fn set_order(&mut self, order: ReductionOrder) {
        self.order = order;
    }

    pub fn history(&self) -> &[TraceStep] {
        &self.history
    }

    /// Render an equation, rule, term or action with this state's variable names.
    pub fn show<'a, T: Render + ?Sized>(&'a self, item: &'a T) -> Named<'a, T> {
        self.names.show(item)
    }

    /// Parse-side entry point: add `lhs = rhs` with variables scoped to this equation.
    pub fn add_equation(&mut self, lhs: &Formula, rhs: &Formula) -> &Equation {
        self.add_labeled_equation(None, lhs, rhs)
    }

    pub fn add_labeled_equation(
        &mut self,
        label: Option<String>,
        lhs: &Formula,
        rhs: &Formula,
    ) -> &Equation {
        let mut scope = FormulaScope::new(&mut self.names);
        let lhs = scope.term(lhs);
        let rhs = scope.term(rhs);
        self.equations.push(Equation { label, lhs, rhs });
        &self.equations[self.equations.len() - 1]
    }

    /// Add an equation built directly from terms.
    pub fn push_equation(&mut self, equation: Equation) {
        for var in equation.variables() {
            self.names.reserve(var);
        }
        self.equations.push(equation);
    }

    /// Add an already-oriented rule, bypassing Orient.
    pub fn push_rule(&mut self, rule: Rule) {
        for var in rule.variables() {
            self.names.reserve(var);
        }
        self.rules.push(rule);
    }

    /// Rewrite `term` with the confirmed rules towards a normal form.
    ///
    /// Variables introduced by rewriting are allocated in a scratch copy of
    /// the registry, so the state itself is not touched.
    pub fn normalize(&self, term: &Term, limit: usize) -> Normalized {
        let mut scratch = self.names.clone();
        normalize(term, &self.rules, limit, &mut scratch)
    }

    /// Normalize a formula and render the result.
    ///
    /// The formula's variables live in a scratch registry and are gone once
    /// this returns.
    pub fn reduce(&self, formula: &Formula, limit: usize) -> (String, Normalized) {
        let mut scratch = self.names.clone();
        let term = FormulaScope::new(&mut scratch).term(formula);
        let normal = normalize(&term, &self.rules, limit, &mut scratch);
        (scratch.show(&normal.term).to_string(), normal)
    }

    /// Drop all equations, rules, names and history; keep the order.
    pub fn clear(&mut self) {
        self.equations.clear();
        self.rules.clear();
        self.names = VarNames::new();
        self.deduced.clear();
        self.history.clear();
    }

    /// No pending equations and no unexplored critical pairs.
    pub fn is_complete(&self) -> bool {
        self.equations.is_empty() && self.deduce_actions().next().is_none()
    }

    /// Every applicable action, lazily, without touching the state.
    ///
    /// Grouped by rule in the order Delete, Simplify, Orient, Compose,
    /// Collapse, Deduce.
    pub fn list_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.delete_actions()
            .chain(self.simplify_actions())
            .chain(self.orient_actions())
            .chain(self.compose_actions())
            .chain(self.collapse_actions())
            .chain(self.deduce_actions())
    }

    /// [`CompletionState::list_actions`], collected for index-based selection.
    pub fn actions(&self) -> Vec<Action> {
        self.list_actions().collect()
    }

    fn delete_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.equations
            .iter()
            .filter(|eq| matches!(unify(&eq.lhs, &eq.rhs), UnifyResult::Success(s) if s.is_empty()))
            .map(|eq| Action::Delete {
                equation: eq.clone(),
            })
    }

    fn orient_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.equations.iter().filter_map(move |eq| {
            let (lhs, rhs) = match self.order.compare(&eq.lhs, &eq.rhs) {
                TermCmp::Greater => (&eq.lhs, &eq.rhs),
                TermCmp::Less => (&eq.rhs, &eq.lhs),
                TermCmp::Incomparable => {
                    trace!(equation = %self.show(eq), "not orientable");
                    return None;
                }
            };
            Some(Action::Orient {
                equation: eq.clone(),
                rule: Rule {
                    label: eq.label.clone(),
                    lhs: lhs.clone(),
                    rhs: rhs.clone(),
                },
            })
        })
    }

    fn simplify_actions(&self) -> impl Iterator<Item = Action> + '_ {
        let first_free = self.names.high_water();
        self.equations.iter().flat_map(move |eq| {
            [Side::Lhs, Side::Rhs].into_iter().flat_map(move |side| {
                self.rules.iter().filter_map(move |rule| {
                    let rewrite = rewrite_once(eq.side(side), rule, first_free)?;
                    Some(Action::Simplify {
                        equation: eq.clone(),
                        side,
                        by: rule.clone(),
                        position: rewrite.position,
                        result: eq.with_side(side, rewrite.result),
                        fresh: rewrite.fresh,
                    })
                })
            })
        })
    }

    fn compose_actions(&self) -> impl Iterator<Item = Action> + '_ {
        let first_free = self.names.high_water();
        self.rule_pairs().filter_map(move |(by, target)| {
            let rewrite = rewrite_once(&target.rhs, by, first_free)?;
            Some(Action::Compose {
                target: target.clone(),
                by: by.clone(),
                position: rewrite.position,
                result: Rule {
                    label: target.label.clone(),
                    lhs: target.lhs.clone(),
                    rhs: rewrite.result,
                },
                fresh: rewrite.fresh,
            })
        })
    }

    fn collapse_actions(&self) -> impl Iterator<Item = Action> + '_ {
        let first_free = self.names.high_water();
        self.rule_pairs().filter_map(move |(by, target)| {
            let rewrite = rewrite_once(&target.lhs, by, first_free)?;
            Some(Action::Collapse {
                target: target.clone(),
                by: by.clone(),
                position: rewrite.position,
                result: Equation {
                    label: target.label.clone(),
                    lhs: rewrite.result,
                    rhs: target.rhs.clone(),
                },
                fresh: rewrite.fresh,
            })
        })
    }

    fn deduce_actions(&self) -> impl Iterator<Item = Action> + '_ {
        let first_free = self.names.high_water();
        self.rules.iter().enumerate().flat_map(move |(i, outer)| {
            self.rules.iter().enumerate().flat_map(move |(j, inner)| {
                critical_pairs(outer, inner, first_free, i == j)
                    .into_iter()
                    .filter(move |pair| {
                        !self.deduced.contains(&OverlapKey {
                            outer: outer.clone(),
                            inner: inner.clone(),
                            position: pair.position.clone(),
                        })
                    })
                    .map(move |pair| Action::Deduce {
                        outer: outer.clone(),
                        inner: inner.clone(),
                        position: pair.position,
                        result: pair.equation,
                        fresh: pair.fresh,
                    })
            })
        })
    }

    /// Ordered pairs `(by, target)` of distinct rule slots.
    fn rule_pairs(&self) -> impl Iterator<Item = (&Rule, &Rule)> + '_ {
        self.rules.iter().enumerate().flat_map(move |(i, by)| {
            self.rules
                .iter()
                .enumerate()
                .filter(move |(j, _)| *j != i)
                .map(move |(_, target)| (by, target))
        })
    }

    /// Apply one listed action.
    ///
    /// Every equation and rule the action names is checked before anything
    /// changes, so an error leaves the state as it was. Simplify and Collapse
    /// append their equation to the end of the list; Compose replaces the
    /// rule in place.
    pub fn perform(&mut self, action: &Action) -> Result<(), EngineError> {
        let kind = action.kind();
        let description = self.show(action).to_string();

        match action {
            Action::Delete { equation } => {
                let i = self.find_equation(kind, equation)?;
                self.equations.remove(i);
            }
            Action::Orient { equation, rule } => {
                let i = self.find_equation(kind, equation)?;
                self.equations.remove(i);
                self.rules.push(rule.clone());
            }
            Action::Simplify {
                equation,
                by,
                result,
                fresh,
                ..
            } => {
                let i = self.find_equation(kind, equation)?;
                self.find_rule(kind, by)?;
                let renaming = adopt_fresh(&mut self.names, &result.variables(), fresh);
                self.equations.remove(i);
                self.equations.push(result.instantiate(&renaming));
            }
            Action::Compose {
                target,
                by,
                result,
                fresh,
                ..
            } => {
                let i = self.find_rule(kind, target)?;
                self.find_rule(kind, by)?;
                let renaming = adopt_fresh(&mut self.names, &result.variables(), fresh);
                self.rules[i] = result.instantiate(&renaming);
                self.forget_overlaps(target);
            }
            Action::Collapse {
                target,
                by,
                result,
                fresh,
                ..
            } => {
                let i = self.find_rule(kind, target)?;
                self.find_rule(kind, by)?;
                let renaming = adopt_fresh(&mut self.names, &result.variables(), fresh);
                self.rules.remove(i);
                self.equations.push(result.instantiate(&renaming));
                self.forget_overlaps(target);
            }
            Action::Deduce {
                outer,
                inner,
                position,
                result,
                fresh,
            } => {
                self.find_rule(kind, outer)?;
                self.find_rule(kind, inner)?;
                let renaming = adopt_fresh(&mut self.names, &result.variables(), fresh);
                let equation = result.instantiate(&renaming);
                self.deduced.insert(OverlapKey {
                    outer: outer.clone(),
                    inner: inner.clone(),
                    position: position.clone(),
                });
                self.equations.push(equation);
            }
        }

        let step = self.history.len() + 1;
        debug!(step, %kind, action = %description, "performed");
        self.history.push(TraceStep {
            step,
            kind,
            description,
        });
        Ok(())
    }

    /// Drop processed overlaps that mention `rule` once no slot holds it.
    fn forget_overlaps(&mut self, rule: &Rule) {
        if self.rules.contains(rule) {
            return;
        }
        self.deduced
            .retain(|key| &key.outer != rule && &key.inner != rule);
    }

    fn find_equation(&self, action: ActionKind, equation: &Equation) -> Result<usize, EngineError> {
        self.equations
            .iter()
            .position(|eq| eq == equation)
            .ok_or_else(|| EngineError::MissingEquation {
                action,
                equation: self.show(equation).to_string(),
            })
    }

    fn find_rule(&self, action: ActionKind, rule: &Rule) -> Result<usize, EngineError> {
        self.rules
            .iter()
            .position(|r| r == rule)
            .ok_or_else(|| EngineError::MissingRule {
                action,
                rule: self.show(rule).to_string(),
            })
    }
}
