//! Proposed inference steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::critical::adopt_fresh;
use crate::syntax::{Equation, Position, Render, Rule, Side, Var, VarNames};

/// The six completion inference rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Delete,
    Orient,
    Simplify,
    Compose,
    Collapse,
    Deduce,
}

impl ActionKind {
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Delete => "Delete",
            ActionKind::Orient => "Orient",
            ActionKind::Simplify => "Simplify",
            ActionKind::Compose => "Compose",
            ActionKind::Collapse => "Collapse",
            ActionKind::Deduce => "Deduce",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One applicable instance of an inference rule.
///
/// Actions carry copies of the equations and rules they consume; they are
/// only meaningful against the state they were listed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Remove an equation whose sides are identical.
    Delete { equation: Equation },
    /// Turn an equation into a rule, bigger side on the left.
    Orient { equation: Equation, rule: Rule },
    /// Rewrite one side of an equation with a rule.
    Simplify {
        equation: Equation,
        side: Side,
        by: Rule,
        position: Position,
        result: Equation,
        fresh: Vec<(Var, Var)>,
    },
    /// Rewrite the right side of `target` with `by`.
    Compose {
        target: Rule,
        by: Rule,
        position: Position,
        result: Rule,
        fresh: Vec<(Var, Var)>,
    },
    /// Rewrite the left side of `target` with `by`, demoting it to an equation.
    Collapse {
        target: Rule,
        by: Rule,
        position: Position,
        result: Equation,
        fresh: Vec<(Var, Var)>,
    },
    /// Add the critical pair of `inner` overlapping `outer` at `position`.
    Deduce {
        outer: Rule,
        inner: Rule,
        position: Position,
        result: Equation,
        fresh: Vec<(Var, Var)>,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Delete { .. } => ActionKind::Delete,
            Action::Orient { .. } => ActionKind::Orient,
            Action::Simplify { .. } => ActionKind::Simplify,
            Action::Compose { .. } => ActionKind::Compose,
            Action::Collapse { .. } => ActionKind::Collapse,
            Action::Deduce { .. } => ActionKind::Deduce,
        }
    }
}

impl Render for Action {
    fn render(&self, names: &VarNames, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<9}", self.kind().name())?;
        match self {
            Action::Delete { equation } => equation.render(names, f),
            Action::Orient { rule, .. } => rule.render(names, f),
            Action::Simplify {
                equation,
                side,
                by,
                position,
                ..
            } => {
                equation.render(names, f)?;
                write!(f, "  by ")?;
                by.render(names, f)?;
                write!(f, "  at {} {}", side, position)
            }
            Action::Compose {
                target,
                by,
                position,
                ..
            } => {
                target.render(names, f)?;
                write!(f, "  by ")?;
                by.render(names, f)?;
                write!(f, "  at rhs {}", position)
            }
            Action::Collapse {
                target,
                by,
                position,
                ..
            } => {
                target.render(names, f)?;
                write!(f, "  by ")?;
                by.render(names, f)?;
                write!(f, "  at lhs {}", position)
            }
            Action::Deduce {
                outer,
                inner,
                position,
                result,
                fresh,
            } => {
                outer.render(names, f)?;
                write!(f, "  with ")?;
                inner.render(names, f)?;
                write!(f, "  at {}  gives ", position)?;
                let mut scratch = names.clone();
                let renaming = adopt_fresh(&mut scratch, &result.variables(), fresh);
                result.instantiate(&renaming).render(&scratch, f)
            }
        }
    }
}
