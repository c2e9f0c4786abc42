//! Formula literals: the authoring syntax for terms.

use std::collections::HashMap;
use std::fmt;

use super::{Term, Var, VarNames};

/// A term as written in the surface language, with variables still named.
///
/// A bare token is a variable; `(f a b)` applies `f`; `(c)` is a constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Var(String),
    App(String, Vec<Formula>),
}

impl Formula {
    pub fn var(name: impl Into<String>) -> Self {
        Formula::Var(name.into())
    }

    pub fn app(name: impl Into<String>, args: Vec<Formula>) -> Self {
        Formula::App(name.into(), args)
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Formula::App(name.into(), Vec::new())
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Var(name) => write!(f, "{}", name),
            Formula::App(name, args) => {
                write!(f, "({}", name)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Variable scope for turning formulas into terms.
///
/// Within one scope the same token always denotes the same variable; each new
/// token gets a fresh identity from the registry.
pub struct FormulaScope<'a> {
    names: &'a mut VarNames,
    bound: HashMap<String, Var>,
}

impl<'a> FormulaScope<'a> {
    pub fn new(names: &'a mut VarNames) -> Self {
        FormulaScope {
            names,
            bound: HashMap::new(),
        }
    }

    pub fn term(&mut self, formula: &Formula) -> Term {
        match formula {
            Formula::Var(name) => {
                if let Some(var) = self.bound.get(name) {
                    return Term::Var(*var);
                }
                let var = self.names.fresh(name.clone());
                self.bound.insert(name.clone(), var);
                Term::Var(var)
            }
            Formula::App(name, args) => {
                Term::App(name.clone(), args.iter().map(|a| self.term(a)).collect())
            }
        }
    }
}
