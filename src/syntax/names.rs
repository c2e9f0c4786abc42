//! Variable display names and fresh identity allocation.

use std::collections::HashMap;
use std::fmt;

use super::{Equation, Rule, Term, Var};

/// Registry mapping variable identities to display names.
///
/// It is also the allocator for fresh identities: every identity it hands out
/// (or is told about through [`VarNames::reserve`]) is below its high-water mark.
#[derive(Debug, Clone, Default)]
pub struct VarNames {
    names: HashMap<Var, String>,
    next: usize,
}

impl VarNames {
    pub fn new() -> Self {
        VarNames::default()
    }

    /// Allocate a new variable with the given display name.
    pub fn fresh(&mut self, name: impl Into<String>) -> Var {
        let var = Var::new(self.next);
        self.next += 1;
        self.names.insert(var, name.into());
        var
    }

    /// Make sure `var` will never be handed out by [`VarNames::fresh`].
    pub fn reserve(&mut self, var: Var) {
        self.next = self.next.max(var.id() + 1);
    }

    pub fn name(&self, var: Var) -> Option<&str> {
        self.names.get(&var).map(String::as_str)
    }

    /// First identity not yet allocated.
    pub fn high_water(&self) -> usize {
        self.next
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// A primed variant of `base` that none of `taken` is displayed as.
    pub fn primed_name(&self, base: &str, taken: &[Var]) -> String {
        let mut name = format!("{}'", base);
        while taken.iter().any(|v| self.name(*v) == Some(name.as_str())) {
            name.push('\'');
        }
        name
    }

    /// Display adapter rendering `item` with this registry's names.
    pub fn show<'a, T: Render + ?Sized>(&'a self, item: &'a T) -> Named<'a, T> {
        Named { item, names: self }
    }
}

/// Things that print in literal syntax once variable names are known.
pub trait Render {
    fn render(&self, names: &VarNames, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// A value paired with the registry used to print it.
pub struct Named<'a, T: ?Sized> {
    item: &'a T,
    names: &'a VarNames,
}

impl<T: Render + ?Sized> fmt::Display for Named<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.item.render(self.names, f)
    }
}

impl Render for Var {
    fn render(&self, names: &VarNames, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match names.name(*self) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self),
        }
    }
}

impl Render for Term {
    fn render(&self, names: &VarNames, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(var) => var.render(names, f),
            Term::App(name, args) => {
                write!(f, "({}", name)?;
                for arg in args {
                    write!(f, " ")?;
                    arg.render(names, f)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Render for Equation {
    fn render(&self, names: &VarNames, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{}: ", label)?;
        }
        self.lhs.render(names, f)?;
        write!(f, " = ")?;
        self.rhs.render(names, f)
    }
}

impl Render for Rule {
    fn render(&self, names: &VarNames, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{}: ", label)?;
        }
        self.lhs.render(names, f)?;
        write!(f, " -> ")?;
        self.rhs.render(names, f)
    }
}
