//! First-order terms: variables and function applications (constants are 0-ary applications).

use std::fmt;

use super::Position;

/// A variable, identified by an integer.
///
/// Variables carry no name; display names live in a [`super::VarNames`] registry
/// owned by whoever allocated the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(usize);

impl Var {
    pub fn new(id: usize) -> Self {
        Var(id)
    }

    pub fn id(self) -> usize {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}", self.0)
    }
}

/// A first-order term.
///
/// In the literal syntax:
/// - Variables: bare tokens `s`, `a`, `x1`
/// - Constants (0-ary applications): `(id)`, `(nil)`
/// - Applications: `(comp s t)`, `(cons (zero) (nil))`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A variable
    Var(Var),
    /// Function application: f(t1, ..., tn)
    App(String, Vec<Term>),
}

impl Term {
    /// Create a variable term.
    pub fn var(id: usize) -> Self {
        Term::Var(Var::new(id))
    }

    /// Create a constant term.
    pub fn constant(name: impl Into<String>) -> Self {
        Term::App(name.into(), Vec::new())
    }

    /// Create a function application term.
    pub fn app(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::App(name.into(), args)
    }

    /// Structural identity: same variable identity, or same symbol, same arity
    /// and pairwise identical arguments.
    pub fn identical(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::Var(a), Term::Var(b)) => a == b,
            (Term::App(f, xs), Term::App(g, ys)) => {
                f == g
                    && xs.len() == ys.len()
                    && xs.iter().zip(ys).all(|(x, y)| x.identical(y))
            }
            _ => false,
        }
    }

    /// Variables of this term, in order of first occurrence.
    pub fn variables(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars
    }

    pub(crate) fn collect_variables(&self, vars: &mut Vec<Var>) {
        match self {
            Term::Var(v) => {
                if !vars.contains(v) {
                    vars.push(*v);
                }
            }
            Term::App(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Get the root symbol of this term. Returns None for variables.
    pub fn root_symbol(&self) -> Option<&str> {
        match self {
            Term::Var(_) => None,
            Term::App(name, _) => Some(name.as_str()),
        }
    }

    /// Check if a variable occurs in this term.
    pub fn occurs(&self, var: Var) -> bool {
        match self {
            Term::Var(v) => *v == var,
            Term::App(_, args) => args.iter().any(|arg| arg.occurs(var)),
        }
    }

    /// Number of symbol and variable occurrences.
    pub fn size(&self) -> usize {
        match self {
            Term::Var(_) => 1,
            Term::App(_, args) => 1 + args.iter().map(Term::size).sum::<usize>(),
        }
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        match self {
            Term::Var(_) => 1,
            Term::App(_, args) => 1 + args.iter().map(Term::depth).max().unwrap_or(0),
        }
    }

    /// The subterm at `position`, if the position exists.
    pub fn subterm(&self, position: &Position) -> Option<&Term> {
        let mut current = self;
        for &index in position.path() {
            match current {
                Term::App(_, args) => current = args.get(index)?,
                Term::Var(_) => return None,
            }
        }
        Some(current)
    }

    /// A copy of this term with the subterm at `position` replaced.
    pub fn replace_at(&self, position: &Position, replacement: Term) -> Option<Term> {
        replace_path(self, position.path(), replacement)
    }

    /// All positions of this term in pre-order (root first, then arguments left to right).
    pub fn positions(&self) -> Vec<Position> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_positions(self, &mut path, &mut out);
        out
    }

    /// Positions whose subterm is a function application.
    pub fn non_variable_positions(&self) -> Vec<Position> {
        self.positions()
            .into_iter()
            .filter(|p| matches!(self.subterm(p), Some(Term::App(..))))
            .collect()
    }
}

fn replace_path(term: &Term, path: &[usize], replacement: Term) -> Option<Term> {
    let Some((&first, rest)) = path.split_first() else {
        return Some(replacement);
    };
    match term {
        Term::Var(_) => None,
        Term::App(name, args) => {
            let child = args.get(first)?;
            let new_child = replace_path(child, rest, replacement)?;
            let mut new_args = args.clone();
            new_args[first] = new_child;
            Some(Term::App(name.clone(), new_args))
        }
    }
}

fn collect_positions(term: &Term, path: &mut Vec<usize>, out: &mut Vec<Position>) {
    out.push(Position::new(path.clone()));
    if let Term::App(_, args) = term {
        for (i, arg) in args.iter().enumerate() {
            path.push(i);
            collect_positions(arg, path, out);
            path.pop();
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(var) => write!(f, "{}", var),
            Term::App(name, args) => {
                write!(f, "({}", name)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
