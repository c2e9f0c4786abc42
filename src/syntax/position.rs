//! Subterm positions.

use std::fmt;

/// A path from the root of a term to one of its subterms.
///
/// Each step is a 0-based argument index. The empty path is the root.
/// Displayed 1-based and dotted (`1.2`), with `ε` for the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Position {
    path: Vec<usize>,
}

impl Position {
    pub fn new(path: Vec<usize>) -> Self {
        Position { path }
    }

    pub fn root() -> Self {
        Position { path: Vec::new() }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "ε");
        }
        for (i, step) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", step + 1)?;
        }
        Ok(())
    }
}
