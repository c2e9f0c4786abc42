//! Parser for equation files and prompt input.

mod ast;
mod lexer;
mod parser;

pub use ast::{Directive, Setting, Statement};
pub use parser::{parse_file, parse_formula, ParseError};
