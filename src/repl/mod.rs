//! Line-based driver around a session.

mod repl;

pub use repl::{Repl, ReplError, HELP};
