//! REPL implementation.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::completion::CompletionResult;
use crate::session::{DirectiveResult, ExecResult, Session, SessionError};

/// REPL error.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub const HELP: &str = "\
Enter equations as `lhs = rhs` or `label: lhs = rhs`.
A bare token is a variable, `(f a b)` applies f, `(c)` is a constant.

  N                      perform action N from the current listing
  :actions               list applicable actions
  :state                 show equations and rules
  :auto                  run automatic completion
  :reduce FORMULA        normalize a formula with the rules
  :history               show performed steps
  :load \"path\"           load a file of equations and directives
  :order m1 m2 ..        measures, from weight size depth
  :weight SYM sum N      SYM weighs N plus its arguments
  :weight SYM product [N]
                         SYM weighs N times its arguments
  :set max_steps N|none  step limit for :auto
  :set max_rewrites N    rewrite limit for :reduce
  :set var_weight N      weight of a variable
  :reset                 drop equations, rules and history
  :quit                  exit";

/// Interactive prompt around a [`Session`].
pub struct Repl {
    session: Session,
    done: bool,
}

impl Repl {
    pub fn new() -> Self {
        Self::with_session(Session::new())
    }

    pub fn with_session(session: Session) -> Self {
        Repl {
            session,
            done: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Whether `:quit` has been processed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Load a file into the REPL.
    pub fn load_file(&mut self, path: &str) -> Result<String, ReplError> {
        let result = self.session.load_file(path)?;
        Ok(self.render_directive(result))
    }

    /// Process a line of input and return what to print.
    ///
    /// A number selects an action; bad selections are reported in the output
    /// rather than as errors.
    pub fn process_line(&mut self, line: &str) -> Result<String, ReplError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(String::new());
        }

        if line.chars().all(|c| c.is_ascii_digit()) {
            return self.select(line);
        }
        if line.starts_with('-') && line[1..].chars().all(|c| c.is_ascii_digit()) {
            return Ok(format!("Invalid selection `{}`: expected an action number.", line));
        }

        let results = self.session.execute(line)?;
        let out: Vec<String> = results
            .into_iter()
            .map(|result| match result {
                ExecResult::EquationAdded(eq) => format!("Added {}", eq),
                ExecResult::DirectiveApplied(d) => self.render_directive(d),
            })
            .collect();
        Ok(out.join("\n"))
    }

    fn select(&mut self, line: &str) -> Result<String, ReplError> {
        let Ok(index) = line.parse::<usize>() else {
            return Ok(format!("Invalid selection `{}`.", line));
        };
        match self.session.perform_index(index) {
            Ok(description) => Ok(format!(
                "Performed {}\n{}{}",
                description,
                self.session.render_state(),
                self.render_actions(self.session.actions())
            )),
            Err(SessionError::NoSuchAction { index, available: 0 }) => {
                Ok(format!("No action {}: nothing is applicable.", index))
            }
            Err(SessionError::NoSuchAction { index, available }) => Ok(format!(
                "No action {}: choose 0..{} (see :actions).",
                index,
                available - 1
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn render_actions(&self, actions: Vec<String>) -> String {
        if actions.is_empty() {
            return "No actions available.".to_string();
        }
        let lines: Vec<String> = actions
            .iter()
            .enumerate()
            .map(|(i, a)| format!("  [{}] {}", i, a))
            .collect();
        format!("Actions:\n{}", lines.join("\n"))
    }

    fn render_directive(&mut self, result: DirectiveResult) -> String {
        match result {
            DirectiveResult::Loaded { path, statements } => {
                format!("Loaded {} ({} statements)", path, statements)
            }
            DirectiveResult::Set { key, value } => format!("{} = {}", key, value),
            DirectiveResult::Order(measures) => {
                let names: Vec<&str> = measures.iter().map(|m| m.name()).collect();
                format!("order: {}", names.join(" "))
            }
            DirectiveResult::Weight { symbol, combine } => {
                format!("weight {}: {}", symbol, combine)
            }
            DirectiveResult::Completed(result) => {
                let summary = match result {
                    CompletionResult::Complete { steps } => {
                        format!("Completed after {} steps.", steps)
                    }
                    CompletionResult::Stuck { steps, pending } => format!(
                        "Stuck after {} steps: {} equations cannot be oriented.",
                        steps, pending
                    ),
                    CompletionResult::StepLimit { steps } => {
                        format!("Stopped at the step limit ({} steps).", steps)
                    }
                };
                format!("{}\n{}", summary, self.session.render_state())
            }
            DirectiveResult::Reduced {
                term, complete, ..
            } => {
                if complete {
                    term
                } else {
                    format!("{} (rewrite limit reached)", term)
                }
            }
            DirectiveResult::State(text) => text,
            DirectiveResult::Actions(actions) => self.render_actions(actions),
            DirectiveResult::History(steps) => {
                if steps.is_empty() {
                    return "No steps performed.".to_string();
                }
                let lines: Vec<String> = steps
                    .iter()
                    .map(|s| format!("  {}. {}", s.step, s.description))
                    .collect();
                lines.join("\n")
            }
            DirectiveResult::Reset => "Reset.".to_string(),
            DirectiveResult::Help => HELP.to_string(),
            DirectiveResult::Quit => {
                self.done = true;
                "Bye.".to_string()
            }
        }
    }

    /// Run the REPL over arbitrary input and output.
    ///
    /// Errors from a single line are printed and the loop continues.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), ReplError> {
        write!(output, "> ")?;
        output.flush()?;
        for line in input.lines() {
            let line = line?;
            match self.process_line(&line) {
                Ok(text) if text.is_empty() => {}
                Ok(text) => writeln!(output, "{}", text)?,
                Err(e) => writeln!(output, "Error: {}", e)?,
            }
            if self.done {
                return Ok(());
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }

    /// Run the REPL interactively on stdin and stdout.
    pub fn run(&mut self) -> Result<(), ReplError> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}
