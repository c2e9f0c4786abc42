//! Automatic completion: always take the first listed action.

use tracing::{debug, info};

use super::{Action, CompletionState, EngineError};

/// Limits for automatic completion and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    /// Stop after this many performed actions; `None` runs until a fixpoint.
    pub max_steps: Option<usize>,
    /// Rewrite steps allowed when computing a normal form.
    pub max_rewrites: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        CompletionConfig {
            max_steps: Some(1000),
            max_rewrites: 10_000,
        }
    }
}

/// How an automatic run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// No pending equations and every critical pair has been deduced.
    Complete { steps: usize },
    /// Equations remain but none of them can be processed.
    Stuck { steps: usize, pending: usize },
    StepLimit { steps: usize },
}

impl CompletionResult {
    pub fn steps(&self) -> usize {
        match self {
            CompletionResult::Complete { steps }
            | CompletionResult::Stuck { steps, .. }
            | CompletionResult::StepLimit { steps } => *steps,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, CompletionResult::Complete { .. })
    }
}

/// The action the automatic strategy would take next.
///
/// Listing order doubles as priority: deletions and simplifications come
/// before orientation, critical pairs last.
pub fn next_action(state: &CompletionState) -> Option<Action> {
    state.list_actions().next()
}

/// Run completion until it finishes, gets stuck or hits `config.max_steps`.
pub fn complete(
    state: &mut CompletionState,
    config: &CompletionConfig,
) -> Result<CompletionResult, EngineError> {
    let mut steps = 0;
    while let Some(action) = next_action(state) {
        if config.max_steps.is_some_and(|max| steps >= max) {
            info!(steps, "step limit reached");
            return Ok(CompletionResult::StepLimit { steps });
        }
        debug!(step = steps + 1, kind = %action.kind(), "automatic choice");
        state.perform(&action)?;
        steps += 1;
    }

    let pending = state.equations().len();
    if pending == 0 {
        info!(steps, rules = state.rules().len(), "completion succeeded");
        Ok(CompletionResult::Complete { steps })
    } else {
        info!(steps, pending, "completion stuck");
        Ok(CompletionResult::Stuck { steps, pending })
    }
}
