//! History of performed steps and serializable state snapshots.

use serde::{Deserialize, Serialize};

use super::{ActionKind, CompletionState};

/// One performed action, as it was displayed when it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step: usize,
    pub kind: ActionKind,
    pub description: String,
}

/// Rendered view of a completion state together with its history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub equations: Vec<String>,
    pub rules: Vec<String>,
    pub measures: Vec<String>,
    pub history: Vec<TraceStep>,
}

impl Snapshot {
    pub fn of(state: &CompletionState) -> Self {
        Snapshot {
            equations: state
                .equations()
                .iter()
                .map(|eq| state.show(eq).to_string())
                .collect(),
            rules: state
                .rules()
                .iter()
                .map(|rule| state.show(rule).to_string())
                .collect(),
            measures: state
                .order()
                .measure_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            history: state.history().to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
