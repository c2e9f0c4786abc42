//! Knuth-Bendix completion over pending equations and confirmed rules.

pub mod action;
pub mod critical;
pub mod rewrite;
pub mod state;
pub mod strategy;
pub mod trace;

pub use action::{Action, ActionKind};
pub use critical::{critical_pairs, rename_apart, CriticalPair};
pub use rewrite::{normalize, rewrite_at, rewrite_once, Normalized, Rewrite};
pub use state::{CompletionState, EngineError};
pub use strategy::{complete, next_action, CompletionConfig, CompletionResult};
pub use trace::{Snapshot, TraceStep};
