//! Session: end-to-end API for loading equations and driving completion.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::completion::{
    complete, CompletionConfig, CompletionResult, CompletionState, EngineError, Normalized,
    Snapshot, TraceStep,
};
use crate::order::{Combine, Depth, ReductionOrder, Size, Weight};
use crate::parser::{parse_file, Directive, ParseError, Setting, Statement};
use crate::syntax::Formula;

/// A built-in measure selectable with `:order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    Weight,
    Size,
    Depth,
}

impl MeasureKind {
    pub fn name(self) -> &'static str {
        match self {
            MeasureKind::Weight => "weight",
            MeasureKind::Size => "size",
            MeasureKind::Depth => "depth",
        }
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MeasureKind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight" => Ok(MeasureKind::Weight),
            "size" => Ok(MeasureKind::Size),
            "depth" => Ok(MeasureKind::Depth),
            _ => Err(SessionError::UnknownMeasure(s.to_string())),
        }
    }
}

/// Result of executing a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecResult {
    /// The equation as it now reads in the state.
    EquationAdded(String),
    DirectiveApplied(DirectiveResult),
}

/// Result of applying a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveResult {
    Loaded { path: String, statements: usize },
    Set { key: String, value: String },
    Order(Vec<MeasureKind>),
    Weight { symbol: String, combine: Combine },
    Completed(CompletionResult),
    Reduced { term: String, steps: usize, complete: bool },
    State(String),
    Actions(Vec<String>),
    History(Vec<TraceStep>),
    Reset,
    Help,
    Quit,
}

/// Session error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown measure `{0}` (expected weight, size or depth)")]
    UnknownMeasure(String),
    #[error("unknown setting `{key}` = `{value}`")]
    UnknownSetting { key: String, value: String },
    #[error("no action {index}: {available} available")]
    NoSuchAction { index: usize, available: usize },
}

/// A session holds the completion state together with its configuration.
pub struct Session {
    state: CompletionState,
    config: CompletionConfig,
    measures: Vec<MeasureKind>,
    weight: Weight,
}

impl Session {
    /// Create a session ordered by weight, then size.
    pub fn new() -> Self {
        Self::with_config(CompletionConfig::default())
    }

    pub fn with_config(config: CompletionConfig) -> Self {
        let measures = vec![MeasureKind::Weight, MeasureKind::Size];
        let weight = Weight::new();
        let state = CompletionState::new(build_order(&measures, &weight));
        Session {
            state,
            config,
            measures,
            weight,
        }
    }

    /// Parse and execute every statement in `source`.
    pub fn execute(&mut self, source: &str) -> Result<Vec<ExecResult>, SessionError> {
        parse_file(source)?
            .into_iter()
            .map(|stmt| self.execute_statement(stmt))
            .collect()
    }

    /// Execute a parsed statement.
    pub fn execute_statement(&mut self, stmt: Statement) -> Result<ExecResult, SessionError> {
        match stmt {
            Statement::Equation { label, lhs, rhs } => {
                Ok(ExecResult::EquationAdded(self.add_equation(label, &lhs, &rhs)))
            }
            Statement::Directive(directive) => {
                self.apply_directive(directive).map(ExecResult::DirectiveApplied)
            }
        }
    }

    /// Add a pending equation and return it rendered.
    pub fn add_equation(&mut self, label: Option<String>, lhs: &Formula, rhs: &Formula) -> String {
        let equation = self.state.add_labeled_equation(label, lhs, rhs).clone();
        self.state.show(&equation).to_string()
    }

    /// Load a file and execute all its statements.
    pub fn load_file(&mut self, path: &str) -> Result<DirectiveResult, SessionError> {
        let source = std::fs::read_to_string(Path::new(path)).map_err(|source| SessionError::Io {
            path: path.to_string(),
            source,
        })?;
        let results = self.execute(&source)?;
        info!(path, statements = results.len(), "loaded");
        Ok(DirectiveResult::Loaded {
            path: path.to_string(),
            statements: results.len(),
        })
    }

    /// Apply a directive.
    pub fn apply_directive(&mut self, directive: Directive) -> Result<DirectiveResult, SessionError> {
        match directive {
            Directive::Load(path) => self.load_file(&path),
            Directive::Set(setting) => self.set_option(setting),
            Directive::Order(names) => {
                let measures = names
                    .iter()
                    .map(|name| name.parse())
                    .collect::<Result<Vec<MeasureKind>, _>>()?;
                self.set_measures(measures);
                Ok(DirectiveResult::Order(self.measures.clone()))
            }
            Directive::Weight { symbol, combine } => {
                self.weight.set_symbol(symbol.clone(), combine);
                self.rebuild_order();
                Ok(DirectiveResult::Weight { symbol, combine })
            }
            Directive::Auto => self.run().map(DirectiveResult::Completed),
            Directive::Reduce(formula) => {
                let (term, normal) = self.reduce(&formula);
                Ok(DirectiveResult::Reduced {
                    term,
                    steps: normal.steps,
                    complete: normal.complete,
                })
            }
            Directive::State => Ok(DirectiveResult::State(self.render_state())),
            Directive::Actions => Ok(DirectiveResult::Actions(self.actions())),
            Directive::History => Ok(DirectiveResult::History(self.state.history().to_vec())),
            Directive::Reset => {
                self.state.clear();
                Ok(DirectiveResult::Reset)
            }
            Directive::Help => Ok(DirectiveResult::Help),
            Directive::Quit => Ok(DirectiveResult::Quit),
        }
    }

    /// Update the configuration from a parsed setting.
    pub fn set_option(&mut self, setting: Setting) -> Result<DirectiveResult, SessionError> {
        let (key, value) = match setting {
            Setting::MaxSteps(max) => {
                self.config.max_steps = max;
                let value = max.map_or_else(|| "none".to_string(), |n| n.to_string());
                ("max_steps", value)
            }
            Setting::MaxRewrites(n) => {
                self.config.max_rewrites = n;
                ("max_rewrites", n.to_string())
            }
            Setting::VarWeight(w) => {
                self.weight.set_variable_weight(w);
                self.rebuild_order();
                ("var_weight", w.to_string())
            }
            Setting::Unknown { key, value } => {
                return Err(SessionError::UnknownSetting { key, value })
            }
        };
        Ok(DirectiveResult::Set {
            key: key.to_string(),
            value,
        })
    }

    /// Replace the measure list; pending equations are re-judged on next listing.
    pub fn set_measures(&mut self, measures: Vec<MeasureKind>) {
        self.measures = measures;
        self.rebuild_order();
    }

    fn rebuild_order(&mut self) {
        self.state
            .set_order(build_order(&self.measures, &self.weight));
    }

    /// The currently applicable actions, rendered, in selection order.
    pub fn actions(&self) -> Vec<String> {
        self.state
            .list_actions()
            .map(|action| self.state.show(&action).to_string())
            .collect()
    }

    /// Perform the action at `index` of the current listing.
    pub fn perform_index(&mut self, index: usize) -> Result<String, SessionError> {
        let mut actions = self.state.actions();
        if index >= actions.len() {
            return Err(SessionError::NoSuchAction {
                index,
                available: actions.len(),
            });
        }
        let action = actions.swap_remove(index);
        let description = self.state.show(&action).to_string();
        self.state.perform(&action)?;
        Ok(description)
    }

    /// Run the automatic strategy with the session's configuration.
    pub fn run(&mut self) -> Result<CompletionResult, SessionError> {
        Ok(complete(&mut self.state, &self.config)?)
    }

    /// Normalize a formula with the confirmed rules; returns the rendered normal form.
    pub fn reduce(&self, formula: &Formula) -> (String, Normalized) {
        self.state.reduce(formula, self.config.max_rewrites)
    }

    /// Equations and rules, numbered, one per line.
    pub fn render_state(&self) -> String {
        let mut out = String::from("Equations:\n");
        if self.state.equations().is_empty() {
            out.push_str("  (none)\n");
        }
        for (i, eq) in self.state.equations().iter().enumerate() {
            out.push_str(&format!("  {}: {}\n", i, self.state.show(eq)));
        }
        out.push_str("Rules:\n");
        if self.state.rules().is_empty() {
            out.push_str("  (none)\n");
        }
        for (i, rule) in self.state.rules().iter().enumerate() {
            out.push_str(&format!("  {}: {}\n", i, self.state.show(rule)));
        }
        out
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CompletionConfig {
        &mut self.config
    }

    pub fn measures(&self) -> &[MeasureKind] {
        &self.measures
    }

    pub fn weight(&self) -> &Weight {
        &self.weight
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn build_order(measures: &[MeasureKind], weight: &Weight) -> ReductionOrder {
    let mut order = ReductionOrder::new();
    for kind in measures {
        match kind {
            MeasureKind::Weight => order.push(weight.clone()),
            MeasureKind::Size => order.push(Size),
            MeasureKind::Depth => order.push(Depth),
        }
    }
    order
}
