//! # Command Module
//!
//! The in-memory model of a launchable menu entry.
//!
//! A [`Command`] pairs a display name and category with an [`Action`]. The
//! action is a tagged enum exposing a single capability, [`Action::run`], which
//! always produces an [`ExecutionResult`]. Failures never escape `run`: they are
//! folded into the result so the UI can display them.
//!
//! ## Action Variants
//!
//! | Variant | Config `type` | Behaviour |
//! |---------|---------------|-----------|
//! | [`Action::StaticText`] | `func` | returns the stored text |
//! | [`Action::Process`] | `exec` | spawns a program and captures stdout + stderr |

pub mod executor;

pub use executor::{ExecutionError, ExecutionResult};

/// What happens when a command is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Canned output, returned verbatim.
    StaticText { text: String },
    /// An external program invocation.
    Process { program: String, args: Vec<String> },
}

impl Action {
    /// Run the action to completion and capture its output.
    ///
    /// `Process` blocks the calling thread until the child exits, so callers on
    /// the UI thread should dispatch it through the runtime instead.
    pub fn run(&self) -> ExecutionResult {
        match self {
            Action::StaticText { text } => ExecutionResult::success(text.clone()),
            Action::Process { program, args } => executor::run_process(program, args),
        }
    }

    /// Async form of [`Action::run`] used by the event loop.
    ///
    /// Dropping the future before it resolves kills a spawned process.
    pub async fn run_async(&self) -> ExecutionResult {
        match self {
            Action::StaticText { text } => ExecutionResult::success(text.clone()),
            Action::Process { program, args } => executor::run_process_async(program, args).await,
        }
    }

    /// Whether running this action may take observable wall-clock time.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Action::Process { .. })
    }
}

/// A named, categorised entry in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub category: String,
    pub action: Action,
}

impl Command {
    pub fn new(name: impl Into<String>, category: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            action,
        }
    }

    /// Secondary line shown under the name in the selection list.
    pub fn description(&self) -> String {
        format!("Category: {}", self.category)
    }

    /// Text the selection filter matches against.
    pub fn filter_value(&self) -> &str {
        &self.name
    }
}
