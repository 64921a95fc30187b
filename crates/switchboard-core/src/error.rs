//! Error taxonomy for the shell.
//!
//! Every error reaches the immediate caller. The only local handling anywhere
//! in the core is emitting `ui:error` and logging before returning.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShellError>;

/// Startup stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    StateStore,
    ToolExecutor,
    ViewLoader,
    Preferences,
    RegisterViews,
}

impl std::fmt::Display for InitStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InitStep::StateStore => "state store",
            InitStep::ToolExecutor => "tool executor",
            InitStep::ViewLoader => "view loader",
            InitStep::Preferences => "user preferences",
            InitStep::RegisterViews => "view registration",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ShellError {
    /// Navigation to an id that was never registered.
    #[error("View not found: {id}")]
    ViewNotFound { id: String },

    /// A view id was registered twice.
    #[error("View already registered: {id}")]
    DuplicateView { id: String },

    /// The view loader failed; the loader's error is surfaced as-is.
    #[error(transparent)]
    ViewLoad(anyhow::Error),

    /// The tool backend failed. `source` is the backend's original error.
    #[error("Tool '{tool}' failed: {source}")]
    ToolExecution {
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    /// A backend-wide call (status or shutdown) failed.
    #[error("Tool backend {operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The state store failed.
    #[error("State store error: {0}")]
    State(#[source] anyhow::Error),

    /// A startup step failed; startup is aborted.
    #[error("Initialization failed at {step}: {source}")]
    Initialization {
        step: InitStep,
        #[source]
        source: anyhow::Error,
    },
}

impl ShellError {
    pub(crate) fn init<E: Into<anyhow::Error>>(step: InitStep) -> impl FnOnce(E) -> ShellError {
        move |err| ShellError::Initialization {
            step,
            source: err.into(),
        }
    }
}
