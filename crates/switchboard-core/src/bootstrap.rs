//! Builds a shell wired to the collaborators named by the config.

use std::sync::Arc;

use anyhow::Result;

use crate::collaborators::{
    ComponentCatalog, FileStateStore, ProcessToolExecutor, ToolExecutor, UnconfiguredExecutor,
};
use crate::config::Config;
use crate::shell::Shell;

/// Process executor when `tool_command` is set, file-backed state, and the
/// default component catalog. The shell is returned uninitialized.
pub fn shell_from_config(config: &Config) -> Result<Shell> {
    let executor: Arc<dyn ToolExecutor> = match config.executor_options() {
        Some(options) => {
            tracing::debug!(program = %options.program, "using process tool executor");
            Arc::new(ProcessToolExecutor::new(options))
        }
        None => Arc::new(UnconfiguredExecutor),
    };
    let state = Arc::new(FileStateStore::new(config.state_path()?));
    let loader = Arc::new(ComponentCatalog::with_default_components());

    Ok(Shell::new(executor, state, loader).with_preferences(config.preferences()))
}
