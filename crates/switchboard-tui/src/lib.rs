//! Full-screen terminal front end for the switchboard shell.

pub mod effects;
pub mod events;
pub mod keys;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod style;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::{Context, Result};
pub use runtime::TuiRuntime;
use switchboard_core::{Config, shell_from_config};

/// Builds the shell from `config`, initializes it and runs the TUI until the
/// user quits.
pub async fn run(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `switchboard exec --tool <name>` for non-interactive execution."
        );
    }

    let mut shell = shell_from_config(config)?;
    shell
        .initialize()
        .await
        .context("Failed to initialize the shell")?;

    let mut runtime = TuiRuntime::new(shell, config.heartbeat_interval())?;
    runtime.run().await?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
