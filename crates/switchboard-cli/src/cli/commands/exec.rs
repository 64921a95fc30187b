//! Exec command handler.

use anyhow::{Context, Result};
use switchboard_core::{Config, shell_from_config};
use switchboard_types::Params;

pub async fn run(config: &Config, tool: &str, raw_params: &str) -> Result<()> {
    let params: Params =
        serde_json::from_str(raw_params).context("--params must be a JSON object")?;

    let mut shell = shell_from_config(config)?;
    shell.initialize().await.context("initialize shell")?;

    let result = shell.execute_tool(tool, params).await;
    // Persist even when the tool failed; the tool error wins if both fail.
    let shutdown = shell.shutdown().await;
    let value = result?;
    shutdown.context("shut down shell")?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
