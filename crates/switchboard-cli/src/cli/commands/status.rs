//! Status command handler.

use anyhow::{Context, Result};
use switchboard_core::{Config, shell_from_config};

pub async fn run(config: &Config) -> Result<()> {
    let mut shell = shell_from_config(config)?;
    shell.initialize().await.context("initialize shell")?;

    let status = shell.system_status().await.context("query backend status")?;
    println!("{}", serde_json::to_string_pretty(&status)?);

    shell.shutdown().await.context("shut down shell")?;
    Ok(())
}
