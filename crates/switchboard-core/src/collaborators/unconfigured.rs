//! Executor used when no tool command is configured.

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::Value;
use switchboard_types::Params;

use super::ToolExecutor;

#[derive(Debug, Default)]
pub struct UnconfiguredExecutor;

#[async_trait]
impl ToolExecutor for UnconfiguredExecutor {
    async fn execute(&self, tool: &str, _params: &Params) -> Result<Value> {
        bail!("No tool backend configured; set `tool_command` in config.toml to run '{tool}'")
    }
}
