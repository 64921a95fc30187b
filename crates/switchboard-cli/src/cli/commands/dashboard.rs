//! Default command: the full-screen dashboard.

use anyhow::Result;
use switchboard_core::Config;

pub async fn run(config: &Config) -> Result<()> {
    tracing::info!(theme = %config.theme, "starting dashboard");
    switchboard_tui::run(config).await
}
