use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use switchboard_types::{Theme, UserPreferences};

use crate::collaborators::ProcessToolExecutorOptions;

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for switchboard configuration and state.
    //!
    //! SWITCHBOARD_HOME resolution order:
    //! 1. SWITCHBOARD_HOME environment variable (if set)
    //! 2. ~/.config/switchboard (default)

    use std::path::PathBuf;

    use anyhow::{Context, Result};

    pub const HOME_ENV: &str = "SWITCHBOARD_HOME";

    pub fn switchboard_home() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(home));
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("switchboard"))
            .context("Could not determine home directory")
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(switchboard_home()?.join("config.toml"))
    }

    /// Default state snapshot location.
    pub fn state_path() -> Result<PathBuf> {
        Ok(switchboard_home()?.join("state.json"))
    }

    pub fn logs_dir() -> Result<PathBuf> {
        Ok(switchboard_home()?.join("logs"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub responsive: bool,
    pub heartbeat_interval_ms: u64,
    /// Program that runs tools; `None` means no backend is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_command: Option<String>,
    pub tool_args: Vec<String>,
    /// 0 disables the timeout.
    pub tool_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            responsive: true,
            heartbeat_interval_ms: Self::DEFAULT_HEARTBEAT_MS,
            tool_command: None,
            tool_args: Vec::new(),
            tool_timeout_secs: 0,
            state_file: None,
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub const DEFAULT_HEARTBEAT_MS: u64 = 5000;
    const DEFAULT_LOG_FILTER: &str = "info";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path()?)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Preferences used until the state store provides its own.
    pub fn preferences(&self) -> UserPreferences {
        UserPreferences {
            theme: self.theme,
            responsive: self.responsive,
        }
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms.max(1))
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        (self.tool_timeout_secs > 0).then(|| Duration::from_secs(self.tool_timeout_secs))
    }

    pub fn state_path(&self) -> Result<PathBuf> {
        match &self.state_file {
            Some(path) => Ok(path.clone()),
            None => paths::state_path(),
        }
    }

    /// Process executor settings, if a tool command is configured.
    pub fn executor_options(&self) -> Option<ProcessToolExecutorOptions> {
        let program = self.tool_command.as_deref()?.trim();
        if program.is_empty() {
            return None;
        }
        Some(ProcessToolExecutorOptions {
            program: program.to_string(),
            args: self.tool_args.clone(),
            timeout: self.tool_timeout(),
        })
    }
}
