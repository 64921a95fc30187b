//! External collaborators reached by the shell.
//!
//! The shell never talks to a backend, a store, or a renderer directly; it
//! goes through these traits. Implementations are injected at construction.
//!
//! - `ToolExecutor`: runs backend tools
//! - `StateStore`: view state, tool results, preferences, persistence
//! - `ViewLoader`: loads the component that backs a view

pub mod catalog;
pub mod process;
pub mod state_store;
pub mod unconfigured;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use switchboard_types::{Params, UserPreferences};
use tokio::sync::mpsc;

pub use catalog::ComponentCatalog;
pub use process::{ProcessToolExecutor, ProcessToolExecutorOptions};
pub use state_store::{FileStateStore, MemoryStateStore};
pub use unconfigured::UnconfiguredExecutor;

/// Health snapshot reported by a tool backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub uptime_secs: u64,
    pub active_tools: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swarm_status: Option<Value>,
}

#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Runs `tool` with `params` and returns its result.
    async fn execute(&self, tool: &str, params: &Params) -> Result<Value>;

    async fn status(&self) -> Result<BackendStatus> {
        Ok(BackendStatus::default())
    }

    /// Stream of unsolicited results pushed by the backend.
    ///
    /// Returns `None` when the backend does not push, or when the stream was
    /// already taken.
    fn take_result_stream(&self) -> Option<mpsc::UnboundedReceiver<Value>> {
        None
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Persisted parameters for a view (empty if never set).
    async fn get_view_state(&self, view_id: &str) -> Result<Params>;

    async fn set_view_state(&self, view_id: &str, params: &Params) -> Result<()>;

    async fn set_tool_result(&self, tool: &str, result: &Value) -> Result<()>;

    async fn user_preferences(&self) -> Result<Option<UserPreferences>>;

    /// Persists an arbitrary snapshot requested by a view.
    async fn persist_state(&self, data: &Value) -> Result<()>;

    /// Flushes everything held by the store.
    async fn persist_all_state(&self) -> Result<()>;
}

#[async_trait]
pub trait ViewLoader: Send + Sync {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Loads `component` with `params`.
    async fn load(&self, component: &str, params: &Params) -> Result<()>;

    /// Re-renders an already loaded component.
    async fn refresh(&self, component: &str) -> Result<()> {
        self.load(component, &Params::new()).await
    }
}
