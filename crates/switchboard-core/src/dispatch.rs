//! Tool dispatch.
//!
//! Runs a tool through the executor and broadcasts the lifecycle on the bus:
//!
//! - success: `ui:loading`, `view:<category>:update` (categorized tools only),
//!   `ui:log`, `ui:loading:complete`
//! - failure: `ui:loading`, `ui:error`
//!
//! The result is stored in the state store before `ui:log` is emitted. Error
//! logging happens in the shell's `ui:error` subscriber, during the emit.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Value, json};
use switchboard_types::{Params, ToolCategory, UiEvent};

use crate::bus::EventBus;
use crate::collaborators::{StateStore, ToolExecutor};
use crate::error::{Result, ShellError};

/// Reverse lookup from tool name to category.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    by_tool: HashMap<&'static str, ToolCategory>,
}

impl Default for CategoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryIndex {
    /// Builds the index from the static category table. A tool listed under
    /// several categories belongs to the first one in `ToolCategory::ALL`.
    pub fn new() -> Self {
        let mut by_tool = HashMap::new();
        for category in ToolCategory::ALL {
            for &tool in category.tools() {
                by_tool.entry(tool).or_insert(category);
            }
        }
        Self { by_tool }
    }

    pub fn category_of(&self, tool: &str) -> Option<ToolCategory> {
        self.by_tool.get(tool.to_lowercase().as_str()).copied()
    }

    /// Number of distinct tool names.
    pub fn total_tools(&self) -> usize {
        self.by_tool.len()
    }
}

pub struct ToolDispatcher {
    index: CategoryIndex,
    executor: Arc<dyn ToolExecutor>,
    state: Arc<dyn StateStore>,
}

impl std::fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDispatcher")
            .field("tools", &self.index.total_tools())
            .finish_non_exhaustive()
    }
}

impl ToolDispatcher {
    pub fn new(executor: Arc<dyn ToolExecutor>, state: Arc<dyn StateStore>) -> Self {
        Self {
            index: CategoryIndex::new(),
            executor,
            state,
        }
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn executor(&self) -> &Arc<dyn ToolExecutor> {
        &self.executor
    }

    /// Executes `tool` and returns its result. Failures are reported on the
    /// bus and returned; nothing is retried.
    pub async fn execute(&self, tool: &str, params: Params, bus: &EventBus) -> Result<Value> {
        bus.emit(UiEvent::Loading {
            tool: tool.to_string(),
            params: params.clone(),
        });

        let result = match self.executor.execute(tool, &params).await {
            Ok(result) => result,
            Err(source) => {
                tracing::debug!(tool, "tool execution failed");
                bus.emit(UiEvent::Error {
                    tool: Some(tool.to_string()),
                    error: format!("{source:#}"),
                    params,
                });
                return Err(ShellError::ToolExecution {
                    tool: tool.to_string(),
                    source,
                });
            }
        };

        if let Some(category) = self.index.category_of(tool) {
            bus.emit(UiEvent::ViewUpdate {
                category,
                tool: tool.to_string(),
                result: result.clone(),
                params: params.clone(),
            });
        }

        if let Err(source) = self.state.set_tool_result(tool, &result).await {
            bus.emit(UiEvent::Error {
                tool: Some(tool.to_string()),
                error: format!("{source:#}"),
                params,
            });
            return Err(ShellError::State(source));
        }

        tracing::info!(tool, "tool executed");
        bus.emit(UiEvent::info(
            format!("Executed {tool}"),
            json!({ "tool": tool, "params": params, "result": result }),
        ));
        bus.emit(UiEvent::LoadingComplete {
            tool: tool.to_string(),
            result: result.clone(),
        });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::{anyhow, bail};
    use async_trait::async_trait;

    use super::*;
    use crate::collaborators::MemoryStateStore;

    /// Echoes params back, or fails for tools named `fail_*`.
    struct EchoExecutor;

    #[async_trait]
    impl ToolExecutor for EchoExecutor {
        async fn execute(&self, tool: &str, params: &Params) -> anyhow::Result<Value> {
            if tool.starts_with("fail_") {
                bail!("backend offline");
            }
            Ok(json!({ "tool": tool, "echo": params }))
        }
    }

    fn recorder(bus: &mut EventBus) -> Arc<Mutex<Vec<String>>> {
        let names = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&names);
        bus.subscribe_all(move |event| sink.lock().unwrap().push(event.name().into_owned()));
        names
    }

    fn dispatcher(state: Arc<MemoryStateStore>) -> ToolDispatcher {
        ToolDispatcher::new(Arc::new(EchoExecutor), state)
    }

    #[test]
    fn test_every_listed_tool_classifies_to_its_category() {
        let index = CategoryIndex::new();
        for category in ToolCategory::ALL {
            for tool in category.tools() {
                assert_eq!(index.category_of(tool), Some(category), "{tool}");
            }
        }
        assert_eq!(index.category_of("NEURAL_TRAIN"), Some(ToolCategory::Neural));
        assert_eq!(index.category_of("unknown_tool"), None);
        assert_eq!(index.total_tools(), 74);
    }

    #[tokio::test]
    async fn test_success_event_order() {
        let mut bus = EventBus::new();
        let names = recorder(&mut bus);
        let state = Arc::new(MemoryStateStore::new());
        let dispatcher = dispatcher(Arc::clone(&state));

        let result = dispatcher
            .execute("neural_train", Params::new(), &bus)
            .await
            .unwrap();

        assert_eq!(result["tool"], "neural_train");
        assert_eq!(
            *names.lock().unwrap(),
            vec![
                "ui:loading",
                "view:neural:update",
                "ui:log",
                "ui:loading:complete"
            ]
        );
        assert_eq!(state.tool_result("neural_train"), Some(result));
    }

    #[tokio::test]
    async fn test_uncategorized_tool_skips_view_update() {
        let mut bus = EventBus::new();
        let names = recorder(&mut bus);
        let dispatcher = dispatcher(Arc::new(MemoryStateStore::new()));

        dispatcher
            .execute("custom_probe", Params::new(), &bus)
            .await
            .unwrap();

        assert_eq!(
            *names.lock().unwrap(),
            vec!["ui:loading", "ui:log", "ui:loading:complete"]
        );
    }

    #[tokio::test]
    async fn test_failure_emits_error_without_completion() {
        let mut bus = EventBus::new();
        let names = recorder(&mut bus);
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        bus.subscribe(switchboard_types::EventKind::Error, move |event| {
            if let UiEvent::Error { tool, error, .. } = event {
                sink.lock().unwrap().push((tool.clone(), error.clone()));
            }
        });
        let state = Arc::new(MemoryStateStore::new());
        let dispatcher = dispatcher(Arc::clone(&state));

        let err = dispatcher
            .execute("fail_health", Params::new(), &bus)
            .await
            .unwrap_err();

        assert_eq!(*names.lock().unwrap(), vec!["ui:loading", "ui:error"]);
        assert_eq!(
            *errors.lock().unwrap(),
            vec![(Some("fail_health".to_string()), "backend offline".to_string())]
        );
        let ShellError::ToolExecution { tool, source } = err else {
            panic!("expected ToolExecution");
        };
        assert_eq!(tool, "fail_health");
        assert_eq!(source.to_string(), "backend offline");
        assert_eq!(state.tool_result("fail_health"), None);
    }

    #[tokio::test]
    async fn test_failure_source_is_the_original_error() {
        #[derive(Debug, thiserror::Error)]
        #[error("quota exceeded")]
        struct Quota;

        struct QuotaExecutor;

        #[async_trait]
        impl ToolExecutor for QuotaExecutor {
            async fn execute(&self, _: &str, _: &Params) -> anyhow::Result<Value> {
                Err(anyhow!(Quota))
            }
        }

        let bus = EventBus::new();
        let dispatcher =
            ToolDispatcher::new(Arc::new(QuotaExecutor), Arc::new(MemoryStateStore::new()));
        let err = dispatcher
            .execute("memory_usage", Params::new(), &bus)
            .await
            .unwrap_err();

        let ShellError::ToolExecution { source, .. } = err else {
            panic!("expected ToolExecution");
        };
        assert!(source.downcast_ref::<Quota>().is_some());
    }
}
