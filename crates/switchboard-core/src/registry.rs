//! View registry.
//!
//! Maps view ids to descriptors and tracks whether each view has been loaded.
//! Registration order is preserved; it defines the numeric shortcut ordinals.

use std::collections::HashMap;
use std::sync::Arc;

use switchboard_types::{Params, ToolCategory, ViewDescriptor};

use crate::collaborators::ViewLoader;
use crate::error::{Result, ShellError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loaded,
}

pub struct ViewRegistry {
    views: Vec<ViewDescriptor>,
    index: HashMap<String, usize>,
    load_states: Vec<LoadState>,
    loader: Arc<dyn ViewLoader>,
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("views", &self.views)
            .field("load_states", &self.load_states)
            .finish_non_exhaustive()
    }
}

impl ViewRegistry {
    pub fn new(loader: Arc<dyn ViewLoader>) -> Self {
        Self {
            views: Vec::new(),
            index: HashMap::new(),
            load_states: Vec::new(),
            loader,
        }
    }

    pub fn loader(&self) -> &Arc<dyn ViewLoader> {
        &self.loader
    }

    /// Registers a view. Ids are unique: a second registration of the same id
    /// fails with `DuplicateView` and leaves the first one in place.
    pub fn register_view(&mut self, descriptor: ViewDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.id) {
            return Err(ShellError::DuplicateView { id: descriptor.id });
        }
        tracing::debug!(view = %descriptor.id, component = %descriptor.component, "register view");
        self.index.insert(descriptor.id.clone(), self.views.len());
        self.views.push(descriptor);
        self.load_states.push(LoadState::Unloaded);
        Ok(())
    }

    pub fn has_view(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn view(&self, id: &str) -> Option<&ViewDescriptor> {
        self.index.get(id).map(|&pos| &self.views[pos])
    }

    /// Registered views in registration order.
    pub fn views(&self) -> &[ViewDescriptor] {
        &self.views
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn load_state(&self, id: &str) -> Option<LoadState> {
        self.index.get(id).map(|&pos| self.load_states[pos])
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| ShellError::ViewNotFound { id: id.to_string() })
    }

    /// Loads the view's component. Loader failures are returned unchanged
    /// and leave the load state as it was.
    pub async fn load_view(&mut self, id: &str, params: &Params) -> Result<()> {
        let pos = self.position(id)?;
        let component = &self.views[pos].component;
        self.loader
            .load(component, params)
            .await
            .map_err(ShellError::ViewLoad)?;
        self.load_states[pos] = LoadState::Loaded;
        Ok(())
    }

    pub async fn refresh_view(&mut self, id: &str) -> Result<()> {
        let pos = self.position(id)?;
        let component = &self.views[pos].component;
        self.loader
            .refresh(component)
            .await
            .map_err(ShellError::ViewLoad)?;
        self.load_states[pos] = LoadState::Loaded;
        Ok(())
    }
}

/// The stock dashboard views, in shortcut order.
pub fn default_views() -> Vec<ViewDescriptor> {
    let tools = |category: ToolCategory| category.tools().len();
    vec![
        ViewDescriptor::new("overview", "Overview", "OverviewView")
            .with_icon("🏠")
            .with_description("System overview and quick actions")
            .with_shortcut('1'),
        ViewDescriptor::new("processes", "Processes", "ProcessView")
            .with_icon("⚙️")
            .with_description("Process management and monitoring")
            .with_shortcut('2'),
        ViewDescriptor::new("neural", "Neural Network", "NeuralNetworkView")
            .with_icon("🧠")
            .with_description("AI model training and neural operations")
            .with_shortcut('3')
            .with_tool_count(tools(ToolCategory::Neural)),
        ViewDescriptor::new("memory", "Memory Bank", "MemoryManagementView")
            .with_icon("💾")
            .with_description("Memory management and persistence")
            .with_shortcut('4')
            .with_tool_count(tools(ToolCategory::Memory)),
        ViewDescriptor::new("monitoring", "Monitoring", "MonitoringView")
            .with_icon("📊")
            .with_description("Performance monitoring and analysis")
            .with_shortcut('5')
            .with_tool_count(tools(ToolCategory::Monitoring)),
        ViewDescriptor::new("workflow", "Workflows", "WorkflowAutomationView")
            .with_icon("🔄")
            .with_description("Automation and workflow management")
            .with_shortcut('6')
            .with_tool_count(tools(ToolCategory::Workflow)),
        ViewDescriptor::new("github", "GitHub", "GitHubIntegrationView")
            .with_icon("🐙")
            .with_description("GitHub integration and operations")
            .with_shortcut('7')
            .with_tool_count(tools(ToolCategory::Github)),
        ViewDescriptor::new("daa", "Dynamic Agents", "DAAView")
            .with_icon("🤖")
            .with_description("Dynamic agent architecture")
            .with_shortcut('8')
            .with_tool_count(tools(ToolCategory::Daa)),
        ViewDescriptor::new("system", "System", "SystemUtilitiesView")
            .with_icon("🛠️")
            .with_description("System utilities and diagnostics")
            .with_shortcut('9')
            .with_tool_count(tools(ToolCategory::System)),
        ViewDescriptor::new("cli", "CLI Bridge", "CLICommandView")
            .with_icon("⌨️")
            .with_description("Command-line interface bridge")
            .with_shortcut('0'),
        ViewDescriptor::new("help", "Help", "HelpView")
            .with_icon("❓")
            .with_description("Documentation and help")
            .with_shortcut('?'),
    ]
}
