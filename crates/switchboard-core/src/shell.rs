//! Shell controller.
//!
//! Owns the event bus, view registry, navigation state, tool dispatcher and
//! shortcut table. Collaborators are injected as trait objects.
//!
//! All mutation goes through `&mut self`, so callers process one command at a
//! time. Background producers (heartbeat, backend result stream) never touch
//! the shell; they send `ShellCommand`s into the caller's inbox instead.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use switchboard_types::{
    EventKind, KeyPress, NavigationEntry, Params, Theme, UiEvent, UserPreferences, ViewDescriptor,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::bus::EventBus;
use crate::collaborators::{StateStore, ToolExecutor, ViewLoader};
use crate::dispatch::{CategoryIndex, ToolDispatcher};
use crate::error::{InitStep, Result, ShellError};
use crate::navigation::{NavContext, Navigator};
use crate::registry::{ViewRegistry, default_views};
use crate::shortcuts::{KeyOutcome, ShortcutAction, ShortcutTable};

/// Default heartbeat period.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// Inbound requests, handled one at a time by `Shell::handle_command`.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    ExecuteTool { tool: String, params: Params },
    Navigate { view_id: String, params: Params },
    PersistState(Value),
    Heartbeat,
    RemoteToolResult(Value),
}

/// Snapshot returned by `Shell::system_status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatus {
    pub uptime_secs: u64,
    pub active_tools: usize,
    pub memory_usage: Option<Value>,
    pub swarm_status: Option<Value>,
    pub tools_available: usize,
    pub views_registered: usize,
}

pub struct Shell {
    bus: EventBus,
    registry: ViewRegistry,
    navigator: Navigator,
    dispatcher: ToolDispatcher,
    shortcuts: ShortcutTable,
    state: Arc<dyn StateStore>,
    preferences: UserPreferences,
    pending_views: Vec<ViewDescriptor>,
    initialized: bool,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("current_view", &self.navigator.current_view())
            .field("history_len", &self.navigator.history_len())
            .field("views", &self.registry.view_count())
            .field("theme", &self.preferences.theme)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl Shell {
    pub fn new(
        executor: Arc<dyn ToolExecutor>,
        state: Arc<dyn StateStore>,
        loader: Arc<dyn ViewLoader>,
    ) -> Self {
        let mut bus = EventBus::new();
        bus.subscribe(EventKind::Error, |event| {
            if let UiEvent::Error { tool, error, .. } = event {
                tracing::error!(tool = tool.as_deref().unwrap_or("-"), "UI error: {error}");
            }
        });

        Self {
            bus,
            registry: ViewRegistry::new(loader),
            navigator: Navigator::new(),
            dispatcher: ToolDispatcher::new(executor, Arc::clone(&state)),
            shortcuts: ShortcutTable::new(),
            state,
            preferences: UserPreferences::default(),
            pending_views: default_views(),
            initialized: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the views registered by `initialize`.
    #[must_use]
    pub fn with_views(mut self, views: Vec<ViewDescriptor>) -> Self {
        self.pending_views = views;
        self
    }

    /// Preferences used when the state store has none.
    #[must_use]
    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Runs startup: state store, executor, loader, preferences, views,
    /// shortcuts, then `ui:initialized`. The first failing step aborts.
    pub async fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            tracing::debug!("shell already initialized");
            return Ok(());
        }

        self.state
            .initialize()
            .await
            .map_err(ShellError::init(InitStep::StateStore))?;
        self.dispatcher
            .executor()
            .initialize()
            .await
            .map_err(ShellError::init(InitStep::ToolExecutor))?;
        self.registry
            .loader()
            .initialize()
            .await
            .map_err(ShellError::init(InitStep::ViewLoader))?;
        if let Some(preferences) = self
            .state
            .user_preferences()
            .await
            .map_err(ShellError::init(InitStep::Preferences))?
        {
            self.preferences = preferences;
        }

        for view in std::mem::take(&mut self.pending_views) {
            self.registry
                .register_view(view)
                .map_err(ShellError::init(InitStep::RegisterViews))?;
        }
        self.shortcuts = ShortcutTable::for_views(self.registry.views());

        self.initialized = true;
        tracing::info!(
            views = self.registry.view_count(),
            shortcuts = self.shortcuts.len(),
            theme = %self.preferences.theme,
            "shell initialized"
        );
        self.bus.emit(UiEvent::Initialized);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutTable {
        &mut self.shortcuts
    }

    pub fn category_index(&self) -> &CategoryIndex {
        self.dispatcher.index()
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn theme(&self) -> Theme {
        self.preferences.theme
    }

    pub fn current_view(&self) -> Option<&str> {
        self.navigator.current_view()
    }

    pub fn history(&self) -> &[NavigationEntry] {
        self.navigator.history()
    }

    /// Token cancelled by `shutdown`; background tasks watch child tokens.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub async fn navigate_to(&mut self, view_id: &str, params: Params) -> Result<()> {
        let cx = NavContext {
            registry: &mut self.registry,
            state: self.state.as_ref(),
            bus: &self.bus,
        };
        self.navigator.navigate_to(view_id, params, cx).await
    }

    /// Returns to the previous view. `Ok(false)` when there is no history.
    pub async fn go_back(&mut self) -> Result<bool> {
        let cx = NavContext {
            registry: &mut self.registry,
            state: self.state.as_ref(),
            bus: &self.bus,
        };
        self.navigator.go_back(cx).await
    }

    pub async fn execute_tool(&self, tool: &str, params: Params) -> Result<Value> {
        self.dispatcher.execute(tool, params, &self.bus).await
    }

    /// Re-renders the current view. No-op before the first navigation.
    pub async fn refresh_current_view(&mut self) -> Result<()> {
        let Some(current) = self.navigator.current_view() else {
            return Ok(());
        };
        let current = current.to_string();
        self.registry.refresh_view(&current).await
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.preferences.theme = self.preferences.theme.toggled();
        tracing::debug!(theme = %self.preferences.theme, "theme toggled");
        self.bus.emit(UiEvent::ThemeChanged {
            theme: self.preferences.theme,
        });
        self.preferences.theme
    }

    pub fn show_command_palette(&self) {
        self.bus.emit(UiEvent::CommandPaletteShow);
    }

    pub fn hide_all_overlays(&self) {
        self.bus.emit(UiEvent::OverlaysHide);
    }

    /// Offers a key press to the shortcut table. A matching binding runs its
    /// action exactly once.
    pub async fn handle_key(&mut self, press: &KeyPress) -> Result<KeyOutcome> {
        let Some(action) = self.shortcuts.resolve(press).cloned() else {
            return Ok(KeyOutcome::Ignored);
        };
        tracing::debug!(combo = %press.combo(), ?action, "shortcut");
        self.run_action(action).await?;
        Ok(KeyOutcome::Handled)
    }

    pub async fn run_action(&mut self, action: ShortcutAction) -> Result<()> {
        let result = match action {
            ShortcutAction::Navigate(view_id) => self.navigate_to(&view_id, Params::new()).await,
            ShortcutAction::Help => self.navigate_to("help", Params::new()).await,
            ShortcutAction::Back => self.go_back().await.map(|_| ()),
            ShortcutAction::Refresh => self.refresh_current_view().await,
            ShortcutAction::CommandPalette => {
                self.show_command_palette();
                Ok(())
            }
            ShortcutAction::HideOverlays => {
                self.hide_all_overlays();
                Ok(())
            }
            ShortcutAction::ToggleTheme => {
                self.toggle_theme();
                Ok(())
            }
        };
        result.inspect_err(|err| self.report(err))
    }

    /// Handles one inbound command. Tool results are returned for
    /// `ExecuteTool`; every other command yields `None`.
    pub async fn handle_command(&mut self, command: ShellCommand) -> Result<Option<Value>> {
        match command {
            ShellCommand::ExecuteTool { tool, params } => {
                self.execute_tool(&tool, params).await.map(Some)
            }
            ShellCommand::Navigate { view_id, params } => self
                .navigate_to(&view_id, params)
                .await
                .inspect_err(|err| self.report(err))
                .map(|()| None),
            ShellCommand::PersistState(data) => self
                .state
                .persist_state(&data)
                .await
                .map_err(ShellError::State)
                .inspect_err(|err| self.report(err))
                .map(|()| None),
            ShellCommand::Heartbeat => {
                self.bus.emit(UiEvent::RealTimeUpdate);
                Ok(None)
            }
            ShellCommand::RemoteToolResult(result) => {
                self.bus.emit(UiEvent::RealTimeToolResult { result });
                Ok(None)
            }
        }
    }

    /// Emits `ui:error` for failures that did not already report themselves.
    fn report(&self, err: &ShellError) {
        if matches!(err, ShellError::ToolExecution { .. }) {
            return;
        }
        self.bus.emit(UiEvent::Error {
            tool: None,
            error: err.to_string(),
            params: Params::new(),
        });
    }

    pub async fn system_status(&self) -> Result<SystemStatus> {
        let backend = self
            .dispatcher
            .executor()
            .status()
            .await
            .map_err(|source| ShellError::Backend {
                operation: "status",
                source,
            })
            .inspect_err(|err| self.report(err))?;
        Ok(SystemStatus {
            uptime_secs: backend.uptime_secs,
            active_tools: backend.active_tools,
            memory_usage: backend.memory_usage,
            swarm_status: backend.swarm_status,
            tools_available: self.dispatcher.index().total_tools(),
            views_registered: self.registry.view_count(),
        })
    }

    /// Sends `Heartbeat` into `inbox` every `period` until shutdown or until
    /// the inbox closes. The first beat comes one period after the call.
    pub fn spawn_heartbeat(
        &self,
        inbox: mpsc::UnboundedSender<ShellCommand>,
        period: Duration,
    ) -> JoinHandle<()> {
        let cancel = self.cancel.child_token();
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if inbox.send(ShellCommand::Heartbeat).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("heartbeat stopped");
        })
    }

    /// Forwards the executor's pushed results into `inbox` as
    /// `RemoteToolResult`. `None` if the executor does not push results.
    pub fn forward_result_stream(
        &self,
        inbox: mpsc::UnboundedSender<ShellCommand>,
    ) -> Option<JoinHandle<()>> {
        let mut stream = self.dispatcher.executor().take_result_stream()?;
        let cancel = self.cancel.child_token();
        Some(tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    next = stream.recv() => {
                        let Some(result) = next else { break };
                        if inbox.send(ShellCommand::RemoteToolResult(result)).is_err() {
                            break;
                        }
                    }
                }
            }
        }))
    }

    /// Persists all state, shuts the executor down, stops background tasks
    /// and emits `ui:shutdown`. Background tasks stop even if a step fails.
    pub async fn shutdown(&mut self) -> Result<()> {
        let result = self.flush_and_stop_backend().await;
        self.cancel.cancel();
        result?;
        tracing::info!("shell shut down");
        self.bus.emit(UiEvent::Shutdown);
        Ok(())
    }

    async fn flush_and_stop_backend(&self) -> Result<()> {
        self.state
            .persist_all_state()
            .await
            .map_err(ShellError::State)?;
        self.dispatcher
            .executor()
            .shutdown()
            .await
            .map_err(|source| ShellError::Backend {
                operation: "shutdown",
                source,
            })
            .inspect_err(|err| self.report(err))
    }
}
