//! TUI state.
//!
//! `AppState` mirrors what the shell has announced on its bus (current view,
//! theme, tool activity) plus purely visual state (event log, palette).

use std::collections::VecDeque;

use switchboard_core::{Shell, ShortcutAction};
use switchboard_types::{LogLevel, Theme, UiEvent, ViewDescriptor};

use crate::overlays::CommandPaletteState;
use crate::overlays::command_palette::palette_entries;

/// Lines kept in the event log.
pub const LOG_CAPACITY: usize = 200;

/// Longest result preview shown in the log.
const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTone {
    Muted,
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub time: String,
    pub tone: LogTone,
    pub text: String,
}

#[derive(Debug)]
pub struct AppState {
    pub views: Vec<ViewDescriptor>,
    /// Bound combos, sorted by combo.
    pub shortcuts: Vec<(String, ShortcutAction)>,
    pub current_view: Option<String>,
    pub theme: Theme,
    pub palette: Option<CommandPaletteState>,
    pub log: VecDeque<LogLine>,
    pub heartbeats: u64,
    /// Tool currently running, if any.
    pub loading: Option<String>,
    pub last_error: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(
        views: Vec<ViewDescriptor>,
        shortcuts: Vec<(String, ShortcutAction)>,
        theme: Theme,
    ) -> Self {
        Self {
            views,
            shortcuts,
            current_view: None,
            theme,
            palette: None,
            log: VecDeque::with_capacity(LOG_CAPACITY),
            heartbeats: 0,
            loading: None,
            last_error: None,
            should_quit: false,
        }
    }

    pub fn from_shell(shell: &Shell) -> Self {
        let shortcuts = shell
            .shortcuts()
            .iter()
            .map(|(combo, action)| (combo.to_string(), action.clone()))
            .collect();
        let mut state = Self::new(shell.registry().views().to_vec(), shortcuts, shell.theme());
        state.current_view = shell.current_view().map(str::to_string);
        state
    }

    pub fn current_descriptor(&self) -> Option<&ViewDescriptor> {
        let current = self.current_view.as_deref()?;
        self.views.iter().find(|view| view.id == current)
    }

    fn view_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.views
            .iter()
            .find(|view| view.id == id)
            .map_or(id, |view| view.name.as_str())
    }

    /// First combo bound to `action`.
    pub fn shortcut_for(&self, action: &ShortcutAction) -> Option<&str> {
        self.shortcuts
            .iter()
            .find(|(_, bound)| bound == action)
            .map(|(combo, _)| combo.as_str())
    }

    pub fn push_log(&mut self, tone: LogTone, text: impl Into<String>) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(LogLine {
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
            tone,
            text: text.into(),
        });
    }

    pub fn apply_bus_event(&mut self, event: &UiEvent) {
        match event {
            UiEvent::Initialized => self.push_log(LogTone::Muted, "Shell initialized"),
            UiEvent::Navigation { view_id, .. } => {
                let line = format!("Opened {}", self.view_name(view_id));
                self.current_view = Some(view_id.clone());
                self.push_log(LogTone::Info, line);
            }
            UiEvent::Loading { tool, .. } => {
                self.loading = Some(tool.clone());
                self.push_log(LogTone::Muted, format!("Running {tool}…"));
            }
            UiEvent::LoadingComplete { tool, result } => {
                self.loading = None;
                self.push_log(
                    LogTone::Success,
                    format!("{tool} completed: {}", preview(result)),
                );
            }
            UiEvent::Error { tool, error, .. } => {
                if tool.is_some() && tool == &self.loading {
                    self.loading = None;
                }
                let line = match tool {
                    Some(tool) => format!("{tool}: {error}"),
                    None => error.clone(),
                };
                self.last_error = Some(line.clone());
                self.push_log(LogTone::Error, line);
            }
            UiEvent::Log { level, message, .. } => {
                let tone = match level {
                    LogLevel::Debug => LogTone::Muted,
                    LogLevel::Info => LogTone::Info,
                    LogLevel::Warn => LogTone::Warning,
                    LogLevel::Error => LogTone::Error,
                };
                self.push_log(tone, message.clone());
            }
            UiEvent::ViewUpdate { category, tool, .. } => {
                self.push_log(LogTone::Muted, format!("{category} view updated by {tool}"));
            }
            UiEvent::RealTimeUpdate => self.heartbeats += 1,
            UiEvent::RealTimeToolResult { result } => {
                self.push_log(LogTone::Info, format!("Backend pushed: {}", preview(result)));
            }
            UiEvent::ThemeChanged { theme } => {
                self.theme = *theme;
                self.push_log(LogTone::Muted, format!("Theme: {theme}"));
            }
            UiEvent::CommandPaletteShow => {
                if self.palette.is_none() {
                    self.palette = Some(CommandPaletteState::open(palette_entries(self)));
                }
            }
            UiEvent::OverlaysHide => {
                self.palette = None;
                self.last_error = None;
            }
            UiEvent::Shutdown => self.push_log(LogTone::Muted, "Shutting down"),
        }
    }
}

/// Single-line JSON preview, truncated.
fn preview(value: &serde_json::Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= PREVIEW_CHARS {
        return text;
    }
    let mut short: String = text.chars().take(PREVIEW_CHARS - 1).collect();
    short.push('…');
    short
}

/// State over the default views, for tests.
#[cfg(test)]
pub(crate) fn sample_state() -> AppState {
    let views = switchboard_core::registry::default_views();
    let shortcuts = switchboard_core::ShortcutTable::for_views(&views)
        .iter()
        .map(|(combo, action)| (combo.to_string(), action.clone()))
        .collect();
    AppState::new(views, shortcuts, Theme::Dark)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use switchboard_types::Params;

    use super::*;

    #[test]
    fn test_navigation_tracks_current_view() {
        let mut state = sample_state();
        state.apply_bus_event(&UiEvent::Navigation {
            view_id: "neural".to_string(),
            params: Params::new(),
        });
        assert_eq!(state.current_view.as_deref(), Some("neural"));
        assert_eq!(state.current_descriptor().unwrap().name, "Neural Network");
        assert_eq!(state.log.back().unwrap().text, "Opened Neural Network");
    }

    #[test]
    fn test_loading_lifecycle() {
        let mut state = sample_state();
        state.apply_bus_event(&UiEvent::Loading {
            tool: "health_check".to_string(),
            params: Params::new(),
        });
        assert_eq!(state.loading.as_deref(), Some("health_check"));

        state.apply_bus_event(&UiEvent::LoadingComplete {
            tool: "health_check".to_string(),
            result: json!({"ok": true}),
        });
        assert_eq!(state.loading, None);
        let last = state.log.back().unwrap();
        assert_eq!(last.tone, LogTone::Success);
        assert_eq!(last.text, r#"health_check completed: {"ok":true}"#);
    }

    #[test]
    fn test_error_clears_loading_and_is_remembered() {
        let mut state = sample_state();
        state.loading = Some("neural_train".to_string());
        state.apply_bus_event(&UiEvent::Error {
            tool: Some("neural_train".to_string()),
            error: "backend offline".to_string(),
            params: Params::new(),
        });
        assert_eq!(state.loading, None);
        assert_eq!(
            state.last_error.as_deref(),
            Some("neural_train: backend offline")
        );

        state.apply_bus_event(&UiEvent::OverlaysHide);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_palette_show_and_hide() {
        let mut state = sample_state();
        state.apply_bus_event(&UiEvent::CommandPaletteShow);
        assert!(state.palette.is_some());
        state.apply_bus_event(&UiEvent::OverlaysHide);
        assert!(state.palette.is_none());
    }

    #[test]
    fn test_heartbeat_and_theme() {
        let mut state = sample_state();
        state.apply_bus_event(&UiEvent::RealTimeUpdate);
        state.apply_bus_event(&UiEvent::RealTimeUpdate);
        state.apply_bus_event(&UiEvent::ThemeChanged { theme: Theme::Light });
        assert_eq!(state.heartbeats, 2);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut state = sample_state();
        for i in 0..(LOG_CAPACITY + 5) {
            state.push_log(LogTone::Info, format!("line {i}"));
        }
        assert_eq!(state.log.len(), LOG_CAPACITY);
        assert_eq!(state.log.front().unwrap().text, "line 5");
    }

    #[test]
    fn test_preview_truncates_long_results() {
        let long = json!("x".repeat(200));
        let text = preview(&long);
        assert_eq!(text.chars().count(), PREVIEW_CHARS);
        assert!(text.ends_with('…'));
    }

    #[test]
    fn test_shortcut_for_prefers_first_combo() {
        let state = sample_state();
        assert_eq!(
            state.shortcut_for(&ShortcutAction::Navigate("overview".to_string())),
            Some("1")
        );
        assert_eq!(state.shortcut_for(&ShortcutAction::Back), Some("ctrl+b"));
    }
}
