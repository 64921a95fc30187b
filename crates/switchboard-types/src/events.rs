//! UI event types carried by the event bus.
//!
//! `UiEvent` is the payload, `EventKind` the closed set of subscription keys.
//! Event names (`ui:navigation`, `view:neural:update`, ...) are a stable
//! contract and are rendered by `EventKind::name`.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Params, Theme, ToolCategory};

/// Events broadcast by the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Startup finished.
    Initialized,

    /// The active view changed.
    Navigation { view_id: String, params: Params },

    /// A tool call started.
    Loading { tool: String, params: Params },

    /// A tool call finished successfully.
    LoadingComplete { tool: String, result: Value },

    /// A tool call (or other user action) failed.
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        tool: Option<String>,
        error: String,
        params: Params,
    },

    /// Informational log line for the UI log pane.
    Log {
        level: LogLevel,
        message: String,
        data: Value,
    },

    /// Result of a categorized tool, routed to the category's view.
    ViewUpdate {
        category: ToolCategory,
        tool: String,
        result: Value,
        params: Params,
    },

    /// Periodic heartbeat.
    RealTimeUpdate,

    /// Unsolicited tool result pushed by the backend.
    RealTimeToolResult { result: Value },

    /// Theme was toggled.
    ThemeChanged { theme: Theme },

    /// Command palette was requested.
    CommandPaletteShow,

    /// All overlays should close.
    OverlaysHide,

    /// Shell is shutting down.
    Shutdown,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Initialized => EventKind::Initialized,
            UiEvent::Navigation { .. } => EventKind::Navigation,
            UiEvent::Loading { .. } => EventKind::Loading,
            UiEvent::LoadingComplete { .. } => EventKind::LoadingComplete,
            UiEvent::Error { .. } => EventKind::Error,
            UiEvent::Log { .. } => EventKind::Log,
            UiEvent::ViewUpdate { category, .. } => EventKind::ViewUpdate(*category),
            UiEvent::RealTimeUpdate => EventKind::RealTimeUpdate,
            UiEvent::RealTimeToolResult { .. } => EventKind::RealTimeToolResult,
            UiEvent::ThemeChanged { .. } => EventKind::ThemeChanged,
            UiEvent::CommandPaletteShow => EventKind::CommandPaletteShow,
            UiEvent::OverlaysHide => EventKind::OverlaysHide,
            UiEvent::Shutdown => EventKind::Shutdown,
        }
    }

    /// Stable event name, e.g. `ui:loading:complete`.
    pub fn name(&self) -> Cow<'static, str> {
        self.kind().name()
    }

    /// Convenience constructor for info-level log events.
    pub fn info(message: impl Into<String>, data: Value) -> Self {
        UiEvent::Log {
            level: LogLevel::Info,
            message: message.into(),
            data,
        }
    }
}

/// Subscription key for the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Initialized,
    Navigation,
    Loading,
    LoadingComplete,
    Error,
    Log,
    ViewUpdate(ToolCategory),
    RealTimeUpdate,
    RealTimeToolResult,
    ThemeChanged,
    CommandPaletteShow,
    OverlaysHide,
    Shutdown,
}

impl EventKind {
    /// Every kind, including one `ViewUpdate` per category.
    pub fn all() -> Vec<EventKind> {
        let mut kinds = vec![
            EventKind::Initialized,
            EventKind::Navigation,
            EventKind::Loading,
            EventKind::LoadingComplete,
            EventKind::Error,
            EventKind::Log,
        ];
        kinds.extend(ToolCategory::ALL.into_iter().map(EventKind::ViewUpdate));
        kinds.extend([
            EventKind::RealTimeUpdate,
            EventKind::RealTimeToolResult,
            EventKind::ThemeChanged,
            EventKind::CommandPaletteShow,
            EventKind::OverlaysHide,
            EventKind::Shutdown,
        ]);
        kinds
    }

    pub fn name(self) -> Cow<'static, str> {
        let name = match self {
            EventKind::Initialized => "ui:initialized",
            EventKind::Navigation => "ui:navigation",
            EventKind::Loading => "ui:loading",
            EventKind::LoadingComplete => "ui:loading:complete",
            EventKind::Error => "ui:error",
            EventKind::Log => "ui:log",
            EventKind::ViewUpdate(category) => {
                return Cow::Owned(format!("view:{category}:update"));
            }
            EventKind::RealTimeUpdate => "ui:real-time:update",
            EventKind::RealTimeToolResult => "ui:real-time:tool-result",
            EventKind::ThemeChanged => "ui:theme:changed",
            EventKind::CommandPaletteShow => "ui:command-palette:show",
            EventKind::OverlaysHide => "ui:overlays:hide",
            EventKind::Shutdown => "ui:shutdown",
        };
        Cow::Borrowed(name)
    }

    /// Parses a stable event name back into its kind.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(category) = name
            .strip_prefix("view:")
            .and_then(|rest| rest.strip_suffix(":update"))
        {
            return ToolCategory::parse(category).map(EventKind::ViewUpdate);
        }
        Self::all().into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Severity for `UiEvent::Log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_event_names_are_stable() {
        assert_eq!(EventKind::LoadingComplete.name(), "ui:loading:complete");
        assert_eq!(
            EventKind::ViewUpdate(ToolCategory::Github).name(),
            "view:github:update"
        );
        assert_eq!(
            EventKind::RealTimeToolResult.name(),
            "ui:real-time:tool-result"
        );
        assert_eq!(UiEvent::CommandPaletteShow.name(), "ui:command-palette:show");
    }

    #[test]
    fn test_parse_round_trips_every_kind() {
        for kind in EventKind::all() {
            assert_eq!(EventKind::parse(&kind.name()), Some(kind));
        }
        assert_eq!(EventKind::parse("view:overview:update"), None);
        assert_eq!(EventKind::parse("ui:unknown"), None);
    }

    #[test]
    fn test_view_update_kind_carries_category() {
        let event = UiEvent::ViewUpdate {
            category: ToolCategory::Memory,
            tool: "memory_usage".to_string(),
            result: json!({"used": 1}),
            params: Params::new(),
        };
        assert_eq!(event.kind(), EventKind::ViewUpdate(ToolCategory::Memory));
        assert_eq!(event.name(), "view:memory:update");
    }

    #[test]
    fn test_error_event_serializes_without_tool() {
        let event = UiEvent::Error {
            tool: None,
            error: "boom".to_string(),
            params: Params::new(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "error");
        assert!(value.get("tool").is_none());
    }
}
