//! View descriptors.

use serde::{Deserialize, Serialize};

/// Metadata for a navigable panel.
///
/// Created once at registration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    /// Unique, stable identifier (`"overview"`, `"neural"`, ...).
    pub id: String,
    /// Display name.
    pub name: String,
    pub icon: String,
    pub description: String,
    /// Name of the component the view loader renders for this view.
    pub component: String,
    /// Single-character hint shown next to the view name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<char>,
    /// Number of backend tools surfaced by this view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_count: Option<usize>,
}

impl ViewDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            description: String::new(),
            component: component.into(),
            shortcut: None,
            tool_count: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_shortcut(mut self, shortcut: char) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    #[must_use]
    pub fn with_tool_count(mut self, count: usize) -> Self {
        self.tool_count = Some(count);
        self
    }

    /// Location fragment for history integration (`#neural`).
    pub fn fragment(&self) -> String {
        format!("#{}", self.id)
    }
}
