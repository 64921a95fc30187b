//! Keyboard shortcut table.
//!
//! Maps normalized combos (see `switchboard_types::keys::normalize_combo`) to
//! shell actions. One key press resolves to at most one action.

use std::collections::BTreeMap;

use switchboard_types::keys::normalize_combo;
use switchboard_types::{KeyPress, ViewDescriptor};

/// Action bound to a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutAction {
    Navigate(String),
    CommandPalette,
    Help,
    Back,
    Refresh,
    ToggleTheme,
    HideOverlays,
}

impl ShortcutAction {
    pub fn label(&self) -> String {
        match self {
            ShortcutAction::Navigate(id) => format!("Go to {id}"),
            ShortcutAction::CommandPalette => "Command palette".to_string(),
            ShortcutAction::Help => "Help".to_string(),
            ShortcutAction::Back => "Back".to_string(),
            ShortcutAction::Refresh => "Refresh view".to_string(),
            ShortcutAction::ToggleTheme => "Toggle theme".to_string(),
            ShortcutAction::HideOverlays => "Close overlays".to_string(),
        }
    }
}

/// Result of offering a key press to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A binding matched and its action ran; the key is consumed.
    Handled,
    /// No binding; the key belongs to whoever has focus.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct ShortcutTable {
    bindings: BTreeMap<String, ShortcutAction>,
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard table for a set of registered views.
    ///
    /// Each view gets its 1-based registration ordinal. Fixed bindings are
    /// applied afterwards and win on conflict.
    pub fn for_views(views: &[ViewDescriptor]) -> Self {
        let mut table = Self::new();
        for (ordinal, view) in (1..).zip(views) {
            table.bind(&ordinal.to_string(), ShortcutAction::Navigate(view.id.clone()));
        }

        table.bind("ctrl+k", ShortcutAction::CommandPalette);
        table.bind("ctrl+shift+p", ShortcutAction::CommandPalette);
        table.bind("ctrl+/", ShortcutAction::Help);
        if let Some(first) = views.first() {
            table.bind("ctrl+1", ShortcutAction::Navigate(first.id.clone()));
        }
        table.bind("escape", ShortcutAction::HideOverlays);
        table.bind("ctrl+b", ShortcutAction::Back);
        table.bind("ctrl+r", ShortcutAction::Refresh);
        table.bind("ctrl+t", ShortcutAction::ToggleTheme);
        table
    }

    /// Binds `combo`, replacing any previous action. Returns false (and binds
    /// nothing) if the combo does not parse.
    pub fn bind(&mut self, combo: &str, action: ShortcutAction) -> bool {
        let Some(combo) = normalize_combo(combo) else {
            tracing::warn!(combo, "ignoring unparsable shortcut");
            return false;
        };
        self.bindings.insert(combo, action);
        true
    }

    pub fn resolve(&self, press: &KeyPress) -> Option<&ShortcutAction> {
        self.bindings.get(&press.combo())
    }

    pub fn get(&self, combo: &str) -> Option<&ShortcutAction> {
        self.bindings.get(&normalize_combo(combo)?)
    }

    /// Bindings sorted by combo.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShortcutAction)> {
        self.bindings.iter().map(|(combo, action)| (combo.as_str(), action))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_views;

    #[test]
    fn test_ordinals_follow_registration_order() {
        let table = ShortcutTable::for_views(&default_views());
        assert_eq!(
            table.resolve(&KeyPress::new("1")),
            Some(&ShortcutAction::Navigate("overview".to_string()))
        );
        assert_eq!(
            table.resolve(&KeyPress::new("3")),
            Some(&ShortcutAction::Navigate("neural".to_string()))
        );
        assert_eq!(
            table.get("11"),
            Some(&ShortcutAction::Navigate("help".to_string()))
        );
    }

    #[test]
    fn test_fixed_bindings() {
        let table = ShortcutTable::for_views(&default_views());
        let palette = KeyPress::new("P").ctrl().shift();
        assert_eq!(table.resolve(&palette), Some(&ShortcutAction::CommandPalette));
        assert_eq!(
            table.resolve(&KeyPress::new("k").ctrl()),
            Some(&ShortcutAction::CommandPalette)
        );
        assert_eq!(table.get("Control+/"), Some(&ShortcutAction::Help));
        assert_eq!(
            table.get("ctrl+1"),
            Some(&ShortcutAction::Navigate("overview".to_string()))
        );
        assert_eq!(table.get("Escape"), Some(&ShortcutAction::HideOverlays));
        assert_eq!(table.get("ctrl+b"), Some(&ShortcutAction::Back));
        assert_eq!(table.get("ctrl+r"), Some(&ShortcutAction::Refresh));
        assert_eq!(table.get("ctrl+t"), Some(&ShortcutAction::ToggleTheme));
    }

    #[test]
    fn test_unbound_and_modified_keys_do_not_resolve() {
        let table = ShortcutTable::for_views(&default_views());
        assert_eq!(table.resolve(&KeyPress::new("x")), None);
        assert_eq!(table.resolve(&KeyPress::new("p").shift()), None);
    }

    #[test]
    fn test_bind_overwrites_and_rejects_garbage() {
        let mut table = ShortcutTable::new();
        assert!(table.bind("ctrl+k", ShortcutAction::Help));
        assert!(table.bind("Ctrl+K", ShortcutAction::Refresh));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ctrl+k"), Some(&ShortcutAction::Refresh));

        assert!(!table.bind("hyper+k", ShortcutAction::Help));
        assert!(!table.bind("", ShortcutAction::Help));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_views_still_have_fixed_bindings() {
        let table = ShortcutTable::for_views(&[]);
        assert!(table.get("ctrl+1").is_none());
        assert_eq!(table.get("ctrl+k"), Some(&ShortcutAction::CommandPalette));
    }
}
