//! Physical key presses and key-combo normalization.
//!
//! A combo string lists the active modifiers in a fixed order
//! (`ctrl`, `shift`, `alt`, `meta`) followed by the lower-cased base key,
//! joined with `+`: `ctrl+shift+p`, `escape`, `1`.

use serde::{Deserialize, Serialize};

const MODIFIER_ORDER: [&str; 4] = ["ctrl", "shift", "alt", "meta"];

/// A key event as reported by the frontend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// Base key name (`"p"`, `"escape"`, `"/"`, `"f5"`).
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[must_use]
    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    #[must_use]
    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Normalized combo string for this key press.
    pub fn combo(&self) -> String {
        let key = self.key.to_lowercase();
        let flags = [self.ctrl, self.shift, self.alt, self.meta];
        let mut parts: Vec<&str> = MODIFIER_ORDER
            .iter()
            .zip(flags)
            .filter_map(|(name, on)| on.then_some(*name))
            .collect();
        parts.push(&key);
        parts.join("+")
    }
}

/// Normalizes a user-written combo (`"Shift+Ctrl+P"`, `"cmd+k"`) into the
/// canonical form produced by `KeyPress::combo`.
///
/// Returns `None` for an empty combo or one without a base key.
pub fn normalize_combo(combo: &str) -> Option<String> {
    let combo = combo.trim();
    if combo.is_empty() {
        return None;
    }
    // A lone "+" (or a trailing "++") names the plus key itself.
    let (mods, base) = if combo == "+" {
        ("", "+")
    } else if let Some(mods) = combo.strip_suffix("++") {
        (mods, "+")
    } else {
        match combo.rsplit_once('+') {
            Some((mods, base)) => (mods, base),
            None => ("", combo),
        }
    };

    let base = base.trim();
    if base.is_empty() {
        return None;
    }

    let mut press = KeyPress::new(base);
    for part in mods.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => press.ctrl = true,
            "shift" => press.shift = true,
            "alt" | "option" => press.alt = true,
            "meta" | "cmd" | "command" | "super" => press.meta = true,
            _ => return None,
        }
    }
    Some(press.combo())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_orders_modifiers() {
        let press = KeyPress::new("P").meta().alt().shift().ctrl();
        assert_eq!(press.combo(), "ctrl+shift+alt+meta+p");
    }

    #[test]
    fn test_combo_ctrl_shift_p() {
        assert_eq!(KeyPress::new("p").ctrl().shift().combo(), "ctrl+shift+p");
    }

    #[test]
    fn test_combo_named_key_is_lowercased() {
        assert_eq!(KeyPress::new("Escape").combo(), "escape");
    }

    #[test]
    fn test_normalize_reorders_and_aliases() {
        assert_eq!(
            normalize_combo("Shift+Ctrl+P").as_deref(),
            Some("ctrl+shift+p")
        );
        assert_eq!(normalize_combo("cmd+K").as_deref(), Some("meta+k"));
        assert_eq!(normalize_combo("ctrl+/").as_deref(), Some("ctrl+/"));
        assert_eq!(normalize_combo("1").as_deref(), Some("1"));
    }

    #[test]
    fn test_normalize_plus_key() {
        assert_eq!(normalize_combo("+").as_deref(), Some("+"));
        assert_eq!(normalize_combo("ctrl++").as_deref(), Some("ctrl++"));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_combo(""), None);
        assert_eq!(normalize_combo("ctrl+"), None);
        assert_eq!(normalize_combo("hyper+x"), None);
    }
}
