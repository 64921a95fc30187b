//! Side effects requested by the reducer and executed by the runtime.

use switchboard_core::{ShellCommand, ShortcutAction};
use switchboard_types::KeyPress;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    /// Offer the key to the shell's shortcut table.
    Shortcut(KeyPress),
    /// Run a shell action directly (command palette selection).
    Run(ShortcutAction),
    /// Queue a command on the shell inbox.
    Send(ShellCommand),
    Quit,
}
