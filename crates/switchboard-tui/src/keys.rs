//! crossterm key events to shell key presses.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use switchboard_types::KeyPress;

/// Converts a key event into the shell's key press. Returns `None` for
/// releases, repeats, and keys without a name.
pub fn key_press(event: &KeyEvent) -> Option<KeyPress> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Up => "arrowup".to_string(),
        KeyCode::Down => "arrowdown".to_string(),
        KeyCode::Left => "arrowleft".to_string(),
        KeyCode::Right => "arrowright".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => return None,
    };

    let modifiers = event.modifiers;
    let mut press = KeyPress::new(key);
    press.ctrl = modifiers.contains(KeyModifiers::CONTROL);
    press.shift = modifiers.contains(KeyModifiers::SHIFT) || event.code == KeyCode::BackTab;
    press.alt = modifiers.contains(KeyModifiers::ALT);
    press.meta = modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META);
    Some(press)
}
