//! Reducer: applies events to `AppState` and returns effects for the runtime.
//!
//! Keys go to the open overlay first. Otherwise `q` and Ctrl+C quit and
//! everything else is offered to the shell's shortcut table.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::TuiEvent;
use crate::keys::key_press;
use crate::overlays::OverlayTransition;
use crate::state::AppState;

pub fn update(state: &mut AppState, event: TuiEvent) -> Vec<UiEffect> {
    match event {
        TuiEvent::Bus(event) => {
            state.apply_bus_event(&event);
            Vec::new()
        }
        TuiEvent::Key(key) => handle_key(state, key),
        TuiEvent::Resize => Vec::new(),
    }
}

/// Reducer used while the shell is busy with a command: bus events still
/// apply, but keys other than quit are dropped.
pub fn update_busy(state: &mut AppState, event: TuiEvent) -> Vec<UiEffect> {
    match event {
        TuiEvent::Key(key) if is_quit_key(&key) => vec![UiEffect::Quit],
        TuiEvent::Key(_) | TuiEvent::Resize => Vec::new(),
        TuiEvent::Bus(event) => {
            state.apply_bus_event(&event);
            Vec::new()
        }
    }
}

/// `q` or Ctrl+C.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => key.modifiers.is_empty(),
        _ => false,
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }
    if is_quit_key(&key) && state.palette.is_none() {
        return vec![UiEffect::Quit];
    }

    if let Some(palette) = state.palette.as_mut() {
        let update = palette.handle_key(key);
        if update.transition == OverlayTransition::Close {
            state.palette = None;
        }
        return update.effects;
    }

    key_press(&key)
        .map(UiEffect::Shortcut)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use switchboard_core::ShortcutAction;
    use switchboard_types::{KeyPress, UiEvent};

    use super::*;
    use crate::state::sample_state;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> TuiEvent {
        TuiEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_quit_keys() {
        let mut state = sample_state();
        assert_eq!(
            update(&mut state, key(KeyCode::Char('q'), KeyModifiers::NONE)),
            vec![UiEffect::Quit]
        );
        assert_eq!(
            update(&mut state, key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            vec![UiEffect::Quit]
        );
    }

    #[test]
    fn test_keys_are_offered_to_shortcuts() {
        let mut state = sample_state();
        let effects = update(
            &mut state,
            key(KeyCode::Char('P'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
        );
        assert_eq!(
            effects,
            vec![UiEffect::Shortcut(KeyPress::new("P").ctrl().shift())]
        );
    }

    #[test]
    fn test_open_palette_captures_keys() {
        let mut state = sample_state();
        update(&mut state, TuiEvent::Bus(UiEvent::CommandPaletteShow));

        // `q` types into the filter instead of quitting.
        assert!(update(&mut state, key(KeyCode::Char('q'), KeyModifiers::NONE)).is_empty());
        assert_eq!(state.palette.as_ref().unwrap().filter, "q");

        update(&mut state, key(KeyCode::Backspace, KeyModifiers::NONE));
        let effects = update(&mut state, key(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(
            effects,
            vec![UiEffect::Run(ShortcutAction::Navigate("overview".to_string()))]
        );
        assert!(state.palette.is_none());
    }

    #[test]
    fn test_ctrl_c_closes_palette_before_quitting() {
        let mut state = sample_state();
        update(&mut state, TuiEvent::Bus(UiEvent::CommandPaletteShow));
        assert!(update(&mut state, key(KeyCode::Char('c'), KeyModifiers::CONTROL)).is_empty());
        assert!(state.palette.is_none());
    }

    #[test]
    fn test_busy_applies_bus_events_and_only_quits() {
        let mut state = sample_state();
        let mut params = switchboard_types::Params::new();
        params.insert("epochs".to_string(), serde_json::json!(3));
        let effects = update_busy(
            &mut state,
            TuiEvent::Bus(UiEvent::Loading {
                tool: "neural_train".to_string(),
                params,
            }),
        );
        assert!(effects.is_empty());
        assert_eq!(state.loading.as_deref(), Some("neural_train"));

        assert!(update_busy(&mut state, key(KeyCode::Char('1'), KeyModifiers::NONE)).is_empty());
        assert_eq!(
            update_busy(&mut state, key(KeyCode::Char('q'), KeyModifiers::NONE)),
            vec![UiEffect::Quit]
        );
        assert_eq!(
            update_busy(&mut state, key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            vec![UiEffect::Quit]
        );
    }
}
