//! Inputs to the reducer.

use crossterm::event::KeyEvent;
use switchboard_types::UiEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// A key press from the terminal.
    Key(KeyEvent),
    /// An event published on the shell's bus.
    Bus(UiEvent),
    /// The terminal changed size; only forces a redraw.
    Resize,
}
