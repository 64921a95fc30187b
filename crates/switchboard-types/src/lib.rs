//! Shared data types for switchboard (views, categories, events, keys).

pub mod category;
pub mod events;
pub mod keys;
pub mod navigation;
pub mod preferences;
pub mod view;

pub use category::ToolCategory;
pub use events::{EventKind, LogLevel, UiEvent};
pub use keys::KeyPress;
pub use navigation::NavigationEntry;
pub use preferences::{Theme, UserPreferences};
pub use view::ViewDescriptor;

/// Opaque key/value parameters passed to views and tools.
pub type Params = serde_json::Map<String, serde_json::Value>;
