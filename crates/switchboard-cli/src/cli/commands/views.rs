//! Views command handler.

use switchboard_core::registry::default_views;

/// Prints each view with the number key that opens it in the dashboard.
pub fn list() {
    for (ordinal, view) in default_views().iter().enumerate() {
        let tools = view
            .tool_count
            .map(|count| format!("  ({count} tools)"))
            .unwrap_or_default();
        println!("{:>2}  {:<12} {}{tools}", ordinal + 1, view.id, view.name);
    }
}
