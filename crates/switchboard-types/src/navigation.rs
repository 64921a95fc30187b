//! Back-stack entries recorded by the navigation controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Params;

/// A view the user navigated away from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub view_id: String,
    pub timestamp: DateTime<Utc>,
    /// View state persisted for `view_id` at the time it was left.
    pub saved_params: Params,
}

impl NavigationEntry {
    pub fn new(view_id: impl Into<String>, saved_params: Params) -> Self {
        Self {
            view_id: view_id.into(),
            timestamp: Utc::now(),
            saved_params,
        }
    }
}
