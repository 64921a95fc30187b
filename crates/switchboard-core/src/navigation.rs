//! Navigation controller.
//!
//! State machine over `NoView | At(view_id)` plus a LIFO back-stack.
//!
//! `navigate_to(target)`:
//! 1. fail with `ViewNotFound` (state untouched) if `target` is unknown
//! 2. when leaving a different view, push it with its persisted view state
//! 3. switch `current` and load the target view
//! 4. persist `params` as the target's view state
//! 5. emit `ui:navigation`
//!
//! A failed load rolls back steps 2 and 3. `go_back` replays the top entry
//! without recording history, so it never duplicates entries.

use switchboard_types::{NavigationEntry, Params, UiEvent};

use crate::bus::EventBus;
use crate::collaborators::StateStore;
use crate::error::{Result, ShellError};
use crate::registry::ViewRegistry;

/// Borrowed collaborators a navigation step needs.
pub struct NavContext<'a> {
    pub registry: &'a mut ViewRegistry,
    pub state: &'a dyn StateStore,
    pub bus: &'a EventBus,
}

#[derive(Debug, Default)]
pub struct Navigator {
    current: Option<String>,
    history: Vec<NavigationEntry>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_view(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Back-stack from oldest to newest.
    pub fn history(&self) -> &[NavigationEntry] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub async fn navigate_to(
        &mut self,
        target: &str,
        params: Params,
        cx: NavContext<'_>,
    ) -> Result<()> {
        self.navigate(target, params, true, cx).await
    }

    /// Returns to the previous view. `Ok(false)` when there is no history.
    pub async fn go_back(&mut self, cx: NavContext<'_>) -> Result<bool> {
        let Some(entry) = self.history.pop() else {
            return Ok(false);
        };
        let params = entry.saved_params.clone();
        match self.navigate(&entry.view_id, params, false, cx).await {
            Ok(()) => Ok(true),
            Err(err) => {
                self.history.push(entry);
                Err(err)
            }
        }
    }

    async fn navigate(
        &mut self,
        target: &str,
        params: Params,
        record_history: bool,
        cx: NavContext<'_>,
    ) -> Result<()> {
        let NavContext {
            registry,
            state,
            bus,
        } = cx;

        if !registry.has_view(target) {
            return Err(ShellError::ViewNotFound {
                id: target.to_string(),
            });
        }

        let previous = self.current.clone();
        let mut pushed = false;
        if record_history
            && let Some(leaving) = previous.as_deref()
            && leaving != target
        {
            let saved = state
                .get_view_state(leaving)
                .await
                .map_err(ShellError::State)?;
            self.history.push(NavigationEntry::new(leaving, saved));
            pushed = true;
        }

        self.current = Some(target.to_string());
        let entered = match registry.load_view(target, &params).await {
            Ok(()) => state
                .set_view_state(target, &params)
                .await
                .map_err(ShellError::State),
            Err(err) => Err(err),
        };
        if let Err(err) = entered {
            if pushed {
                self.history.pop();
            }
            self.current = previous;
            tracing::warn!(view = target, error = %err, "navigation failed");
            return Err(err);
        }

        tracing::info!(view = target, depth = self.history.len(), "navigated");
        bus.emit(UiEvent::Navigation {
            view_id: target.to_string(),
            params,
        });
        Ok(())
    }
}
