//! Static component catalog used as the view loader.
//!
//! The catalog knows which component names exist and records what was
//! loaded. Rendering itself belongs to the frontend; the catalog only
//! validates and tracks.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, PoisonError};

use anyhow::{Result, bail};
use async_trait::async_trait;
use switchboard_types::Params;

use super::ViewLoader;

#[derive(Debug, Default)]
pub struct ComponentCatalog {
    components: BTreeSet<String>,
    loads: Mutex<BTreeMap<String, usize>>,
}

impl ComponentCatalog {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
            loads: Mutex::new(BTreeMap::new()),
        }
    }

    /// Catalog containing every component referenced by the default views.
    pub fn with_default_components() -> Self {
        Self::new(
            crate::registry::default_views()
                .into_iter()
                .map(|view| view.component),
        )
    }

    pub fn contains(&self, component: &str) -> bool {
        self.components.contains(component)
    }

    /// How many times `component` was loaded or refreshed.
    pub fn load_count(&self, component: &str) -> usize {
        self.loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(component)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ViewLoader for ComponentCatalog {
    async fn load(&self, component: &str, _params: &Params) -> Result<()> {
        if !self.contains(component) {
            bail!("Unknown component: {component}");
        }
        *self
            .loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(component.to_string())
            .or_default() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_counts_known_components() {
        let catalog = ComponentCatalog::new(["OverviewView"]);
        catalog.load("OverviewView", &Params::new()).await.unwrap();
        catalog.refresh("OverviewView").await.unwrap();
        assert_eq!(catalog.load_count("OverviewView"), 2);
    }

    #[tokio::test]
    async fn test_unknown_component_fails() {
        let catalog = ComponentCatalog::new(["OverviewView"]);
        let err = catalog.load("Missing", &Params::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown component: Missing");
        assert_eq!(catalog.load_count("Missing"), 0);
    }

    #[test]
    fn test_default_catalog_covers_default_views() {
        let catalog = ComponentCatalog::with_default_components();
        for view in crate::registry::default_views() {
            assert!(catalog.contains(&view.component), "{}", view.component);
        }
    }
}
