//! State store implementations.
//!
//! `MemoryStateStore` keeps everything in process. `FileStateStore` keeps the
//! same snapshot and writes it as JSON on every persist request.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use switchboard_types::{Params, UserPreferences};

use super::StateStore;

/// Serializable contents of a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    pub views: BTreeMap<String, Params>,
    pub tool_results: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
    /// Last snapshot handed to `persist_state`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

#[derive(Debug, Default)]
pub struct MemoryStateStore {
    snapshot: Mutex<StateSnapshot>,
    persist_calls: Mutex<usize>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_preferences(self, preferences: UserPreferences) -> Self {
        self.lock().preferences = Some(preferences);
        self
    }

    fn lock(&self) -> MutexGuard<'_, StateSnapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.lock().clone()
    }

    pub fn tool_result(&self, tool: &str) -> Option<Value> {
        self.lock().tool_results.get(tool).cloned()
    }

    /// Number of `persist_state`/`persist_all_state` calls seen.
    pub fn persist_calls(&self) -> usize {
        *self
            .persist_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn count_persist(&self) {
        *self
            .persist_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get_view_state(&self, view_id: &str) -> Result<Params> {
        Ok(self.lock().views.get(view_id).cloned().unwrap_or_default())
    }

    async fn set_view_state(&self, view_id: &str, params: &Params) -> Result<()> {
        self.lock()
            .views
            .insert(view_id.to_string(), params.clone());
        Ok(())
    }

    async fn set_tool_result(&self, tool: &str, result: &Value) -> Result<()> {
        self.lock()
            .tool_results
            .insert(tool.to_string(), result.clone());
        Ok(())
    }

    async fn user_preferences(&self) -> Result<Option<UserPreferences>> {
        Ok(self.lock().preferences.clone())
    }

    async fn persist_state(&self, data: &Value) -> Result<()> {
        self.lock().custom = Some(data.clone());
        self.count_persist();
        Ok(())
    }

    async fn persist_all_state(&self) -> Result<()> {
        self.count_persist();
        Ok(())
    }
}

/// JSON-file backed store.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    inner: MemoryStateStore,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: MemoryStateStore::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_snapshot(&self) -> Result<()> {
        let snapshot = self.inner.snapshot();
        let json =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize state")?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        // Write to a sibling temp file and rename so a crash never leaves a
        // truncated state file behind.
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .with_context(|| format!("Failed to write state to {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "state persisted");
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn initialize(&self) -> Result<()> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read state from {}", self.path.display()))?;
        let snapshot: StateSnapshot = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse state from {}", self.path.display()))?;
        *self.inner.lock() = snapshot;
        Ok(())
    }

    async fn get_view_state(&self, view_id: &str) -> Result<Params> {
        self.inner.get_view_state(view_id).await
    }

    async fn set_view_state(&self, view_id: &str, params: &Params) -> Result<()> {
        self.inner.set_view_state(view_id, params).await
    }

    async fn set_tool_result(&self, tool: &str, result: &Value) -> Result<()> {
        self.inner.set_tool_result(tool, result).await
    }

    async fn user_preferences(&self) -> Result<Option<UserPreferences>> {
        self.inner.user_preferences().await
    }

    async fn persist_state(&self, data: &Value) -> Result<()> {
        self.inner.persist_state(data).await?;
        self.write_snapshot().await
    }

    async fn persist_all_state(&self) -> Result<()> {
        self.inner.persist_all_state().await?;
        self.write_snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use switchboard_types::Theme;
    use tempfile::tempdir;

    use super::*;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_memory_store_view_state_defaults_empty() {
        let store = MemoryStateStore::new();
        assert!(store.get_view_state("overview").await.unwrap().is_empty());

        store
            .set_view_state("overview", &params(json!({"tab": 2})))
            .await
            .unwrap();
        assert_eq!(
            store.get_view_state("overview").await.unwrap()["tab"],
            json!(2)
        );
    }

    #[tokio::test]
    async fn test_file_store_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = FileStateStore::new(&path);
        store.initialize().await.unwrap();
        store
            .set_view_state("neural", &params(json!({"model": "m1"})))
            .await
            .unwrap();
        store
            .set_tool_result("neural_status", &json!({"ok": true}))
            .await
            .unwrap();
        store.persist_all_state().await.unwrap();
        assert!(path.exists());

        let reloaded = FileStateStore::new(&path);
        reloaded.initialize().await.unwrap();
        assert_eq!(
            reloaded.get_view_state("neural").await.unwrap()["model"],
            json!("m1")
        );
        assert_eq!(
            reloaded.inner.tool_result("neural_status"),
            Some(json!({"ok": true}))
        );
    }

    #[tokio::test]
    async fn test_file_store_replaces_existing_file_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"views":{"old":{"stale":true}}}"#).unwrap();

        let store = FileStateStore::new(&path);
        store.initialize().await.unwrap();
        store
            .set_view_state("github", &params(json!({"repo": "a/b"})))
            .await
            .unwrap();
        store.persist_all_state().await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("state.json")]);

        let reloaded = FileStateStore::new(&path);
        reloaded.initialize().await.unwrap();
        assert_eq!(
            reloaded.get_view_state("github").await.unwrap()["repo"],
            json!("a/b")
        );
        assert_eq!(
            reloaded.get_view_state("old").await.unwrap()["stale"],
            json!(true)
        );
    }

    #[tokio::test]
    async fn test_file_store_reads_preferences() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"preferences":{"theme":"light","responsive":false}}"#).unwrap();

        let store = FileStateStore::new(&path);
        store.initialize().await.unwrap();
        let prefs = store.user_preferences().await.unwrap().unwrap();
        assert_eq!(prefs.theme, Theme::Light);
        assert!(!prefs.responsive);
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStateStore::new(&path).initialize().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse state"));
    }
}
