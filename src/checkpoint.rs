//! Durable run state for crash-safe resumption.
//!
//! The checkpoint is a single JSON document with two top-level keys: the
//! full run context and a completion record. It is rewritten after every
//! completed unit of work and removed only once the whole pipeline has
//! finished, so a killed process loses at most the in-flight unit.
//!
//! There is no versioning or migration: a file that fails to parse is the
//! same as a file that does not exist, and a fresh state is synthesized.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::RunContext;

/// Per-stage and per-file completion record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finished {
    pub install: bool,
    pub builder: bool,
    pub main: bool,
    /// Relative paths whose writes have durably succeeded, in the order they
    /// were processed.
    pub files: Vec<String>,
}

/// The persisted document: run configuration plus completion record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointState {
    pub context: RunContext,
    pub finished: Finished,
}

impl CheckpointState {
    pub fn fresh(context: RunContext) -> Self {
        Self {
            context,
            finished: Finished::default(),
        }
    }
}

/// Load/persist/clear interface over the checkpoint file.
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the checkpoint. Missing and corrupt files collapse into `None`;
    /// the caller cannot tell them apart and starts fresh either way.
    pub fn load(&self) -> Option<CheckpointState> {
        if !self.path.exists() {
            return None;
        }

        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to read checkpoint {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<CheckpointState>(&raw) {
            Ok(state) => {
                debug!("loaded checkpoint from {}", self.path.display());
                Some(state)
            }
            Err(e) => {
                warn!(
                    "checkpoint {} is invalid ({}), starting fresh",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Overwrite the checkpoint file with the full state. Safe to call after
    /// every unit; last write wins.
    pub fn persist(&self, state: &CheckpointState) -> Result<()> {
        let content =
            serde_json::to_string_pretty(state).context("failed to serialize checkpoint")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write checkpoint {}", self.path.display()))
    }

    /// Remove the checkpoint file. Called only after every required stage
    /// completed without error.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove checkpoint {}", self.path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Builder, Framework, Locale};
    use tempfile::tempdir;

    fn sample_context() -> RunContext {
        RunContext {
            framework: Framework::Vue,
            builder: Builder::Vite,
            builder_config_file: "vite.config.ts".to_string(),
            main_file: "src/main.ts".to_string(),
            glob: "src/**/*.vue".to_string(),
            checkpoint_file: ".autoglot-cache.json".to_string(),
            default_locale: Locale {
                name: "English".to_string(),
                code: "en-US".to_string(),
            },
            locales: vec![Locale {
                name: "日本語".to_string(),
                code: "ja-JP".to_string(),
            }],
            need_install: true,
            need_builder_config: true,
            need_main_config: true,
        }
    }

    #[test]
    fn test_load_missing_file_is_absent() {
        let tmp = tempdir().unwrap();
        let store = CheckpointStore::new(tmp.path().join("missing.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_round_trip() {
        let tmp = tempdir().unwrap();
        let store = CheckpointStore::new(tmp.path().join("cache.json"));

        let mut state = CheckpointState::fresh(sample_context());
        state.finished.install = true;
        state.finished.files.push("src/App.vue".to_string());

        store.persist(&state).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_corrupt_file_is_absent_not_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("cache.json");
        std::fs::write(&path, "{\"context\": {\"framework\":").unwrap();

        let store = CheckpointStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_persist_is_last_write_wins() {
        let tmp = tempdir().unwrap();
        let store = CheckpointStore::new(tmp.path().join("cache.json"));

        let mut state = CheckpointState::fresh(sample_context());
        store.persist(&state).unwrap();
        state.finished.builder = true;
        store.persist(&state).unwrap();

        assert!(store.load().unwrap().finished.builder);
    }

    #[test]
    fn test_clear_removes_file_and_tolerates_absence() {
        let tmp = tempdir().unwrap();
        let store = CheckpointStore::new(tmp.path().join("cache.json"));

        store
            .persist(&CheckpointState::fresh(sample_context()))
            .unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());

        // Clearing twice is fine.
        store.clear().unwrap();
    }
}
