//! Persist State to disk (JSON under XDG state dir), migrating older files on load.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{document_version, migrate, State, CURRENT_VERSION};

impl State {
    /// Default path for the state file: `~/.local/state/dstation/state.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("dstation")?;
        Ok(xdg_dirs.get_state_home().join("state.json"))
    }

    /// Save current state to the given path (creates parent dir if needed).
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.to_document()).context("serialize state")?;
        std::fs::write(path, json).with_context(|| format!("write state: {}", path.display()))?;
        Ok(())
    }

    /// Load state from the given path, running it through the migration chain.
    /// A missing file yields a fresh current-version state. Only unreadable
    /// files and invalid JSON are errors; mismatched values fall back to defaults.
    pub fn load_from_path(path: &Path) -> Result<State> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no state file, starting fresh");
                return Ok(State::default());
            }
            Err(e) => return Err(e).with_context(|| format!("read state: {}", path.display())),
        };
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse state: {}", path.display()))?;
        let from = value
            .as_object()
            .map(document_version)
            .unwrap_or(0);
        let doc = migrate(value);
        if from != CURRENT_VERSION {
            tracing::info!(from, to = CURRENT_VERSION, "migrated persisted state");
        }
        Ok(State::from_document(doc))
    }
}
