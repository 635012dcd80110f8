use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_TIMEOUT;

/// Global configuration loaded from `~/.config/dstation/config.toml`.
///
/// NAS connection details are not here: they live in the persisted state
/// (`dstation configure`) next to the rest of the user's settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DstationConfig {
    /// Per-request timeout in milliseconds applied to every API call. 0 means the default.
    pub request_timeout_ms: u64,
    /// Optional override for the state file location (default: XDG state dir).
    #[serde(default)]
    pub state_path: Option<PathBuf>,
    /// Optional page size for `dstation tasks` (None = let the NAS decide).
    #[serde(default)]
    pub task_list_limit: Option<u32>,
}

impl Default for DstationConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            state_path: None,
            task_list_limit: None,
        }
    }
}

impl DstationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dstation")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DstationConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DstationConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: DstationConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
