//! Logging init: file under XDG state dir, or fallback to stderr.
//!
//! The subscriber is installed before the state file is read, with a quiet
//! filter. Once the state is loaded, [`LogHandle::apply`] swaps in the filter
//! built from its `logging` settings. `RUST_LOG`, when set, wins over both.

use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

use crate::state::LoggingSettings;

const LOG_FILE: &str = "dstation.log";

/// Targets that follow the configured level; everything else stays at `warn`.
const TARGETS: &[&str] = &["dstation", "dstation_core"];

/// A log file larger than this is truncated when logging starts.
const MAX_LOG_BYTES: u64 = 4 * 1024 * 1024;

/// `EnvFilter` directive for the persisted logging settings.
pub fn filter_directive(settings: &LoggingSettings) -> String {
    if !settings.enabled {
        return "warn".to_string();
    }
    let level = settings.level.as_str();
    let mut directive = String::from("warn");
    for target in TARGETS {
        directive.push_str(&format!(",{target}={level}"));
    }
    directive
}

/// Lets the caller retarget the filter once the persisted settings are known.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Applies `settings` unless `RUST_LOG` chose the filter.
    pub fn apply(&self, settings: &LoggingSettings) {
        if self.from_env {
            return;
        }
        let directive = filter_directive(settings);
        if let Err(e) = self.filter.reload(EnvFilter::new(&directive)) {
            tracing::warn!(error = %e, "could not apply logging settings");
            return;
        }
        tracing::debug!(filter = %directive, "logging settings applied");
    }
}

pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dstation")?;
    Ok(xdg_dirs.get_state_home().join(LOG_FILE))
}

/// Opens the log for appending, starting over if it has grown past [`MAX_LOG_BYTES`].
fn open_log_file(path: &Path) -> io::Result<File> {
    let oversized = fs::metadata(path)
        .map(|m| m.len() > MAX_LOG_BYTES)
        .unwrap_or(false);
    let mut opts = OpenOptions::new();
    opts.create(true);
    if oversized {
        opts.write(true).truncate(true);
    } else {
        opts.append(true);
    }
    opts.open(path)
}

fn install<W>(writer: W) -> Result<LogHandle>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let (env, from_env) = match EnvFilter::try_from_default_env() {
        Ok(f) => (f, true),
        Err(_) => (EnvFilter::new(filter_directive(&LoggingSettings::default())), false),
    };
    let (filter, handle) = reload::Layer::new(env);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;
    Ok(LogHandle {
        filter: handle,
        from_env,
    })
}

/// Initialize structured logging to `~/.local/state/dstation/dstation.log`.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<LogHandle> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = open_log_file(&path)?;
    let handle = install(Mutex::new(file))?;
    tracing::debug!(path = %path.display(), "logging initialized");
    Ok(handle)
}

/// Initialize logging to stderr only. None if a subscriber is already installed.
pub fn init_logging_stderr() -> Option<LogHandle> {
    install(io::stderr).ok()
}
