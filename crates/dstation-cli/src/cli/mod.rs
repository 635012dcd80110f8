//! CLI for the Download Station client.

mod commands;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dstation_core::api::TransportError;
use dstation_core::config::{self, DstationConfig};
use dstation_core::logging::LogHandle;
use dstation_core::state::{LogLevel, Protocol, State};
use std::path::{Path, PathBuf};

use commands::{
    run_add, run_configure, run_info, run_logging, run_pause, run_remove, run_resume, run_state, run_tasks,
    run_upload, ConnectionArgs,
};

/// Top-level CLI for the Download Station client.
#[derive(Debug, Parser)]
#[command(name = "dstation")]
#[command(about = "Manage a Synology Download Station from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProtocolArg {
    Http,
    Https,
}

impl From<ProtocolArg> for Protocol {
    fn from(p: ProtocolArg) -> Self {
        match p {
            ProtocolArg::Http => Protocol::Http,
            ProtocolArg::Https => Protocol::Https,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevelArg {
    fn level(self) -> Option<LogLevel> {
        match self {
            LogLevelArg::Off => None,
            LogLevelArg::Error => Some(LogLevel::Error),
            LogLevelArg::Warn => Some(LogLevel::Warn),
            LogLevelArg::Info => Some(LogLevel::Info),
            LogLevelArg::Debug => Some(LogLevel::Debug),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum StateAction {
    /// Print the current (migrated) state as JSON, password masked.
    Show,
    /// Rewrite the state file in the current schema version.
    Migrate,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Set NAS connection settings (only the given fields change).
    Configure {
        #[arg(long, value_enum)]
        protocol: Option<ProtocolArg>,
        /// NAS hostname or IP address.
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Show Download Station version info.
    Info,

    /// List tasks on the NAS and refresh the local task cache.
    Tasks,

    /// Create a task from a URL (http, ftp, magnet, ...).
    Add {
        url: String,
        /// Destination shared folder (default: the NAS's configured default).
        #[arg(long)]
        destination: Option<String>,
    },

    /// Create a task by uploading a local file (e.g. a .torrent).
    Upload {
        path: PathBuf,
        #[arg(long)]
        destination: Option<String>,
    },

    /// Pause one or more tasks by ID.
    Pause {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Resume one or more paused tasks by ID.
    Resume {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete one or more tasks by ID.
    Remove {
        #[arg(required = true)]
        ids: Vec<String>,
        /// Move incomplete downloads to the destination instead of discarding them.
        #[arg(long)]
        force_complete: bool,
    },

    /// Set the log level for later runs (`off` keeps only warnings).
    Logging {
        #[arg(value_enum)]
        level: LogLevelArg,
    },

    /// Inspect or upgrade the persisted state file.
    State {
        #[command(subcommand)]
        action: StateAction,
    },
}

fn state_path(cfg: &DstationConfig) -> Result<PathBuf> {
    match &cfg.state_path {
        Some(p) => Ok(p.clone()),
        None => State::default_path(),
    }
}

impl CliCommand {
    pub async fn run_from_args(log: Option<&LogHandle>) -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        let path = state_path(&cfg)?;
        let mut state = State::load_from_path(&path)?;
        if let Some(log) = log {
            log.apply(&state.logging.logging);
        }
        tracing::debug!("loaded config: {:?}", cfg);

        let result = cli.command.dispatch(&cfg, &mut state).await;
        if let Err(err) = &result {
            if err.downcast_ref::<TransportError>().is_some() {
                state.logging.last_severe_error = Some(format!("{:#}", err));
            }
        }
        save_state(&state, &path)?;
        result
    }

    async fn dispatch(self, cfg: &DstationConfig, state: &mut State) -> Result<()> {
        match self {
            CliCommand::Configure {
                protocol,
                host,
                port,
                username,
                password,
            } => {
                let args = ConnectionArgs {
                    protocol: protocol.map(Protocol::from),
                    host,
                    port,
                    username,
                    password,
                };
                run_configure(state, args)?;
            }
            CliCommand::Info => run_info(cfg, state).await?,
            CliCommand::Tasks => run_tasks(cfg, state).await?,
            CliCommand::Add { url, destination } => {
                run_add(cfg, state, &url, destination.as_deref()).await?
            }
            CliCommand::Upload { path, destination } => {
                run_upload(cfg, state, &path, destination.as_deref()).await?
            }
            CliCommand::Pause { ids } => run_pause(cfg, state, &ids).await?,
            CliCommand::Resume { ids } => run_resume(cfg, state, &ids).await?,
            CliCommand::Remove {
                ids,
                force_complete,
            } => run_remove(cfg, state, &ids, force_complete).await?,
            CliCommand::Logging { level } => run_logging(state, level.level())?,
            CliCommand::State { action } => run_state(state, action)?,
        }
        Ok(())
    }
}

fn save_state(state: &State, path: &Path) -> Result<()> {
    state.save_to_path(path)?;
    tracing::debug!(path = %path.display(), "saved state");
    Ok(())
}

#[cfg(test)]
mod tests;
