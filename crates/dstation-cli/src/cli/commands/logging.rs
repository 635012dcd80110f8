//! `dstation logging <level>` – set how much this client writes to its log file.

use anyhow::Result;
use dstation_core::logging::{filter_directive, log_file_path};
use dstation_core::state::{LogLevel, LoggingSettings, State};

/// `None` turns detailed logging off (warnings and errors are still written).
pub fn run_logging(state: &mut State, level: Option<LogLevel>) -> Result<()> {
    let settings = &mut state.logging.logging;
    *settings = match level {
        Some(level) => LoggingSettings {
            enabled: true,
            level,
        },
        None => LoggingSettings {
            enabled: false,
            ..settings.clone()
        },
    };
    println!("log filter: {}", filter_directive(settings));
    if let Ok(path) = log_file_path() {
        println!("log file: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_enables_and_off_keeps_level() {
        let mut state = State::default();
        run_logging(&mut state, Some(LogLevel::Debug)).unwrap();
        assert!(state.logging.logging.enabled);
        assert_eq!(state.logging.logging.level, LogLevel::Debug);

        run_logging(&mut state, None).unwrap();
        assert!(!state.logging.logging.enabled);
        assert_eq!(state.logging.logging.level, LogLevel::Debug);
    }
}
