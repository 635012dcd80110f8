use dstation_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Quiet until the state file says otherwise; see `LogHandle::apply`.
    let log = logging::init_logging()
        .ok()
        .or_else(logging::init_logging_stderr);

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args(log.as_ref()).await {
        eprintln!("dstation error: {:#}", err);
        std::process::exit(1);
    }
}
