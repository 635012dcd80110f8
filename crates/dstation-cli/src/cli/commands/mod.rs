//! CLI command handlers. Each command is in its own file.

mod add;
mod configure;
mod info;
mod logging;
mod pause;
mod remove;
mod resume;
mod state;
mod tasks;
mod upload;

pub use add::run_add;
pub use configure::{run_configure, ConnectionArgs};
pub use info::run_info;
pub use logging::run_logging;
pub use pause::run_pause;
pub use remove::run_remove;
pub use resume::run_resume;
pub use state::run_state;
pub use tasks::run_tasks;
pub use upload::run_upload;

use anyhow::Result;
use dstation_core::api::task::TaskResult;
use dstation_core::api::{ApiError, ErrorScope};

/// Prints per-task outcomes; errors if any task was rejected.
fn report_task_results(verb: &str, results: &[TaskResult]) -> Result<()> {
    let mut failed = 0usize;
    for r in results {
        if r.error == 0 {
            println!("{verb} {}", r.id);
        } else {
            failed += 1;
            let desc = ApiError { code: r.error }.describe(ErrorScope::Task);
            println!("{} {}: {} (code {})", verb, r.id, desc, r.error);
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} task(s) could not be {}", verb.to_lowercase());
    }
    Ok(())
}
