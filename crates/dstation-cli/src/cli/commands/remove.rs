//! `dstation remove <id>...` – delete tasks; `--force-complete` keeps partial files.

use anyhow::Result;
use dstation_core::api::{task, ErrorScope};
use dstation_core::config::DstationConfig;
use dstation_core::state::State;

use super::report_task_results;
use crate::cli::session::{expect_success, Session};

pub async fn run_remove(
    cfg: &DstationConfig,
    state: &mut State,
    ids: &[String],
    force_complete: bool,
) -> Result<()> {
    let session = Session::open(cfg, state).await?;
    let result = task::delete(
        &session.base_url,
        &session.sid,
        ids,
        force_complete,
        Some(session.timeout),
    )
    .await;
    session.close().await;
    let results = expect_success(result?, ErrorScope::Task, "delete")?;

    // Drop removed tasks from the local cache so `state show` doesn't list them.
    state.cached_tasks.tasks.retain(|t| {
        let id = t.get("id").and_then(|v| v.as_str());
        !results.iter().any(|r| r.error == 0 && Some(r.id.as_str()) == id)
    });
    report_task_results("Removed", &results)
}
