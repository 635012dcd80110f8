//! `dstation resume <id>...` – resume paused tasks.

use anyhow::Result;
use dstation_core::api::{task, ErrorScope};
use dstation_core::config::DstationConfig;
use dstation_core::state::State;

use super::report_task_results;
use crate::cli::session::{expect_success, Session};

pub async fn run_resume(cfg: &DstationConfig, state: &State, ids: &[String]) -> Result<()> {
    let session = Session::open(cfg, state).await?;
    let result = task::resume(&session.base_url, &session.sid, ids, Some(session.timeout)).await;
    session.close().await;
    let results = expect_success(result?, ErrorScope::Task, "resume")?;
    report_task_results("Resumed", &results)
}
