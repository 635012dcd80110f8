//! `dstation add <url>` – create a download task from a URL.

use anyhow::Result;
use dstation_core::api::{task, ErrorScope};
use dstation_core::config::DstationConfig;
use dstation_core::state::State;

use crate::cli::session::{expect_success, Session};

pub async fn run_add(
    cfg: &DstationConfig,
    state: &State,
    url: &str,
    destination: Option<&str>,
) -> Result<()> {
    let session = Session::open(cfg, state).await?;
    let result = task::create_from_url(
        &session.base_url,
        &session.sid,
        url,
        destination,
        Some(session.timeout),
    )
    .await;
    session.close().await;
    expect_success(result?, ErrorScope::Task, "create")?;
    println!("Added task for URL: {url}");
    Ok(())
}
