//! `dstation upload <path>` – create a task by uploading a local file.

use anyhow::{Context, Result};
use dstation_core::api::{task, ErrorScope, FilePayload};
use dstation_core::config::DstationConfig;
use dstation_core::state::State;
use std::path::Path;

use crate::cli::session::{expect_success, Session};

pub async fn run_upload(
    cfg: &DstationConfig,
    state: &State,
    path: &Path,
    destination: Option<&str>,
) -> Result<()> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let file = FilePayload::new(content, filename.clone());

    let session = Session::open(cfg, state).await?;
    let result = task::create_from_file(
        &session.base_url,
        &session.sid,
        file,
        destination,
        Some(session.timeout),
    )
    .await;
    session.close().await;
    expect_success(result?, ErrorScope::Task, "create")?;
    println!("Uploaded {filename}");
    Ok(())
}
