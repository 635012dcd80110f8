//! `dstation info` – Download Station version info.

use anyhow::Result;
use dstation_core::api::{info, ErrorScope};
use dstation_core::config::DstationConfig;
use dstation_core::state::State;

use crate::cli::session::{expect_success, Session};

pub async fn run_info(cfg: &DstationConfig, state: &State) -> Result<()> {
    let session = Session::open(cfg, state).await?;
    let result = info::get_info(&session.base_url, &session.sid, Some(session.timeout)).await;
    session.close().await;
    let data = expect_success(result?, ErrorScope::Common, "getinfo")?;
    println!("Download Station {} (build {})", data.version_string, data.version);
    println!("manager: {}", if data.is_manager { "yes" } else { "no" });
    Ok(())
}
