//! Login/logout around a single CLI command.

use anyhow::{anyhow, Context, Result};
use dstation_core::api::{auth, Envelope, ErrorScope};
use dstation_core::config::DstationConfig;
use dstation_core::state::State;
use std::time::Duration;

/// Authenticated session against the configured NAS.
pub struct Session {
    pub base_url: String,
    pub sid: String,
    pub timeout: Duration,
}

impl Session {
    pub async fn open(cfg: &DstationConfig, state: &State) -> Result<Session> {
        let conn = &state.settings.connection;
        let base_url = conn
            .base_url()
            .context("no NAS configured; run `dstation configure --host <name>` first")?;
        if !conn.has_credentials() {
            anyhow::bail!("no username configured; run `dstation configure --username <name>` first");
        }
        let timeout = cfg.request_timeout();
        let env = auth::login(&base_url, &conn.username, &conn.password, Some(timeout)).await?;
        let data = expect_success(env, ErrorScope::Auth, "login")?;
        tracing::debug!(base_url = %base_url, "logged in");
        Ok(Session {
            base_url,
            sid: data.sid,
            timeout,
        })
    }

    /// Best effort; a failed logout only leaves a session to expire on the NAS.
    pub async fn close(self) {
        match auth::logout(&self.base_url, &self.sid, Some(self.timeout)).await {
            Ok(Envelope::Success(())) => tracing::debug!("logged out"),
            Ok(Envelope::Failure(e)) => {
                tracing::warn!("logout rejected: {}", e.describe(ErrorScope::Auth))
            }
            Err(e) => tracing::warn!("logout failed: {}", e),
        }
    }
}

/// Turns a vendor failure into an error carrying the documented description.
pub fn expect_success<T>(env: Envelope<T>, scope: ErrorScope, what: &str) -> Result<T> {
    env.into_result()
        .map_err(|e| anyhow!("{} failed: {} (code {})", what, e.describe(scope), e.code))
}
