//! `dstation configure` – update NAS connection settings in the state file.

use anyhow::Result;
use dstation_core::state::{Protocol, State};

#[derive(Debug, Default)]
pub struct ConnectionArgs {
    pub protocol: Option<Protocol>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
}

pub fn run_configure(state: &mut State, args: ConnectionArgs) -> Result<()> {
    let conn = &mut state.settings.connection;
    if let Some(p) = args.protocol {
        conn.protocol = p;
    }
    if let Some(h) = args.host {
        conn.hostname = h;
    }
    if let Some(p) = args.port {
        conn.port = p;
    }
    if let Some(u) = args.username {
        conn.username = u;
    }
    if let Some(pw) = args.password {
        conn.password = pw;
    }
    // Cached tasks belong to whatever NAS was configured before.
    state.cached_tasks = Default::default();
    match conn.base_url() {
        Some(url) => println!("NAS: {url} (user: {})", conn.username),
        None => println!("NAS hostname not set"),
    }
    Ok(())
}
