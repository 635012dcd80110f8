//! `dstation state show|migrate` – inspect or rewrite the persisted state.

use anyhow::Result;
use dstation_core::state::State;

use crate::cli::StateAction;

/// `migrate` needs no work here: loading already migrated the document and
/// the caller saves it back after every command.
pub fn run_state(state: &State, action: StateAction) -> Result<()> {
    match action {
        StateAction::Show => {
            let mut doc = state.to_document();
            if let Some(conn) = doc.get_mut("connection").and_then(|c| c.as_object_mut()) {
                if conn.get("password").and_then(|p| p.as_str()).is_some_and(|p| !p.is_empty()) {
                    conn.insert("password".to_string(), "***".into());
                }
            }
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        StateAction::Migrate => {
            println!("state is at version {}", state.state_version);
        }
    }
    Ok(())
}
