//! Admin gate commands

use std::sync::Arc;

use carepulse_forms::gate::INVALID_PASSKEY;
use carepulse_forms::{AccessGate, FileCredentialStore, GateState};

use super::Context;
use crate::output::success;
use crate::AdminCommands;

fn gate(ctx: &Context) -> Result<AccessGate, String> {
    let path = FileCredentialStore::default_path().ok_or("Cannot find home directory")?;
    Ok(AccessGate::new(ctx.passkey()?, Arc::new(FileCredentialStore::new(path))))
}

pub async fn handle(action: AdminCommands, ctx: &Context) -> Result<(), String> {
    let mut gate = gate(ctx)?;

    match action {
        AdminCommands::Login { passkey } => {
            if gate.mount(&ctx.navigator) == GateState::Closed {
                success("Admin area already unlocked");
                return Ok(());
            }
            gate.set_input(&passkey);
            if !gate.submit(&ctx.navigator).map_err(|e| e.to_string())? {
                return Err(gate.error().unwrap_or(INVALID_PASSKEY).to_string());
            }
            success("Admin area unlocked");
        }
        AdminCommands::Status => {
            let state = gate.mount(&ctx.navigator);
            ctx.format.print(&serde_json::json!({ "gate": state }));
        }
        AdminCommands::Logout => {
            gate.sign_out().map_err(|e| e.to_string())?;
            success("Stored admin credential removed");
        }
    }
    Ok(())
}
