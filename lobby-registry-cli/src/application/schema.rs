use crate::application::script::ScriptLine;
use crate::infrastructure::{CliError, Result};
use lobby_registry_core::application::{
    CreateLobbyRequest, InviteRequest, InviteResponse, JoinByCodeRequest, LeaveResponse,
    LobbyRequest, LobbyView, SearchRequest, SearchResults, SetReadyRequest, StartGameRequest,
    StartGameResponse,
};
use schemars::schema::RootSchema;
use schemars::schema_for;
use std::path::Path;
use tracing::{debug, info};

/// Every wire type with the file stem its schema is written under
pub fn schemas() -> Vec<(&'static str, RootSchema)> {
    vec![
        ("script_line", schema_for!(ScriptLine)),
        ("create_lobby_request", schema_for!(CreateLobbyRequest)),
        ("lobby_request", schema_for!(LobbyRequest)),
        ("join_by_code_request", schema_for!(JoinByCodeRequest)),
        ("search_request", schema_for!(SearchRequest)),
        ("invite_request", schema_for!(InviteRequest)),
        ("start_game_request", schema_for!(StartGameRequest)),
        ("set_ready_request", schema_for!(SetReadyRequest)),
        ("lobby_view", schema_for!(LobbyView)),
        ("search_results", schema_for!(SearchResults)),
        ("leave_response", schema_for!(LeaveResponse)),
        ("invite_response", schema_for!(InviteResponse)),
        ("start_game_response", schema_for!(StartGameResponse)),
    ]
}

/// Write `<stem>.schema.json` for every wire type into `dir`, creating it if
/// needed. Returns the number of files written.
pub async fn write_schemas(dir: &Path) -> Result<usize> {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if !meta.is_dir() => {
            return Err(CliError::invalid_directory(dir.to_path_buf()));
        }
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tokio::fs::create_dir_all(dir).await?;
        }
        Err(e) => return Err(e.into()),
    }

    let schemas = schemas();
    for (stem, schema) in &schemas {
        let path = dir.join(format!("{}.schema.json", stem));
        let json = serde_json::to_string_pretty(schema)?;
        tokio::fs::write(&path, json).await?;
        debug!(path = %path.display(), "Schema written");
    }

    info!(count = schemas.len(), dir = %dir.display(), "Schemas written");
    Ok(schemas.len())
}
