use async_trait::async_trait;
use lobby_registry_core::{EmitError, EventEmitter, LobbyEvent};
use tracing::info;

/// Emitter that records every event in the log as JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEmitter;

#[async_trait]
impl EventEmitter for LoggingEmitter {
    async fn emit(&self, event: LobbyEvent) -> Result<(), EmitError> {
        let payload = serde_json::to_string(&event)?;
        info!(
            event = event.name(),
            lobby_id = %event.lobby_id(),
            %payload,
            "Lobby event"
        );
        Ok(())
    }
}
