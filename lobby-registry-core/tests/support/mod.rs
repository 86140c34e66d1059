use lobby_registry_core::application::{CreateLobbyRequest, LobbyRequest};
use lobby_registry_core::domain::{CustomProperties, LobbySettings};
use lobby_registry_core::{Caller, EngineConfig, EventReceiver, LobbyEngine, LobbyEvent, LobbyId};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_test_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("lobby_registry_core=debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

/// Engine plus its event queue, with helpers for the usual setup
pub struct EngineFixture {
    pub engine: LobbyEngine,
    pub events: EventReceiver,
}

impl EngineFixture {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        init_test_tracing();
        let (engine, events) = LobbyEngine::with_config(config);
        Self { engine, events }
    }

    /// Create a lobby as `owner` and return its id
    pub fn lobby(&self, owner: &Caller, request: CreateLobbyRequest) -> LobbyId {
        self.engine
            .create_lobby(owner, request)
            .expect("create lobby")
            .lobby_id
    }

    /// Events queued so far
    pub fn drain(&mut self) -> Vec<LobbyEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

pub fn settings(name: &str, max_players: u32) -> LobbySettings {
    LobbySettings {
        name: name.to_string(),
        max_players,
        is_private: false,
        custom_properties: CustomProperties::new(),
    }
}

pub fn private_settings(name: &str, max_players: u32) -> LobbySettings {
    LobbySettings {
        is_private: true,
        ..settings(name, max_players)
    }
}

pub fn player(n: usize) -> Caller {
    Caller::new(format!("user-{}", n), format!("Player {}", n))
}

pub fn at(lobby_id: LobbyId) -> LobbyRequest {
    LobbyRequest { lobby_id }
}
