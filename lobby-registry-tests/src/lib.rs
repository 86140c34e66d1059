use cucumber::World;
use lobby_registry_core::application::{LobbyView, SearchResults};
use lobby_registry_core::{
    Caller, EngineConfig, EventReceiver, JoinCode, LobbyEngine, LobbyError, LobbyEvent, LobbyId,
};
use std::collections::HashMap;

#[derive(Debug, World)]
pub struct LobbyWorld {
    /// Lobby engine (the system under test)
    pub engine: LobbyEngine,

    /// Events the engine has queued but no step has looked at yet
    pub events: EventReceiver,

    /// Every event drained so far
    pub seen_events: Vec<LobbyEvent>,

    /// Track lobby IDs by name for easy lookup
    pub lobby_ids: HashMap<String, LobbyId>,

    /// Join codes handed to lobby creators
    pub join_codes: HashMap<String, JoinCode>,

    /// Last lobby view returned
    pub last_view: Option<LobbyView>,

    /// Last search results
    pub last_search: Option<SearchResults>,

    /// Outcome of the last request
    pub last_error: Option<LobbyError>,
}

impl Default for LobbyWorld {
    fn default() -> Self {
        let (engine, events) = LobbyEngine::with_config(EngineConfig::default());
        Self {
            engine,
            events,
            seen_events: Vec::new(),
            lobby_ids: HashMap::new(),
            join_codes: HashMap::new(),
            last_view: None,
            last_search: None,
            last_error: None,
        }
    }
}

impl LobbyWorld {
    /// Caller for a display name; the user id is the lowercased name
    pub fn caller(name: &str) -> Caller {
        Caller::new(name.to_lowercase(), name)
    }

    /// Store the outcome of a request, returning the value on success
    pub fn record<T>(&mut self, result: Result<T, LobbyError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(e) => {
                self.last_error = Some(e);
                None
            }
        }
    }

    /// Store a lobby view outcome
    pub fn record_view(&mut self, result: Result<LobbyView, LobbyError>) {
        self.last_view = self.record(result);
    }

    /// Get a lobby ID by name (panics if unknown)
    pub fn lobby_id(&self, name: &str) -> LobbyId {
        *self
            .lobby_ids
            .get(name)
            .unwrap_or_else(|| panic!("Lobby '{}' not found", name))
    }

    /// Remember a freshly created lobby
    pub fn remember(&mut self, view: &LobbyView) {
        self.lobby_ids.insert(view.name.clone(), view.lobby_id);
        if let Some(code) = &view.join_code {
            self.join_codes.insert(view.name.clone(), code.clone());
        }
    }

    /// Move queued events into `seen_events`
    pub fn drain_events(&mut self) -> &[LobbyEvent] {
        while let Ok(event) = self.events.try_recv() {
            self.seen_events.push(event);
        }
        &self.seen_events
    }
}
