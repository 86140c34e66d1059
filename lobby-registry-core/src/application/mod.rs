mod config;
mod emitter;
mod engine;
mod requests;
mod store;
mod views;

pub use config::EngineConfig;
pub use emitter::{
    event_channel, forward_events, spawn_event_forwarder, EmitError, EventEmitter, EventReceiver,
    EventSender,
};
pub use engine::LobbyEngine;
pub use requests::{
    CreateLobbyRequest, InviteRequest, JoinByCodeRequest, LobbyRequest, SearchFilter,
    SearchRequest, SetReadyRequest, StartGameRequest,
};
pub use store::{Commit, LobbyStore};
pub use views::{
    InviteResponse, LeaveResponse, LobbySummary, LobbyView, SearchResults, StartGameResponse,
};
