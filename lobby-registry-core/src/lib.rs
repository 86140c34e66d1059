//! In-memory lobby registry for multiplayer matchmaking.
//!
//! [`LobbyEngine`] is the entry point: it validates requests, mutates lobbies
//! in a [`LobbyStore`] under per-lobby exclusion and queues [`LobbyEvent`]s
//! for an [`EventEmitter`] once each change is committed.

pub mod application;
pub mod domain;

pub use application::{
    event_channel, spawn_event_forwarder, EmitError, EngineConfig, EventEmitter, EventReceiver,
    EventSender, LobbyEngine, LobbyStore, LobbyView,
};
pub use domain::{
    Caller, ErrorKind, JoinCode, Lobby, LobbyError, LobbyEvent, LobbyId, LobbyStatus, Player,
    UserId,
};
