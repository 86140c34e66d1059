use lobby_registry_core::application::{
    CreateLobbyRequest, InviteRequest, JoinByCodeRequest, LobbyRequest, SearchRequest,
    SetReadyRequest, StartGameRequest,
};
use lobby_registry_core::{Caller, ErrorKind, LobbyEngine, LobbyError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Operations exposed to RPC callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rpc {
    CreateLobby,
    JoinLobby,
    JoinLobbyByCode,
    LeaveLobby,
    SearchLobbies,
    GetLobbyInfo,
    SendLobbyInvite,
    StartGame,
    SetPlayerReady,
}

impl Rpc {
    pub const ALL: [Rpc; 9] = [
        Rpc::CreateLobby,
        Rpc::JoinLobby,
        Rpc::JoinLobbyByCode,
        Rpc::LeaveLobby,
        Rpc::SearchLobbies,
        Rpc::GetLobbyInfo,
        Rpc::SendLobbyInvite,
        Rpc::StartGame,
        Rpc::SetPlayerReady,
    ];

    /// Registered wire name
    pub fn name(&self) -> &'static str {
        match self {
            Rpc::CreateLobby => "create_lobby",
            Rpc::JoinLobby => "join_lobby",
            Rpc::JoinLobbyByCode => "join_lobby_by_code",
            Rpc::LeaveLobby => "leave_lobby",
            Rpc::SearchLobbies => "search_lobbies",
            Rpc::GetLobbyInfo => "get_lobby_info",
            Rpc::SendLobbyInvite => "send_lobby_invite",
            Rpc::StartGame => "start_game",
            Rpc::SetPlayerReady => "set_player_ready",
        }
    }
}

impl fmt::Display for Rpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rpc {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rpc::ALL
            .into_iter()
            .find(|rpc| rpc.name() == s)
            .ok_or_else(|| RpcError::new(ErrorKind::NotFound, format!("Unknown RPC: {}", s)))
    }
}

/// Failure reported back to an RPC caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RpcError {
    pub kind: ErrorKind,
    pub message: String,
}

impl RpcError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn invalid_payload(rpc: Rpc, e: serde_json::Error) -> Self {
        Self::new(
            ErrorKind::InvalidArgument,
            format!("Invalid {} payload: {}", rpc, e),
        )
    }

    fn encoding(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::Internal, format!("Failed to encode response: {}", e))
    }

    /// Wire form: `{"error": {"kind": ..., "message": ...}}`
    pub fn to_envelope(&self) -> Value {
        json!({ "error": self })
    }
}

impl From<LobbyError> for RpcError {
    fn from(e: LobbyError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

/// Decodes RPC payloads, runs them against the engine and encodes results
#[derive(Debug, Clone)]
pub struct RpcRouter {
    engine: LobbyEngine,
}

impl RpcRouter {
    pub fn new(engine: LobbyEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &LobbyEngine {
        &self.engine
    }

    /// Run the named RPC on behalf of `caller`
    #[instrument(level = "debug", skip(self, caller, payload), fields(user_id = %caller.user_id))]
    pub fn dispatch(&self, caller: &Caller, name: &str, payload: Value) -> Result<Value, RpcError> {
        let rpc: Rpc = name.parse()?;
        let engine = &self.engine;

        let response = match rpc {
            Rpc::CreateLobby => {
                encode(engine.create_lobby(caller, decode::<CreateLobbyRequest>(rpc, payload)?)?)
            }
            Rpc::JoinLobby => {
                encode(engine.join_lobby(caller, decode::<LobbyRequest>(rpc, payload)?)?)
            }
            Rpc::JoinLobbyByCode => encode(
                engine.join_lobby_by_code(caller, decode::<JoinByCodeRequest>(rpc, payload)?)?,
            ),
            Rpc::LeaveLobby => {
                encode(engine.leave_lobby(caller, decode::<LobbyRequest>(rpc, payload)?)?)
            }
            Rpc::SearchLobbies => {
                encode(engine.search_lobbies(decode::<SearchRequest>(rpc, payload)?))
            }
            Rpc::GetLobbyInfo => {
                encode(engine.get_lobby_info(caller, decode::<LobbyRequest>(rpc, payload)?)?)
            }
            Rpc::SendLobbyInvite => {
                encode(engine.send_invite(caller, decode::<InviteRequest>(rpc, payload)?)?)
            }
            Rpc::StartGame => {
                encode(engine.start_game(caller, decode::<StartGameRequest>(rpc, payload)?)?)
            }
            Rpc::SetPlayerReady => {
                encode(engine.set_ready(caller, decode::<SetReadyRequest>(rpc, payload)?)?)
            }
        };

        if let Err(e) = &response {
            debug!(%rpc, kind = %e.kind, "RPC failed");
        }
        response
    }

    /// Like `dispatch`, with failures rendered as an error envelope
    pub fn handle(&self, caller: &Caller, name: &str, payload: Value) -> Value {
        self.dispatch(caller, name, payload)
            .unwrap_or_else(|e| e.to_envelope())
    }
}

/// A missing payload decodes like an empty object
fn decode<T: DeserializeOwned>(rpc: Rpc, payload: Value) -> Result<T, RpcError> {
    let payload = match payload {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(payload).map_err(|e| RpcError::invalid_payload(rpc, e))
}

fn encode<T: Serialize>(response: T) -> Result<Value, RpcError> {
    serde_json::to_value(response).map_err(RpcError::encoding)
}
