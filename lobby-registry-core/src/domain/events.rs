use crate::domain::{CustomProperties, InviteId, JoinCode, Lobby, LobbyId, Player, UserId};
use serde::{Deserialize, Serialize};

/// Change notifications emitted after an operation commits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LobbyEvent {
    /// Lobby metadata changed (created, owner handed over, readiness)
    LobbyUpdated { lobby: Lobby },

    /// A player took a seat
    PlayerJoined { lobby_id: LobbyId, player: Player },

    /// A player gave up their seat
    PlayerLeft { lobby_id: LobbyId, player: Player },

    /// The last player left and the lobby was deleted
    LobbyClosed { lobby_id: LobbyId },

    /// A member invited someone; the code lets the recipient join
    InviteSent {
        invite_id: InviteId,
        lobby_id: LobbyId,
        lobby_name: String,
        from_user_id: UserId,
        to_user_id: UserId,
        join_code: JoinCode,
    },

    /// Owner started the game; the match provisioner takes it from here
    GameStarting {
        lobby: Lobby,
        settings: CustomProperties,
    },

    /// An authorization check refused a caller (only with auditing enabled)
    AccessDenied {
        lobby_id: LobbyId,
        user_id: UserId,
        reason: String,
    },
}

impl LobbyEvent {
    /// Lobby the event concerns
    pub fn lobby_id(&self) -> LobbyId {
        match self {
            LobbyEvent::LobbyUpdated { lobby } | LobbyEvent::GameStarting { lobby, .. } => {
                lobby.id()
            }
            LobbyEvent::PlayerJoined { lobby_id, .. }
            | LobbyEvent::PlayerLeft { lobby_id, .. }
            | LobbyEvent::LobbyClosed { lobby_id }
            | LobbyEvent::InviteSent { lobby_id, .. }
            | LobbyEvent::AccessDenied { lobby_id, .. } => *lobby_id,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            LobbyEvent::LobbyUpdated { .. } => "LobbyUpdated",
            LobbyEvent::PlayerJoined { .. } => "PlayerJoined",
            LobbyEvent::PlayerLeft { .. } => "PlayerLeft",
            LobbyEvent::LobbyClosed { .. } => "LobbyClosed",
            LobbyEvent::InviteSent { .. } => "InviteSent",
            LobbyEvent::GameStarting { .. } => "GameStarting",
            LobbyEvent::AccessDenied { .. } => "AccessDenied",
        }
    }
}
