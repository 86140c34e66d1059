use crate::domain::{
    CustomProperties, InviteId, JoinCode, Lobby, LobbyId, LobbyStatus, Player, UserId,
};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Full lobby view returned by create, join and get-info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LobbyView {
    pub lobby_id: LobbyId,
    pub name: String,
    pub max_players: u32,
    pub current_players: u32,
    pub is_private: bool,
    pub custom_properties: CustomProperties,
    /// Current owner
    pub created_by: UserId,
    pub status: LobbyStatus,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Only shown to members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_code: Option<JoinCode>,
    pub players: Vec<Player>,
}

impl LobbyView {
    /// View for a caller who holds a seat, join code included
    pub fn for_member(lobby: &Lobby) -> Self {
        Self {
            join_code: Some(lobby.join_code().clone()),
            ..Self::public(lobby)
        }
    }

    /// View for `viewer`, with the code hidden unless they are a member
    pub fn for_viewer(lobby: &Lobby, viewer: &UserId) -> Self {
        if lobby.is_member(viewer) {
            Self::for_member(lobby)
        } else {
            Self::public(lobby)
        }
    }

    fn public(lobby: &Lobby) -> Self {
        Self {
            lobby_id: lobby.id(),
            name: lobby.name().to_string(),
            max_players: lobby.max_players(),
            current_players: lobby.current_players(),
            is_private: lobby.is_private(),
            custom_properties: lobby.custom_properties().clone(),
            created_by: lobby.owner_id().clone(),
            status: lobby.status(),
            created_at: lobby.created_at(),
            last_activity: lobby.last_activity(),
            join_code: None,
            players: lobby.players().to_vec(),
        }
    }
}

/// Search result entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LobbySummary {
    pub lobby_id: LobbyId,
    pub name: String,
    pub max_players: u32,
    pub current_players: u32,
    pub is_private: bool,
    pub custom_properties: CustomProperties,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<&Lobby> for LobbySummary {
    fn from(lobby: &Lobby) -> Self {
        Self {
            lobby_id: lobby.id(),
            name: lobby.name().to_string(),
            max_players: lobby.max_players(),
            current_players: lobby.current_players(),
            is_private: lobby.is_private(),
            custom_properties: lobby.custom_properties().clone(),
            created_by: lobby.owner_id().clone(),
            created_at: lobby.created_at(),
        }
    }
}

/// `search_lobbies` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchResults {
    pub lobbies: Vec<LobbySummary>,
}

/// `leave_lobby` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LeaveResponse {
    pub success: bool,
    pub lobby_id: LobbyId,
}

/// `send_lobby_invite` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InviteResponse {
    pub success: bool,
    pub invite_id: InviteId,
    pub to_user_id: UserId,
    pub lobby_id: LobbyId,
    pub from_user_id: UserId,
}

/// `start_game` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StartGameResponse {
    pub success: bool,
    pub lobby_id: LobbyId,
    pub message: String,
}
