use crate::domain::{CustomProperties, Lobby, LobbyId, LobbySettings, UserId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `create_lobby` payload
pub type CreateLobbyRequest = LobbySettings;

/// Payload naming a single lobby (`join_lobby`, `leave_lobby`, `get_lobby_info`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LobbyRequest {
    pub lobby_id: LobbyId,
}

/// `join_lobby_by_code` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JoinByCodeRequest {
    pub code: String,
}

/// `search_lobbies` payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchRequest {
    #[serde(default)]
    pub filter: SearchFilter,
}

/// Conjunctive search filter; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchFilter {
    /// Lower bound on `current_players`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_players: Option<u32>,
    /// Upper bound on `current_players`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,
    /// Required value of the `game_mode` custom property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<String>,
}

impl SearchFilter {
    pub fn with_min_players(mut self, n: u32) -> Self {
        self.min_players = Some(n);
        self
    }

    pub fn with_max_players(mut self, n: u32) -> Self {
        self.max_players = Some(n);
        self
    }

    pub fn with_game_mode(mut self, mode: impl Into<String>) -> Self {
        self.game_mode = Some(mode.into());
        self
    }

    /// Whether a listed lobby passes every set predicate.
    ///
    /// A `game_mode` filter never matches a lobby without that property.
    pub fn matches(&self, lobby: &Lobby) -> bool {
        let players = lobby.current_players();

        if self.min_players.is_some_and(|min| players < min) {
            return false;
        }

        if self.max_players.is_some_and(|max| players > max) {
            return false;
        }

        match &self.game_mode {
            Some(wanted) => lobby.game_mode() == Some(wanted.as_str()),
            None => true,
        }
    }
}

/// `send_lobby_invite` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InviteRequest {
    pub to_user_id: UserId,
    pub lobby_id: LobbyId,
}

/// `start_game` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StartGameRequest {
    pub lobby_id: LobbyId,
    /// Match settings passed through to the provisioner
    #[serde(default)]
    pub settings: CustomProperties,
}

/// `set_player_ready` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SetReadyRequest {
    pub lobby_id: LobbyId,
    pub ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Caller, IdGenerator, JoinAccess, JoinCode, GAME_MODE_KEY};

    fn lobby(players: usize, game_mode: Option<&str>) -> Lobby {
        let mut custom_properties = CustomProperties::new();
        if let Some(mode) = game_mode {
            custom_properties.insert(GAME_MODE_KEY.to_string(), serde_json::json!(mode));
        }

        let mut lobby = Lobby::new(
            IdGenerator::new().new_lobby_id(),
            JoinCode::generate(6),
            LobbySettings {
                name: "Arena".to_string(),
                max_players: 16,
                is_private: false,
                custom_properties,
            },
            &Caller::new("owner", "Owner"),
        )
        .unwrap();

        for i in 1..players {
            lobby
                .join(&Caller::new(format!("u{}", i), "P"), JoinAccess::Direct)
                .unwrap();
        }
        lobby
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = SearchFilter::default();
        assert!(filter.matches(&lobby(1, None)));
        assert!(filter.matches(&lobby(5, Some("ctf"))));
    }

    #[test]
    fn test_player_bounds_are_inclusive() {
        let filter = SearchFilter::default().with_min_players(2).with_max_players(3);

        assert!(!filter.matches(&lobby(1, None)));
        assert!(filter.matches(&lobby(2, None)));
        assert!(filter.matches(&lobby(3, None)));
        assert!(!filter.matches(&lobby(4, None)));
    }

    #[test]
    fn test_game_mode_excludes_lobbies_without_property() {
        let filter = SearchFilter::default().with_game_mode("ctf");

        assert!(filter.matches(&lobby(1, Some("ctf"))));
        assert!(!filter.matches(&lobby(1, Some("deathmatch"))));
        assert!(!filter.matches(&lobby(1, None)));
    }

    #[test]
    fn test_search_request_filter_defaults() {
        let request: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.filter, SearchFilter::default());

        let request: SearchRequest =
            serde_json::from_str(r#"{"filter":{"min_players":2,"game_mode":"ctf"}}"#).unwrap();
        assert_eq!(request.filter.min_players, Some(2));
        assert_eq!(request.filter.game_mode.as_deref(), Some("ctf"));
    }

    #[test]
    fn test_create_request_defaults() {
        let request: CreateLobbyRequest =
            serde_json::from_str(r#"{"name":"Arena","max_players":2}"#).unwrap();
        assert!(!request.is_private);
        assert!(request.custom_properties.is_empty());
    }

    #[test]
    fn test_negative_max_players_does_not_decode() {
        let result: Result<CreateLobbyRequest, _> =
            serde_json::from_str(r#"{"name":"Arena","max_players":-1}"#);
        assert!(result.is_err());
    }
}
