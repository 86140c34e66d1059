use crate::domain::{Caller, JoinCode, LobbyId, Player, UserId};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Open, string-keyed bag of lobby settings (e.g. `game_mode`)
pub type CustomProperties = BTreeMap<String, serde_json::Value>;

/// Key inspected by the search `game_mode` filter
pub const GAME_MODE_KEY: &str = "game_mode";

/// Lobby aggregate root
///
/// Metadata and the ordered player list live in one value, so the two can
/// never be observed out of step. `current_players` is not stored: it is
/// always the length of `players`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lobby {
    id: LobbyId,
    name: String,
    max_players: u32,
    is_private: bool,
    custom_properties: CustomProperties,
    /// Current owner, always one of `players`
    owner_id: UserId,
    join_code: JoinCode,
    status: LobbyStatus,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    /// Players in join order (earliest first)
    players: Vec<Player>,
}

/// Where a lobby is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LobbyStatus {
    /// Gathering players, joinable
    Open,
    /// Start was requested; frozen for joins and hidden from search
    InGame,
}

impl fmt::Display for LobbyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LobbyStatus::Open => write!(f, "Open"),
            LobbyStatus::InGame => write!(f, "InGame"),
        }
    }
}

/// How a caller reached the lobby when joining
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinAccess {
    /// By lobby id; refused for private lobbies
    Direct,
    /// By join code, either typed in or taken from an invite
    Code,
}

/// Settings a lobby is created with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LobbySettings {
    pub name: String,
    pub max_players: u32,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub custom_properties: CustomProperties,
}

/// Upper bound for a lobby's `max_players`
pub const MAX_PLAYERS: u32 = 16;

impl LobbySettings {
    /// Check the name is present and capacity is within 1..=`MAX_PLAYERS`
    pub fn validate(&self) -> Result<(), LobbyError> {
        if self.name.is_empty() {
            return Err(LobbyError::EmptyName);
        }

        if self.max_players == 0 || self.max_players > MAX_PLAYERS {
            return Err(LobbyError::InvalidMaxPlayers {
                requested: self.max_players,
                limit: MAX_PLAYERS,
            });
        }

        Ok(())
    }
}

/// Outcome of a player leaving
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// The seat that was vacated
    pub player: Player,
    /// Set when the leaver owned the lobby and someone remains
    pub new_owner: Option<UserId>,
    /// The lobby has no players left and must be deleted
    pub emptied: bool,
}

/// Broad failure category reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyMember,
    NotMember,
    LobbyFull,
    Forbidden,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyMember => "already_member",
            ErrorKind::NotMember => "not_member",
            ErrorKind::LobbyFull => "lobby_full",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in lobby operations
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum LobbyError {
    #[error("Lobby name cannot be empty")]
    EmptyName,

    #[error("Invalid max players {requested}: must be between 1 and {limit}")]
    InvalidMaxPlayers { requested: u32, limit: u32 },

    #[error("Invite recipient cannot be empty")]
    InvalidInvitee,

    #[error("Lobby not found: {0}")]
    LobbyNotFound(LobbyId),

    #[error("No lobby for join code: {0}")]
    UnknownJoinCode(String),

    #[error("Player {0} is already in this lobby")]
    AlreadyMember(UserId),

    #[error("Player {0} is not in this lobby")]
    NotMember(UserId),

    #[error("Lobby is full ({max_players} players)")]
    LobbyFull { max_players: u32 },

    #[error("Lobby is private; join with its code or an invite")]
    PrivateLobby,

    #[error("Only the lobby owner can start the game")]
    NotOwner,

    #[error("Game has already started in this lobby")]
    GameAlreadyStarted,

    #[error("Sender must be in the lobby to send invites")]
    InviteRequiresMembership,

    #[error("Lobby already exists: {0}")]
    AlreadyExists(LobbyId),

    #[error("Could not allocate a free join code after {attempts} attempts")]
    JoinCodesExhausted { attempts: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LobbyError {
    /// Map the specific cause onto the caller-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            LobbyError::EmptyName
            | LobbyError::InvalidMaxPlayers { .. }
            | LobbyError::InvalidInvitee => ErrorKind::InvalidArgument,
            LobbyError::LobbyNotFound(_) | LobbyError::UnknownJoinCode(_) => ErrorKind::NotFound,
            LobbyError::AlreadyMember(_) => ErrorKind::AlreadyMember,
            LobbyError::NotMember(_) => ErrorKind::NotMember,
            LobbyError::LobbyFull { .. } => ErrorKind::LobbyFull,
            LobbyError::PrivateLobby
            | LobbyError::NotOwner
            | LobbyError::GameAlreadyStarted
            | LobbyError::InviteRequiresMembership => ErrorKind::Forbidden,
            LobbyError::AlreadyExists(_)
            | LobbyError::JoinCodesExhausted { .. }
            | LobbyError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl Lobby {
    /// Create a lobby with `owner` as its sole member
    pub fn new(
        id: LobbyId,
        join_code: JoinCode,
        settings: LobbySettings,
        owner: &Caller,
    ) -> Result<Self, LobbyError> {
        settings.validate()?;

        let now = Utc::now();
        Ok(Lobby {
            id,
            name: settings.name,
            max_players: settings.max_players,
            is_private: settings.is_private,
            custom_properties: settings.custom_properties,
            owner_id: owner.user_id.clone(),
            join_code,
            status: LobbyStatus::Open,
            created_at: now,
            last_activity: now,
            players: vec![Player::seat(owner)],
        })
    }

    // ===== Getters =====

    pub fn id(&self) -> LobbyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_players(&self) -> u32 {
        self.max_players
    }

    /// Live seat count
    pub fn current_players(&self) -> u32 {
        self.players.len() as u32
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn custom_properties(&self) -> &CustomProperties {
        &self.custom_properties
    }

    /// `game_mode` custom property, if present and a string
    pub fn game_mode(&self) -> Option<&str> {
        self.custom_properties
            .get(GAME_MODE_KEY)
            .and_then(|v| v.as_str())
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn join_code(&self) -> &JoinCode {
        &self.join_code
    }

    pub fn status(&self) -> LobbyStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, user_id: &UserId) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id() == user_id)
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.player(user_id).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.current_players() >= self.max_players
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Visible to search: public and still gathering
    pub fn is_listed(&self) -> bool {
        !self.is_private && self.status == LobbyStatus::Open
    }

    // ===== Membership =====

    /// Seat `caller` at the end of the list
    pub fn join(&mut self, caller: &Caller, access: JoinAccess) -> Result<Player, LobbyError> {
        if self.status == LobbyStatus::InGame {
            return Err(LobbyError::GameAlreadyStarted);
        }

        if self.is_private && access == JoinAccess::Direct {
            return Err(LobbyError::PrivateLobby);
        }

        if self.is_full() {
            return Err(LobbyError::LobbyFull {
                max_players: self.max_players,
            });
        }

        if self.is_member(&caller.user_id) {
            return Err(LobbyError::AlreadyMember(caller.user_id.clone()));
        }

        let player = Player::seat(caller);
        self.players.push(player.clone());
        self.touch();
        Ok(player)
    }

    /// Remove `user_id`, handing ownership to the earliest-joined remaining
    /// player when the owner leaves
    pub fn leave(&mut self, user_id: &UserId) -> Result<Departure, LobbyError> {
        let index = self
            .players
            .iter()
            .position(|p| p.user_id() == user_id)
            .ok_or_else(|| LobbyError::NotMember(user_id.clone()))?;

        let player = self.players.remove(index);
        self.touch();

        let mut new_owner = None;
        if let Some(first) = self.players.first() {
            if &self.owner_id == user_id {
                self.owner_id = first.user_id().clone();
                new_owner = Some(self.owner_id.clone());
            }
        }

        Ok(Departure {
            player,
            new_owner,
            emptied: self.players.is_empty(),
        })
    }

    /// Flip a member's readiness flag
    pub fn set_ready(&mut self, user_id: &UserId, ready: bool) -> Result<(), LobbyError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.user_id() == user_id)
            .ok_or_else(|| LobbyError::NotMember(user_id.clone()))?;

        player.set_ready(ready);
        self.touch();
        Ok(())
    }

    /// Freeze the lobby for the match (owner only)
    pub fn start(&mut self, user_id: &UserId) -> Result<(), LobbyError> {
        if &self.owner_id != user_id {
            return Err(LobbyError::NotOwner);
        }

        if self.status == LobbyStatus::InGame {
            return Err(LobbyError::GameAlreadyStarted);
        }

        self.status = LobbyStatus::InGame;
        self.touch();
        Ok(())
    }

    /// Check `user_id` may invite others into this lobby
    pub fn ensure_can_invite(&self, user_id: &UserId) -> Result<(), LobbyError> {
        if !self.is_member(user_id) {
            return Err(LobbyError::InviteRequiresMembership);
        }

        if self.status == LobbyStatus::InGame {
            return Err(LobbyError::GameAlreadyStarted);
        }

        Ok(())
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}
