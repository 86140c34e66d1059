use super::UserId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity of whoever issued a request, injected by the host after it has
/// authenticated the connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: UserId,
    pub username: String,
}

impl Caller {
    pub fn new(user_id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }
}

/// One seat in a lobby's ordered player list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    /// Unique within the lobby
    user_id: UserId,
    /// Display name captured when the player joined
    username: String,
    /// Readiness flag, false on join
    ready: bool,
    /// Optional team label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team: Option<String>,
}

impl Player {
    /// Seat a caller, not ready and without a team
    pub fn seat(caller: &Caller) -> Self {
        Player {
            user_id: caller.user_id.clone(),
            username: caller.username.clone(),
            ready: false,
            team: None,
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    // Getters

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    // State mutations

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }
}
