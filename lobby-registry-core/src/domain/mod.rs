pub mod events;
pub mod ids;
pub mod join_code;
pub mod lobby;
pub mod player;

pub use events::LobbyEvent;
pub use ids::{IdGenerator, InviteId, LobbyId, UserId};
pub use join_code::JoinCode;
pub use lobby::{
    CustomProperties, Departure, ErrorKind, JoinAccess, Lobby, LobbyError, LobbySettings,
    LobbyStatus, GAME_MODE_KEY, MAX_PLAYERS,
};
pub use player::{Caller, Player};
