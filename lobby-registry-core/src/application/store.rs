use crate::domain::{JoinCode, Lobby, LobbyError, LobbyId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

/// Result of a committed `with_lobby` mutation
#[derive(Debug, Clone)]
pub struct Commit<T> {
    /// Whatever the mutator returned
    pub value: T,
    /// Lobby as committed; for a removed lobby, its final (empty) state
    pub lobby: Lobby,
    /// The mutation emptied the lobby and it was deleted
    pub removed: bool,
}

/// Authoritative in-memory registry of live lobbies.
///
/// Each lobby lives in one sharded-map entry; holding that entry is the
/// lobby's exclusive section, so callers only contend when they hit the
/// same shard. Join codes live in a second map and are never touched while
/// a lobby entry is held.
#[derive(Debug, Default)]
pub struct LobbyStore {
    lobbies: DashMap<LobbyId, Lobby>,
    codes: DashMap<JoinCode, LobbyId>,
}

impl LobbyStore {
    pub fn new() -> Self {
        Self {
            lobbies: DashMap::new(),
            codes: DashMap::new(),
        }
    }

    /// Claim an unused join code for `lobby_id`, drawing up to `attempts`
    /// candidates
    pub fn reserve_code(
        &self,
        lobby_id: LobbyId,
        len: usize,
        attempts: usize,
    ) -> Result<JoinCode, LobbyError> {
        for _ in 0..attempts {
            let code = JoinCode::generate(len);
            if let Entry::Vacant(slot) = self.codes.entry(code.clone()) {
                slot.insert(lobby_id);
                return Ok(code);
            }
            debug!(%code, "Join code collision, retrying");
        }

        Err(LobbyError::JoinCodesExhausted { attempts })
    }

    /// Release `code` if it still points at `lobby_id`
    pub fn release_code(&self, code: &JoinCode, lobby_id: LobbyId) {
        self.codes.remove_if(code, |_, owner| *owner == lobby_id);
    }

    /// Look up the lobby a join code belongs to
    pub fn resolve_code(&self, code: &JoinCode) -> Option<LobbyId> {
        self.codes.get(code).map(|entry| *entry.value())
    }

    /// Insert a new lobby; fails if the id is already taken
    pub fn insert(&self, lobby: Lobby) -> Result<(), LobbyError> {
        let lobby_id = lobby.id();
        match self.lobbies.entry(lobby_id) {
            Entry::Occupied(_) => Err(LobbyError::AlreadyExists(lobby_id)),
            Entry::Vacant(slot) => {
                slot.insert(lobby);
                debug!(%lobby_id, "Lobby inserted");
                Ok(())
            }
        }
    }

    /// Snapshot of one lobby
    pub fn get(&self, lobby_id: &LobbyId) -> Result<Lobby, LobbyError> {
        self.lobbies
            .get(lobby_id)
            .map(|entry| entry.value().clone())
            .ok_or(LobbyError::LobbyNotFound(*lobby_id))
    }

    /// Run `mutator` with exclusive access to one lobby.
    ///
    /// The mutator edits a draft copy. On `Ok` the draft replaces the stored
    /// lobby, or the lobby is deleted (and its code released) if the draft
    /// has no players left. On `Err` nothing is written.
    pub fn with_lobby<T, F>(&self, lobby_id: &LobbyId, mutator: F) -> Result<Commit<T>, LobbyError>
    where
        F: FnOnce(&mut Lobby) -> Result<T, LobbyError>,
    {
        let commit = match self.lobbies.entry(*lobby_id) {
            Entry::Vacant(_) => return Err(LobbyError::LobbyNotFound(*lobby_id)),
            Entry::Occupied(mut slot) => {
                let mut draft = slot.get().clone();
                let value = mutator(&mut draft)?;

                if draft.is_empty() {
                    slot.remove();
                    Commit {
                        value,
                        lobby: draft,
                        removed: true,
                    }
                } else {
                    *slot.get_mut() = draft.clone();
                    Commit {
                        value,
                        lobby: draft,
                        removed: false,
                    }
                }
            }
        };

        if commit.removed {
            self.release_code(commit.lobby.join_code(), *lobby_id);
            debug!(%lobby_id, "Lobby removed");
        }

        Ok(commit)
    }

    /// Point-in-time copies of every lobby, taken one entry at a time
    pub fn list(&self) -> Vec<Lobby> {
        self.lobbies
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn contains(&self, lobby_id: &LobbyId) -> bool {
        self.lobbies.contains_key(lobby_id)
    }

    pub fn len(&self) -> usize {
        self.lobbies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lobbies.is_empty()
    }

    /// Number of join codes currently reserved
    pub fn code_count(&self) -> usize {
        self.codes.len()
    }
}
