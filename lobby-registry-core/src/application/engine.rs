use crate::application::config::EngineConfig;
use crate::application::emitter::{event_channel, EventReceiver, EventSender};
use crate::application::requests::{
    CreateLobbyRequest, InviteRequest, JoinByCodeRequest, LobbyRequest, SearchRequest,
    SetReadyRequest, StartGameRequest,
};
use crate::application::store::LobbyStore;
use crate::application::views::{
    InviteResponse, LeaveResponse, LobbySummary, LobbyView, SearchResults, StartGameResponse,
};
use crate::domain::{
    Caller, ErrorKind, IdGenerator, JoinAccess, JoinCode, Lobby, LobbyError, LobbyEvent, LobbyId,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const GAME_STARTING_MESSAGE: &str = "Game starting...";

/// Lobby operations over a shared store.
///
/// Every mutation runs inside the target lobby's exclusive section and
/// publishes its events only after the change is committed. Clones share the
/// same store and event queue.
#[derive(Debug, Clone)]
pub struct LobbyEngine {
    store: Arc<LobbyStore>,
    ids: IdGenerator,
    config: EngineConfig,
    events: EventSender,
}

impl LobbyEngine {
    pub fn new(store: Arc<LobbyStore>, config: EngineConfig, events: EventSender) -> Self {
        Self {
            store,
            ids: IdGenerator::new(),
            config,
            events,
        }
    }

    /// Engine over a fresh store, plus the receiving end of its event queue
    pub fn with_config(config: EngineConfig) -> (Self, EventReceiver) {
        let (tx, rx) = event_channel();
        (Self::new(Arc::new(LobbyStore::new()), config, tx), rx)
    }

    pub fn store(&self) -> &LobbyStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a lobby owned by `caller`, who takes the first seat
    #[instrument(level = "debug", skip_all, fields(user_id = %caller.user_id))]
    pub fn create_lobby(
        &self,
        caller: &Caller,
        request: CreateLobbyRequest,
    ) -> Result<LobbyView, LobbyError> {
        request.validate()?;

        let lobby_id = self.ids.new_lobby_id();
        let code = self.store.reserve_code(
            lobby_id,
            self.config.join_code_length,
            self.config.join_code_attempts,
        )?;

        let created = Lobby::new(lobby_id, code.clone(), request, caller)
            .and_then(|lobby| self.store.insert(lobby.clone()).map(|()| lobby));

        let lobby = match created {
            Ok(lobby) => lobby,
            Err(e) => {
                self.store.release_code(&code, lobby_id);
                return Err(e);
            }
        };

        info!(%lobby_id, name = lobby.name(), "Lobby created");
        let view = LobbyView::for_member(&lobby);
        self.publish([LobbyEvent::LobbyUpdated { lobby }]);
        Ok(view)
    }

    /// Join a public lobby by id
    #[instrument(level = "debug", skip_all, fields(user_id = %caller.user_id, lobby_id = %request.lobby_id))]
    pub fn join_lobby(
        &self,
        caller: &Caller,
        request: LobbyRequest,
    ) -> Result<LobbyView, LobbyError> {
        self.join(caller, request.lobby_id, JoinAccess::Direct)
    }

    /// Join any open lobby (private included) by its join code
    #[instrument(level = "debug", skip_all, fields(user_id = %caller.user_id))]
    pub fn join_lobby_by_code(
        &self,
        caller: &Caller,
        request: JoinByCodeRequest,
    ) -> Result<LobbyView, LobbyError> {
        let lobby_id = JoinCode::normalize(&request.code)
            .and_then(|code| self.store.resolve_code(&code))
            .ok_or_else(|| LobbyError::UnknownJoinCode(request.code.trim().to_string()))?;

        self.join(caller, lobby_id, JoinAccess::Code)
    }

    fn join(
        &self,
        caller: &Caller,
        lobby_id: LobbyId,
        access: JoinAccess,
    ) -> Result<LobbyView, LobbyError> {
        let commit = self
            .store
            .with_lobby(&lobby_id, |lobby| lobby.join(caller, access))
            .map_err(|e| self.audit(lobby_id, caller, e))?;

        debug!(
            %lobby_id,
            players = commit.lobby.current_players(),
            "Player joined"
        );

        let view = LobbyView::for_member(&commit.lobby);
        self.publish([LobbyEvent::PlayerJoined {
            lobby_id,
            player: commit.value,
        }]);
        Ok(view)
    }

    /// Give up the caller's seat; the lobby is deleted once empty
    #[instrument(level = "debug", skip_all, fields(user_id = %caller.user_id, lobby_id = %request.lobby_id))]
    pub fn leave_lobby(
        &self,
        caller: &Caller,
        request: LobbyRequest,
    ) -> Result<LeaveResponse, LobbyError> {
        let lobby_id = request.lobby_id;
        let commit = self
            .store
            .with_lobby(&lobby_id, |lobby| lobby.leave(&caller.user_id))?;

        let departure = commit.value;
        let mut events = vec![LobbyEvent::PlayerLeft {
            lobby_id,
            player: departure.player,
        }];

        if commit.removed {
            info!(%lobby_id, "Last player left, lobby closed");
            events.push(LobbyEvent::LobbyClosed { lobby_id });
        } else if let Some(new_owner) = departure.new_owner {
            debug!(%lobby_id, %new_owner, "Ownership handed over");
            events.push(LobbyEvent::LobbyUpdated {
                lobby: commit.lobby,
            });
        }

        self.publish(events);
        Ok(LeaveResponse {
            success: true,
            lobby_id,
        })
    }

    /// Public, open lobbies passing the filter, oldest first
    #[instrument(level = "debug", skip_all)]
    pub fn search_lobbies(&self, request: SearchRequest) -> SearchResults {
        let mut lobbies: Vec<Lobby> = self
            .store
            .list()
            .into_iter()
            .filter(|lobby| lobby.is_listed() && request.filter.matches(lobby))
            .collect();

        lobbies.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });

        debug!(results = lobbies.len(), "Search complete");
        SearchResults {
            lobbies: lobbies.iter().map(LobbySummary::from).collect(),
        }
    }

    /// Current state of one lobby; the join code is shown to members only
    pub fn get_lobby_info(
        &self,
        caller: &Caller,
        request: LobbyRequest,
    ) -> Result<LobbyView, LobbyError> {
        let lobby = self.store.get(&request.lobby_id)?;
        Ok(LobbyView::for_viewer(&lobby, &caller.user_id))
    }

    /// Invite another user into a lobby the caller belongs to
    #[instrument(level = "debug", skip_all, fields(user_id = %caller.user_id, lobby_id = %request.lobby_id))]
    pub fn send_invite(
        &self,
        caller: &Caller,
        request: InviteRequest,
    ) -> Result<InviteResponse, LobbyError> {
        if request.to_user_id.is_empty() {
            return Err(LobbyError::InvalidInvitee);
        }

        let lobby = self.store.get(&request.lobby_id)?;
        lobby
            .ensure_can_invite(&caller.user_id)
            .map_err(|e| self.audit(lobby.id(), caller, e))?;

        let invite_id = self.ids.new_invite_id();
        debug!(%invite_id, to = %request.to_user_id, "Invite sent");

        self.publish([LobbyEvent::InviteSent {
            invite_id,
            lobby_id: lobby.id(),
            lobby_name: lobby.name().to_string(),
            from_user_id: caller.user_id.clone(),
            to_user_id: request.to_user_id.clone(),
            join_code: lobby.join_code().clone(),
        }]);

        Ok(InviteResponse {
            success: true,
            invite_id,
            to_user_id: request.to_user_id,
            lobby_id: lobby.id(),
            from_user_id: caller.user_id.clone(),
        })
    }

    /// Owner-only: freeze the lobby and hand it to match provisioning
    #[instrument(level = "debug", skip_all, fields(user_id = %caller.user_id, lobby_id = %request.lobby_id))]
    pub fn start_game(
        &self,
        caller: &Caller,
        request: StartGameRequest,
    ) -> Result<StartGameResponse, LobbyError> {
        let lobby_id = request.lobby_id;
        let commit = self
            .store
            .with_lobby(&lobby_id, |lobby| lobby.start(&caller.user_id))
            .map_err(|e| self.audit(lobby_id, caller, e))?;

        info!(%lobby_id, players = commit.lobby.current_players(), "Game starting");
        self.publish([LobbyEvent::GameStarting {
            lobby: commit.lobby,
            settings: request.settings,
        }]);

        Ok(StartGameResponse {
            success: true,
            lobby_id,
            message: GAME_STARTING_MESSAGE.to_string(),
        })
    }

    /// Set the caller's readiness flag
    #[instrument(level = "debug", skip_all, fields(user_id = %caller.user_id, lobby_id = %request.lobby_id))]
    pub fn set_ready(
        &self,
        caller: &Caller,
        request: SetReadyRequest,
    ) -> Result<LobbyView, LobbyError> {
        let commit = self.store.with_lobby(&request.lobby_id, |lobby| {
            lobby.set_ready(&caller.user_id, request.ready)
        })?;

        let view = LobbyView::for_member(&commit.lobby);
        self.publish([LobbyEvent::LobbyUpdated {
            lobby: commit.lobby,
        }]);
        Ok(view)
    }

    /// Report a refused authorization check when auditing is on
    fn audit(&self, lobby_id: LobbyId, caller: &Caller, error: LobbyError) -> LobbyError {
        if self.config.audit_denials && error.kind() == ErrorKind::Forbidden {
            self.publish([LobbyEvent::AccessDenied {
                lobby_id,
                user_id: caller.user_id.clone(),
                reason: error.to_string(),
            }]);
        }
        error
    }

    fn publish(&self, events: impl IntoIterator<Item = LobbyEvent>) {
        for event in events {
            let name = event.name();
            if self.events.send(event).is_err() {
                debug!(event = name, "No event subscriber, dropping event");
            }
        }
    }
}
