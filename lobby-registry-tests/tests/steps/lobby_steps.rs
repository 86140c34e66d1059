use cucumber::{given, then, when};
use lobby_registry_core::application::{LobbyRequest, SetReadyRequest};
use lobby_registry_core::domain::{CustomProperties, LobbySettings, GAME_MODE_KEY};
use lobby_registry_core::UserId;
use lobby_registry_tests::LobbyWorld;
use serde_json::json;

fn lobby_settings(name: &str, max_players: u32, is_private: bool) -> LobbySettings {
    LobbySettings {
        name: name.to_string(),
        max_players,
        is_private,
        custom_properties: CustomProperties::new(),
    }
}

fn create(world: &mut LobbyWorld, owner: &str, settings: LobbySettings) {
    let result = world
        .engine
        .create_lobby(&LobbyWorld::caller(owner), settings);
    world.record_view(result);
    if let Some(view) = world.last_view.clone() {
        world.remember(&view);
    }
}

// ===== Given Steps =====

#[given(expr = "{word} created a lobby {string} with max {int} players")]
async fn created_lobby(world: &mut LobbyWorld, owner: String, name: String, max: u32) {
    create(world, &owner, lobby_settings(&name, max, false));
    assert!(world.last_error.is_none(), "create failed: {:?}", world.last_error);
}

#[given(expr = "{word} created a private lobby {string} with max {int} players")]
async fn created_private_lobby(world: &mut LobbyWorld, owner: String, name: String, max: u32) {
    create(world, &owner, lobby_settings(&name, max, true));
    assert!(world.last_error.is_none(), "create failed: {:?}", world.last_error);
}

#[given(expr = "{word} created a lobby {string} with max {int} players and game mode {string}")]
async fn created_lobby_with_mode(
    world: &mut LobbyWorld,
    owner: String,
    name: String,
    max: u32,
    mode: String,
) {
    let mut settings = lobby_settings(&name, max, false);
    settings
        .custom_properties
        .insert(GAME_MODE_KEY.to_string(), json!(mode));
    create(world, &owner, settings);
    assert!(world.last_error.is_none(), "create failed: {:?}", world.last_error);
}

#[given(expr = "{word} joined {string}")]
async fn joined(world: &mut LobbyWorld, user: String, lobby: String) {
    joins(world, user, lobby).await;
    assert!(world.last_error.is_none(), "join failed: {:?}", world.last_error);
}

// ===== When Steps =====

#[when(expr = "{word} creates a lobby {string} with max {int} players")]
async fn creates_lobby(world: &mut LobbyWorld, owner: String, name: String, max: u32) {
    create(world, &owner, lobby_settings(&name, max, false));
}

#[when(expr = "{word} joins {string}")]
async fn joins(world: &mut LobbyWorld, user: String, lobby: String) {
    let request = LobbyRequest {
        lobby_id: world.lobby_id(&lobby),
    };
    let result = world.engine.join_lobby(&LobbyWorld::caller(&user), request);
    world.record_view(result);
}

#[when(expr = "{word} leaves {string}")]
async fn leaves(world: &mut LobbyWorld, user: String, lobby: String) {
    let request = LobbyRequest {
        lobby_id: world.lobby_id(&lobby),
    };
    let result = world.engine.leave_lobby(&LobbyWorld::caller(&user), request);
    world.record(result);
}

#[when(expr = "{word} asks for the info of {string}")]
async fn asks_for_info(world: &mut LobbyWorld, user: String, lobby: String) {
    let request = LobbyRequest {
        lobby_id: world.lobby_id(&lobby),
    };
    let result = world
        .engine
        .get_lobby_info(&LobbyWorld::caller(&user), request);
    world.record_view(result);
}

#[when(expr = "{word} marks themselves ready in {string}")]
async fn marks_ready(world: &mut LobbyWorld, user: String, lobby: String) {
    let request = SetReadyRequest {
        lobby_id: world.lobby_id(&lobby),
        ready: true,
    };
    let result = world.engine.set_ready(&LobbyWorld::caller(&user), request);
    world.record_view(result);
}

// ===== Then Steps =====

#[then("the request succeeds")]
async fn request_succeeds(world: &mut LobbyWorld) {
    assert!(
        world.last_error.is_none(),
        "Expected success, got {:?}",
        world.last_error
    );
}

#[then(expr = "the request fails with {string}")]
async fn request_fails_with(world: &mut LobbyWorld, kind: String) {
    let error = world
        .last_error
        .as_ref()
        .expect("Expected the request to fail");
    assert_eq!(error.kind().to_string(), kind, "error was: {}", error);
}

#[then(expr = "{string} has {int} player(s)")]
async fn lobby_has_players(world: &mut LobbyWorld, lobby: String, count: u32) {
    let lobby = world
        .engine
        .store()
        .get(&world.lobby_id(&lobby))
        .expect("Lobby should exist");
    assert_eq!(lobby.current_players(), count);
    assert_eq!(lobby.players().len(), count as usize);
}

#[then(expr = "the players of {string} are {string}")]
async fn players_are(world: &mut LobbyWorld, lobby: String, names: String) {
    let lobby = world
        .engine
        .store()
        .get(&world.lobby_id(&lobby))
        .expect("Lobby should exist");
    let actual: Vec<_> = lobby.players().iter().map(|p| p.username()).collect();
    let expected: Vec<_> = names.split(',').map(str::trim).collect();
    assert_eq!(actual, expected);
}

#[then(expr = "{string} is owned by {word}")]
async fn lobby_owned_by(world: &mut LobbyWorld, lobby: String, owner: String) {
    let lobby = world
        .engine
        .store()
        .get(&world.lobby_id(&lobby))
        .expect("Lobby should exist");
    assert_eq!(lobby.owner_id(), &UserId::from(owner.to_lowercase()));
}

#[then(expr = "{string} no longer exists")]
async fn lobby_gone(world: &mut LobbyWorld, lobby: String) {
    assert!(!world.engine.store().contains(&world.lobby_id(&lobby)));
}

#[then(expr = "{word} is ready in {string}")]
async fn is_ready(world: &mut LobbyWorld, user: String, lobby: String) {
    let lobby = world
        .engine
        .store()
        .get(&world.lobby_id(&lobby))
        .expect("Lobby should exist");
    let player = lobby
        .player(&UserId::from(user.to_lowercase()))
        .expect("Player should be seated");
    assert!(player.is_ready());
}

#[then(expr = "the returned lobby has {int} player(s)")]
async fn returned_lobby_has(world: &mut LobbyWorld, count: u32) {
    let view = world.last_view.as_ref().expect("No lobby returned");
    assert_eq!(view.current_players, count);
}

#[then(expr = "the event {string} was emitted")]
async fn event_emitted(world: &mut LobbyWorld, name: String) {
    let seen = world.drain_events();
    assert!(
        seen.iter().any(|e| e.name() == name),
        "no {} event among {:?}",
        name,
        seen.iter().map(|e| e.name()).collect::<Vec<_>>()
    );
}

#[then(expr = "the events so far are {string}")]
async fn events_so_far(world: &mut LobbyWorld, names: String) {
    let actual: Vec<_> = world.drain_events().iter().map(|e| e.name()).collect();
    let expected: Vec<_> = names.split(',').map(str::trim).collect();
    assert_eq!(actual, expected);
}
