use cucumber::{then, when};
use lobby_registry_core::application::{InviteRequest, JoinByCodeRequest, StartGameRequest};
use lobby_registry_core::domain::CustomProperties;
use lobby_registry_core::{LobbyEvent, LobbyStatus, UserId};
use lobby_registry_tests::LobbyWorld;

fn join_with_code(world: &mut LobbyWorld, user: &str, code: String) {
    let result = world
        .engine
        .join_lobby_by_code(&LobbyWorld::caller(user), JoinByCodeRequest { code });
    world.record_view(result);
}

// ===== When Steps =====

#[when(expr = "{word} joins {string} with its code")]
async fn joins_with_its_code(world: &mut LobbyWorld, user: String, lobby: String) {
    let code = world
        .join_codes
        .get(&lobby)
        .unwrap_or_else(|| panic!("No join code for '{}'", lobby))
        .to_string();
    join_with_code(world, &user, code);
}

#[when(expr = "{word} types the code of {string} in lowercase")]
async fn types_code_lowercase(world: &mut LobbyWorld, user: String, lobby: String) {
    let code = world
        .join_codes
        .get(&lobby)
        .unwrap_or_else(|| panic!("No join code for '{}'", lobby))
        .as_str()
        .to_lowercase();
    join_with_code(world, &user, format!("  {}  ", code));
}

#[when(expr = "{word} joins with code {string}")]
async fn joins_with_code(world: &mut LobbyWorld, user: String, code: String) {
    join_with_code(world, &user, code);
}

#[when(expr = "{word} joins with the id of {string} as a code")]
async fn joins_with_id_as_code(world: &mut LobbyWorld, user: String, lobby: String) {
    let code = world.lobby_id(&lobby).to_string();
    join_with_code(world, &user, code);
}

#[when(expr = "{word} invites {word} to {string}")]
async fn invites(world: &mut LobbyWorld, from: String, to: String, lobby: String) {
    let request = InviteRequest {
        to_user_id: UserId::from(to.to_lowercase()),
        lobby_id: world.lobby_id(&lobby),
    };
    let result = world.engine.send_invite(&LobbyWorld::caller(&from), request);
    world.record(result);
}

#[when(expr = "{word} starts the game in {string}")]
async fn starts_game(world: &mut LobbyWorld, user: String, lobby: String) {
    let request = StartGameRequest {
        lobby_id: world.lobby_id(&lobby),
        settings: CustomProperties::new(),
    };
    let result = world.engine.start_game(&LobbyWorld::caller(&user), request);
    world.record(result);
}

// ===== Then Steps =====

#[then("the info shows the join code")]
async fn info_shows_code(world: &mut LobbyWorld) {
    let view = world.last_view.as_ref().expect("No lobby returned");
    assert!(view.join_code.is_some());
}

#[then("the info hides the join code")]
async fn info_hides_code(world: &mut LobbyWorld) {
    let view = world.last_view.as_ref().expect("No lobby returned");
    assert!(view.join_code.is_none());
}

#[then(expr = "{string} is in game")]
async fn lobby_in_game(world: &mut LobbyWorld, lobby: String) {
    let lobby = world
        .engine
        .store()
        .get(&world.lobby_id(&lobby))
        .expect("Lobby should exist");
    assert_eq!(lobby.status(), LobbyStatus::InGame);
}

#[then(expr = "{word} received an invite to {string} carrying its code")]
async fn received_invite(world: &mut LobbyWorld, user: String, lobby: String) {
    let expected_code = world.join_codes.get(&lobby).cloned();
    let recipient = UserId::from(user.to_lowercase());

    let found = world.drain_events().iter().any(|event| match event {
        LobbyEvent::InviteSent {
            to_user_id,
            lobby_name,
            join_code,
            ..
        } => {
            to_user_id == &recipient
                && lobby_name == &lobby
                && Some(join_code) == expected_code.as_ref()
        }
        _ => false,
    });
    assert!(found, "no invite for {} to {}", user, lobby);
}
