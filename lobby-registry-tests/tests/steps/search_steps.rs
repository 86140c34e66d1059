use cucumber::{then, when};
use lobby_registry_core::application::{SearchFilter, SearchRequest};
use lobby_registry_tests::LobbyWorld;

fn search(world: &mut LobbyWorld, filter: SearchFilter) {
    world.last_search = Some(world.engine.search_lobbies(SearchRequest { filter }));
    world.last_error = None;
}

// ===== When Steps =====

#[when(expr = "{word} searches for lobbies")]
async fn searches(world: &mut LobbyWorld, _user: String) {
    search(world, SearchFilter::default());
}

#[when(expr = "{word} searches for lobbies with game mode {string}")]
async fn searches_by_mode(world: &mut LobbyWorld, _user: String, mode: String) {
    search(world, SearchFilter::default().with_game_mode(mode));
}

#[when(expr = "{word} searches for lobbies with at least {int} players")]
async fn searches_by_min(world: &mut LobbyWorld, _user: String, min: u32) {
    search(world, SearchFilter::default().with_min_players(min));
}

#[when(expr = "{word} searches for lobbies with at most {int} players")]
async fn searches_by_max(world: &mut LobbyWorld, _user: String, max: u32) {
    search(world, SearchFilter::default().with_max_players(max));
}

// ===== Then Steps =====

#[then(expr = "the search finds {string}")]
async fn search_finds(world: &mut LobbyWorld, names: String) {
    let results = world.last_search.as_ref().expect("No search executed");
    let actual: Vec<_> = results.lobbies.iter().map(|l| l.name.as_str()).collect();
    let expected: Vec<_> = names.split(',').map(str::trim).collect();
    assert_eq!(actual, expected);
}

#[then("the search finds nothing")]
async fn search_finds_nothing(world: &mut LobbyWorld) {
    let results = world.last_search.as_ref().expect("No search executed");
    assert!(
        results.lobbies.is_empty(),
        "unexpected results: {:?}",
        results.lobbies
    );
}
