mod access_steps;
mod lobby_steps;
mod search_steps;
