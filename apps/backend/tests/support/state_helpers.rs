//! Builders for states and coordinators used across suites.

use std::sync::Arc;

use kubix_backend::adapters::InMemoryClientDirectory;
use kubix_backend::domain::{GameRules, GameSession};
use kubix_backend::repos::{ClientDirectory, GameStore};
use kubix_backend::state::app_state::AppState;
use kubix_backend::StateBuilder;

use super::race_rules::RaceRules;

/// In-memory state playing [`RaceRules`].
pub async fn race_state() -> AppState {
    StateBuilder::new()
        .in_memory()
        .with_rules(Arc::new(RaceRules::default()))
        .build()
        .await
        .expect("in-memory state builds")
}

/// State over a caller-supplied game store.
pub async fn state_with_store(games: Arc<dyn GameStore>, rules: Arc<dyn GameRules>) -> AppState {
    let clients: Arc<dyn ClientDirectory> = Arc::new(InMemoryClientDirectory::new());
    StateBuilder::new()
        .with_storage(games, clients)
        .with_rules(rules)
        .build()
        .await
        .expect("custom state builds")
}

/// Active two-seat game `game_id` between `alice` (seat 0) and `bob` (seat 1).
pub async fn active_game(state: &AppState, game_id: &str) -> GameSession {
    let coordinator = &state.coordinator;
    coordinator
        .create_game("alice", Some(game_id), "")
        .await
        .expect("create game");
    coordinator
        .join_game("bob", game_id, "")
        .await
        .expect("join game")
}
