//! Corrupted records are refused until restart.

use std::sync::Arc;

use kubix_backend::adapters::InMemoryGameStore;
use kubix_backend::domain::{GameRules, GameSession, GameStatus};
use kubix_backend::errors::ErrorCode;
use kubix_backend::repos::GameStore;
use kubix_backend::state::app_state::AppState;

use crate::support::race_rules::RaceRules;
use crate::support::state_helpers::{active_game, state_with_store};

/// One seat taken yet marked Active: fails the stored-record checks.
fn damaged(game_id: &str) -> GameSession {
    let mut session = GameSession::create(game_id, "alice", None, 2, &RaceRules::default());
    session.state.status = GameStatus::Active;
    session
}

async fn state_over(store: Arc<InMemoryGameStore>) -> AppState {
    let games: Arc<dyn GameStore> = store;
    let rules: Arc<dyn GameRules> = Arc::new(RaceRules::default());
    state_with_store(games, rules).await
}

#[tokio::test]
async fn corrupt_game_is_quarantined_and_stays_refused() {
    let store = Arc::new(InMemoryGameStore::new());
    store.put_raw(damaged("bad"));
    let state = state_over(store.clone()).await;
    let coordinator = &state.coordinator;

    let err = coordinator
        .submit_move("alice", "bad", "1")
        .await
        .expect_err("corrupt record");
    assert_eq!(err.code(), ErrorCode::DataCorruption);
    assert!(coordinator.quarantine().contains("bad"));

    // a repaired record is still refused for the life of the process
    let repaired = GameSession::create("bad", "alice", None, 2, &RaceRules::default());
    store.put_raw(repaired);
    let err = coordinator
        .game_view("alice", "bad")
        .await
        .expect_err("quarantined");
    assert_eq!(err.code(), ErrorCode::DataCorruption);
}

#[tokio::test]
async fn quarantine_does_not_touch_other_games() {
    let store = Arc::new(InMemoryGameStore::new());
    store.put_raw(damaged("bad"));
    let state = state_over(store).await;
    active_game(&state, "good").await;

    let _ = state.coordinator.game_view("alice", "bad").await;
    assert!(state.coordinator.quarantine().contains("bad"));

    let session = state
        .coordinator
        .submit_move("alice", "good", "2")
        .await
        .expect("healthy game keeps working");
    assert_eq!(session.state.board, "2");
}

#[tokio::test]
async fn listing_skips_and_quarantines_corrupt_games() {
    let store = Arc::new(InMemoryGameStore::new());
    store.put_raw(damaged("bad"));
    let state = state_over(store).await;
    state
        .coordinator
        .create_game("alice", Some("open"), "")
        .await
        .expect("create");

    let games = state.coordinator.list_games("alice").await.expect("list");
    let ids: Vec<&str> = games.iter().map(|s| s.game_id()).collect();
    assert_eq!(ids, vec!["open"]);
    assert!(state.coordinator.quarantine().contains("bad"));
}

#[tokio::test]
async fn replay_divergence_is_corruption() {
    let store = Arc::new(InMemoryGameStore::new());
    let state = state_over(store.clone()).await;
    active_game(&state, "g1").await;
    state
        .coordinator
        .submit_move("alice", "g1", "2")
        .await
        .expect("move");
    state
        .coordinator
        .submit_move("bob", "g1", "3")
        .await
        .expect("move");

    // rewrite a recorded board so replaying the log disagrees with it
    let session = store.load("g1").await.expect("load");
    let mut raw = serde_json::to_value(&session).expect("encode");
    raw["log"]["moves"][0]["board_after"] = serde_json::json!("7");
    let tampered: GameSession = serde_json::from_value(raw).expect("decode");
    store.put_raw(tampered);

    let err = state
        .coordinator
        .undo("alice", "g1")
        .await
        .expect_err("replay mismatch");
    assert_eq!(err.code(), ErrorCode::DataCorruption);
    assert!(state.coordinator.quarantine().contains("g1"));
}
