//! Racing requests against one game and across games.

use std::sync::Arc;
use std::time::Duration;

use kubix_backend::domain::GameRules;
use kubix_backend::errors::ErrorCode;
use kubix_backend::repos::GameStore;

use crate::support::race_rules::RaceRules;
use crate::support::slow_store::SlowStore;
use crate::support::state_helpers::{active_game, race_state, state_with_store};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_moves_by_one_player_apply_once() {
    let state = race_state().await;
    active_game(&state, "g1").await;

    let a = state.coordinator.clone();
    let b = state.coordinator.clone();
    let (first, second) = tokio::join!(
        tokio::spawn(async move { a.submit_move("alice", "g1", "1").await }),
        tokio::spawn(async move { b.submit_move("alice", "g1", "2").await }),
    );
    let results = [first.expect("task"), second.expect("task")];

    let ok = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1, "exactly one move wins");
    let err = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one move loses");
    assert_eq!(err.code(), ErrorCode::NotYourTurn);

    let session = state.coordinator.game_view("alice", "g1").await.expect("view");
    assert_eq!(session.log.len(), 1);
    assert_eq!(session.state.turn, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn alternating_players_under_contention_keep_turn_order() {
    let state = race_state().await;
    active_game(&state, "g1").await;

    // each player hammers the game; only moves made on their own turn land
    let mut handles = Vec::new();
    for _ in 0..20 {
        for client in ["alice", "bob"] {
            let coordinator = state.coordinator.clone();
            handles.push(tokio::spawn(async move {
                coordinator.submit_move(client, "g1", "1").await
            }));
        }
    }
    for handle in handles {
        let _ = handle.await.expect("task");
    }

    let session = state.coordinator.game_view("alice", "g1").await.expect("view");
    for (idx, mv) in session.log.active().iter().enumerate() {
        assert_eq!(mv.seq as usize, idx + 1);
        assert_eq!(mv.seat as usize, idx % 2, "seats alternate");
    }
    assert!(session.check_invariants().is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_joiners_race_for_the_last_seat() {
    let state = race_state().await;
    state
        .coordinator
        .create_game("alice", Some("g1"), "")
        .await
        .expect("create");

    let a = state.coordinator.clone();
    let b = state.coordinator.clone();
    let (bob, carol) = tokio::join!(
        tokio::spawn(async move { a.join_game("bob", "g1", "").await }),
        tokio::spawn(async move { b.join_game("carol", "g1", "").await }),
    );
    let results = [bob.expect("task"), carol.expect("task")];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one join loses");
    assert_eq!(loser.code(), ErrorCode::GameFull);

    let session = state.coordinator.game_view("alice", "g1").await.expect("view");
    assert_eq!(session.state.players.len(), 2);
}

#[tokio::test]
async fn waiting_past_the_timeout_is_busy_and_changes_nothing() {
    let rules: Arc<dyn GameRules> = Arc::new(RaceRules::default());
    let store = Arc::new(SlowStore::new(Duration::from_millis(300)));
    let games: Arc<dyn GameStore> = store.clone();
    let state = state_with_store(games, rules).await;
    let coordinator = state
        .coordinator
        .clone()
        .with_lock_timeout(Duration::from_millis(30));

    let slow = coordinator.clone();
    let creating = tokio::spawn(async move { slow.create_game("alice", Some("g1"), "").await });
    tokio::time::sleep(Duration::from_millis(80)).await;

    let err = coordinator
        .join_game("bob", "g1", "")
        .await
        .expect_err("section is held");
    assert_eq!(err.code(), ErrorCode::ServerBusy);

    creating.await.expect("task").expect("create");
    let session = store.load("g1").await.expect("stored");
    assert_eq!(session.state.players.len(), 1);
}

#[tokio::test]
async fn different_games_do_not_wait_on_each_other() {
    let rules: Arc<dyn GameRules> = Arc::new(RaceRules::default());
    let games: Arc<dyn GameStore> = Arc::new(SlowStore::new(Duration::from_millis(300)));
    let state = state_with_store(games, rules).await;
    let coordinator = state
        .coordinator
        .clone()
        .with_lock_timeout(Duration::from_millis(30));

    let slow = coordinator.clone();
    let first = tokio::spawn(async move { slow.create_game("alice", Some("g1"), "").await });
    tokio::time::sleep(Duration::from_millis(80)).await;

    // g2 has its own section, so the short timeout never fires
    let second = coordinator.create_game("bob", Some("g2"), "").await;
    assert!(second.is_ok());
    assert!(first.await.expect("task").is_ok());
}

#[tokio::test]
async fn dropped_caller_still_completes_the_mutation() {
    let rules: Arc<dyn GameRules> = Arc::new(RaceRules::default());
    let store = Arc::new(SlowStore::new(Duration::from_millis(150)));
    let games: Arc<dyn GameStore> = store.clone();
    let state = state_with_store(games, rules).await;

    let abandoned = tokio::time::timeout(
        Duration::from_millis(20),
        state.coordinator.create_game("alice", Some("g1"), ""),
    )
    .await;
    assert!(abandoned.is_err(), "caller gave up before the save finished");

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(store.exists("g1").await.expect("exists"));
}
