use std::sync::Arc;

use kubix_backend::domain::{GameStatus, Role};
use kubix_backend::errors::ErrorCode;
use kubix_backend::StateBuilder;

use crate::support::race_rules::RaceRules;
use crate::support::state_helpers::{active_game, race_state};

#[tokio::test]
async fn join_on_a_full_game_leaves_it_unchanged() {
    let state = race_state().await;
    let before = active_game(&state, "g1").await;

    let err = state
        .coordinator
        .join_game("carol", "g1", "")
        .await
        .expect_err("no free seat");
    assert_eq!(err.code(), ErrorCode::GameFull);

    let after = state.coordinator.game_view("alice", "g1").await.expect("view");
    assert_eq!(after, before);
}

#[tokio::test]
async fn wrong_game_password_is_checked_before_capacity() {
    let state = race_state().await;
    state
        .coordinator
        .create_game("alice", Some("g1"), "secret")
        .await
        .expect("create");
    state
        .coordinator
        .join_game("bob", "g1", "secret")
        .await
        .expect("join");

    let err = state
        .coordinator
        .join_game("carol", "g1", "guess")
        .await
        .expect_err("wrong password");
    assert_eq!(err.code(), ErrorCode::WrongGamePassword);
}

#[tokio::test]
async fn giving_up_from_seat_zero_makes_seat_one_the_winner() {
    let state = race_state().await;
    active_game(&state, "g1").await;

    let session = state.coordinator.give_up("alice", "g1").await.expect("give up");
    assert_eq!(session.state.status, GameStatus::Finished);
    assert_eq!(session.state.winner, Some(1));
    assert_eq!(session.log.len(), 1);

    let err = state
        .coordinator
        .undo("bob", "g1")
        .await
        .expect_err("finished games are frozen");
    assert_eq!(err.code(), ErrorCode::NotActive);
}

#[tokio::test]
async fn give_up_before_the_game_starts_is_refused() {
    let state = race_state().await;
    state
        .coordinator
        .create_game("alice", Some("g1"), "")
        .await
        .expect("create");

    let err = state
        .coordinator
        .give_up("alice", "g1")
        .await
        .expect_err("still open");
    assert_eq!(err.code(), ErrorCode::NotActive);
}

#[tokio::test]
async fn reaching_the_target_finishes_the_game() {
    let state = race_state().await;
    active_game(&state, "g1").await;
    let coordinator = &state.coordinator;

    // 3 + 3 + 3 + 1 lands exactly on 10 for bob
    for (client, step) in [("alice", "3"), ("bob", "3"), ("alice", "3")] {
        coordinator.submit_move(client, "g1", step).await.expect("move");
    }
    let session = coordinator.submit_move("bob", "g1", "1").await.expect("winning move");
    assert_eq!(session.state.status, GameStatus::Finished);
    assert_eq!(session.state.winner, Some(1));
    assert_eq!(session.state.board, "10");
}

#[tokio::test]
async fn three_seat_game_rotates_turns_and_has_no_forfeit_winner() {
    let state = StateBuilder::new()
        .with_rules(Arc::new(RaceRules { target: 50 }))
        .with_seats(3)
        .build()
        .await
        .expect("state builds");
    let coordinator = &state.coordinator;
    coordinator
        .create_game("alice", Some("trio"), "")
        .await
        .expect("create");
    coordinator.join_game("bob", "trio", "").await.expect("join");
    let session = coordinator.join_game("carol", "trio", "").await.expect("join");
    assert_eq!(session.state.status, GameStatus::Active);
    assert_eq!(session.state.players[0].role, Role::Creator);
    assert_eq!(session.state.players[2].role, Role::Joiner);

    let mut turns = Vec::new();
    for client in ["alice", "bob", "carol", "alice"] {
        let s = coordinator.submit_move(client, "trio", "1").await.expect("move");
        turns.push(s.state.turn);
    }
    assert_eq!(turns, vec![1, 2, 0, 1]);

    let session = coordinator.give_up("bob", "trio").await.expect("give up");
    assert_eq!(session.state.status, GameStatus::Finished);
    assert_eq!(session.state.winner, None);
}

#[tokio::test]
async fn seat_count_is_clamped() {
    let state = StateBuilder::new().with_seats(1).build().await.expect("state");
    assert_eq!(state.coordinator.seats(), 2);
}

#[tokio::test]
async fn new_move_discards_the_redo_tail() {
    let state = race_state().await;
    active_game(&state, "g1").await;
    let coordinator = &state.coordinator;

    coordinator.submit_move("alice", "g1", "1").await.expect("move");
    coordinator.submit_move("bob", "g1", "1").await.expect("move");
    coordinator.undo("alice", "g1").await.expect("undo");
    let session = coordinator.submit_move("bob", "g1", "3").await.expect("move");
    assert_eq!(session.log.len(), 2);
    assert_eq!(session.state.board, "4");

    let err = coordinator.redo("alice", "g1").await.expect_err("tail gone");
    assert_eq!(err.code(), ErrorCode::NothingToRedo);
}

#[tokio::test]
async fn undo_on_fresh_game_has_nothing_to_undo() {
    let state = race_state().await;
    active_game(&state, "g1").await;

    let err = state.coordinator.undo("bob", "g1").await.expect_err("no history");
    assert_eq!(err.code(), ErrorCode::NothingToUndo);
}
