use std::sync::Arc;

use kubix_backend::adapters::FileGameStore;
use kubix_backend::domain::{GameStatus, GameSession};
use kubix_backend::errors::ErrorCode;
use kubix_backend::repos::GameStore;
use kubix_backend::state::app_state::AppState;
use kubix_backend::StateBuilder;

use crate::support::race_rules::RaceRules;

async fn file_state(dir: &std::path::Path) -> AppState {
    StateBuilder::new()
        .with_data_dir(dir)
        .with_rules(Arc::new(RaceRules::default()))
        .build()
        .await
        .expect("file state builds")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_games_persist_independently() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = file_state(dir.path()).await;

    let mut handles = Vec::new();
    for n in 0..8 {
        let coordinator = state.coordinator.clone();
        handles.push(tokio::spawn(async move {
            let game_id = format!("game_{n}");
            let joiner = format!("p{n}");
            coordinator.create_game("host", Some(&game_id), "").await?;
            coordinator.join_game(&joiner, &game_id, "").await?;
            coordinator.submit_move("host", &game_id, "2").await
        }));
    }
    for handle in handles {
        let session = handle.await.expect("task").expect("game flow");
        assert_eq!(session.state.board, "2");
    }

    let ids = state.coordinator.store().list_ids().await.expect("list");
    assert_eq!(ids.len(), 8);
    assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids come back sorted");
}

#[tokio::test]
async fn games_survive_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let saved = {
        let state = file_state(dir.path()).await;
        state
            .coordinator
            .create_game("alice", Some("g1"), "pw")
            .await
            .expect("create");
        state
            .coordinator
            .join_game("bob", "g1", "pw")
            .await
            .expect("join");
        state
            .coordinator
            .submit_move("alice", "g1", "3")
            .await
            .expect("move")
    };

    let state = file_state(dir.path()).await;
    let loaded = state.coordinator.game_view("bob", "g1").await.expect("view");
    assert_eq!(loaded, saved);
    assert_eq!(loaded.state.status, GameStatus::Active);
    assert!(loaded.state.password.is_some());
}

#[tokio::test]
async fn second_server_on_the_same_directory_is_refused() {
    let dir = tempfile::tempdir().expect("tempdir");
    let _first = file_state(dir.path()).await;

    let err = StateBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .await
        .expect_err("directory is locked");
    assert_eq!(err.code(), ErrorCode::StorageError);
}

#[tokio::test]
async fn truncated_record_is_corruption() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = file_state(dir.path()).await;
    state
        .coordinator
        .create_game("alice", Some("g1"), "")
        .await
        .expect("create");

    let path = dir.path().join("games").join("g1.json");
    std::fs::write(&path, b"{\"format\":1,\"sess").expect("truncate");

    let err = state
        .coordinator
        .join_game("bob", "g1", "")
        .await
        .expect_err("unreadable");
    assert_eq!(err.code(), ErrorCode::DataCorruption);
    assert!(state.coordinator.quarantine().contains("g1"));
}

#[tokio::test]
async fn record_under_the_wrong_name_is_corruption() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileGameStore::open(dir.path()).expect("open");
    let session = GameSession::create("g1", "alice", None, 2, &RaceRules::default());
    store.save(&session).await.expect("save");

    std::fs::copy(
        store.games_dir().join("g1.json"),
        store.games_dir().join("g2.json"),
    )
    .expect("copy");

    let err = store.load("g2").await.expect_err("id mismatch");
    assert!(err.is_corruption());
    assert_eq!(store.load("g1").await.expect("original"), session);
}

#[tokio::test]
async fn stray_files_are_not_listed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileGameStore::open(dir.path()).expect("open");
    let session = GameSession::create("g1", "alice", None, 2, &RaceRules::default());
    store.save(&session).await.expect("save");
    std::fs::write(store.games_dir().join("notes.txt"), b"hi").expect("write");
    std::fs::write(store.games_dir().join("bad name.json"), b"{}").expect("write");

    let ids = store.list_ids().await.expect("list");
    assert_eq!(ids, vec!["g1".to_string()]);
}
