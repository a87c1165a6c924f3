//! Integration tests for the in-memory room store.

use std::sync::Arc;

use nameit_protocol::{
    AnswerSheet, Category, GamePhase, Patch, PlayerName, Room, RoomCode,
};
use nameit_rules::lifecycle;
use nameit_store::{MemoryStore, RoomStore, StoreError};

fn new_room(code: &str, host: &str) -> Room {
    lifecycle::create(RoomCode::from(code), host).expect("valid test room")
}

fn sheet(category: Category, answer: &str) -> AnswerSheet {
    let mut s = AnswerSheet::new();
    s.set(category, answer);
    s
}

#[tokio::test]
async fn test_create_then_get_returns_same_room() {
    let store = MemoryStore::new();
    let room = new_room("ABC123", "Ana");

    store.create(room.clone()).await.unwrap();
    let fetched = store.get(&room.code).await.unwrap();

    assert_eq!(fetched, room);
}

#[tokio::test]
async fn test_create_duplicate_code_fails() {
    let store = MemoryStore::new();
    store.create(new_room("ABC123", "Ana")).await.unwrap();

    let result = store.create(new_room("ABC123", "Ben")).await;
    assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_get_unknown_room_not_found() {
    let store = MemoryStore::new();
    let result = store.get(&RoomCode::from("ZZZZZZ")).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_atomic_update_applies_patches_in_order() {
    let store = MemoryStore::new();
    let room = new_room("ABC123", "Ana");
    let code = room.code.clone();
    store.create(room).await.unwrap();

    let updated = store
        .atomic_update(
            &code,
            None,
            vec![
                Patch::AddPlayer(PlayerName::from("Ben")),
                Patch::InitScore(PlayerName::from("Ben")),
                Patch::AddScore(PlayerName::from("Ben"), 5),
            ],
        )
        .await
        .unwrap();

    assert_eq!(updated.player_count(), 2);
    assert_eq!(updated.scores[&PlayerName::from("Ben")], 5);
}

#[tokio::test]
async fn test_atomic_update_unknown_room_not_found() {
    let store = MemoryStore::new();
    let result = store
        .atomic_update(&RoomCode::from("ZZZZZZ"), None, vec![Patch::ClearVotes])
        .await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_phase_guard_rejects_stale_transition() {
    let store = MemoryStore::new();
    let room = new_room("ABC123", "Ana");
    let code = room.code.clone();
    store.create(room).await.unwrap();

    // First transition commits; the second one raced and must fail.
    store
        .atomic_update(
            &code,
            Some(GamePhase::Waiting),
            vec![Patch::Phase(GamePhase::Playing)],
        )
        .await
        .unwrap();

    let stale = store
        .atomic_update(
            &code,
            Some(GamePhase::Waiting),
            vec![Patch::Phase(GamePhase::Playing)],
        )
        .await;

    assert!(matches!(
        stale,
        Err(StoreError::PhaseConflict {
            expected: GamePhase::Waiting,
            actual: GamePhase::Playing,
        })
    ));

    // The failed guard changed nothing.
    let fetched = store.get(&code).await.unwrap();
    assert_eq!(fetched.phase, GamePhase::Playing);
}

#[tokio::test]
async fn test_concurrent_player_writes_never_clobber() {
    // Two players submit at the same moment. Each write touches only
    // its own sub-key, so both must survive.
    let store = Arc::new(MemoryStore::new());
    let room = new_room("ABC123", "Ana");
    let code = room.code.clone();
    store.create(room).await.unwrap();
    store
        .atomic_update(&code, None, vec![Patch::Phase(GamePhase::Playing)])
        .await
        .unwrap();

    let mut handles = Vec::new();
    for (name, answer) in [("Ana", "Mary"), ("Ben", "Max")] {
        let store = Arc::clone(&store);
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            store
                .atomic_update(
                    &code,
                    Some(GamePhase::Playing),
                    vec![Patch::Answers(
                        PlayerName::from(name),
                        sheet(Category::Person, answer),
                    )],
                )
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let fetched = store.get(&code).await.unwrap();
    assert_eq!(fetched.answers.len(), 2);
    assert_eq!(
        fetched.answers[&PlayerName::from("Ana")].get(Category::Person),
        Some("Mary")
    );
    assert_eq!(
        fetched.answers[&PlayerName::from("Ben")].get(Category::Person),
        Some("Max")
    );
}

#[tokio::test]
async fn test_subscribe_delivers_current_snapshot_then_changes() {
    let store = MemoryStore::new();
    let room = new_room("ABC123", "Ana");
    let code = room.code.clone();
    store.create(room).await.unwrap();

    let mut watcher = store.subscribe(&code).await.unwrap();
    assert_eq!(watcher.current().player_count(), 1);

    store
        .atomic_update(
            &code,
            None,
            vec![
                Patch::AddPlayer(PlayerName::from("Ben")),
                Patch::InitScore(PlayerName::from("Ben")),
            ],
        )
        .await
        .unwrap();

    let next = watcher.changed().await.unwrap();
    assert_eq!(next.player_count(), 2);
}

#[tokio::test]
async fn test_subscribe_unknown_room_not_found() {
    let store = MemoryStore::new();
    let result = store.subscribe(&RoomCode::from("ZZZZZZ")).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}
