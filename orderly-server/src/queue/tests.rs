use std::sync::Arc;

use shared::error::ErrorCode;
use shared::models::{EntryStatus, JoinRequest, LocationCreate};

use super::QueueManager;
use crate::store::FileStore;

fn create_test_manager() -> (QueueManager, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("queue_data.json")));
    (QueueManager::new(store, None), dir)
}

async fn create_location(manager: &QueueManager, name: &str) -> String {
    manager
        .create_location(LocationCreate {
            name: name.to_string(),
            description: String::new(),
            capacity: 10,
        })
        .await
        .unwrap()
        .id
}

async fn join(manager: &QueueManager, location_id: &str, name: &str) -> shared::models::QueueEntry {
    manager
        .join(JoinRequest {
            location_id: location_id.to_string(),
            display_name: name.to_string(),
            contact: String::new(),
            notes: String::new(),
            attachment: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_join_positions_are_sequential() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;

    for expected in 1..=5u32 {
        let entry = join(&manager, &location_id, &format!("Visitor {expected}")).await;
        assert_eq!(entry.position, expected);
        assert_eq!(entry.status, EntryStatus::Waiting);
    }

    let waiting = manager.waiting_list(&location_id).await.unwrap();
    let positions: Vec<u32> = waiting.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_entry_id_carries_location_prefix() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;

    let entry = join(&manager, &location_id, "Alice").await;
    let (prefix, suffix) = entry.id.split_once('-').unwrap();
    assert_eq!(prefix, &location_id[..8]);
    assert_eq!(suffix.len(), 8);
}

#[tokio::test]
async fn test_join_requires_display_name() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;

    let err = manager
        .join(JoinRequest {
            location_id,
            display_name: "  ".to_string(),
            contact: String::new(),
            notes: String::new(),
            attachment: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn test_join_unknown_location() {
    let (manager, _dir) = create_test_manager();

    let err = manager
        .join(JoinRequest {
            location_id: "no-such-location".to_string(),
            display_name: "Alice".to_string(),
            contact: String::new(),
            notes: String::new(),
            attachment: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::LocationNotFound);
}

#[tokio::test]
async fn test_leave_renumbers_remaining_entries() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;

    let entries = [
        join(&manager, &location_id, "A").await,
        join(&manager, &location_id, "B").await,
        join(&manager, &location_id, "C").await,
        join(&manager, &location_id, "D").await,
    ];

    // B (position 2) leaves; C and D shift up, A stays at 1
    manager.leave(&location_id, &entries[1].id).await.unwrap();

    let waiting = manager.waiting_list(&location_id).await.unwrap();
    let names: Vec<&str> = waiting.iter().map(|e| e.display_name.as_str()).collect();
    let positions: Vec<u32> = waiting.iter().map(|e| e.position).collect();
    assert_eq!(names, vec!["A", "C", "D"]);
    assert_eq!(positions, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_leave_twice_is_rejected_and_stable() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;

    let alice = join(&manager, &location_id, "Alice").await;
    let _bob = join(&manager, &location_id, "Bob").await;

    manager.leave(&location_id, &alice.id).await.unwrap();

    let err = manager.leave(&location_id, &alice.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::EntryNotWaiting);

    // Second call must not renumber anything
    let waiting = manager.waiting_list(&location_id).await.unwrap();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].display_name, "Bob");
    assert_eq!(waiting[0].position, 1);
}

#[tokio::test]
async fn test_leave_unknown_entry() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;

    let err = manager.leave(&location_id, "xxxxxxxx-yyyyyyyy").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::EntryNotFound);
}

#[tokio::test]
async fn test_serve_next_follows_position_order() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;

    join(&manager, &location_id, "A").await;
    join(&manager, &location_id, "B").await;
    join(&manager, &location_id, "C").await;

    let first = manager.serve_next(&location_id).await.unwrap().unwrap();
    assert_eq!(first.display_name, "A");
    assert_eq!(first.status, EntryStatus::Served);
    assert!(first.served_at.is_some());

    let second = manager.serve_next(&location_id).await.unwrap().unwrap();
    assert_eq!(second.display_name, "B");

    let stats = manager.stats(&location_id).await.unwrap();
    assert_eq!(stats.waiting_count, 1);
    assert_eq!(stats.served_count, 2);
    assert_eq!(stats.served_total, 2);
}

#[tokio::test]
async fn test_serve_next_on_empty_queue() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;

    assert!(manager.serve_next(&location_id).await.unwrap().is_none());

    // Nothing was mutated
    let stats = manager.stats(&location_id).await.unwrap();
    assert_eq!(stats.served_total, 0);
    assert_eq!(stats.waiting_count, 0);
}

#[tokio::test]
async fn test_position_reports_only_waiting_entries() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;

    let alice = join(&manager, &location_id, "Alice").await;
    let bob = join(&manager, &location_id, "Bob").await;

    let info = manager.position(&location_id, &bob.id).await.unwrap();
    assert_eq!(info.position, 2);
    assert_eq!(info.total_waiting, 2);
    assert_eq!(info.estimated_wait, 10);

    // Served entries no longer have a position
    manager.serve_next(&location_id).await.unwrap();
    let err = manager.position(&location_id, &alice.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::EntryNotFound);

    // Neither do entries that left
    manager.leave(&location_id, &bob.id).await.unwrap();
    let err = manager.position(&location_id, &bob.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::EntryNotFound);
}

#[tokio::test]
async fn test_resolve_location_from_entry_id() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;
    let entry = join(&manager, &location_id, "Alice").await;

    let resolved = manager.resolve_location(&entry.id).await.unwrap();
    assert_eq!(resolved, location_id);

    let err = manager.resolve_location("deadbeef-12345678").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::LocationNotFound);

    let err = manager.resolve_location("noseparator").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn test_delete_location_cascades() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Cafe").await;
    join(&manager, &location_id, "Alice").await;

    manager.delete_location(&location_id).await.unwrap();

    let err = manager.get_location(&location_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::LocationNotFound);
    assert!(manager.list_locations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let (manager, _dir) = create_test_manager();
    let location_id = create_location(&manager, "Front Desk").await;

    let alice = join(&manager, &location_id, "Alice").await;
    assert_eq!(alice.position, 1);

    let bob = join(&manager, &location_id, "Bob").await;
    assert_eq!(bob.position, 2);

    manager.leave(&location_id, &alice.id).await.unwrap();

    let info = manager.position(&location_id, &bob.id).await.unwrap();
    assert_eq!(info.position, 1);

    let served = manager.serve_next(&location_id).await.unwrap().unwrap();
    assert_eq!(served.id, bob.id);
    assert_eq!(served.status, EntryStatus::Served);

    let stats = manager.stats(&location_id).await.unwrap();
    assert_eq!(stats.served_total, 1);
    assert_eq!(stats.waiting_count, 0);
}
