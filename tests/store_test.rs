//! Event store tests against the in-memory backend: loading, refresh
//! semantics, optimistic task toggles and timeline reorders.

mod common;

use chrono::{NaiveDate, TimeZone, Utc};

use common::*;
use jourj::planning::PlanningOwner;
use jourj::store::{EventStore, RefreshTrigger, StoreError, StoreRegistry};

fn wedding_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 20).unwrap()
}

fn seeded() -> MemoryBackend {
    MemoryBackend::new(MemoryData {
        event: Some(event(wedding_day())),
        tasks: vec![task(1, "high", "scheduled"), task(2, "low", "completed")],
        timeline: vec![
            timeline_item(10, "09:00", 60, 0),
            timeline_item(11, "10:00", 30, 1),
            timeline_item(12, "10:30", 90, 2),
        ],
        documents: vec![
            document(20, "contract.pdf", Some("Contrats"), "manual", Some(1024)),
            document(21, "playlist", Some("Musique"), "google_drive", None),
        ],
        people: vec![person(30, "Claire", "bride")],
        vendors: vec![vendor(40, "Traiteur Dupont")],
    })
}

async fn loaded(backend: &MemoryBackend) -> EventStore {
    let store = EventStore::new(EVENT_ID, 1);
    let report = store.ensure_loaded(backend).await;
    assert!(report.is_clean(), "initial load failed: {report:?}");
    store
}

#[tokio::test]
async fn test_load_exposes_all_collections() {
    let backend = seeded();
    let store = loaded(&backend).await;

    assert!(store.is_loaded());
    let snapshot = store.snapshot();
    assert_eq!(snapshot.event.map(|e| e.id), Some(EVENT_ID));
    assert_eq!(snapshot.tasks.len(), 2);
    assert_eq!(snapshot.timeline.len(), 3);
    assert_eq!(snapshot.documents.len(), 2);
    assert_eq!(snapshot.people.len(), 1);
    assert_eq!(snapshot.vendors.len(), 1);
}

#[tokio::test]
async fn test_progress_stats_count_open_high_priority_as_critical() {
    let backend = seeded();
    let store = loaded(&backend).await;

    let stats = store.progress_stats();
    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.completed_tasks, 1);
    assert_eq!(stats.progress_percentage, 50);
    assert_eq!(stats.critical_tasks, 1);
}

#[tokio::test]
async fn test_document_stats_and_countdown() {
    let backend = seeded();
    let store = loaded(&backend).await;

    let stats = store.document_stats();
    assert_eq!(stats.total_documents, 2);
    assert_eq!(stats.total_size, 1024);
    assert_eq!(stats.categories_count, 2);
    assert_eq!(stats.google_drive_count, 1);
    assert_eq!(stats.manual_count, 1);

    let now = Utc.with_ymd_and_hms(2026, 6, 10, 15, 0, 0).unwrap();
    assert_eq!(store.days_until(now), 10);
    let after = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
    assert_eq!(store.days_until(after), 0);
}

#[tokio::test]
async fn test_timeline_is_kept_in_running_order() {
    let backend = seeded();
    backend.edit(|d| d.timeline.reverse());
    let store = loaded(&backend).await;

    let ids: Vec<i64> = store.timeline().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
}

#[tokio::test]
async fn test_failed_collection_keeps_previous_rows() {
    let backend = seeded();
    let store = loaded(&backend).await;

    backend.edit(|d| d.tasks.clear());
    backend.set_fail_reads(true);
    let report = store.refresh(&backend, RefreshTrigger::Explicit).await;

    assert!(!report.is_clean());
    assert!(report.failed.contains(&"tasks"));
    assert_eq!(store.tasks().len(), 2);
}

#[tokio::test]
async fn test_explicit_refresh_picks_up_remote_changes() {
    let backend = seeded();
    let store = loaded(&backend).await;

    backend.edit(|d| d.tasks.push(task(3, "medium", "pending")));
    let report = store.refresh(&backend, RefreshTrigger::Explicit).await;

    assert!(report.updated.contains(&"tasks"));
    assert_eq!(store.tasks().len(), 3);
}

#[tokio::test]
async fn test_toggle_task_commits_backend_row() {
    let backend = seeded();
    let store = loaded(&backend).await;

    let task = store.toggle_task(&backend, 1).await.expect("toggle");
    assert!(task.is_completed());
    assert_eq!(store.progress_stats().completed_tasks, 2);
    assert_eq!(store.progress_stats().critical_tasks, 0);

    let task = store.toggle_task(&backend, 2).await.expect("toggle back");
    assert_eq!(task.status, "pending");
}

#[tokio::test]
async fn test_failed_toggle_leaves_committed_state() {
    let backend = seeded();
    let store = loaded(&backend).await;
    backend.set_fail_writes(true);

    let err = store.toggle_task(&backend, 1).await.unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));

    let tasks = store.tasks();
    let task = tasks.iter().find(|t| t.id == 1).unwrap();
    assert_eq!(task.status, "scheduled");
    assert_eq!(store.progress_stats().progress_percentage, 50);
}

#[tokio::test]
async fn test_toggle_unknown_task_is_rejected() {
    let backend = seeded();
    let store = loaded(&backend).await;

    let err = store.toggle_task(&backend, 99).await.unwrap_err();
    assert!(matches!(err, StoreError::UnknownTask(99)));
}

#[tokio::test]
async fn test_pending_toggle_suppresses_scheduled_refresh() {
    let backend = seeded();
    let store = loaded(&backend).await;

    let gate = backend.write_gate.lock().await;
    let toggle = store.toggle_task(&backend, 1);
    let check = async {
        // The toggle is parked on the gate: its optimistic row is visible.
        tokio::task::yield_now().await;
        let tasks = store.tasks();
        assert!(tasks.iter().find(|t| t.id == 1).unwrap().is_completed());

        let report = store.refresh(&backend, RefreshTrigger::Scheduled).await;
        assert!(report.skipped.contains(&"tasks"));
        assert!(report.updated.contains(&"timeline"));
        assert!(store.tasks().iter().find(|t| t.id == 1).unwrap().is_completed());
        drop(gate);
    };

    let (result, ()) = tokio::join!(toggle, check);
    assert!(result.expect("toggle").is_completed());
    assert!(store.tasks().iter().find(|t| t.id == 1).unwrap().is_completed());
}

#[tokio::test]
async fn test_explicit_refresh_keeps_toggle_confirmed_during_fetch() {
    let backend = seeded();
    let store = loaded(&backend).await;

    let gate = backend.read_gate.lock().await;
    let refresh = store.refresh(&backend, RefreshTrigger::Explicit);
    let toggle = async {
        tokio::task::yield_now().await;
        let task = store.toggle_task(&backend, 1).await.expect("toggle");
        drop(gate);
        task
    };

    let (report, task) = tokio::join!(refresh, toggle);
    assert!(task.is_completed());
    assert!(report.skipped.contains(&"tasks"));
    assert!(report.updated.contains(&"timeline"));
    assert!(store.tasks().iter().find(|t| t.id == 1).unwrap().is_completed());
}

#[tokio::test]
async fn test_closed_store_discards_refresh_and_rejects_mutations() {
    let backend = seeded();
    let store = loaded(&backend).await;
    store.close();

    backend.edit(|d| d.tasks.clear());
    let report = store.refresh(&backend, RefreshTrigger::Explicit).await;
    assert!(report.discarded);
    assert_eq!(store.tasks().len(), 2);

    assert!(matches!(store.toggle_task(&backend, 1).await, Err(StoreError::Closed)));
    assert!(matches!(store.reorder_timeline(&backend, 0, 1).await, Err(StoreError::Closed)));
}

#[tokio::test]
async fn test_store_closed_mid_refresh_discards_fetched_rows() {
    let backend = seeded();
    let store = loaded(&backend).await;
    backend.edit(|d| d.tasks.clear());

    let gate = backend.read_gate.lock().await;
    let refresh = store.refresh(&backend, RefreshTrigger::Explicit);
    let close = async {
        // The refresh has passed its open check and waits on the gate.
        tokio::task::yield_now().await;
        store.close();
        drop(gate);
    };

    let (report, ()) = tokio::join!(refresh, close);
    assert!(report.discarded);
    assert!(report.updated.is_empty());
    assert_eq!(store.tasks().len(), 2);
}

#[tokio::test]
async fn test_reorder_persists_retimed_day() {
    let backend = seeded();
    let store = loaded(&backend).await;

    // Move the 90 minute item first: 09:00-10:30, then 10:30, then 11:30.
    let commit = store.reorder_timeline(&backend, 2, 0).await.expect("reorder");
    let order: Vec<(i64, &str)> = commit.order.iter().map(|i| (i.id, i.time.as_str())).collect();
    assert_eq!(order, vec![(12, "09:00"), (10, "10:30"), (11, "11:30")]);
    assert_eq!(commit.changes.len(), 3);

    let stored = backend.data.lock().unwrap().timeline.clone();
    let item = stored.iter().find(|i| i.id == 12).unwrap();
    assert_eq!((item.time.as_str(), item.position), ("09:00", 0));

    let ids: Vec<i64> = store.timeline().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![12, 10, 11]);
}

#[tokio::test]
async fn test_failed_reorder_keeps_committed_order() {
    let backend = seeded();
    let store = loaded(&backend).await;
    backend.set_fail_writes(true);

    assert!(store.reorder_timeline(&backend, 0, 2).await.is_err());

    let order: Vec<(i64, String)> = store.timeline().into_iter().map(|i| (i.id, i.time)).collect();
    assert_eq!(
        order,
        vec![(10, "09:00".to_string()), (11, "10:00".to_string()), (12, "10:30".to_string())]
    );
}

#[tokio::test]
async fn test_reorder_onto_same_slot_keeps_gaps() {
    let backend = seeded();
    backend.edit(|d| {
        d.timeline = vec![
            timeline_item(10, "09:00", 60, 0),
            timeline_item(11, "14:00", 30, 1),
            timeline_item(12, "19:00", 90, 2),
        ];
    });
    let store = loaded(&backend).await;
    backend.set_fail_writes(true);

    let slots = store.preview_reorder(1, 1).expect("preview");
    let starts: Vec<&str> = slots.iter().map(|s| s.start_time.as_str()).collect();
    assert_eq!(starts, vec!["09:00", "14:00", "19:00"]);

    let commit = store.reorder_timeline(&backend, 1, 1).await.expect("noop");
    assert!(commit.is_noop());
    let times: Vec<(i64, String)> = store.timeline().into_iter().map(|i| (i.id, i.time)).collect();
    assert_eq!(
        times,
        vec![(10, "09:00".to_string()), (11, "14:00".to_string()), (12, "19:00".to_string())]
    );
    let stored = backend.data.lock().unwrap().timeline.clone();
    assert_eq!(stored[1].time, "14:00");
}

#[tokio::test]
async fn test_reorder_out_of_range_is_rejected() {
    let backend = seeded();
    let store = loaded(&backend).await;

    let err = store.reorder_timeline(&backend, 0, 7).await.unwrap_err();
    assert!(matches!(err, StoreError::Reorder(_)));
    assert!(store.preview_reorder(5, 0).is_err());
}

#[tokio::test]
async fn test_preview_does_not_change_the_store() {
    let backend = seeded();
    let store = loaded(&backend).await;

    let slots = store.preview_reorder(0, 2).expect("preview");
    let times: Vec<(i64, &str, &str)> =
        slots.iter().map(|s| (s.id, s.start_time.as_str(), s.end_time.as_str())).collect();
    assert_eq!(times, vec![(11, "09:00", "09:30"), (12, "09:30", "11:00"), (10, "11:00", "12:00")]);
    assert_eq!(store.timeline()[0].id, 10);
}

#[tokio::test]
async fn test_personal_planning_from_store() {
    let backend = seeded();
    backend.edit(|d| {
        d.timeline[1].assigned_person_ids = vec![30];
        d.tasks[0].assigned_person_id = Some(30);
    });
    let store = loaded(&backend).await;

    let planning = store.personal_planning(&PlanningOwner::Person(30));
    assert_eq!(planning.total(), 2);
    assert!(planning.items[0].is_timeline());
}

#[tokio::test]
async fn test_registry_shares_and_closes_stores() {
    let registry = StoreRegistry::new();
    let a = registry.open(EVENT_ID);
    let b = registry.open(EVENT_ID);
    assert!(std::sync::Arc::ptr_eq(&a, &b));

    assert!(!registry.release(EVENT_ID));
    assert!(!a.is_closed());
    assert!(registry.release(EVENT_ID));
    assert!(a.is_closed());
    assert!(registry.get(EVENT_ID).is_none());

    let c = registry.get_or_open(EVENT_ID);
    assert!(c.generation() > a.generation());
}
