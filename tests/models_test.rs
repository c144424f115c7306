//! Model layer tests against Postgres. Skipped unless TEST_DATABASE_URL is set.

mod common;

use jourj::db;
use jourj::handlers::saved;
use jourj::models::document::{self, DocumentForm};
use jourj::models::event::{self, EventForm};
use jourj::models::person::{self, PersonForm};
use jourj::models::task::{self, TaskForm};
use jourj::models::timeline::{self, TimelineItemForm};
use jourj::models::user;
use jourj::planning::ScheduleChange;
use jourj::store::{EventStore, PgBackend, RefreshTrigger};
use sqlx::PgPool;

use common::*;

async fn create_event(pool: &PgPool, name: &str) -> i64 {
    let input = EventForm { name: name.to_string(), event_date: "2026-06-20".to_string(), ..Default::default() }
        .validate()
        .expect("valid event");
    event::create(pool, &input).await.expect("create event")
}

async fn create_item(pool: &PgPool, event_id: i64, title: &str, time: &str, duration: &str) -> i64 {
    let input = TimelineItemForm {
        title: title.to_string(),
        time: Some(time.to_string()),
        duration: Some(duration.to_string()),
        ..TimelineItemForm::blank()
    }
    .validate()
    .expect("valid item");
    timeline::create(pool, event_id, &input).await.expect("create item")
}

#[tokio::test]
async fn test_seed_admin_runs_once() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();

    db::seed_admin(pool, ADMIN_PASS).await.unwrap();
    db::seed_admin(pool, "something-else").await.unwrap();
    assert_eq!(user::count(pool).await.unwrap(), 1);

    let admin = user::find_by_username(pool, ADMIN_USER).await.unwrap().expect("admin exists");
    assert!(jourj::auth::password::verify_password(ADMIN_PASS, &admin.password_hash).unwrap());

    db.teardown().await;
}

#[tokio::test]
async fn test_timeline_insert_takes_its_slot_by_start_time() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();
    let event_id = create_event(pool, "Slots").await;

    let ceremony = create_item(pool, event_id, "Ceremony", "15:00", "60").await;
    let hair = create_item(pool, event_id, "Hair", "09:00", "90").await;
    let lunch = create_item(pool, event_id, "Lunch", "12:00", "60").await;

    let items = timeline::find_for_event(pool, event_id).await.unwrap();
    let order: Vec<(i64, i32)> = items.iter().map(|i| (i.id, i.position)).collect();
    assert_eq!(order, vec![(hair, 0), (lunch, 1), (ceremony, 2)]);

    db.teardown().await;
}

#[tokio::test]
async fn test_apply_schedule_is_all_or_nothing() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();
    let event_id = create_event(pool, "Atomic").await;
    let first = create_item(pool, event_id, "First", "09:00", "30").await;

    let changes = vec![
        ScheduleChange { id: first, time: "10:00".to_string(), position: 1 },
        ScheduleChange { id: 999_999, time: "09:00".to_string(), position: 0 },
    ];
    assert!(timeline::apply_schedule(pool, event_id, &changes).await.is_err());

    let item = timeline::find_by_id(pool, event_id, first).await.unwrap().unwrap();
    assert_eq!(item.time, "09:00");
    assert_eq!(item.position, 0);

    db.teardown().await;
}

#[tokio::test]
async fn test_task_status_is_scoped_to_its_event() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();
    let ours = create_event(pool, "Ours").await;
    let theirs = create_event(pool, "Theirs").await;

    let input = TaskForm { title: "Book the DJ".to_string(), priority: Some("high".to_string()), ..Default::default() }
        .validate()
        .unwrap();
    let id = task::create(pool, ours, &input).await.unwrap();

    assert!(task::set_status(pool, theirs, id, "completed").await.unwrap().is_none());
    let stored = task::set_status(pool, ours, id, "completed").await.unwrap().unwrap();
    assert!(stored.is_completed());

    db.teardown().await;
}

#[tokio::test]
async fn test_task_for_removed_person_is_reported_not_stored() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();
    let event_id = create_event(pool, "Stale").await;

    let person_input = PersonForm { name: "Léa".to_string(), ..Default::default() }.validate().unwrap();
    let person_id = person::create(pool, event_id, &person_input).await.unwrap();
    let backend = PgBackend::new(pool.clone());
    let store = EventStore::new(event_id, 1);
    store.refresh(&backend, RefreshTrigger::Explicit).await;

    // Removed in another tab while the task form was open.
    assert!(person::delete(pool, event_id, person_id).await.unwrap());
    let input = TaskForm {
        title: "Fit the dress".to_string(),
        assigned_person_id: Some(person_id.to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap();

    let message = saved(task::create(pool, event_id, &input).await, "create the task").unwrap_err();
    assert!(message.contains("no longer exists"), "unexpected message: {message}");
    assert!(task::find_for_event(pool, event_id).await.unwrap().is_empty());
    assert!(store.tasks().is_empty());

    db.teardown().await;
}

#[tokio::test]
async fn test_document_sharing_round_trip() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();
    let event_id = create_event(pool, "Docs").await;
    let claire = person::create(
        pool,
        event_id,
        &PersonForm { name: "Claire".to_string(), role: Some("bride".to_string()), ..Default::default() }
            .validate()
            .unwrap(),
    )
    .await
    .unwrap();

    let input = DocumentForm {
        name: "Seating plan".to_string(),
        category: Some("Planning".to_string()),
        google_drive_url: Some("https://drive.google.com/file/d/xyz".to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap();
    let doc_id = document::create(pool, event_id, &input, ADMIN_USER).await.unwrap();

    assert!(document::set_assignees(pool, event_id, doc_id, &[claire]).await.unwrap());
    let stored = document::find_by_id(pool, event_id, doc_id).await.unwrap().unwrap();
    assert_eq!(stored.source, "google_drive");
    assert!(stored.is_assigned_to(claire));

    db.teardown().await;
}

#[tokio::test]
async fn test_store_over_postgres_toggles_and_reorders() {
    let Some(db) = setup_test_db().await else { return };
    let pool = db.pool();
    let event_id = create_event(pool, "Store").await;
    let a = create_item(pool, event_id, "A", "09:00", "60").await;
    let b = create_item(pool, event_id, "B", "10:00", "30").await;
    let input = TaskForm { title: "Flowers".to_string(), ..Default::default() }.validate().unwrap();
    let task_id = task::create(pool, event_id, &input).await.unwrap();

    let backend = PgBackend::new(pool.clone());
    let store = EventStore::new(event_id, 1);
    assert!(store.refresh(&backend, RefreshTrigger::Explicit).await.is_clean());

    let toggled = store.toggle_task(&backend, task_id).await.unwrap();
    assert!(toggled.is_completed());
    assert_eq!(store.progress_stats().progress_percentage, 100);

    let commit = store.reorder_timeline(&backend, 1, 0).await.unwrap();
    let order: Vec<(i64, &str)> = commit.order.iter().map(|i| (i.id, i.time.as_str())).collect();
    assert_eq!(order, vec![(b, "09:00"), (a, "09:30")]);

    let stored = timeline::find_for_event(pool, event_id).await.unwrap();
    assert_eq!(stored[0].id, b);

    db.teardown().await;
}
