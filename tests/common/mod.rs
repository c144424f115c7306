//! Shared test infrastructure.
//!
//! - Row fixtures (`task`, `timeline_item`, `person`, ...) with sensible defaults
//! - `MemoryBackend`, an in-memory `EventBackend` with failure switches
//! - `setup_test_db()`, a fresh migrated Postgres database when
//!   `TEST_DATABASE_URL` is set

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};

use jourj::models::document::Document;
use jourj::models::event::Event;
use jourj::models::person::Person;
use jourj::models::task::Task;
use jourj::models::timeline::TimelineItem;
use jourj::models::vendor::Vendor;
use jourj::planning::ScheduleChange;
use jourj::store::{BackendError, EventBackend};

pub const EVENT_ID: i64 = 1;
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin123";

// ============================================================================
// FIXTURES
// ============================================================================

pub fn event(date: NaiveDate) -> Event {
    Event {
        id: EVENT_ID,
        name: "Claire & Julien".to_string(),
        event_date: date,
        location: Some("Domaine des Tilleuls".to_string()),
        description: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn task(id: i64, priority: &str, status: &str) -> Task {
    Task {
        id,
        event_id: EVENT_ID,
        title: format!("Task {id}"),
        description: None,
        priority: priority.to_string(),
        status: status.to_string(),
        assigned_person_id: None,
        assigned_vendor_id: None,
        duration_minutes: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn timeline_item(id: i64, time: &str, duration: i32, position: i32) -> TimelineItem {
    TimelineItem {
        id,
        event_id: EVENT_ID,
        title: format!("Item {id}"),
        description: None,
        time: time.to_string(),
        duration,
        category: "Préparation".to_string(),
        priority: "medium".to_string(),
        status: "scheduled".to_string(),
        assigned_person_ids: vec![],
        assigned_vendor_ids: vec![],
        assigned_role: None,
        notes: None,
        position,
    }
}

pub fn person(id: i64, name: &str, role: &str) -> Person {
    Person {
        id,
        event_id: EVENT_ID,
        name: name.to_string(),
        role: role.to_string(),
        email: None,
        phone: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn vendor(id: i64, name: &str) -> Vendor {
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    Vendor {
        id,
        event_id: EVENT_ID,
        name: name.to_string(),
        service_type: None,
        contact_person: None,
        email: None,
        phone: None,
        address: None,
        website: None,
        notes: None,
        contract_status: None,
        created_at: at,
        updated_at: at,
    }
}

pub fn document(id: i64, name: &str, category: Option<&str>, source: &str, size: Option<i64>) -> Document {
    Document {
        id,
        event_id: EVENT_ID,
        name: name.to_string(),
        category: category.map(str::to_string),
        mime_type: Some("application/pdf".to_string()),
        file_type: None,
        file_size: size,
        source: source.to_string(),
        assigned_to: vec![],
        file_url: None,
        file_path: Some(format!("event-1/{name}")),
        google_drive_url: None,
        vendor_id: None,
        uploaded_by: Some(ADMIN_USER.to_string()),
        created_at: Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap(),
    }
}

// ============================================================================
// IN-MEMORY BACKEND
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct MemoryData {
    pub event: Option<Event>,
    pub tasks: Vec<Task>,
    pub timeline: Vec<TimelineItem>,
    pub documents: Vec<Document>,
    pub people: Vec<Person>,
    pub vendors: Vec<Vendor>,
}

/// An `EventBackend` over plain vectors.
///
/// `fail_reads`/`fail_writes` make every read or write fail. Reads wait on
/// `read_gate` and writes on `write_gate`, so a test can hold a refresh or a
/// mutation in flight.
#[derive(Default)]
pub struct MemoryBackend {
    pub data: Mutex<MemoryData>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub read_gate: tokio::sync::Mutex<()>,
    pub write_gate: tokio::sync::Mutex<()>,
}

impl MemoryBackend {
    pub fn new(data: MemoryData) -> Self {
        Self { data: Mutex::new(data), ..Default::default() }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Change the stored rows behind the store's back.
    pub fn edit(&self, f: impl FnOnce(&mut MemoryData)) {
        f(&mut self.data.lock().unwrap());
    }

    async fn read<T>(&self, f: impl FnOnce(&MemoryData) -> T) -> Result<T, BackendError> {
        let _gate = self.read_gate.lock().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("reads disabled".to_string()));
        }
        Ok(f(&self.data.lock().unwrap()))
    }

    fn check_writes(&self) -> Result<(), BackendError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

impl EventBackend for MemoryBackend {
    async fn event(&self, _event_id: i64) -> Result<Option<Event>, BackendError> {
        self.read(|d| d.event.clone()).await
    }

    async fn tasks(&self, _event_id: i64) -> Result<Vec<Task>, BackendError> {
        self.read(|d| d.tasks.clone()).await
    }

    async fn timeline(&self, _event_id: i64) -> Result<Vec<TimelineItem>, BackendError> {
        self.read(|d| d.timeline.clone()).await
    }

    async fn documents(&self, _event_id: i64) -> Result<Vec<Document>, BackendError> {
        self.read(|d| d.documents.clone()).await
    }

    async fn people(&self, _event_id: i64) -> Result<Vec<Person>, BackendError> {
        self.read(|d| d.people.clone()).await
    }

    async fn vendors(&self, _event_id: i64) -> Result<Vec<Vendor>, BackendError> {
        self.read(|d| d.vendors.clone()).await
    }

    async fn set_task_status(&self, _event_id: i64, task_id: i64, status: &str) -> Result<Task, BackendError> {
        let _gate = self.write_gate.lock().await;
        self.check_writes()?;
        let mut data = self.data.lock().unwrap();
        let task = data
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(BackendError::NotFound { entity: "task", id: task_id })?;
        task.status = status.to_string();
        Ok(task.clone())
    }

    async fn apply_schedule(
        &self,
        _event_id: i64,
        changes: &[ScheduleChange],
    ) -> Result<Vec<TimelineItem>, BackendError> {
        let _gate = self.write_gate.lock().await;
        self.check_writes()?;
        let mut data = self.data.lock().unwrap();
        let mut updated = Vec::new();
        for change in changes {
            let item = data
                .timeline
                .iter_mut()
                .find(|i| i.id == change.id)
                .ok_or(BackendError::NotFound { entity: "timeline item", id: change.id })?;
            item.time = change.time.clone();
            item.position = change.position;
            updated.push(item.clone());
        }
        Ok(updated)
    }
}

// ============================================================================
// DATABASE SETUP
// ============================================================================

/// A freshly created, migrated database. Dropped again by `teardown`.
pub struct TestDb {
    pool: PgPool,
    name: String,
    admin_url: String,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn teardown(self) {
        self.pool.close().await;
        if let Ok(mut conn) = sqlx::PgConnection::connect(&self.admin_url).await {
            let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS {} WITH (FORCE)", self.name))
                .execute(&mut conn)
                .await;
        }
    }
}

/// Create and migrate a throwaway database on the server named by
/// `TEST_DATABASE_URL`. Returns `None` (and the test skips) when unset.
pub async fn setup_test_db() -> Option<TestDb> {
    let _ = dotenvy::dotenv();
    let admin_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        }
    };

    let name = format!("jourj_test_{}", hex::encode(rand::random::<[u8; 6]>()));
    let mut conn = sqlx::PgConnection::connect(&admin_url)
        .await
        .expect("Failed to connect to TEST_DATABASE_URL");
    sqlx::query(&format!("CREATE DATABASE {name}"))
        .execute(&mut conn)
        .await
        .expect("Failed to create test database");
    conn.close().await.ok();

    let db_url = match admin_url.rsplit_once('/') {
        Some((base, _)) => format!("{base}/{name}"),
        None => panic!("TEST_DATABASE_URL must end with a database name"),
    };
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&db_url)
        .await
        .expect("Failed to connect to test database");
    jourj::db::run_migrations(&pool).await.expect("Failed to run migrations");

    Some(TestDb { pool, name, admin_url })
}
