use std::future::Future;

use sqlx::PgPool;

use crate::models::{document, event, person, task, timeline, vendor};
use crate::models::document::Document;
use crate::models::event::Event;
use crate::models::person::Person;
use crate::models::task::Task;
use crate::models::timeline::TimelineItem;
use crate::models::vendor::Vendor;
use crate::planning::ScheduleChange;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Everything the event store reads from and writes to.
///
/// `PgBackend` is the production implementation; tests plug in an in-memory one.
pub trait EventBackend: Send + Sync {
    fn event(&self, event_id: i64) -> impl Future<Output = Result<Option<Event>, BackendError>> + Send;

    fn tasks(&self, event_id: i64) -> impl Future<Output = Result<Vec<Task>, BackendError>> + Send;

    fn timeline(&self, event_id: i64) -> impl Future<Output = Result<Vec<TimelineItem>, BackendError>> + Send;

    fn documents(&self, event_id: i64) -> impl Future<Output = Result<Vec<Document>, BackendError>> + Send;

    fn people(&self, event_id: i64) -> impl Future<Output = Result<Vec<Person>, BackendError>> + Send;

    fn vendors(&self, event_id: i64) -> impl Future<Output = Result<Vec<Vendor>, BackendError>> + Send;

    /// Store a task's new status and return the stored row.
    fn set_task_status(
        &self,
        event_id: i64,
        task_id: i64,
        status: &str,
    ) -> impl Future<Output = Result<Task, BackendError>> + Send;

    /// Persist a reorder atomically and return the updated rows.
    fn apply_schedule(
        &self,
        event_id: i64,
        changes: &[ScheduleChange],
    ) -> impl Future<Output = Result<Vec<TimelineItem>, BackendError>> + Send;
}

#[derive(Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl EventBackend for PgBackend {
    async fn event(&self, event_id: i64) -> Result<Option<Event>, BackendError> {
        Ok(event::find_by_id(&self.pool, event_id).await?)
    }

    async fn tasks(&self, event_id: i64) -> Result<Vec<Task>, BackendError> {
        Ok(task::find_for_event(&self.pool, event_id).await?)
    }

    async fn timeline(&self, event_id: i64) -> Result<Vec<TimelineItem>, BackendError> {
        Ok(timeline::find_for_event(&self.pool, event_id).await?)
    }

    async fn documents(&self, event_id: i64) -> Result<Vec<Document>, BackendError> {
        Ok(document::find_for_event(&self.pool, event_id).await?)
    }

    async fn people(&self, event_id: i64) -> Result<Vec<Person>, BackendError> {
        Ok(person::find_for_event(&self.pool, event_id).await?)
    }

    async fn vendors(&self, event_id: i64) -> Result<Vec<Vendor>, BackendError> {
        Ok(vendor::find_for_event(&self.pool, event_id).await?)
    }

    async fn set_task_status(&self, event_id: i64, task_id: i64, status: &str) -> Result<Task, BackendError> {
        task::set_status(&self.pool, event_id, task_id, status)
            .await?
            .ok_or(BackendError::NotFound { entity: "task", id: task_id })
    }

    async fn apply_schedule(
        &self,
        event_id: i64,
        changes: &[ScheduleChange],
    ) -> Result<Vec<TimelineItem>, BackendError> {
        timeline::apply_schedule(&self.pool, event_id, changes)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => BackendError::NotFound {
                    entity: "timeline item",
                    id: changes.first().map_or(0, |c| c.id),
                },
                other => BackendError::Database(other),
            })
    }
}
