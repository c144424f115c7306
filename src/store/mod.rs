//! Per-event data store.
//!
//! An `EventStore` caches one event's collections, derives the dashboard
//! statistics from them and funnels the optimistic mutations (task toggle,
//! timeline reorder) through the backend. Stores are opened and closed by the
//! `StoreRegistry`; the scheduler refreshes every open store periodically.

pub mod backend;
pub mod registry;
pub mod scheduler;
pub mod state;
pub mod stats;

use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::models::document::Document;
use crate::models::event::Event;
use crate::models::person::Person;
use crate::models::task::Task;
use crate::models::timeline::TimelineItem;
use crate::models::vendor::Vendor;
use crate::planning::{
    build_personal_planning, PersonalPlanning, PlanningOwner, PreviewSlot, ReorderCommit, ReorderError,
    TimelineReorder,
};

pub use backend::{BackendError, EventBackend, PgBackend};
pub use registry::StoreRegistry;
pub use scheduler::spawn_refresh_scheduler;
pub use state::{Keyed, Ticket, Tracked};
pub use stats::{days_until, document_stats, progress_stats, DocumentStats, ProgressStats};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Reorder(#[from] ReorderError),
    #[error("task {0} is not part of this event")]
    UnknownTask(i64),
    #[error("the event store was closed")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Periodic background refresh; yields to pending mutations.
    Scheduled,
    /// User asked for fresh data; replaces committed rows even with
    /// mutations pending.
    Explicit,
}

/// Outcome of one refresh, per collection name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub updated: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
    pub failed: Vec<&'static str>,
    /// The store was closed while the fetch was in flight; nothing was applied.
    pub discarded: bool,
}

impl RefreshReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.discarded
    }
}

/// Read-only copy of the store's current view.
#[derive(Debug, Clone, Default)]
pub struct EventSnapshot {
    pub event: Option<Event>,
    pub tasks: Vec<Task>,
    pub timeline: Vec<TimelineItem>,
    pub documents: Vec<Document>,
    pub people: Vec<Person>,
    pub vendors: Vec<Vendor>,
}

#[derive(Debug, Default)]
struct StoreState {
    event: Option<Event>,
    tasks: Tracked<Task>,
    timeline: Tracked<TimelineItem>,
    documents: Tracked<Document>,
    people: Tracked<Person>,
    vendors: Tracked<Vendor>,
    loaded: bool,
    closed: bool,
}

impl StoreState {
    fn timeline_view(&self) -> Vec<TimelineItem> {
        let mut items = self.timeline.view();
        sort_timeline(&mut items);
        items
    }
}

/// Running order: position, then start time, then id.
pub fn sort_timeline(items: &mut [TimelineItem]) {
    items.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.time.cmp(&b.time))
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub struct EventStore {
    event_id: i64,
    generation: u64,
    state: RwLock<StoreState>,
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("event_id", &self.event_id)
            .field("generation", &self.generation)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Versions captured before a fetch, compared again before applying it.
struct Versions {
    tasks: u64,
    timeline: u64,
    documents: u64,
    people: u64,
    vendors: u64,
}

impl EventStore {
    pub fn new(event_id: i64, generation: u64) -> Self {
        Self { event_id, generation, state: RwLock::new(StoreState::default()) }
    }

    pub fn event_id(&self) -> i64 {
        self.event_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_closed(&self) -> bool {
        self.read().closed
    }

    pub fn is_loaded(&self) -> bool {
        self.read().loaded
    }

    /// Mark the store closed. In-flight refreshes will discard their results.
    pub fn close(&self) {
        self.write().closed = true;
    }

    pub fn snapshot(&self) -> EventSnapshot {
        let state = self.read();
        EventSnapshot {
            event: state.event.clone(),
            tasks: state.tasks.view(),
            timeline: state.timeline_view(),
            documents: state.documents.view(),
            people: state.people.view(),
            vendors: state.vendors.view(),
        }
    }

    pub fn event(&self) -> Option<Event> {
        self.read().event.clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks.view()
    }

    pub fn timeline(&self) -> Vec<TimelineItem> {
        self.read().timeline_view()
    }

    pub fn documents(&self) -> Vec<Document> {
        self.read().documents.view()
    }

    pub fn people(&self) -> Vec<Person> {
        self.read().people.view()
    }

    pub fn vendors(&self) -> Vec<Vendor> {
        self.read().vendors.view()
    }

    pub fn progress_stats(&self) -> ProgressStats {
        progress_stats(&self.read().tasks.view())
    }

    pub fn document_stats(&self) -> DocumentStats {
        document_stats(&self.read().documents.view())
    }

    /// Days until the event; 0 when the event is unknown.
    pub fn days_until(&self, now: DateTime<Utc>) -> i64 {
        self.read().event.as_ref().map_or(0, |e| days_until(e.event_date, now))
    }

    pub fn personal_planning(&self, owner: &PlanningOwner) -> PersonalPlanning {
        let state = self.read();
        build_personal_planning(owner, &state.timeline_view(), &state.tasks.view())
    }

    /// Load everything on first use.
    pub async fn ensure_loaded<B: EventBackend>(&self, backend: &B) -> RefreshReport {
        if self.is_loaded() {
            return RefreshReport::default();
        }
        self.refresh(backend, RefreshTrigger::Explicit).await
    }

    /// Re-fetch every collection and replace the committed rows.
    ///
    /// Collections that fail to load keep their previous rows, and so does
    /// any collection where a mutation was confirmed while the fetch was in
    /// flight. A scheduled refresh also leaves alone collections with pending
    /// mutations.
    pub async fn refresh<B: EventBackend>(&self, backend: &B, trigger: RefreshTrigger) -> RefreshReport {
        let before = {
            let state = self.read();
            if state.closed {
                return RefreshReport { discarded: true, ..Default::default() };
            }
            Versions {
                tasks: state.tasks.version(),
                timeline: state.timeline.version(),
                documents: state.documents.version(),
                people: state.people.version(),
                vendors: state.vendors.version(),
            }
        };

        let id = self.event_id;
        let (event, tasks, timeline, documents, people, vendors) = tokio::join!(
            backend.event(id),
            backend.tasks(id),
            backend.timeline(id),
            backend.documents(id),
            backend.people(id),
            backend.vendors(id),
        );

        let mut state = self.write();
        let mut report = RefreshReport::default();
        if state.closed {
            log::info!("Discarding refresh of closed store for event {}", id);
            report.discarded = true;
            return report;
        }

        match event {
            Ok(event) => {
                state.event = event;
                report.updated.push("event");
            }
            Err(e) => {
                log::error!("Failed to refresh event {}: {}", id, e);
                report.failed.push("event");
            }
        }

        let scheduled = trigger == RefreshTrigger::Scheduled;
        apply(&mut state.tasks, "tasks", tasks, before.tasks, scheduled, id, &mut report);
        apply(&mut state.timeline, "timeline", timeline, before.timeline, scheduled, id, &mut report);
        apply(&mut state.documents, "documents", documents, before.documents, scheduled, id, &mut report);
        apply(&mut state.people, "people", people, before.people, scheduled, id, &mut report);
        apply(&mut state.vendors, "vendors", vendors, before.vendors, scheduled, id, &mut report);

        state.loaded = true;
        report
    }

    /// Flip a task between completed and pending.
    ///
    /// The flipped row shows immediately; it is committed once the backend
    /// stores it and dropped if the backend fails. Other tasks are untouched.
    pub async fn toggle_task<B: EventBackend>(&self, backend: &B, task_id: i64) -> Result<Task, StoreError> {
        let (ticket, status) = {
            let mut state = self.write();
            if state.closed {
                return Err(StoreError::Closed);
            }
            let mut task = state
                .tasks
                .view()
                .into_iter()
                .find(|t| t.id == task_id)
                .ok_or(StoreError::UnknownTask(task_id))?;
            let status = Task::status_for_completion(!task.is_completed());
            task.status = status.to_string();
            (state.tasks.begin(vec![task]), status)
        };

        let result = backend.set_task_status(self.event_id, task_id, status).await;

        let mut state = self.write();
        match result {
            Ok(stored) => {
                state.tasks.confirm(ticket, vec![stored.clone()]);
                Ok(stored)
            }
            Err(e) => {
                log::error!("Failed to update task {}: {}", task_id, e);
                state.tasks.abandon(ticket);
                Err(e.into())
            }
        }
    }

    /// Preview moving the item at `from` to `to` without changing anything.
    pub fn preview_reorder(&self, from: usize, to: usize) -> Result<Vec<PreviewSlot>, StoreError> {
        let mut engine = TimelineReorder::new(self.timeline())?;
        engine.drag_start(from)?;
        Ok(engine.drag_over(to)?.to_vec())
    }

    /// Move the item at `from` to `to`, re-time the day and persist it.
    ///
    /// On failure the committed order stays as it was and the error is
    /// returned so the client can revert its own rendering.
    pub async fn reorder_timeline<B: EventBackend>(
        &self,
        backend: &B,
        from: usize,
        to: usize,
    ) -> Result<ReorderCommit, StoreError> {
        let (ticket, commit) = {
            let mut state = self.write();
            if state.closed {
                return Err(StoreError::Closed);
            }
            let mut engine = TimelineReorder::new(state.timeline_view())?;
            engine.drag_start(from)?;
            let commit = engine.drop_at(to)?;
            if commit.is_noop() {
                return Ok(commit);
            }
            let moved: Vec<TimelineItem> = commit
                .order
                .iter()
                .filter(|item| commit.changes.iter().any(|c| c.id == item.id))
                .cloned()
                .collect();
            (state.timeline.begin(moved), commit)
        };

        let result = backend.apply_schedule(self.event_id, &commit.changes).await;

        let mut state = self.write();
        match result {
            Ok(stored) => {
                state.timeline.confirm(ticket, stored);
                let order = state.timeline_view();
                Ok(ReorderCommit { order, changes: commit.changes })
            }
            Err(e) => {
                log::error!("Failed to save timeline order for event {}: {}", self.event_id, e);
                state.timeline.abandon(ticket);
                Err(e.into())
            }
        }
    }
}

fn apply<T: Keyed + Clone>(
    collection: &mut Tracked<T>,
    name: &'static str,
    fetched: Result<Vec<T>, BackendError>,
    version_before: u64,
    scheduled: bool,
    event_id: i64,
    report: &mut RefreshReport,
) {
    let rows = match fetched {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Failed to refresh {} for event {}: {}", name, event_id, e);
            report.failed.push(name);
            return;
        }
    };

    if collection.version() != version_before {
        log::warn!("Skipping refresh of {} for event {}: a change was saved during the fetch", name, event_id);
        report.skipped.push(name);
        return;
    }
    if scheduled && collection.has_pending() {
        log::warn!("Skipping scheduled refresh of {} for event {}: local changes in flight", name, event_id);
        report.skipped.push(name);
        return;
    }

    collection.replace_committed(rows);
    report.updated.push(name);
}
