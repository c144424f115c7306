use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::{render, AppError};
use crate::handlers::current_store;
use crate::models::priority::Priority;
use crate::presentation::timeline::TaskRow;
use crate::store::{PgBackend, StoreRegistry};
use crate::templates_structs::{PageContext, TaskListTemplate};

/// GET /admin/tasks
/// Open tasks first, highest priority first; completed tasks last.
pub async fn list(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    let snapshot = store.snapshot();

    let mut tasks = snapshot.tasks.clone();
    tasks.sort_by_key(|t| (t.is_completed(), Priority::rank_of(&t.priority)));
    let rows = tasks
        .into_iter()
        .map(|t| TaskRow::new(t, &snapshot.people, &snapshot.vendors))
        .collect();

    let ctx = PageContext::build(&session, "tasks", snapshot.event.as_ref())?;
    render(TaskListTemplate { ctx, rows, progress: store.progress_stats() })
}
