use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::csrf;
use crate::errors::AppError;
use crate::handlers::current_store;
use crate::planning::{time, PreviewSlot, ScheduleChange};
use crate::store::{PgBackend, StoreRegistry};

/// A drag from one slot of the running order to another.
#[derive(Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
    pub csrf_token: String,
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub slots: Vec<PreviewSlot>,
}

#[derive(Serialize)]
pub struct ReorderResponse {
    pub changes: Vec<ScheduleChange>,
    pub slots: Vec<PreviewSlot>,
}

/// POST /admin/planning/reorder/preview
/// Start and end times the day would have after the move. Nothing is stored.
pub async fn preview(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    body: web::Json<ReorderRequest>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &body.csrf_token)?;
    let store = current_store(&session, &registry, &backend).await?;

    let slots = store.preview_reorder(body.from, body.to)?;
    Ok(HttpResponse::Ok().json(PreviewResponse { slots }))
}

/// POST /admin/planning/reorder
/// Commit the move: the day is re-timed back to back and saved in one go.
pub async fn reorder(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    body: web::Json<ReorderRequest>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &body.csrf_token)?;
    let store = current_store(&session, &registry, &backend).await?;

    let commit = store.reorder_timeline(backend.get_ref(), body.from, body.to).await?;
    log::info!(
        "Reordered timeline of event {}: {} item(s) rescheduled",
        store.event_id(),
        commit.changes.len()
    );

    let slots = commit
        .order
        .iter()
        .map(|item| {
            let start = time::display_time(&item.time).to_string();
            PreviewSlot {
                id: item.id,
                end_time: time::end_time(&item.time, item.duration_minutes()).unwrap_or_else(|_| start.clone()),
                start_time: start,
            }
        })
        .collect();
    Ok(HttpResponse::Ok().json(ReorderResponse { changes: commit.changes, slots }))
}
