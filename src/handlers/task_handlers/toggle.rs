use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::csrf;
use crate::errors::AppError;
use crate::handlers::current_store;
use crate::store::{PgBackend, ProgressStats, StoreRegistry};

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub csrf_token: String,
}

#[derive(Serialize)]
pub struct ToggleResponse {
    pub id: i64,
    pub status: String,
    pub completed: bool,
    pub progress: ProgressStats,
}

/// POST /tasks/{id}/toggle
/// Flip one task between completed and pending. On failure nothing changes
/// and the error is returned so the page can undo its checkbox.
pub async fn toggle(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<ToggleRequest>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &body.csrf_token)?;
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;

    let task = store.toggle_task(backend.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ToggleResponse {
        id: task.id,
        completed: task.is_completed(),
        status: task.status,
        progress: store.progress_stats(),
    }))
}
