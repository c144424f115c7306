use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::{render, AppError};
use crate::handlers::current_store;
use crate::planning::time::format_duration;
use crate::presentation::timeline::TimelineRow;
use crate::store::{EventSnapshot, PgBackend, StoreRegistry};
use crate::templates_structs::{PageContext, PlanningTemplate};

/// Timeline rows in running order, with the first assigned vendor's name.
pub fn timeline_rows(snapshot: &EventSnapshot) -> Vec<TimelineRow> {
    snapshot
        .timeline
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let vendor_name = item
                .assigned_vendor_ids
                .first()
                .and_then(|id| snapshot.vendors.iter().find(|v| v.id == *id))
                .map(|v| v.name.clone());
            TimelineRow::new(index, item.clone(), &snapshot.people, vendor_name)
        })
        .collect()
}

/// GET /admin/planning
pub async fn list(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    let snapshot = store.snapshot();

    let total: u32 = snapshot.timeline.iter().map(|i| i.duration_minutes()).sum();
    let ctx = PageContext::build(&session, "planning", snapshot.event.as_ref())?;
    render(PlanningTemplate { ctx, rows: timeline_rows(&snapshot), total_duration: format_duration(total) })
}
