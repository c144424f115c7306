use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::errors::{render, AppError};
use crate::handlers::{current_store, redirect, CsrfOnly};
use crate::presentation::documents::format_file_size;
use crate::presentation::timeline::{TaskRow, TimelineRow};
use crate::store::{PgBackend, RefreshTrigger, StoreRegistry};
use crate::templates_structs::{DashboardTemplate, PageContext};

const UPCOMING_LIMIT: usize = 5;

/// GET /admin
pub async fn index(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    let snapshot = store.snapshot();
    let event = snapshot.event.clone().ok_or(AppError::NoEventSelected)?;

    let vendor_name = |ids: &[i64]| {
        ids.first()
            .and_then(|id| snapshot.vendors.iter().find(|v| v.id == *id))
            .map(|v| v.name.clone())
    };
    let upcoming = snapshot
        .timeline
        .iter()
        .filter(|item| !item.is_completed())
        .take(UPCOMING_LIMIT)
        .enumerate()
        .map(|(i, item)| {
            TimelineRow::new(i, item.clone(), &snapshot.people, vendor_name(&item.assigned_vendor_ids))
        })
        .collect();
    let critical_tasks = snapshot
        .tasks
        .iter()
        .filter(|t| t.is_critical())
        .map(|t| TaskRow::new(t.clone(), &snapshot.people, &snapshot.vendors))
        .collect();

    let documents = store.document_stats();
    let ctx = PageContext::build(&session, "dashboard", Some(&event))?;
    render(DashboardTemplate {
        ctx,
        days_until: store.days_until(chrono::Utc::now()),
        progress: store.progress_stats(),
        total_size_label: format_file_size(Some(documents.total_size)),
        documents,
        upcoming,
        critical_tasks,
        timeline_count: snapshot.timeline.len(),
        people_count: snapshot.people.len(),
        vendor_count: snapshot.vendors.len(),
        event,
    })
}

/// POST /admin/refresh
pub async fn refresh(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let store = current_store(&session, &registry, &backend).await?;

    let report = store.refresh(backend.get_ref(), RefreshTrigger::Explicit).await;
    if report.failed.is_empty() {
        set_flash(&session, "Data refreshed");
    } else {
        set_flash(&session, format!("Some data could not be refreshed: {}", report.failed.join(", ")));
    }
    Ok(redirect("/admin"))
}
