use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::handlers::current_store;
use crate::models::document;
use crate::planning::PlanningOwner;
use crate::presentation::documents::DocumentCard;
use crate::presentation::timeline::role_label;
use crate::store::{PgBackend, StoreRegistry};
use crate::templates_structs::{PageContext, PersonalPlanningTemplate};

/// GET /participants/person/{id}
/// One person's merged planning and the documents shared with them.
pub async fn person(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;
    let snapshot = store.snapshot();
    let found = snapshot.people.iter().find(|p| p.id == id).ok_or(AppError::NotFound)?;

    let documents = snapshot
        .documents
        .iter()
        .filter(|d| d.is_assigned_to(id))
        .cloned()
        .map(|d| DocumentCard::new(d, &config.storage_public_url))
        .collect();

    let ctx = PageContext::build(&session, "people", snapshot.event.as_ref())?;
    render(PersonalPlanningTemplate {
        ctx,
        owner_name: found.name.clone(),
        owner_kind: role_label(&found.role),
        owner_detail: found.email.clone(),
        planning: store.personal_planning(&PlanningOwner::Person(id)),
        documents,
    })
}

/// GET /participants/vendor/{id}
pub async fn vendor(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;
    let snapshot = store.snapshot();
    let found = snapshot.vendors.iter().find(|v| v.id == id).ok_or(AppError::NotFound)?;

    let documents = document::find_for_vendor(backend.pool(), store.event_id(), id)
        .await?
        .into_iter()
        .map(|d| DocumentCard::new(d, &config.storage_public_url))
        .collect();

    let ctx = PageContext::build(&session, "vendors", snapshot.event.as_ref())?;
    render(PersonalPlanningTemplate {
        ctx,
        owner_name: found.name.clone(),
        owner_kind: found.service_type.clone().unwrap_or_else(|| "Vendor".to_string()),
        owner_detail: found.contact_person.clone(),
        planning: store.personal_planning(&PlanningOwner::vendor(id)),
        documents,
    })
}
