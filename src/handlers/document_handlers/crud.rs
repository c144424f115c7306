use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::csrf;
use crate::auth::session::{get_username, set_flash};
use crate::errors::{render, AppError};
use crate::handlers::{current_store, people_checkboxes, redirect, reload, saved, vendor_options, CsrfOnly};
use crate::models::document::{self, DocumentForm};
use crate::models::fields::id_list;
use crate::presentation::documents::DocumentCategory;
use crate::store::{EventSnapshot, PgBackend, StoreRegistry};
use crate::templates_structs::{DocumentFormTemplate, PageContext, SelectOption};

fn render_form(
    session: &Session,
    snapshot: &EventSnapshot,
    form: DocumentForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let current = form.category.as_deref().filter(|c| !c.is_empty());
    let categories = DocumentCategory::ALL
        .iter()
        .map(|c| SelectOption::new(c.stored_value(), c.stored_value(), current))
        .collect();
    let checked = id_list(form.assigned_to.as_deref(), "Assigned people").unwrap_or_default();

    let ctx = PageContext::build(session, "documents", snapshot.event.as_ref())?;
    render(DocumentFormTemplate {
        ctx,
        categories,
        vendors: vendor_options(&snapshot.vendors, form.vendor_id.as_deref()),
        people: people_checkboxes(&snapshot.people, &checked),
        form,
        errors,
    })
}

/// GET /admin/documents/new
pub async fn new_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    render_form(&session, &store.snapshot(), DocumentForm::default(), vec![])
}

/// POST /admin/documents
/// Registers a document that already lives in storage or on Google Drive.
pub async fn create(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    form: web::Form<DocumentForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return render_form(&session, &store.snapshot(), form.into_inner(), errors),
    };

    let uploaded_by = get_username(&session).unwrap_or_default();
    let created = document::create(backend.pool(), store.event_id(), &input, &uploaded_by).await;
    if let Err(message) = saved(created, "add the document") {
        return render_form(&session, &store.snapshot(), form.into_inner(), vec![message]);
    }
    reload(&session, &store, &backend).await;
    set_flash(&session, format!("Document '{}' added", input.name));
    Ok(redirect("/admin/documents"))
}

#[derive(Deserialize)]
pub struct AssignForm {
    #[serde(default)]
    pub assigned_to: Option<String>, // comma-separated person ids
    pub csrf_token: String,
}

/// POST /admin/documents/{id}/assign
pub async fn assign(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<AssignForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;

    let person_ids = match id_list(form.assigned_to.as_deref(), "Assigned people") {
        Ok(ids) => ids,
        Err(e) => {
            set_flash(&session, e);
            return Ok(redirect("/admin/documents"));
        }
    };

    match saved(document::set_assignees(backend.pool(), store.event_id(), id, &person_ids).await, "share the document") {
        Ok(true) => {
            reload(&session, &store, &backend).await;
            set_flash(&session, "Document sharing updated");
        }
        Ok(false) => set_flash(&session, "Document not found"),
        Err(message) => set_flash(&session, message),
    }
    Ok(redirect("/admin/documents"))
}

/// POST /admin/documents/{id}/delete
/// Only the record is removed; the stored file is left alone.
pub async fn delete(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;

    match saved(document::delete(backend.pool(), store.event_id(), id).await, "delete the document") {
        Ok(true) => {
            reload(&session, &store, &backend).await;
            set_flash(&session, "Document deleted");
        }
        Ok(false) => set_flash(&session, "Document not found"),
        Err(message) => set_flash(&session, message),
    }
    Ok(redirect("/admin/documents"))
}
