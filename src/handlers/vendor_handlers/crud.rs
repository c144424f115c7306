use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::handlers::{current_store, fixed_options, redirect, reload, saved, CsrfOnly};
use crate::models::event::Event;
use crate::models::vendor::{self, VendorForm};
use crate::models::document;
use crate::planning::PlanningOwner;
use crate::presentation::documents::DocumentCard;
use crate::store::{PgBackend, StoreRegistry};
use crate::templates_structs::{PageContext, VendorDetailTemplate, VendorFormTemplate};

const CONTRACT_LABELS: &[(&str, &str)] = &[
    ("", "Not set"),
    ("pending", "Pending"),
    ("signed", "Signed"),
    ("cancelled", "Cancelled"),
];

fn render_form(
    session: &Session,
    event: Option<&Event>,
    form_action: String,
    form_title: &str,
    form: VendorForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, "vendors", event)?;
    render(VendorFormTemplate {
        ctx,
        form_action,
        form_title: form_title.to_string(),
        statuses: fixed_options(CONTRACT_LABELS, Some(form.contract_status.as_deref().unwrap_or(""))),
        form,
        errors,
    })
}

/// GET /admin/vendors/new
pub async fn new_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    render_form(&session, store.event().as_ref(), "/admin/vendors".to_string(), "New vendor", VendorForm::default(), vec![])
}

/// POST /admin/vendors
pub async fn create(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    form: web::Form<VendorForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let form = form.into_inner();
            return render_form(&session, store.event().as_ref(), "/admin/vendors".to_string(), "New vendor", form, errors);
        }
    };

    let id = match saved(vendor::create(backend.pool(), store.event_id(), &input).await, "add the vendor") {
        Ok(id) => id,
        Err(message) => {
            let form = form.into_inner();
            return render_form(&session, store.event().as_ref(), "/admin/vendors".to_string(), "New vendor", form, vec![message]);
        }
    };
    reload(&session, &store, &backend).await;
    set_flash(&session, format!("Vendor '{}' added", input.name));
    Ok(redirect(&format!("/admin/vendors/{id}")))
}

/// GET /admin/vendors/{id}
/// Vendor card with its attached documents and its planning.
pub async fn detail(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;
    let found = vendor::find_by_id(backend.pool(), store.event_id(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    let documents = document::find_for_vendor(backend.pool(), store.event_id(), id)
        .await?
        .into_iter()
        .map(|d| DocumentCard::new(d, &config.storage_public_url))
        .collect();
    let planning = store.personal_planning(&PlanningOwner::vendor(id));

    let ctx = PageContext::build(&session, "vendors", store.event().as_ref())?;
    render(VendorDetailTemplate { ctx, vendor: found, documents, planning })
}

/// GET /admin/vendors/{id}/edit
pub async fn edit_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;
    let existing = vendor::find_by_id(backend.pool(), store.event_id(), id)
        .await?
        .ok_or(AppError::NotFound)?;
    render_form(
        &session,
        store.event().as_ref(),
        format!("/admin/vendors/{id}"),
        "Edit vendor",
        VendorForm::from_vendor(&existing),
        vec![],
    )
}

/// POST /admin/vendors/{id}
pub async fn update(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<VendorForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let form = form.into_inner();
            return render_form(&session, store.event().as_ref(), format!("/admin/vendors/{id}"), "Edit vendor", form, errors);
        }
    };

    match saved(vendor::update(backend.pool(), store.event_id(), id, &input).await, "update the vendor") {
        Ok(true) => {}
        Ok(false) => return Err(AppError::NotFound),
        Err(message) => {
            let form = form.into_inner();
            return render_form(&session, store.event().as_ref(), format!("/admin/vendors/{id}"), "Edit vendor", form, vec![message]);
        }
    }
    reload(&session, &store, &backend).await;
    set_flash(&session, "Vendor updated");
    Ok(redirect(&format!("/admin/vendors/{id}")))
}

/// POST /admin/vendors/{id}/delete
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

    match saved(vendor::delete(backend.pool(), store.event_id(), id).await, "remove the vendor") {
        Ok(true) => {
            reload(&session, &store, &backend).await;
            set_flash(&session, "Vendor removed");
        }
        Ok(false) => set_flash(&session, "Vendor not found"),
        Err(message) => set_flash(&session, message),
    }
    Ok(redirect("/admin/vendors"))
}
