use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::errors::{render, AppError};
use crate::handlers::{current_store, fixed_options, people_checkboxes, redirect, reload, saved, vendor_options, CsrfOnly};
use crate::models::fields::id_list;
use crate::models::priority::PRIORITIES;
use crate::models::timeline::{self, TimelineItemForm, TIMELINE_STATUSES};
use crate::presentation::timeline::{StatusBadge, TimelineCategory};
use crate::store::{EventSnapshot, PgBackend, StoreRegistry};
use crate::templates_structs::{PageContext, TimelineFormTemplate};

fn render_form(
    session: &Session,
    snapshot: &EventSnapshot,
    form_action: String,
    form_title: &str,
    form: TimelineItemForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let categories: Vec<(&str, &str)> = TimelineCategory::ALL
        .iter()
        .map(|c| (c.stored_value(), c.stored_value()))
        .collect();
    let priorities: Vec<(&str, &str)> = PRIORITIES.iter().map(|p| (p.as_str(), p.label())).collect();
    let statuses: Vec<(&str, &str)> = TIMELINE_STATUSES
        .iter()
        .map(|s| (*s, StatusBadge::classify(s).label()))
        .collect();
    // Ids that do not parse are simply shown unchecked.
    let checked = id_list(form.assigned_person_ids.as_deref(), "Assigned people").unwrap_or_default();

    let ctx = PageContext::build(session, "planning", snapshot.event.as_ref())?;
    render(TimelineFormTemplate {
        ctx,
        form_action,
        form_title: form_title.to_string(),
        categories: fixed_options(&categories, form.category.as_deref()),
        priorities: fixed_options(&priorities, form.priority.as_deref()),
        statuses: fixed_options(&statuses, form.status.as_deref()),
        people: people_checkboxes(&snapshot.people, &checked),
        vendors: vendor_options(&snapshot.vendors, form.assigned_vendor_id.as_deref()),
        form,
        errors,
    })
}

/// GET /admin/planning/new
pub async fn new_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    render_form(
        &session,
        &store.snapshot(),
        "/admin/planning".to_string(),
        "New timeline item",
        TimelineItemForm::blank(),
        vec![],
    )
}

/// POST /admin/planning
pub async fn create(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    form: web::Form<TimelineItemForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let form = form.into_inner();
            return render_form(&session, &store.snapshot(), "/admin/planning".to_string(), "New timeline item", form, errors);
        }
    };

    if let Err(message) = saved(timeline::create(backend.pool(), store.event_id(), &input).await, "add the timeline item") {
        let form = form.into_inner();
        return render_form(&session, &store.snapshot(), "/admin/planning".to_string(), "New timeline item", form, vec![message]);
    }
    reload(&session, &store, &backend).await;
    set_flash(&session, format!("'{}' added to the timeline", input.title));
    Ok(redirect("/admin/planning"))
}

/// GET /admin/planning/{id}/edit
pub async fn edit_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;
    let item = timeline::find_by_id(backend.pool(), store.event_id(), id)
        .await?
        .ok_or(AppError::NotFound)?;
    render_form(
        &session,
        &store.snapshot(),
        format!("/admin/planning/{id}"),
        "Edit timeline item",
        TimelineItemForm::from_item(&item),
        vec![],
    )
}

/// POST /admin/planning/{id}
pub async fn update(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<TimelineItemForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let form = form.into_inner();
            return render_form(
                &session,
                &store.snapshot(),
                format!("/admin/planning/{id}"),
                "Edit timeline item",
                form,
                errors,
            );
        }
    };

    match saved(timeline::update(backend.pool(), store.event_id(), id, &input).await, "update the timeline item") {
        Ok(true) => {}
        Ok(false) => return Err(AppError::NotFound),
        Err(message) => {
            let form = form.into_inner();
            return render_form(
                &session,
                &store.snapshot(),
                format!("/admin/planning/{id}"),
                "Edit timeline item",
                form,
                vec![message],
            );
        }
    }
    reload(&session, &store, &backend).await;
    set_flash(&session, "Timeline item updated");
    Ok(redirect("/admin/planning"))
}

/// POST /admin/planning/{id}/delete
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

    match saved(timeline::delete(backend.pool(), store.event_id(), id).await, "delete the timeline item") {
        Ok(true) => {
            reload(&session, &store, &backend).await;
            set_flash(&session, "Timeline item deleted");
        }
        Ok(false) => set_flash(&session, "Timeline item not found"),
        Err(message) => set_flash(&session, message),
    }
    Ok(redirect("/admin/planning"))
}
