use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::errors::{render, AppError};
use crate::handlers::{current_store, redirect, reload, saved, CsrfOnly};
use crate::models::event::Event;
use crate::models::person::{self, PersonForm};
use crate::presentation::timeline::{role_label, PERSON_ROLES};
use crate::store::{PgBackend, StoreRegistry};
use crate::templates_structs::{PageContext, PersonFormTemplate, SelectOption};

fn render_form(
    session: &Session,
    event: Option<&Event>,
    form_action: String,
    form_title: &str,
    form: PersonForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let current = form.role.as_deref().filter(|r| !r.is_empty()).unwrap_or("guest");
    let mut roles: Vec<SelectOption> = PERSON_ROLES
        .iter()
        .map(|r| SelectOption::new(*r, role_label(r), Some(current)))
        .collect();
    // Keep a free-text role selectable when editing.
    if !PERSON_ROLES.contains(&current) {
        roles.push(SelectOption::new(current, role_label(current), Some(current)));
    }

    let ctx = PageContext::build(session, "people", event)?;
    render(PersonFormTemplate { ctx, form_action, form_title: form_title.to_string(), form, errors, roles })
}

/// GET /admin/people/new
pub async fn new_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    render_form(&session, store.event().as_ref(), "/admin/people".to_string(), "New person", PersonForm::default(), vec![])
}

/// POST /admin/people
pub async fn create(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    form: web::Form<PersonForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let form = form.into_inner();
            return render_form(&session, store.event().as_ref(), "/admin/people".to_string(), "New person", form, errors);
        }
    };

    if let Err(message) = saved(person::create(backend.pool(), store.event_id(), &input).await, "add the person") {
        let form = form.into_inner();
        return render_form(&session, store.event().as_ref(), "/admin/people".to_string(), "New person", form, vec![message]);
    }
    reload(&session, &store, &backend).await;
    set_flash(&session, format!("{} added", input.name));
    Ok(redirect("/admin/people"))
}

/// GET /admin/people/{id}/edit
pub async fn edit_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;
    let existing = person::find_by_id(backend.pool(), store.event_id(), id)
        .await?
        .ok_or(AppError::NotFound)?;
    render_form(
        &session,
        store.event().as_ref(),
        format!("/admin/people/{id}"),
        "Edit person",
        PersonForm::from_person(&existing),
        vec![],
    )
}

/// POST /admin/people/{id}
pub async fn update(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<PersonForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let form = form.into_inner();
            return render_form(&session, store.event().as_ref(), format!("/admin/people/{id}"), "Edit person", form, errors);
        }
    };

    match saved(person::update(backend.pool(), store.event_id(), id, &input).await, "update the person") {
        Ok(true) => {}
        Ok(false) => return Err(AppError::NotFound),
        Err(message) => {
            let form = form.into_inner();
            return render_form(&session, store.event().as_ref(), format!("/admin/people/{id}"), "Edit person", form, vec![message]);
        }
    }
    reload(&session, &store, &backend).await;
    set_flash(&session, "Person updated");
    Ok(redirect("/admin/people"))
}

/// POST /admin/people/{id}/delete
/// Also removes the person from timeline and document assignments.
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

    match saved(person::delete(backend.pool(), store.event_id(), id).await, "remove the person") {
        Ok(true) => {
            reload(&session, &store, &backend).await;
            set_flash(&session, "Person removed");
        }
        Ok(false) => set_flash(&session, "Person not found"),
        Err(message) => set_flash(&session, message),
    }
    Ok(redirect("/admin/people"))
}
