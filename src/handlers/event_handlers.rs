use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::{current_event_id, set_current_event, set_flash};
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::handlers::{current_store, redirect, reload, saved, CsrfOnly};
use crate::models::event::{self, Event, EventForm};
use crate::store::{PgBackend, StoreRegistry};
use crate::templates_structs::{ConfigTemplate, EventListTemplate, PageContext};

async fn render_list(
    session: &Session,
    backend: &PgBackend,
    form: EventForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let events = event::find_all(backend.pool()).await?;
    let current_event_id = current_event_id(session);
    let current = events.iter().find(|e| Some(e.id) == current_event_id);
    let ctx = PageContext::build(session, "events", current)?;
    render(EventListTemplate { ctx, events, current_event_id, form, errors })
}

/// GET /events
pub async fn list(backend: web::Data<PgBackend>, session: Session) -> Result<HttpResponse, AppError> {
    render_list(&session, &backend, EventForm::default(), vec![]).await
}

/// POST /events
pub async fn create(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return render_list(&session, &backend, form.into_inner(), errors).await,
    };

    let id = match saved(event::create(backend.pool(), &input).await, "create the event") {
        Ok(id) => id,
        Err(message) => return render_list(&session, &backend, form.into_inner(), vec![message]).await,
    };
    log::info!("Created event {} '{}'", id, input.name);
    switch_event(&session, &registry, id);
    set_flash(&session, format!("Event '{}' created", input.name));
    Ok(redirect("/admin"))
}

/// POST /events/{id}/select
pub async fn select(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let event = event::find_by_id(backend.pool(), id).await?.ok_or(AppError::NotFound)?;
    switch_event(&session, &registry, event.id);
    Ok(redirect("/admin"))
}

/// Release the session's previous event store and open the new one.
fn switch_event(session: &Session, registry: &StoreRegistry, event_id: i64) {
    match current_event_id(session) {
        Some(previous) if previous == event_id => return,
        Some(previous) => {
            registry.release(previous);
        }
        None => {}
    }
    registry.open(event_id);
    set_current_event(session, event_id);
}

/// GET /admin/config
pub async fn config_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    let event = store.event().ok_or(AppError::NoEventSelected)?;
    let form = EventForm::from_event(&event);
    render_config(&session, Some(&event), form, vec![], &config)
}

/// POST /admin/config
pub async fn config_update(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let event = store.event();
            return render_config(&session, event.as_ref(), form.into_inner(), errors, &config);
        }
    };

    match saved(event::update(backend.pool(), store.event_id(), &input).await, "save the event settings") {
        Ok(true) => {}
        Ok(false) => return Err(AppError::NotFound),
        Err(message) => {
            let event = store.event();
            return render_config(&session, event.as_ref(), form.into_inner(), vec![message], &config);
        }
    }
    reload(&session, &store, &backend).await;
    set_flash(&session, "Event settings saved");
    Ok(redirect("/admin/config"))
}

fn render_config(
    session: &Session,
    event: Option<&Event>,
    form: EventForm,
    errors: Vec<String>,
    config: &AppConfig,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, "config", event)?;
    render(ConfigTemplate {
        ctx,
        form,
        errors,
        refresh_secs: config.refresh_interval.as_secs(),
        storage_public_url: config.storage_public_url.clone(),
    })
}
