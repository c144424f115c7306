pub mod auth_handlers;
pub mod dashboard;
pub mod document_handlers;
pub mod event_handlers;
pub mod participant_handlers;
pub mod people_handlers;
pub mod planning_handlers;
pub mod task_handlers;
pub mod vendor_handlers;

use std::sync::Arc;

use actix_session::Session;
use actix_web::HttpResponse;
use serde::Deserialize;

use crate::auth::session::{current_event_id, set_flash};
use crate::errors::AppError;
use crate::models::person::Person;
use crate::models::vendor::Vendor;
use crate::store::{BackendError, EventStore, PgBackend, RefreshTrigger, StoreError, StoreRegistry};
use crate::templates_structs::{CheckOption, SelectOption};

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Store of the session's current event, loaded on first use.
///
/// Collections that fail to load are reported through the flash message and
/// keep whatever the store held before.
pub async fn current_store(
    session: &Session,
    registry: &StoreRegistry,
    backend: &PgBackend,
) -> Result<Arc<EventStore>, AppError> {
    let event_id = current_event_id(session).ok_or(AppError::NoEventSelected)?;
    let store = registry.get_or_open(event_id);
    let report = store.ensure_loaded(backend).await;
    flash_failures(session, &report.failed);

    if store.event().is_some() {
        return Ok(store);
    }
    if report.failed.contains(&"event") {
        return Err(StoreError::Backend(BackendError::Unavailable(format!("event {event_id} could not be loaded"))).into());
    }

    // The event is gone: forget it and send the user back to the picker.
    log::warn!("Event {} no longer exists, closing its store", event_id);
    registry.close(event_id);
    session.remove("event_id");
    Err(AppError::NoEventSelected)
}

/// Explicit refresh after a write, so the next page shows stored data.
pub async fn reload(session: &Session, store: &EventStore, backend: &PgBackend) {
    let report = store.refresh(backend, RefreshTrigger::Explicit).await;
    flash_failures(session, &report.failed);
}

/// Result of a database write driven by a form.
///
/// A rejected write is logged and turned into the message shown to the user;
/// the caller reports it and leaves the store as it was.
pub fn saved<T>(result: sqlx::Result<T>, action: &str) -> Result<T, String> {
    result.map_err(|e| {
        log::error!("Failed to {action}: {e}");
        write_failure_message(action, &e)
    })
}

pub fn write_failure_message(action: &str, error: &sqlx::Error) -> String {
    match error {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            format!("Could not {action}: it refers to an entry that no longer exists. Reload the page and try again.")
        }
        sqlx::Error::Database(db) if db.is_check_violation() => {
            format!("Could not {action}: some values were rejected.")
        }
        _ => format!("Could not {action}. Please try again."),
    }
}

fn flash_failures(session: &Session, failed: &[&'static str]) {
    if !failed.is_empty() {
        set_flash(session, format!("Some data could not be refreshed: {}", failed.join(", ")));
    }
}

/// Person select box with a leading "nobody" entry.
pub fn person_options(people: &[Person], current: Option<&str>) -> Vec<SelectOption> {
    let current = current.filter(|c| !c.is_empty()).or(Some("none"));
    std::iter::once(SelectOption::new("none", "Nobody", current))
        .chain(people.iter().map(|p| SelectOption::new(p.id.to_string(), p.name.clone(), current)))
        .collect()
}

/// Vendor select box with a leading "no vendor" entry.
pub fn vendor_options(vendors: &[Vendor], current: Option<&str>) -> Vec<SelectOption> {
    let current = current.filter(|c| !c.is_empty()).or(Some("none"));
    std::iter::once(SelectOption::new("none", "No vendor", current))
        .chain(vendors.iter().map(|v| {
            let label = match &v.service_type {
                Some(service) => format!("{} ({})", v.name, service),
                None => v.name.clone(),
            };
            SelectOption::new(v.id.to_string(), label, current)
        }))
        .collect()
}

/// Checkboxes for assigning several people at once.
pub fn people_checkboxes(people: &[Person], checked: &[i64]) -> Vec<CheckOption> {
    people
        .iter()
        .map(|p| CheckOption { value: p.id, label: p.name.clone(), checked: checked.contains(&p.id) })
        .collect()
}

/// Options from a fixed list of stored values and their labels.
pub fn fixed_options(values: &[(&str, &str)], current: Option<&str>) -> Vec<SelectOption> {
    values
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label, current))
        .collect()
}
