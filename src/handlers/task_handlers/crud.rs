use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::errors::{render, AppError};
use crate::handlers::{current_store, fixed_options, person_options, redirect, reload, saved, vendor_options, CsrfOnly};
use crate::models::priority::PRIORITIES;
use crate::models::task::{self, TaskForm, STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_PENDING};
use crate::store::{EventSnapshot, PgBackend, StoreRegistry};
use crate::templates_structs::{PageContext, TaskFormTemplate};

const STATUS_LABELS: &[(&str, &str)] = &[
    (STATUS_PENDING, "Pending"),
    (STATUS_IN_PROGRESS, "In progress"),
    (STATUS_COMPLETED, "Completed"),
];

fn render_form(
    session: &Session,
    snapshot: &EventSnapshot,
    form_action: String,
    form_title: &str,
    form: TaskForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let priorities = PRIORITIES
        .iter()
        .map(|p| (p.as_str(), p.label()))
        .collect::<Vec<_>>();
    let ctx = PageContext::build(session, "tasks", snapshot.event.as_ref())?;
    render(TaskFormTemplate {
        ctx,
        form_action,
        form_title: form_title.to_string(),
        priorities: fixed_options(&priorities, form.priority.as_deref().or(Some("medium"))),
        statuses: fixed_options(STATUS_LABELS, form.status.as_deref().or(Some(STATUS_PENDING))),
        people: person_options(&snapshot.people, form.assigned_person_id.as_deref()),
        vendors: vendor_options(&snapshot.vendors, form.assigned_vendor_id.as_deref()),
        form,
        errors,
    })
}

/// GET /admin/tasks/new
pub async fn new_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    render_form(&session, &store.snapshot(), "/admin/tasks".to_string(), "New task", TaskForm::default(), vec![])
}

/// POST /admin/tasks
pub async fn create(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    form: web::Form<TaskForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let form = form.into_inner();
            return render_form(&session, &store.snapshot(), "/admin/tasks".to_string(), "New task", form, errors);
        }
    };

    if let Err(message) = saved(task::create(backend.pool(), store.event_id(), &input).await, "create the task") {
        let form = form.into_inner();
        return render_form(&session, &store.snapshot(), "/admin/tasks".to_string(), "New task", form, vec![message]);
    }
    reload(&session, &store, &backend).await;
    set_flash(&session, format!("Task '{}' created", input.title));
    Ok(redirect("/admin/tasks"))
}

/// GET /admin/tasks/{id}/edit
pub async fn edit_form(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;
    let existing = task::find_by_id(backend.pool(), store.event_id(), id)
        .await?
        .ok_or(AppError::NotFound)?;
    render_form(
        &session,
        &store.snapshot(),
        format!("/admin/tasks/{id}"),
        "Edit task",
        TaskForm::from_task(&existing),
        vec![],
    )
}

/// POST /admin/tasks/{id}
pub async fn update(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<TaskForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let store = current_store(&session, &registry, &backend).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let form = form.into_inner();
            return render_form(&session, &store.snapshot(), format!("/admin/tasks/{id}"), "Edit task", form, errors);
        }
    };

    match saved(task::update(backend.pool(), store.event_id(), id, &input).await, "update the task") {
        Ok(true) => {}
        Ok(false) => return Err(AppError::NotFound),
        Err(message) => {
            let form = form.into_inner();
            return render_form(&session, &store.snapshot(), format!("/admin/tasks/{id}"), "Edit task", form, vec![message]);
        }
    }
    reload(&session, &store, &backend).await;
    set_flash(&session, "Task updated");
    Ok(redirect("/admin/tasks"))
}

/// POST /admin/tasks/{id}/delete
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

    match saved(task::delete(backend.pool(), store.event_id(), id).await, "delete the task") {
        Ok(true) => {
            reload(&session, &store, &backend).await;
            set_flash(&session, "Task deleted");
        }
        Ok(false) => set_flash(&session, "Task not found"),
        Err(message) => set_flash(&session, message),
    }
    Ok(redirect("/admin/tasks"))
}
