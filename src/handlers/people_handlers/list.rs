use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::{render, AppError};
use crate::handlers::current_store;
use crate::planning::PlanningOwner;
use crate::presentation::timeline::role_label;
use crate::store::{PgBackend, StoreRegistry};
use crate::templates_structs::{PageContext, PeopleTemplate, PersonRow};

/// GET /admin/people
pub async fn list(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    let snapshot = store.snapshot();

    let rows = snapshot
        .people
        .iter()
        .map(|person| PersonRow {
            role_label: role_label(&person.role),
            planning_size: store.personal_planning(&PlanningOwner::Person(person.id)).total(),
            person: person.clone(),
        })
        .collect();

    let ctx = PageContext::build(&session, "people", snapshot.event.as_ref())?;
    render(PeopleTemplate { ctx, rows })
}
