use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::{render, AppError};
use crate::handlers::current_store;
use crate::store::{PgBackend, StoreRegistry};
use crate::templates_structs::{PageContext, VendorListTemplate};

/// GET /admin/vendors
pub async fn list(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    let snapshot = store.snapshot();
    let ctx = PageContext::build(&session, "vendors", snapshot.event.as_ref())?;
    render(VendorListTemplate { ctx, vendors: snapshot.vendors })
}
