use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use super::session::get_user_id;

/// Redirect to /login unless the session belongs to a signed-in user.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();

    if get_user_id(&session).is_none() {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
