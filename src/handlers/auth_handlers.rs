use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::session::{current_event_id, get_user_id, sign_in};
use crate::auth::{csrf, password};
use crate::errors::{render, AppError};
use crate::handlers::{redirect, CsrfOnly};
use crate::models::user;
use crate::store::{PgBackend, StoreRegistry};
use crate::templates_structs::{LoginTemplate, APP_NAME};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

fn login_page_with(session: &Session, error: Option<&str>) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::get_or_create_token(session);
    render(LoginTemplate {
        error: error.map(str::to_string),
        app_name: APP_NAME.to_string(),
        csrf_token,
    })
}

/// GET /login
pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(redirect("/admin"));
    }
    login_page_with(&session, None)
}

/// POST /login
pub async fn login_submit(
    backend: web::Data<PgBackend>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let found = user::find_by_username(backend.pool(), form.username.trim()).await?;
    let Some(u) = found else {
        return login_page_with(&session, Some("Invalid username or password"));
    };

    match password::verify_password(&form.password, &u.password_hash) {
        Ok(true) => {
            sign_in(&session, u.id, &u.username);
            log::info!("User '{}' signed in", u.username);
            Ok(redirect("/events"))
        }
        Ok(false) => login_page_with(&session, Some("Invalid username or password")),
        Err(e) => Err(AppError::Hash(e)),
    }
}

/// POST /logout
/// Lets go of the current event's store, then drops the session.
pub async fn logout(
    registry: web::Data<StoreRegistry>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    if let Some(event_id) = current_event_id(&session) {
        registry.release(event_id);
    }
    session.purge();
    Ok(redirect("/login"))
}
