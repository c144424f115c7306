use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::store::{BackendError, StoreError};

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Template(askama::Error),
    Store(StoreError),
    Session(String),
    Csrf,
    Hash(String),
    /// The session has no event selected yet; sends the user to the event picker.
    NoEventSelected,
    NotFound,
    BadRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Store(e) => write!(f, "Store error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::NoEventSelected => write!(f, "No event selected"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::BadRequest(e) => write!(f, "Bad request: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Csrf => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NoEventSelected => StatusCode::SEE_OTHER,
            AppError::Store(StoreError::Reorder(_)) | AppError::Store(StoreError::UnknownTask(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Store(StoreError::Backend(BackendError::NotFound { .. })) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NoEventSelected => HttpResponse::SeeOther()
                .insert_header(("Location", "/events"))
                .finish(),
            AppError::NotFound => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(include_str!("../templates/errors/404.html")),
            AppError::Csrf => {
                log::warn!("{self}");
                HttpResponse::Forbidden().body("Invalid or missing CSRF token")
            }
            AppError::BadRequest(msg) => HttpResponse::BadRequest().body(msg.clone()),
            _ => {
                log::error!("{self}");
                HttpResponse::build(self.status_code()).body(match self.status_code() {
                    StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error".to_string(),
                    _ => self.to_string(),
                })
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        AppError::Store(StoreError::Backend(e))
    }
}

/// Render an askama template into an HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(body))
}
