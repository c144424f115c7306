use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const CSRF_TOKEN: &str = "csrf_token";

/// Get the CSRF token from the session, or generate a new one.
pub fn get_or_create_token(session: &Session) -> String {
    if let Ok(Some(token)) = session.get::<String>(CSRF_TOKEN) {
        return token;
    }
    let token = generate_token();
    let _ = session.insert(CSRF_TOKEN, &token);
    token
}

/// Validate the submitted CSRF token against the session token.
pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    let stored = session
        .get::<String>(CSRF_TOKEN)
        .unwrap_or(None)
        .unwrap_or_default();
    if stored.is_empty() || !constant_time_eq(&stored, submitted) {
        return Err(AppError::Csrf);
    }
    Ok(())
}

/// Random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
