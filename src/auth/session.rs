use actix_session::Session;

const USER_ID: &str = "user_id";
const USERNAME: &str = "username";
const EVENT_ID: &str = "event_id";
const FLASH: &str = "flash";

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID).unwrap_or(None)
}

pub fn get_username(session: &Session) -> Result<String, String> {
    match session.get::<String>(USERNAME) {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err("No username in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

pub fn sign_in(session: &Session, user_id: i64, username: &str) {
    session.renew();
    let _ = session.insert(USER_ID, user_id);
    let _ = session.insert(USERNAME, username);
}

/// The event this session is working on.
pub fn current_event_id(session: &Session) -> Option<i64> {
    session.get::<i64>(EVENT_ID).unwrap_or(None)
}

pub fn set_current_event(session: &Session, event_id: i64) {
    let _ = session.insert(EVENT_ID, event_id);
}

pub fn set_flash(session: &Session, message: impl Into<String>) {
    let _ = session.insert(FLASH, message.into());
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH);
    }
    flash
}
