// Template context structures for askama templates, organized by section.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{get_username, take_flash};
use crate::errors::AppError;
use crate::models::event::Event;

mod admin;
mod common;
mod participants;

pub use admin::*;
pub use common::*;
pub use participants::*;

pub const APP_NAME: &str = "Jour J";

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.username`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
    pub event: Option<EventContext>,
    pub active_section: String,
}

/// The event the session is working on, for the header and sidebar.
pub struct EventContext {
    pub event_id: i64,
    pub event_name: String,
    pub event_date: String,
}

impl PageContext {
    pub fn build(session: &Session, active_section: &str, event: Option<&Event>) -> Result<Self, AppError> {
        let username = get_username(session)
            .map_err(|e| AppError::Session(format!("Failed to get username: {}", e)))?;
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        let avatar_initial = username.chars().next().unwrap_or('?').to_uppercase().to_string();
        let event = event.map(|e| EventContext {
            event_id: e.id,
            event_name: e.name.clone(),
            event_date: e.event_date.format("%d/%m/%Y").to_string(),
        });
        Ok(Self {
            username,
            avatar_initial,
            flash,
            app_name: APP_NAME.to_string(),
            csrf_token,
            event,
            active_section: active_section.to_string(),
        })
    }

    pub fn is_active(&self, section: &str) -> bool {
        self.active_section == section
    }
}

/// One `<option>` of a select box.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, current: Option<&str>) -> Self {
        let value = value.into();
        let selected = current == Some(value.as_str());
        Self { value, label: label.into(), selected }
    }
}

/// One checkbox of a multi-select, e.g. people assigned to a timeline item.
#[derive(Debug, Clone)]
pub struct CheckOption {
    pub value: i64,
    pub label: String,
    pub checked: bool,
}
