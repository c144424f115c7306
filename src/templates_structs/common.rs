use std::borrow::Borrow;

use askama::Template;

use super::PageContext;
use crate::models::event::{Event, EventForm};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventListTemplate {
    pub ctx: PageContext,
    pub events: Vec<Event>,
    pub current_event_id: Option<i64>,
    pub form: EventForm,
    pub errors: Vec<String>,
}

impl EventListTemplate {
    pub fn is_current(&self, event_id: impl Borrow<i64>) -> bool {
        self.current_event_id == Some(*event_id.borrow())
    }
}
