use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::fields::non_empty;

/// The wedding (or other event) everything else hangs off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Form input for creating/configuring an event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventForm {
    pub name: String,
    pub event_date: String, // YYYY-MM-DD
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventInput {
    pub name: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl EventForm {
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            event_date: event.event_date.format("%Y-%m-%d").to_string(),
            location: event.location.clone(),
            description: event.description.clone(),
            csrf_token: String::new(),
        }
    }

    pub fn validate(&self) -> Result<EventInput, Vec<String>> {
        let mut errors = vec![];

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("Name is required".to_string());
        }

        let event_date = match NaiveDate::parse_from_str(self.event_date.trim(), "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                errors.push("Event date must be a valid date (YYYY-MM-DD)".to_string());
                None
            }
        };

        match event_date {
            Some(event_date) if errors.is_empty() => Ok(EventInput {
                name: name.to_string(),
                event_date,
                location: non_empty(self.location.as_deref()),
                description: non_empty(self.description.as_deref()),
            }),
            _ => Err(errors),
        }
    }
}
