use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::fields::non_empty;

/// Someone taking part in the event: couple, witnesses, family, guests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub role: String, // role key, e.g. "best-man"; free text allowed
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonForm {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonInput {
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PersonForm {
    pub fn from_person(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            role: Some(person.role.clone()),
            email: person.email.clone(),
            phone: person.phone.clone(),
            csrf_token: String::new(),
        }
    }

    pub fn validate(&self) -> Result<PersonInput, Vec<String>> {
        let mut errors = vec![];
        let name = self.name.trim();
        if name.is_empty() {
            errors.push("Name is required".to_string());
        }
        let email = non_empty(self.email.as_deref());
        if let Some(e) = &email {
            if !e.contains('@') {
                errors.push("Email must be a valid address".to_string());
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PersonInput {
            name: name.to_string(),
            role: non_empty(self.role.as_deref()).unwrap_or_else(|| "guest".to_string()),
            email,
            phone: non_empty(self.phone.as_deref()),
        })
    }
}
