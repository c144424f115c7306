use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::fields::{id_list, non_empty, optional_id, optional_positive};

/// A document attached to the event (and optionally to a vendor).
/// The bytes live in external storage; only URLs and paths are kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub mime_type: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub source: String, // google_drive | manual | other
    pub assigned_to: Vec<i64>,
    pub file_url: Option<String>,
    pub file_path: Option<String>,
    pub google_drive_url: Option<String>,
    pub vendor_id: Option<i64>,
    pub uploaded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// MIME type, falling back to the looser file type.
    pub fn content_type(&self) -> Option<&str> {
        self.mime_type.as_deref().or(self.file_type.as_deref())
    }

    pub fn is_assigned_to(&self, person_id: i64) -> bool {
        self.assigned_to.contains(&person_id)
    }
}

/// Form input for registering a document already held in storage or Drive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentForm {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>, // comma-separated person ids
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub google_drive_url: Option<String>,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInput {
    pub name: String,
    pub category: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
    pub source: String,
    pub assigned_to: Vec<i64>,
    pub file_url: Option<String>,
    pub file_path: Option<String>,
    pub google_drive_url: Option<String>,
    pub vendor_id: Option<i64>,
}

impl DocumentForm {
    pub fn validate(&self) -> Result<DocumentInput, Vec<String>> {
        let mut errors = vec![];

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("Name is required".to_string());
        }

        let file_url = non_empty(self.file_url.as_deref());
        let file_path = non_empty(self.file_path.as_deref());
        let google_drive_url = non_empty(self.google_drive_url.as_deref());
        if file_url.is_none() && file_path.is_none() && google_drive_url.is_none() {
            errors.push("A file URL, storage path or Google Drive link is required".to_string());
        }

        let source = non_empty(self.source.as_deref()).unwrap_or_else(|| {
            if google_drive_url.is_some() { "google_drive" } else { "manual" }.to_string()
        });

        let file_size = optional_positive(self.file_size.as_deref(), "File size").unwrap_or_else(|e| {
            errors.push(e);
            None
        });
        let assigned_to = id_list(self.assigned_to.as_deref(), "Assigned people").unwrap_or_else(|e| {
            errors.push(e);
            vec![]
        });
        let vendor_id = optional_id(self.vendor_id.as_deref(), "Vendor").unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(DocumentInput {
            name: name.to_string(),
            category: non_empty(self.category.as_deref()),
            mime_type: non_empty(self.mime_type.as_deref()),
            file_size,
            source,
            assigned_to,
            file_url,
            file_path,
            google_drive_url,
            vendor_id,
        })
    }
}
