use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::fields::{non_empty, optional_id, optional_positive};
use crate::models::priority::Priority;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";
pub const TASK_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// A to-do item without a fixed time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub event_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub assigned_person_id: Option<i64>,
    pub assigned_vendor_id: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    /// High priority and still open.
    pub fn is_critical(&self) -> bool {
        Priority::parse(&self.priority) == Some(Priority::High) && !self.is_completed()
    }

    /// Status a completion checkbox maps to.
    pub fn status_for_completion(completed: bool) -> &'static str {
        if completed { STATUS_COMPLETED } else { STATUS_PENDING }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assigned_person_id: Option<String>,
    #[serde(default)]
    pub assigned_vendor_id: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: String,
    pub assigned_person_id: Option<i64>,
    pub assigned_vendor_id: Option<i64>,
    pub duration_minutes: Option<i32>,
}

impl TaskForm {
    /// Prefill the editor from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: Some(task.priority.clone()),
            status: Some(task.status.clone()),
            assigned_person_id: task.assigned_person_id.map(|id| id.to_string()),
            assigned_vendor_id: task.assigned_vendor_id.map(|id| id.to_string()),
            duration_minutes: task.duration_minutes.map(|d| d.to_string()),
            csrf_token: String::new(),
        }
    }

    pub fn validate(&self) -> Result<TaskInput, Vec<String>> {
        let mut errors = vec![];

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("Title is required".to_string());
        }

        let priority = match non_empty(self.priority.as_deref()) {
            None => Priority::Medium,
            Some(raw) => Priority::parse(&raw).unwrap_or_else(|| {
                errors.push(format!("Unknown priority '{raw}'"));
                Priority::Medium
            }),
        };

        let status = non_empty(self.status.as_deref()).unwrap_or_else(|| STATUS_PENDING.to_string());
        if !TASK_STATUSES.contains(&status.as_str()) {
            errors.push(format!("Unknown status '{status}'"));
        }

        let assigned_person_id = optional_id(self.assigned_person_id.as_deref(), "Assigned person")
            .unwrap_or_else(|e| {
                errors.push(e);
                None
            });
        let assigned_vendor_id = optional_id(self.assigned_vendor_id.as_deref(), "Assigned vendor")
            .unwrap_or_else(|e| {
                errors.push(e);
                None
            });
        let duration_minutes = optional_positive(self.duration_minutes.as_deref(), "Duration")
            .unwrap_or_else(|e| {
                errors.push(e);
                None
            })
            .and_then(|d| i32::try_from(d).ok());

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TaskInput {
            title: title.to_string(),
            description: non_empty(self.description.as_deref()),
            priority,
            status,
            assigned_person_id,
            assigned_vendor_id,
            duration_minutes,
        })
    }
}
