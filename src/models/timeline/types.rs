use serde::{Deserialize, Serialize};

use crate::models::fields::{id_list, join_ids, non_empty, optional_id};
use crate::models::priority::Priority;
use crate::planning::time::ClockTime;

pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_DELAYED: &str = "delayed";
pub const TIMELINE_STATUSES: &[&str] =
    &[STATUS_SCHEDULED, STATUS_IN_PROGRESS, STATUS_COMPLETED, STATUS_DELAYED];

pub const DEFAULT_CATEGORY: &str = "Préparation";
pub const DEFAULT_TIME: &str = "08:00";
pub const DEFAULT_DURATION: i32 = 60;

/// A scheduled, time-boxed step of the event day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimelineItem {
    pub id: i64,
    pub event_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub time: String, // HH:MM or HH:MM:SS
    pub duration: i32, // minutes, > 0
    pub category: String,
    pub priority: String,
    pub status: String,
    pub assigned_person_ids: Vec<i64>,
    pub assigned_vendor_ids: Vec<i64>,
    pub assigned_role: Option<String>,
    pub notes: Option<String>,
    pub position: i32,
}

impl TimelineItem {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    pub fn start(&self) -> Option<ClockTime> {
        self.time.parse().ok()
    }

    /// Duration clamped to zero, for arithmetic on rows that predate the check constraint.
    pub fn duration_minutes(&self) -> u32 {
        u32::try_from(self.duration).unwrap_or(0)
    }
}

/// Form input for the timeline item editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineItemForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assigned_person_ids: Option<String>, // comma-separated person ids
    #[serde(default)]
    pub assigned_vendor_id: Option<String>, // "none" or a vendor id
    #[serde(default)]
    pub assigned_role: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

/// Validated timeline item payload, ready for insert/update.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItemInput {
    pub title: String,
    pub description: Option<String>,
    pub time: ClockTime,
    pub duration: i32,
    pub category: String,
    pub priority: Priority,
    pub status: String,
    pub assigned_person_ids: Vec<i64>,
    pub assigned_vendor_ids: Vec<i64>,
    pub assigned_role: Option<String>,
    pub notes: Option<String>,
}

impl TimelineItemForm {
    /// Prefill the editor from an existing item.
    pub fn from_item(item: &TimelineItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            time: Some(crate::planning::time::display_time(&item.time).to_string()),
            duration: Some(item.duration.to_string()),
            category: Some(item.category.clone()),
            priority: Some(item.priority.clone()),
            status: Some(item.status.clone()),
            assigned_person_ids: Some(join_ids(&item.assigned_person_ids)),
            assigned_vendor_id: Some(
                item.assigned_vendor_ids
                    .first()
                    .map_or_else(|| "none".to_string(), i64::to_string),
            ),
            assigned_role: item.assigned_role.clone(),
            notes: item.notes.clone(),
            csrf_token: String::new(),
        }
    }

    /// Defaults shown for a brand-new item.
    pub fn blank() -> Self {
        Self {
            time: Some(DEFAULT_TIME.to_string()),
            duration: Some(DEFAULT_DURATION.to_string()),
            category: Some(DEFAULT_CATEGORY.to_string()),
            priority: Some(Priority::Medium.as_str().to_string()),
            status: Some(STATUS_SCHEDULED.to_string()),
            assigned_vendor_id: Some("none".to_string()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<TimelineItemInput, Vec<String>> {
        let mut errors = vec![];

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("Title is required".to_string());
        }

        let raw_time = non_empty(self.time.as_deref()).unwrap_or_else(|| DEFAULT_TIME.to_string());
        let time = match raw_time.parse::<ClockTime>() {
            Ok(t) => Some(t),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        let duration = match non_empty(self.duration.as_deref()) {
            None => DEFAULT_DURATION,
            Some(raw) => match raw.parse::<i32>() {
                Ok(d) if d > 0 => d,
                _ => {
                    errors.push("Duration must be a positive number of minutes".to_string());
                    DEFAULT_DURATION
                }
            },
        };

        let priority = match non_empty(self.priority.as_deref()) {
            None => Priority::Medium,
            Some(raw) => Priority::parse(&raw).unwrap_or_else(|| {
                errors.push(format!("Unknown priority '{raw}'"));
                Priority::Medium
            }),
        };

        let status = non_empty(self.status.as_deref()).unwrap_or_else(|| STATUS_SCHEDULED.to_string());
        if !TIMELINE_STATUSES.contains(&status.as_str()) {
            errors.push(format!("Unknown status '{status}'"));
        }

        let assigned_person_ids = id_list(self.assigned_person_ids.as_deref(), "Assigned people")
            .unwrap_or_else(|e| {
                errors.push(e);
                vec![]
            });
        let assigned_vendor_ids = optional_id(self.assigned_vendor_id.as_deref(), "Assigned vendor")
            .unwrap_or_else(|e| {
                errors.push(e);
                None
            })
            .into_iter()
            .collect();

        match time {
            Some(time) if errors.is_empty() => Ok(TimelineItemInput {
                title: title.to_string(),
                description: non_empty(self.description.as_deref()),
                time,
                duration,
                category: non_empty(self.category.as_deref())
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                priority,
                status,
                assigned_person_ids,
                assigned_vendor_ids,
                assigned_role: non_empty(self.assigned_role.as_deref()),
                notes: non_empty(self.notes.as_deref()),
            }),
            _ => Err(errors),
        }
    }
}
