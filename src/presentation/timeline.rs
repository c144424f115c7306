use crate::models::person::Person;
use crate::models::task::Task;
use crate::models::timeline::TimelineItem;
use crate::models::vendor::Vendor;
use crate::planning::time;
use crate::presentation::Tone;

/// Timeline item category. Stored as the French label; unknown values fall
/// back to `Preparation`, which is also the form default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineCategory {
    Preparation,
    Logistics,
    Ceremony,
    Photos,
    Reception,
}

impl TimelineCategory {
    pub const ALL: [TimelineCategory; 5] = [
        TimelineCategory::Preparation,
        TimelineCategory::Logistics,
        TimelineCategory::Ceremony,
        TimelineCategory::Photos,
        TimelineCategory::Reception,
    ];

    pub fn classify(category: &str) -> Self {
        match category.trim() {
            "Logistique" => TimelineCategory::Logistics,
            "Cérémonie" => TimelineCategory::Ceremony,
            "Photos" => TimelineCategory::Photos,
            "Réception" => TimelineCategory::Reception,
            _ => TimelineCategory::Preparation,
        }
    }

    pub fn stored_value(self) -> &'static str {
        match self {
            TimelineCategory::Preparation => "Préparation",
            TimelineCategory::Logistics => "Logistique",
            TimelineCategory::Ceremony => "Cérémonie",
            TimelineCategory::Photos => "Photos",
            TimelineCategory::Reception => "Réception",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            TimelineCategory::Preparation => Tone::Purple,
            TimelineCategory::Logistics => Tone::Blue,
            TimelineCategory::Ceremony => Tone::Pink,
            TimelineCategory::Photos => Tone::Yellow,
            TimelineCategory::Reception => Tone::Green,
        }
    }
}

/// Status of a timeline item or task, with its badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBadge {
    Scheduled,
    Pending,
    InProgress,
    Completed,
    Delayed,
    Unknown,
}

impl StatusBadge {
    pub fn classify(status: &str) -> Self {
        match status {
            "scheduled" => StatusBadge::Scheduled,
            "pending" => StatusBadge::Pending,
            "in_progress" => StatusBadge::InProgress,
            "completed" => StatusBadge::Completed,
            "delayed" => StatusBadge::Delayed,
            _ => StatusBadge::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusBadge::Scheduled => "📅 Scheduled",
            StatusBadge::Pending => "⏳ Pending",
            StatusBadge::InProgress => "🔄 In progress",
            StatusBadge::Completed => "✅ Completed",
            StatusBadge::Delayed => "⚠️ Delayed",
            StatusBadge::Unknown => "Unknown",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            StatusBadge::Scheduled => Tone::Blue,
            StatusBadge::Pending => Tone::Gray,
            StatusBadge::InProgress => Tone::Yellow,
            StatusBadge::Completed => Tone::Green,
            StatusBadge::Delayed => Tone::Red,
            StatusBadge::Unknown => Tone::Gray,
        }
    }
}

/// Human label for a person role key. Unknown keys are shown with their
/// first dash replaced by a space.
pub fn role_label(role: &str) -> String {
    let known = match role {
        "bride" => Some("Bride"),
        "groom" => Some("Groom"),
        "best-man" => Some("Best man"),
        "maid-of-honor" => Some("Maid of honor"),
        "wedding-planner" => Some("Wedding planner"),
        "photographer" => Some("Photographer"),
        "caterer" => Some("Caterer"),
        "guest" => Some("Guest"),
        "family" => Some("Family"),
        _ => None,
    };
    known.map_or_else(|| role.replacen('-', " ", 1), str::to_string)
}

pub const PERSON_ROLES: &[&str] = &[
    "bride",
    "groom",
    "best-man",
    "maid-of-honor",
    "wedding-planner",
    "photographer",
    "caterer",
    "guest",
    "family",
];

/// Who a timeline item is assigned to, for the list view.
///
/// Names of assigned people, in assignment order; ids that no longer resolve
/// are skipped. With no names, the legacy role takes over, then "Unassigned".
pub fn assignee_display(item: &TimelineItem, people: &[Person]) -> String {
    let names: Vec<&str> = item
        .assigned_person_ids
        .iter()
        .filter_map(|id| people.iter().find(|p| p.id == *id))
        .map(|p| p.name.as_str())
        .collect();

    match names.len() {
        0 => item
            .assigned_role
            .as_deref()
            .filter(|r| !r.is_empty())
            .map_or_else(|| "Unassigned".to_string(), role_label),
        1 | 2 => names.join(", "),
        n => {
            let rest = n - 2;
            let plural = if rest > 1 { "s" } else { "" };
            format!("{} and {rest} other{plural}", names[..2].join(", "))
        }
    }
}

/// A timeline item prepared for the admin list.
#[derive(Debug, Clone)]
pub struct TimelineRow {
    pub item: TimelineItem,
    pub index: usize,
    pub start: String,
    pub end: String,
    pub duration_label: String,
    pub assignees: String,
    pub vendor_name: Option<String>,
    pub category_class: &'static str,
    pub status: StatusBadge,
}

impl TimelineRow {
    pub fn new(index: usize, item: TimelineItem, people: &[Person], vendor_name: Option<String>) -> Self {
        let duration = item.duration_minutes();
        let start = time::display_time(&item.time).to_string();
        let end = time::end_time(&item.time, duration).unwrap_or_else(|_| start.clone());
        Self {
            index,
            start,
            end,
            duration_label: time::format_duration(duration),
            assignees: assignee_display(&item, people),
            vendor_name,
            category_class: TimelineCategory::classify(&item.category).tone().css_class(),
            status: StatusBadge::classify(&item.status),
            item,
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn status_class(&self) -> &'static str {
        self.status.tone().css_class()
    }
}

/// A task prepared for the admin list.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub task: Task,
    pub assignee: String,
    pub status: StatusBadge,
    pub critical: bool,
}

impl TaskRow {
    pub fn new(task: Task, people: &[Person], vendors: &[Vendor]) -> Self {
        let person = task
            .assigned_person_id
            .and_then(|id| people.iter().find(|p| p.id == id))
            .map(|p| p.name.clone());
        let vendor = task
            .assigned_vendor_id
            .and_then(|id| vendors.iter().find(|v| v.id == id))
            .map(|v| v.name.clone());
        Self {
            assignee: person.or(vendor).unwrap_or_else(|| "Unassigned".to_string()),
            status: StatusBadge::classify(&task.status),
            critical: task.is_critical(),
            task,
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn status_class(&self) -> &'static str {
        self.status.tone().css_class()
    }
}
