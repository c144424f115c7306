use askama::Template;

use super::{CheckOption, PageContext, SelectOption};
use crate::models::document::DocumentForm;
use crate::models::event::{Event, EventForm};
use crate::models::person::{Person, PersonForm};
use crate::models::task::TaskForm;
use crate::models::timeline::TimelineItemForm;
use crate::models::vendor::{Vendor, VendorForm};
use crate::planning::PersonalPlanning;
use crate::presentation::documents::DocumentCard;
use crate::presentation::timeline::{TaskRow, TimelineRow};
use crate::store::{DocumentStats, ProgressStats};

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub event: Event,
    pub days_until: i64,
    pub progress: ProgressStats,
    pub documents: DocumentStats,
    pub total_size_label: String,
    pub upcoming: Vec<TimelineRow>,
    pub critical_tasks: Vec<TaskRow>,
    pub timeline_count: usize,
    pub people_count: usize,
    pub vendor_count: usize,
}

#[derive(Template)]
#[template(path = "admin/tasks.html")]
pub struct TaskListTemplate {
    pub ctx: PageContext,
    pub rows: Vec<TaskRow>,
    pub progress: ProgressStats,
}

#[derive(Template)]
#[template(path = "admin/task_form.html")]
pub struct TaskFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: TaskForm,
    pub errors: Vec<String>,
    pub priorities: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
    pub people: Vec<SelectOption>,
    pub vendors: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "admin/planning.html")]
pub struct PlanningTemplate {
    pub ctx: PageContext,
    pub rows: Vec<TimelineRow>,
    pub total_duration: String,
}

#[derive(Template)]
#[template(path = "admin/timeline_form.html")]
pub struct TimelineFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: TimelineItemForm,
    pub errors: Vec<String>,
    pub categories: Vec<SelectOption>,
    pub priorities: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
    pub people: Vec<CheckOption>,
    pub vendors: Vec<SelectOption>,
}

pub struct PersonRow {
    pub person: Person,
    pub role_label: String,
    pub planning_size: usize,
}

#[derive(Template)]
#[template(path = "admin/people.html")]
pub struct PeopleTemplate {
    pub ctx: PageContext,
    pub rows: Vec<PersonRow>,
}

#[derive(Template)]
#[template(path = "admin/person_form.html")]
pub struct PersonFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: PersonForm,
    pub errors: Vec<String>,
    pub roles: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "admin/vendors.html")]
pub struct VendorListTemplate {
    pub ctx: PageContext,
    pub vendors: Vec<Vendor>,
}

#[derive(Template)]
#[template(path = "admin/vendor_form.html")]
pub struct VendorFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: VendorForm,
    pub errors: Vec<String>,
    pub statuses: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "admin/vendor_detail.html")]
pub struct VendorDetailTemplate {
    pub ctx: PageContext,
    pub vendor: Vendor,
    pub documents: Vec<DocumentCard>,
    pub planning: PersonalPlanning,
}

/// A document with its assignment controls.
pub struct DocumentRow {
    pub card: DocumentCard,
    pub assignees: String,
    pub people: Vec<CheckOption>,
}

#[derive(Template)]
#[template(path = "admin/documents.html")]
pub struct DocumentListTemplate {
    pub ctx: PageContext,
    pub quick_access: Vec<DocumentRow>,
    pub others: Vec<DocumentRow>,
    pub stats: DocumentStats,
    pub total_size_label: String,
}

#[derive(Template)]
#[template(path = "admin/document_form.html")]
pub struct DocumentFormTemplate {
    pub ctx: PageContext,
    pub form: DocumentForm,
    pub errors: Vec<String>,
    pub categories: Vec<SelectOption>,
    pub vendors: Vec<SelectOption>,
    pub people: Vec<CheckOption>,
}

#[derive(Template)]
#[template(path = "admin/config.html")]
pub struct ConfigTemplate {
    pub ctx: PageContext,
    pub form: EventForm,
    pub errors: Vec<String>,
    pub refresh_secs: u64,
    pub storage_public_url: String,
}
