use askama::Template;

use super::PageContext;
use crate::planning::PersonalPlanning;
use crate::presentation::documents::DocumentCard;

/// Personal planning page, shared by people and vendors.
#[derive(Template)]
#[template(path = "participants/planning.html")]
pub struct PersonalPlanningTemplate {
    pub ctx: PageContext,
    pub owner_name: String,
    pub owner_kind: String,
    pub owner_detail: Option<String>,
    pub planning: PersonalPlanning,
    pub documents: Vec<DocumentCard>,
}
