use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::handlers::{current_store, people_checkboxes};
use crate::models::document::Document;
use crate::models::person::Person;
use crate::presentation::documents::{format_file_size, split_quick_access, DocumentCard};
use crate::store::{PgBackend, StoreRegistry};
use crate::templates_structs::{DocumentListTemplate, DocumentRow, PageContext};

fn assignee_names(doc: &Document, people: &[Person]) -> String {
    let names: Vec<&str> = people
        .iter()
        .filter(|p| doc.is_assigned_to(p.id))
        .map(|p| p.name.as_str())
        .collect();
    if names.is_empty() { "Everyone".to_string() } else { names.join(", ") }
}

/// GET /admin/documents
/// Planning, legal and contract documents are listed first.
pub async fn list(
    backend: web::Data<PgBackend>,
    registry: web::Data<StoreRegistry>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let store = current_store(&session, &registry, &backend).await?;
    let snapshot = store.snapshot();

    let cards = snapshot
        .documents
        .iter()
        .cloned()
        .map(|d| DocumentCard::new(d, &config.storage_public_url))
        .collect();
    let (quick_access, others) = split_quick_access(cards);
    let to_rows = |cards: Vec<DocumentCard>| -> Vec<DocumentRow> {
        cards
            .into_iter()
            .map(|card| DocumentRow {
                assignees: assignee_names(&card.document, &snapshot.people),
                people: people_checkboxes(&snapshot.people, &card.document.assigned_to),
                card,
            })
            .collect()
    };

    let stats = store.document_stats();
    let ctx = PageContext::build(&session, "documents", snapshot.event.as_ref())?;
    render(DocumentListTemplate {
        ctx,
        quick_access: to_rows(quick_access),
        others: to_rows(others),
        total_size_label: format_file_size(Some(stats.total_size)),
        stats,
    })
}
