//! Display helpers for documents, timeline rows and tasks.

mod common;

use common::*;
use jourj::presentation::documents::{
    download_url, format_file_size, split_quick_access, view_url, DocumentCard, DocumentCategory, DocumentSource,
    FileIcon,
};
use jourj::presentation::timeline::{assignee_display, role_label, StatusBadge, TaskRow, TimelineCategory, TimelineRow};

const STORAGE: &str = "https://storage.example.com/public/";

#[test]
fn test_file_sizes_use_the_largest_fitting_unit() {
    assert_eq!(format_file_size(None), "0 Bytes");
    assert_eq!(format_file_size(Some(0)), "0 Bytes");
    assert_eq!(format_file_size(Some(1023)), "1023 Bytes");
    assert_eq!(format_file_size(Some(2_621_440)), "2.5 MB");
    assert_eq!(format_file_size(Some(1_288_490_189)), "1.2 GB");
}

#[test]
fn test_view_url_prefers_drive_then_file_then_storage() {
    let mut doc = document(1, "plan.pdf", Some("Planning"), "manual", Some(10));
    assert_eq!(
        view_url(&doc, STORAGE).as_deref(),
        Some("https://storage.example.com/public/event-1/plan.pdf")
    );

    doc.file_url = Some("https://files.example.com/plan.pdf".to_string());
    assert_eq!(view_url(&doc, STORAGE).as_deref(), Some("https://files.example.com/plan.pdf"));

    doc.google_drive_url = Some("https://drive.google.com/file/d/abc".to_string());
    assert_eq!(view_url(&doc, STORAGE).as_deref(), Some("https://drive.google.com/file/d/abc"));
    assert_eq!(download_url(&doc, STORAGE).as_deref(), Some("https://files.example.com/plan.pdf"));
}

#[test]
fn test_document_without_any_location_has_no_links() {
    let mut doc = document(1, "ghost", None, "manual", None);
    doc.file_path = None;
    assert!(view_url(&doc, STORAGE).is_none());
    assert!(download_url(&doc, STORAGE).is_none());
}

#[test]
fn test_card_classifies_category_icon_and_source() {
    let mut doc = document(3, "menu.xlsx", Some("Listes"), "google_drive", Some(2048));
    doc.mime_type = Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string());
    let card = DocumentCard::new(doc, STORAGE);

    assert_eq!(card.category, DocumentCategory::Lists);
    assert_eq!(card.icon, FileIcon::Spreadsheet);
    assert_eq!(card.source, DocumentSource::GoogleDrive);
    assert_eq!(card.size_label, "2 KB");
    assert_eq!(card.tone_class(), "tone-indigo");
    assert_eq!(card.added_on(), "14/03/2026");
}

#[test]
fn test_icons_follow_content_type() {
    assert_eq!(FileIcon::for_type(Some("application/pdf")), FileIcon::Pdf);
    assert_eq!(FileIcon::for_type(Some("IMAGE/JPEG")), FileIcon::Image);
    assert_eq!(FileIcon::for_type(Some("audio/mpeg")), FileIcon::Audio);
    assert_eq!(FileIcon::for_type(Some("application/msword")), FileIcon::WordProcessing);
    assert_eq!(FileIcon::for_type(Some("application/x-unknown")), FileIcon::Generic);
    assert_eq!(FileIcon::for_type(None), FileIcon::Generic);
}

#[test]
fn test_quick_access_split_keeps_order() {
    let cards = vec![
        DocumentCard::new(document(1, "playlist", Some("Musique"), "manual", None), STORAGE),
        DocumentCard::new(document(2, "contract", Some("Contrats"), "manual", None), STORAGE),
        DocumentCard::new(document(3, "timeline", Some("Planning"), "manual", None), STORAGE),
        DocumentCard::new(document(4, "licence", Some("Légal"), "manual", None), STORAGE),
        DocumentCard::new(document(5, "misc", None, "manual", None), STORAGE),
    ];
    let (quick, others) = split_quick_access(cards);

    let quick: Vec<i64> = quick.iter().map(|c| c.document.id).collect();
    let others: Vec<i64> = others.iter().map(|c| c.document.id).collect();
    assert_eq!(quick, vec![2, 3, 4]);
    assert_eq!(others, vec![1, 5]);
}

#[test]
fn test_categories_round_trip_their_stored_values() {
    for category in DocumentCategory::ALL {
        assert_eq!(DocumentCategory::classify(Some(category.stored_value())), category);
    }
    for category in TimelineCategory::ALL {
        assert_eq!(TimelineCategory::classify(category.stored_value()), category);
    }
    assert_eq!(TimelineCategory::classify("Danse"), TimelineCategory::Preparation);
}

#[test]
fn test_assignees_list_names_then_role_then_unassigned() {
    let people = vec![
        person(1, "Claire", "bride"),
        person(2, "Julien", "groom"),
        person(3, "Marc", "best-man"),
        person(4, "Inès", "maid-of-honor"),
    ];
    let mut item = timeline_item(1, "10:00", 30, 0);
    assert_eq!(assignee_display(&item, &people), "Unassigned");

    item.assigned_role = Some("best-man".to_string());
    assert_eq!(assignee_display(&item, &people), "Best man");

    item.assigned_person_ids = vec![2, 99];
    assert_eq!(assignee_display(&item, &people), "Julien");

    item.assigned_person_ids = vec![1, 2, 3];
    assert_eq!(assignee_display(&item, &people), "Claire, Julien and 1 other");

    item.assigned_person_ids = vec![1, 2, 3, 4];
    assert_eq!(assignee_display(&item, &people), "Claire, Julien and 2 others");
}

#[test]
fn test_role_labels() {
    assert_eq!(role_label("maid-of-honor"), "Maid of honor");
    assert_eq!(role_label("flower-girl-left"), "flower girl-left");
    assert_eq!(role_label("uncle"), "uncle");
}

#[test]
fn test_timeline_row_computes_times_and_badges() {
    let mut item = timeline_item(5, "14:00:00", 75, 0);
    item.category = "Cérémonie".to_string();
    item.status = "delayed".to_string();
    let row = TimelineRow::new(0, item, &[], Some("Fleurs & Co".to_string()));

    assert_eq!(row.start, "14:00");
    assert_eq!(row.end, "15:15");
    assert_eq!(row.duration_label, "1h15");
    assert_eq!(row.category_class, "tone-pink");
    assert_eq!(row.status, StatusBadge::Delayed);
    assert_eq!(row.status_class(), "tone-red");
}

#[test]
fn test_task_row_prefers_person_over_vendor() {
    let people = vec![person(1, "Claire", "bride")];
    let vendors = vec![vendor(9, "Traiteur Dupont")];

    let mut t = task(1, "high", "pending");
    t.assigned_vendor_id = Some(9);
    let row = TaskRow::new(t.clone(), &people, &vendors);
    assert_eq!(row.assignee, "Traiteur Dupont");
    assert!(row.critical);

    t.assigned_person_id = Some(1);
    let row = TaskRow::new(t, &people, &vendors);
    assert_eq!(row.assignee, "Claire");
    assert_eq!(row.status_label(), "⏳ Pending");
}
