use crate::models::document::Document;
use crate::presentation::Tone;

/// Document category as filed in the hub. Stored values are the French labels
/// used by the planners; anything unrecognised is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentCategory {
    Planning,
    Music,
    Contracts,
    Legal,
    Photos,
    Invoices,
    Lists,
    Communications,
    Other,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 9] = [
        DocumentCategory::Planning,
        DocumentCategory::Music,
        DocumentCategory::Contracts,
        DocumentCategory::Legal,
        DocumentCategory::Photos,
        DocumentCategory::Invoices,
        DocumentCategory::Lists,
        DocumentCategory::Communications,
        DocumentCategory::Other,
    ];

    pub fn classify(category: Option<&str>) -> Self {
        match category.map(str::trim) {
            Some("Planning") => DocumentCategory::Planning,
            Some("Musique") | Some("Music") => DocumentCategory::Music,
            Some("Contrats") | Some("Contracts") => DocumentCategory::Contracts,
            Some("Légal") | Some("Legal") => DocumentCategory::Legal,
            Some("Photos") => DocumentCategory::Photos,
            Some("Factures") | Some("Invoices") => DocumentCategory::Invoices,
            Some("Listes") | Some("Lists") => DocumentCategory::Lists,
            Some("Communications") => DocumentCategory::Communications,
            _ => DocumentCategory::Other,
        }
    }

    /// Value stored in the `category` column.
    pub fn stored_value(self) -> &'static str {
        match self {
            DocumentCategory::Planning => "Planning",
            DocumentCategory::Music => "Musique",
            DocumentCategory::Contracts => "Contrats",
            DocumentCategory::Legal => "Légal",
            DocumentCategory::Photos => "Photos",
            DocumentCategory::Invoices => "Factures",
            DocumentCategory::Lists => "Listes",
            DocumentCategory::Communications => "Communications",
            DocumentCategory::Other => "Other",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            DocumentCategory::Planning => Tone::Purple,
            DocumentCategory::Music => Tone::Blue,
            DocumentCategory::Contracts => Tone::Green,
            DocumentCategory::Legal => Tone::Red,
            DocumentCategory::Photos => Tone::Yellow,
            DocumentCategory::Invoices => Tone::Orange,
            DocumentCategory::Lists => Tone::Indigo,
            DocumentCategory::Communications => Tone::Pink,
            DocumentCategory::Other => Tone::Gray,
        }
    }

    /// Planning, legal and contract documents get the quick-access section.
    pub fn is_quick_access(self) -> bool {
        matches!(
            self,
            DocumentCategory::Planning | DocumentCategory::Legal | DocumentCategory::Contracts
        )
    }
}

/// Icon shown next to a document, keyed by MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileIcon {
    Pdf,
    Image,
    Audio,
    Video,
    Archive,
    Text,
    WordProcessing,
    Spreadsheet,
    Presentation,
    Generic,
}

/// Containment table, checked in order; first match wins.
const TYPE_ICONS: &[(&str, FileIcon)] = &[
    ("application/pdf", FileIcon::Pdf),
    ("image/", FileIcon::Image),
    ("audio/", FileIcon::Audio),
    ("video/", FileIcon::Video),
    ("application/zip", FileIcon::Archive),
    ("text/", FileIcon::Text),
    ("presentation", FileIcon::Presentation),
    ("powerpoint", FileIcon::Presentation),
    ("sheet", FileIcon::Spreadsheet),
    ("excel", FileIcon::Spreadsheet),
    ("word", FileIcon::WordProcessing),
    ("document", FileIcon::WordProcessing),
];

impl FileIcon {
    pub fn for_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return FileIcon::Generic;
        };
        let content_type = content_type.to_ascii_lowercase();
        TYPE_ICONS
            .iter()
            .find(|(needle, _)| content_type.contains(needle))
            .map_or(FileIcon::Generic, |(_, icon)| *icon)
    }

    pub fn glyph(self) -> &'static str {
        match self {
            FileIcon::Pdf | FileIcon::Generic => "📄",
            FileIcon::Image => "🖼️",
            FileIcon::Audio => "🎵",
            FileIcon::Video => "🎥",
            FileIcon::Archive => "📦",
            FileIcon::Text | FileIcon::WordProcessing => "📝",
            FileIcon::Spreadsheet => "📊",
            FileIcon::Presentation => "📈",
        }
    }
}

/// Where a document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    GoogleDrive,
    Manual,
    Other(String),
}

impl DocumentSource {
    pub fn classify(source: &str) -> Self {
        match source {
            "google_drive" => DocumentSource::GoogleDrive,
            "manual" => DocumentSource::Manual,
            other => DocumentSource::Other(other.to_string()),
        }
    }

    pub fn badge(&self) -> String {
        match self {
            DocumentSource::GoogleDrive => "📁 Google Drive".to_string(),
            DocumentSource::Manual => "📎 Manual".to_string(),
            DocumentSource::Other(raw) => raw.clone(),
        }
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count in the largest unit that keeps the value at or above 1,
/// with at most two decimals. Unknown and zero sizes both read `0 Bytes`.
pub fn format_file_size(bytes: Option<i64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b as f64,
        _ => return "0 Bytes".to_string(),
    };

    let mut unit = 0;
    let mut value = bytes;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// Best URL for viewing a document: Drive link, then direct URL, then the
/// storage path resolved against the public storage base URL.
pub fn view_url(doc: &Document, storage_base: &str) -> Option<String> {
    doc.google_drive_url
        .clone()
        .or_else(|| doc.file_url.clone())
        .or_else(|| download_url(doc, storage_base))
}

/// Direct download URL: file URL first, then the resolved storage path.
pub fn download_url(doc: &Document, storage_base: &str) -> Option<String> {
    doc.file_url.clone().or_else(|| {
        doc.file_path.as_deref().map(|path| {
            let base = storage_base.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            if base.is_empty() { format!("/{path}") } else { format!("{base}/{path}") }
        })
    })
}

/// A document prepared for display.
#[derive(Debug, Clone)]
pub struct DocumentCard {
    pub document: Document,
    pub category: DocumentCategory,
    pub icon: FileIcon,
    pub source: DocumentSource,
    pub size_label: String,
    pub view_url: Option<String>,
    pub download_url: Option<String>,
}

impl DocumentCard {
    pub fn new(document: Document, storage_base: &str) -> Self {
        Self {
            category: DocumentCategory::classify(document.category.as_deref()),
            icon: FileIcon::for_type(document.content_type()),
            source: DocumentSource::classify(&document.source),
            size_label: format_file_size(document.file_size),
            view_url: view_url(&document, storage_base),
            download_url: download_url(&document, storage_base),
            document,
        }
    }

    pub fn category_label(&self) -> &str {
        self.document.category.as_deref().unwrap_or("")
    }

    pub fn tone_class(&self) -> &'static str {
        self.category.tone().css_class()
    }

    pub fn glyph(&self) -> &'static str {
        self.icon.glyph()
    }

    pub fn source_badge(&self) -> String {
        self.source.badge()
    }

    pub fn added_on(&self) -> String {
        self.document.created_at.format("%d/%m/%Y").to_string()
    }
}

/// Documents split into the quick-access group and the rest, order preserved.
pub fn split_quick_access(cards: Vec<DocumentCard>) -> (Vec<DocumentCard>, Vec<DocumentCard>) {
    cards.into_iter().partition(|card| card.category.is_quick_access())
}
