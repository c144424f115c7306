use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::document::Document;
use crate::models::task::Task;
use crate::planning::progress_percentage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub progress_percentage: u8,
    /// High priority and not completed.
    pub critical_tasks: usize,
}

pub fn progress_stats(tasks: &[Task]) -> ProgressStats {
    let completed_tasks = tasks.iter().filter(|t| t.is_completed()).count();
    ProgressStats {
        total_tasks: tasks.len(),
        completed_tasks,
        progress_percentage: progress_percentage(completed_tasks, tasks.len()),
        critical_tasks: tasks.iter().filter(|t| t.is_critical()).count(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub total_documents: usize,
    /// Bytes; unknown sizes count as zero.
    pub total_size: i64,
    pub categories_count: usize,
    pub google_drive_count: usize,
    pub manual_count: usize,
}

pub fn document_stats(documents: &[Document]) -> DocumentStats {
    let categories: HashSet<&str> = documents.iter().filter_map(|d| d.category.as_deref()).collect();
    DocumentStats {
        total_documents: documents.len(),
        total_size: documents.iter().map(|d| d.file_size.unwrap_or(0)).sum(),
        categories_count: categories.len(),
        google_drive_count: documents.iter().filter(|d| d.source == "google_drive").count(),
        manual_count: documents.iter().filter(|d| d.source == "manual").count(),
    }
}

const MS_PER_DAY: i64 = 86_400_000;

/// Whole days left until the event, counting a partial day as a full one.
/// The event starts at midnight UTC of its date. Never negative.
pub fn days_until(event_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let Some(start) = event_date.and_hms_opt(0, 0, 0) else {
        return 0;
    };
    let remaining = (start.and_utc() - now).num_milliseconds();
    if remaining <= 0 {
        0
    } else {
        (remaining + MS_PER_DAY - 1) / MS_PER_DAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn days_until_rounds_partial_days_up() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 20).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 6, 18, 12, 0, 0).unwrap();
        assert_eq!(days_until(date, now), 2);

        let now = Utc.with_ymd_and_hms(2026, 6, 18, 0, 0, 0).unwrap();
        assert_eq!(days_until(date, now), 2);

        let now = Utc.with_ymd_and_hms(2026, 6, 19, 23, 59, 59).unwrap();
        assert_eq!(days_until(date, now), 1);
    }

    #[test]
    fn days_until_is_zero_once_the_day_starts() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 20).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 6, 20, 0, 0, 0).unwrap();
        assert_eq!(days_until(date, now), 0);
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap();
        assert_eq!(days_until(date, now), 0);
    }
}
