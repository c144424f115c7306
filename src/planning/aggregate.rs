use std::cmp::Ordering;

use serde::Serialize;

use crate::models::priority::Priority;
use crate::models::task::Task;
use crate::models::timeline::TimelineItem;
use crate::planning::time;

/// Whose planning is being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanningOwner {
    Person(i64),
    /// A vendor matches timeline items listing its id, or carrying its role key
    /// in the legacy `assigned_role` column.
    Vendor { id: i64, role: Option<String> },
}

impl PlanningOwner {
    /// A vendor whose legacy role key is its own id, as older timeline rows
    /// store it in `assigned_role`.
    pub fn vendor(id: i64) -> Self {
        PlanningOwner::Vendor { id, role: Some(id.to_string()) }
    }

    fn owns_timeline_item(&self, item: &TimelineItem) -> bool {
        match self {
            PlanningOwner::Person(id) => item.assigned_person_ids.contains(id),
            PlanningOwner::Vendor { id, role } => {
                item.assigned_vendor_ids.contains(id)
                    || matches!((role, &item.assigned_role), (Some(r), Some(ar)) if r == ar)
            }
        }
    }

    fn owns_task(&self, task: &Task) -> bool {
        match self {
            PlanningOwner::Person(id) => task.assigned_person_id == Some(*id),
            PlanningOwner::Vendor { id, .. } => task.assigned_vendor_id == Some(*id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningKind {
    Timeline,
    Task,
}

/// A timeline item or a task, projected onto one shape for the personal view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedPlanningItem {
    pub id: i64,
    pub kind: PlanningKind,
    pub title: String,
    pub description: Option<String>,
    pub time: Option<String>,
    pub duration: Option<i32>,
    pub priority: Option<String>,
    pub status: Option<String>,
    /// Tasks only: `status == completed`.
    pub completed: bool,
    pub category: Option<String>,
}

impl UnifiedPlanningItem {
    fn from_timeline(item: &TimelineItem) -> Self {
        Self {
            id: item.id,
            kind: PlanningKind::Timeline,
            title: item.title.clone(),
            description: item.description.clone(),
            time: Some(item.time.clone()),
            duration: Some(item.duration),
            priority: Some(item.priority.clone()),
            status: Some(item.status.clone()),
            completed: false,
            category: Some(item.category.clone()),
        }
    }

    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            kind: PlanningKind::Task,
            title: task.title.clone(),
            description: task.description.clone(),
            time: None,
            duration: task.duration_minutes,
            priority: Some(task.priority.clone()),
            status: Some(task.status.clone()),
            completed: task.is_completed(),
            category: None,
        }
    }

    pub fn is_timeline(&self) -> bool {
        self.kind == PlanningKind::Timeline
    }

    pub fn is_done(&self) -> bool {
        match self.kind {
            PlanningKind::Timeline => self.status.as_deref() == Some("completed"),
            PlanningKind::Task => self.completed,
        }
    }

    /// `"HH:MM - HH:MM"` for timeline items with a duration.
    pub fn time_range(&self) -> Option<String> {
        match (&self.time, self.duration) {
            (Some(t), Some(d)) if d > 0 => Some(time::time_range(t, d as u32)),
            _ => None,
        }
    }

    pub fn priority_label(&self) -> Option<&'static str> {
        self.priority.as_deref().and_then(Priority::parse).map(Priority::label)
    }

    fn priority_rank(&self) -> u8 {
        self.priority.as_deref().map_or(1, Priority::rank_of)
    }
}

/// Two-tier ordering: timeline items first by start time, then tasks by priority.
fn planning_order(a: &UnifiedPlanningItem, b: &UnifiedPlanningItem) -> Ordering {
    match (a.kind, b.kind) {
        (PlanningKind::Timeline, PlanningKind::Timeline) => {
            a.time.as_deref().unwrap_or("").cmp(b.time.as_deref().unwrap_or(""))
        }
        (PlanningKind::Timeline, PlanningKind::Task) => Ordering::Less,
        (PlanningKind::Task, PlanningKind::Timeline) => Ordering::Greater,
        (PlanningKind::Task, PlanningKind::Task) => a.priority_rank().cmp(&b.priority_rank()),
    }
}

/// One person's (or vendor's) merged, ordered planning.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonalPlanning {
    pub items: Vec<UnifiedPlanningItem>,
    pub completed: usize,
}

impl PersonalPlanning {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn progress_percentage(&self) -> u8 {
        progress_percentage(self.completed, self.total())
    }
}

/// Select the owner's timeline items and tasks, merge and sort them.
pub fn build_personal_planning(
    owner: &PlanningOwner,
    timeline: &[TimelineItem],
    tasks: &[Task],
) -> PersonalPlanning {
    let mut items: Vec<UnifiedPlanningItem> = timeline
        .iter()
        .filter(|item| owner.owns_timeline_item(item))
        .map(UnifiedPlanningItem::from_timeline)
        .chain(
            tasks
                .iter()
                .filter(|task| owner.owns_task(task))
                .map(UnifiedPlanningItem::from_task),
        )
        .collect();

    // sort_by is stable: equal-priority tasks keep their incoming order.
    items.sort_by(planning_order);

    let completed = items.iter().filter(|i| i.is_done()).count();
    PersonalPlanning { items, completed }
}

/// `round(100 * completed / total)`, half up; 0 when there is nothing to do.
pub fn progress_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(progress_percentage(0, 0), 0);
        assert_eq!(progress_percentage(1, 2), 50);
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(2, 3), 67);
        assert_eq!(progress_percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(progress_percentage(5, 5), 100);
    }

    #[test]
    fn progress_never_exceeds_one_hundred() {
        assert_eq!(progress_percentage(7, 5), 100);
    }
}
