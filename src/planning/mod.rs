//! Planning logic: clock arithmetic, the personal planning view that merges
//! timeline items with tasks, and the drag-and-drop timeline reorder engine.
//!
//! Everything here is synchronous and free of I/O; the store and handlers
//! feed it rows and persist what it returns.

pub mod aggregate;
pub mod reorder;
pub mod time;

pub use aggregate::{
    PersonalPlanning, PlanningKind, PlanningOwner, UnifiedPlanningItem, build_personal_planning,
    progress_percentage,
};
pub use reorder::{DragState, PreviewSlot, ReorderCommit, ReorderError, ScheduleChange, TimelineReorder};
pub use time::{ClockTime, TimeParseError};
