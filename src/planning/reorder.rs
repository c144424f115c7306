//! Drag-and-drop reordering of the event timeline.
//!
//! The engine holds the committed running order and a drag state. While an
//! item is dragged over a slot it computes a preview: the list with the item
//! moved, re-timed back to back from the first slot's start. The committed
//! list is only replaced on drop, which also yields the schedule changes that
//! have to be persisted.

use serde::{Deserialize, Serialize};

use crate::models::timeline::TimelineItem;
use crate::planning::time::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { source: usize },
    HoveringOver { source: usize, target: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    #[error("index {index} is out of range for {len} timeline items")]
    OutOfRange { index: usize, len: usize },
    #[error("no drag in progress")]
    NotDragging,
    #[error("a drag is already in progress")]
    AlreadyDragging,
    #[error("timeline item {id} has an invalid start time '{time}'")]
    InvalidTime { id: i64, time: String },
}

/// Recomputed slot for one item in a preview or commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSlot {
    pub id: i64,
    pub start_time: String,
    pub end_time: String,
}

/// New start time and position for an item whose schedule changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleChange {
    pub id: i64,
    pub time: String,
    pub position: i32,
}

/// Result of a drop: the new running order and what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderCommit {
    pub order: Vec<TimelineItem>,
    pub changes: Vec<ScheduleChange>,
}

impl ReorderCommit {
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct TimelineReorder {
    committed: Vec<TimelineItem>,
    starts: Vec<ClockTime>, // parsed start of each committed item
    state: DragState,
    preview: Option<Vec<PreviewSlot>>,
}

impl TimelineReorder {
    /// Wrap an ordered timeline. Fails if any start time is unparseable.
    pub fn new(items: Vec<TimelineItem>) -> Result<Self, ReorderError> {
        let starts = items
            .iter()
            .map(|item| {
                item.start().ok_or_else(|| ReorderError::InvalidTime {
                    id: item.id,
                    time: item.time.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { committed: items, starts, state: DragState::Idle, preview: None })
    }

    pub fn committed(&self) -> &[TimelineItem] {
        &self.committed
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The current preview, only while hovering over a slot.
    pub fn preview(&self) -> Option<&[PreviewSlot]> {
        self.preview.as_deref()
    }

    /// Preview slot of one item, for rendering it mid-drag.
    pub fn preview_for(&self, id: i64) -> Option<&PreviewSlot> {
        self.preview.as_ref()?.iter().find(|slot| slot.id == id)
    }

    pub fn drag_start(&mut self, index: usize) -> Result<(), ReorderError> {
        if self.state != DragState::Idle {
            return Err(ReorderError::AlreadyDragging);
        }
        self.check_index(index)?;
        self.state = DragState::Dragging { source: index };
        self.preview = None;
        Ok(())
    }

    /// Hover over `index`: recompute the preview for moving the source there.
    pub fn drag_over(&mut self, index: usize) -> Result<&[PreviewSlot], ReorderError> {
        let source = self.source()?;
        self.check_index(index)?;

        // Hovering the item's own slot previews the day as committed.
        let timing = if index == source {
            self.committed_timing()
        } else {
            self.retime(&moved(source, index, self.committed.len()))
        };
        let slots = timing
            .into_iter()
            .map(|(i, start, end)| PreviewSlot {
                id: self.committed[i].id,
                start_time: start.to_string(),
                end_time: end.to_string(),
            })
            .collect();

        self.state = DragState::HoveringOver { source, target: index };
        let preview: &[PreviewSlot] = self.preview.insert(slots);
        Ok(preview)
    }

    /// Drop on `index`: commit the move and return the schedule changes.
    /// Dropping an item back on its own slot changes nothing.
    pub fn drop_at(&mut self, index: usize) -> Result<ReorderCommit, ReorderError> {
        let source = self.source()?;
        self.check_index(index)?;

        if index == source {
            self.state = DragState::Idle;
            self.preview = None;
            return Ok(ReorderCommit { order: self.committed.clone(), changes: Vec::new() });
        }

        let order = moved(source, index, self.committed.len());
        let timing = self.retime(&order);

        let mut items = Vec::with_capacity(order.len());
        let mut starts = Vec::with_capacity(order.len());
        let mut changes = Vec::new();

        for (position, (i, start, _end)) in timing.into_iter().enumerate() {
            let mut item = self.committed[i].clone();
            let position = position as i32;
            if self.starts[i] != start || item.position != position {
                item.time = start.to_string();
                item.position = position;
                changes.push(ScheduleChange { id: item.id, time: item.time.clone(), position });
            }
            items.push(item);
            starts.push(start);
        }

        self.committed = items.clone();
        self.starts = starts;
        self.state = DragState::Idle;
        self.preview = None;

        Ok(ReorderCommit { order: items, changes })
    }

    /// Drag ended without a drop. Returns whether a drag was actually cancelled.
    pub fn drag_end(&mut self) -> bool {
        let was_dragging = self.state != DragState::Idle;
        self.state = DragState::Idle;
        self.preview = None;
        was_dragging
    }

    fn source(&self) -> Result<usize, ReorderError> {
        match self.state {
            DragState::Dragging { source } | DragState::HoveringOver { source, .. } => Ok(source),
            DragState::Idle => Err(ReorderError::NotDragging),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), ReorderError> {
        if index < self.committed.len() {
            Ok(())
        } else {
            Err(ReorderError::OutOfRange { index, len: self.committed.len() })
        }
    }

    /// Committed `(index, start, end)` per slot, gaps included.
    fn committed_timing(&self) -> Vec<(usize, ClockTime, ClockTime)> {
        self.starts
            .iter()
            .enumerate()
            .map(|(i, &start)| (i, start, start.add_minutes(self.committed[i].duration_minutes())))
            .collect()
    }

    /// Chain the given order back to back from the committed first start.
    /// Yields `(committed index, start, end)` per slot.
    fn retime(&self, order: &[usize]) -> Vec<(usize, ClockTime, ClockTime)> {
        let Some(&anchor) = self.starts.first() else {
            return Vec::new();
        };
        let mut start = anchor;
        order
            .iter()
            .map(|&i| {
                let end = start.add_minutes(self.committed[i].duration_minutes());
                let slot = (i, start, end);
                start = end;
                slot
            })
            .collect()
    }
}

/// Indices of `0..len` after removing `from` and inserting it at `to`.
fn moved(from: usize, to: usize, len: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    let item = order.remove(from);
    order.insert(to, item);
    order
}
