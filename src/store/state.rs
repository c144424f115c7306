//! Committed rows plus optimistic, not yet confirmed, replacements.

use std::collections::BTreeMap;

use crate::models::document::Document;
use crate::models::person::Person;
use crate::models::task::Task;
use crate::models::timeline::TimelineItem;
use crate::models::vendor::Vendor;

/// Rows addressable by their database id.
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Task {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for TimelineItem {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Document {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Person {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Vendor {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Handle for one in-flight mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// A collection as `{committed, pending}`.
///
/// `committed` only ever holds what the backend confirmed. Pending mutations
/// are overlaid on top of it by `view`, in the order they were started. The
/// version counts confirmed mutations, so a refresh can tell whether one
/// landed while it was fetching.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    committed: Vec<T>,
    pending: BTreeMap<Ticket, Vec<T>>,
    next_ticket: u64,
    version: u64,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self { committed: Vec::new(), pending: BTreeMap::new(), next_ticket: 0, version: 0 }
    }
}

impl<T: Keyed + Clone> Tracked<T> {
    pub fn committed(&self) -> &[T] {
        &self.committed
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Committed rows with every pending replacement applied.
    pub fn view(&self) -> Vec<T> {
        let mut rows = self.committed.clone();
        for replacement in self.pending.values() {
            upsert(&mut rows, replacement.iter().cloned());
        }
        rows
    }

    /// Record optimistic replacements for some rows.
    pub fn begin(&mut self, rows: Vec<T>) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.pending.insert(ticket, rows);
        ticket
    }

    /// The backend accepted the mutation: drop the pending entry and commit
    /// the rows it returned.
    pub fn confirm(&mut self, ticket: Ticket, stored: Vec<T>) {
        self.pending.remove(&ticket);
        upsert(&mut self.committed, stored);
        self.version += 1;
    }

    /// The backend rejected the mutation: drop the pending entry only.
    pub fn abandon(&mut self, ticket: Ticket) {
        self.pending.remove(&ticket);
    }

    /// Full replace from a refresh. Pending entries survive and stay on top.
    pub fn replace_committed(&mut self, rows: Vec<T>) {
        self.committed = rows;
    }
}

fn upsert<T: Keyed>(rows: &mut Vec<T>, replacements: impl IntoIterator<Item = T>) {
    for row in replacements {
        match rows.iter_mut().find(|r| r.key() == row.key()) {
            Some(slot) => *slot = row,
            None => rows.push(row),
        }
    }
}
