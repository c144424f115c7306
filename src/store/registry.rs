use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::EventStore;

struct Entry {
    store: Arc<EventStore>,
    holders: usize,
}

/// Open event stores, keyed by event id.
///
/// A store is opened when a session selects an event and closed when the
/// last session holding it switches away or logs out. Each open gets a fresh
/// generation, so a store closed and reopened is a different object and
/// stale refreshes against the old one are discarded.
#[derive(Clone, Default)]
pub struct StoreRegistry {
    stores: Arc<Mutex<HashMap<i64, Entry>>>,
    generations: Arc<AtomicU64>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<i64, Entry>> {
        self.stores.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open (or join) the store of an event for one more session.
    pub fn open(&self, event_id: i64) -> Arc<EventStore> {
        let mut stores = self.lock();
        let entry = stores.entry(event_id).or_insert_with(|| {
            let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
            log::info!("Opening store for event {} (generation {})", event_id, generation);
            Entry { store: Arc::new(EventStore::new(event_id, generation)), holders: 0 }
        });
        entry.holders += 1;
        Arc::clone(&entry.store)
    }

    pub fn get(&self, event_id: i64) -> Option<Arc<EventStore>> {
        self.lock().get(&event_id).map(|e| Arc::clone(&e.store))
    }

    /// The open store of an event, opening it if needed. Used when a session
    /// still points at an event the registry no longer holds, e.g. after a
    /// restart.
    pub fn get_or_open(&self, event_id: i64) -> Arc<EventStore> {
        match self.get(event_id) {
            Some(store) => store,
            None => self.open(event_id),
        }
    }

    /// One session let go of an event. Closes the store when nobody holds it.
    /// Returns whether the store was closed.
    pub fn release(&self, event_id: i64) -> bool {
        let mut stores = self.lock();
        let Some(entry) = stores.get_mut(&event_id) else {
            return false;
        };
        entry.holders = entry.holders.saturating_sub(1);
        if entry.holders > 0 {
            return false;
        }
        if let Some(entry) = stores.remove(&event_id) {
            entry.store.close();
            log::info!("Closed store for event {}", event_id);
        }
        true
    }

    /// Close a store regardless of holders, e.g. after its event was deleted.
    pub fn close(&self, event_id: i64) {
        if let Some(entry) = self.lock().remove(&event_id) {
            entry.store.close();
        }
    }

    pub fn open_stores(&self) -> Vec<Arc<EventStore>> {
        self.lock().values().map(|e| Arc::clone(&e.store)).collect()
    }
}
