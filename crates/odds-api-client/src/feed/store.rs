//! In-memory snapshot of current odds per event and bookmaker.

use crate::types::Market;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Nested mapping: event id -> bookmaker id -> current market list.
///
/// Absence of an event key means "no data observed yet", not "zero
/// odds". Writes are last-write-wins per (event, bookmaker) pair, and
/// each write replaces that pair's full market list.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    events: RwLock<HashMap<String, HashMap<String, Vec<Market>>>>,
}

impl SnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full market list for a (event, bookmaker) pair.
    pub fn upsert(
        &self,
        event_id: impl Into<String>,
        bookmaker: impl Into<String>,
        markets: Vec<Market>,
    ) {
        let mut events = self.events.write();
        events
            .entry(event_id.into())
            .or_default()
            .insert(bookmaker.into(), markets);
    }

    /// Removes the (event, bookmaker) entry. No-op if absent; other
    /// bookmakers of the same event are untouched.
    pub fn remove(&self, event_id: &str, bookmaker: &str) {
        let mut events = self.events.write();
        if let Some(bookmakers) = events.get_mut(event_id) {
            bookmakers.remove(bookmaker);
        }
    }

    /// Current markets for an event across bookmakers. Empty if the
    /// event has not been observed.
    #[must_use]
    pub fn get(&self, event_id: &str) -> HashMap<String, Vec<Market>> {
        self.events
            .read()
            .get(event_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of distinct events observed.
    #[must_use]
    pub fn size(&self) -> usize {
        self.events.read().len()
    }

    /// Whether any event has been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Identifiers of the events currently observed.
    #[must_use]
    pub fn event_ids(&self) -> Vec<String> {
        self.events.read().keys().cloned().collect()
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}
