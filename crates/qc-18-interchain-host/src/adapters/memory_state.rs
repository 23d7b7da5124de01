//! # In-Memory Ledger
//!
//! Ordered key/value state with an event stream, for tests and tooling.
//! A production adapter would wrap the node's state database.

use crate::domain::Event;
use crate::ports::outbound::{EventSink, KvStore};
use std::collections::BTreeMap;

/// In-memory ambient ledger state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    store: BTreeMap<Vec<u8>, Vec<u8>>,
    events: Vec<Event>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl KvStore for InMemoryLedger {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.store.get(key).cloned()
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.store.insert(key.to_vec(), value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.store.remove(key);
    }
}

impl EventSink for InMemoryLedger {
    fn emit_events(&mut self, events: Vec<Event>) {
        self.events.extend(events);
    }

    fn events(&self) -> &[Event] {
        &self.events
    }
}
