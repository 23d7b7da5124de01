//! # Cache Branch
//!
//! Speculative view over the ambient ledger state.
//!
//! Writes and events are buffered in the branch. [`CacheBranch::write`]
//! merges them into the parent; dropping the branch discards them. The
//! branch holds the parent's only mutable borrow, so nothing can observe
//! the parent half-updated.

use crate::domain::Event;
use crate::ports::outbound::{EventSink, KvStore, LedgerState};
use std::collections::BTreeMap;

/// Buffered branch of a [`LedgerState`].
pub struct CacheBranch<'a> {
    parent: &'a mut dyn LedgerState,
    /// `None` marks a delete.
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
    events: Vec<Event>,
}

impl<'a> CacheBranch<'a> {
    /// Branch off `parent` with an empty write set and event buffer.
    pub fn new(parent: &'a mut dyn LedgerState) -> Self {
        Self {
            parent,
            writes: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// Number of buffered writes and deletes.
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Merge into the parent: events first, then state, in key order.
    pub fn write(self) {
        let Self {
            parent,
            writes,
            events,
        } = self;

        parent.emit_events(events);
        for (key, value) in writes {
            match value {
                Some(value) => parent.set(&key, value),
                None => parent.delete(&key),
            }
        }
    }
}

impl KvStore for CacheBranch<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.writes.get(key) {
            Some(buffered) => buffered.clone(),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.writes.insert(key.to_vec(), Some(value));
    }

    fn delete(&mut self, key: &[u8]) {
        self.writes.insert(key.to_vec(), None);
    }
}

impl EventSink for CacheBranch<'_> {
    fn emit_events(&mut self, events: Vec<Event>) {
        self.events.extend(events);
    }

    fn events(&self) -> &[Event] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;

    fn seeded() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        ledger.set(b"a", b"1".to_vec());
        ledger.set(b"b", b"2".to_vec());
        ledger.emit_events(vec![Event::new("genesis")]);
        ledger
    }

    #[test]
    fn test_reads_fall_through_to_parent() {
        let mut ledger = seeded();
        let branch = CacheBranch::new(&mut ledger);
        assert_eq!(branch.get(b"a"), Some(b"1".to_vec()));
        assert_eq!(branch.get(b"missing"), None);
    }

    #[test]
    fn test_buffered_writes_shadow_parent() {
        let mut ledger = seeded();
        let mut branch = CacheBranch::new(&mut ledger);
        branch.set(b"a", b"9".to_vec());
        branch.delete(b"b");
        assert_eq!(branch.get(b"a"), Some(b"9".to_vec()));
        assert!(!branch.has(b"b"));
        assert_eq!(branch.pending_writes(), 2);
    }

    #[test]
    fn test_drop_discards_everything() {
        let mut ledger = seeded();
        let before = ledger.clone();
        {
            let mut branch = CacheBranch::new(&mut ledger);
            branch.set(b"a", b"9".to_vec());
            branch.set(b"c", b"3".to_vec());
            branch.emit_events(vec![Event::new("transfer")]);
        }
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_write_merges_state_and_appends_events() {
        let mut ledger = seeded();
        let mut branch = CacheBranch::new(&mut ledger);
        branch.set(b"a", b"9".to_vec());
        branch.delete(b"b");
        branch.set(b"c", b"3".to_vec());
        branch.emit_events(vec![Event::new("first"), Event::new("second")]);
        branch.write();

        assert_eq!(ledger.get(b"a"), Some(b"9".to_vec()));
        assert_eq!(ledger.get(b"b"), None);
        assert_eq!(ledger.get(b"c"), Some(b"3".to_vec()));
        let kinds: Vec<&str> = ledger.events().iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["genesis", "first", "second"]);
    }

    #[test]
    fn test_nested_branch_commits_into_branch() {
        let mut ledger = seeded();
        let mut outer = CacheBranch::new(&mut ledger);
        {
            let mut inner = CacheBranch::new(&mut outer);
            inner.set(b"z", b"26".to_vec());
            inner.write();
        }
        assert_eq!(outer.get(b"z"), Some(b"26".to_vec()));
        drop(outer);
        assert_eq!(ledger.get(b"z"), None);
    }
}
