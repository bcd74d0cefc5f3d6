use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;

use neoradar_sdk::squawk::{SquawkApi, SquawkAssignedEvent, is_valid_code};

use super::{read, write};
use crate::queue::EventQueue;

/// Codes never handed out by `request_squawk`: conspicuity, VFR and the
/// emergency codes.
const RESERVED: &[&str] = &["0000", "1200", "2000", "7000", "7500", "7600", "7700"];

#[derive(Debug, Default)]
struct Squawks {
    /// Known aircraft and their assigned code
    assigned: BTreeMap<String, Option<String>>,
}

/// Squawk code assignment
#[derive(Debug)]
pub struct SquawkStore {
    state: RwLock<Squawks>,
    range: (u16, u16),
    queue: EventQueue,
}

impl SquawkStore {
    /// Allocate requested codes from the default range 0101-7677 (octal)
    pub fn new(queue: EventQueue) -> Self {
        Self::with_range(queue, 0o0101, 0o7677)
    }

    /// Allocate requested codes from `first..=last`, given as octal values
    pub fn with_range(queue: EventQueue, first: u16, last: u16) -> Self {
        Self {
            state: RwLock::new(Squawks::default()),
            range: (first, last),
            queue,
        }
    }

    /// Make an aircraft eligible for assignment
    pub fn insert(&self, callsign: &str) -> bool {
        let mut state = write(&self.state);
        if state.assigned.contains_key(callsign) {
            return false;
        }
        state.assigned.insert(callsign.to_string(), None);
        true
    }

    pub fn remove(&self, callsign: &str) -> bool {
        write(&self.state).assigned.remove(callsign).is_some()
    }

    fn set(&self, state: &mut Squawks, callsign: &str, code: String) -> bool {
        let Some(slot) = state.assigned.get_mut(callsign) else {
            return false;
        };
        *slot = Some(code.clone());
        self.queue.push(SquawkAssignedEvent {
            callsign: callsign.to_string(),
            code,
        });
        true
    }
}

impl SquawkApi for SquawkStore {
    fn assigned_code(&self, callsign: &str) -> Option<String> {
        read(&self.state).assigned.get(callsign)?.clone()
    }

    fn assign_squawk(&self, callsign: &str, code: &str) -> bool {
        if !is_valid_code(code) {
            tracing::debug!(callsign, code, "Squawk rejected: not a 4-digit octal code");
            return false;
        }
        let mut state = write(&self.state);
        self.set(&mut state, callsign, code.to_string())
    }

    fn request_squawk(&self, callsign: &str) -> Option<String> {
        let mut state = write(&self.state);
        if !state.assigned.contains_key(callsign) {
            return None;
        }
        let in_use: HashSet<&str> = state.assigned.values().flatten().map(String::as_str).collect();
        let (first, last) = self.range;
        let code = (first..=last)
            .map(|n| format!("{n:04o}"))
            .filter(|c| is_valid_code(c))
            .find(|c| !in_use.contains(c.as_str()) && !RESERVED.contains(&c.as_str()))?;
        self.set(&mut state, callsign, code.clone());
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_valid_code() {
        let queue = EventQueue::new();
        let store = SquawkStore::new(queue.clone());
        store.insert("BAW123");

        assert!(store.assign_squawk("BAW123", "4721"));
        assert_eq!(store.assigned_code("BAW123").as_deref(), Some("4721"));
        assert_eq!(queue.pop().map(|e| e.kind()), Some("SquawkAssigned"));
    }

    #[test]
    fn test_invalid_code_leaves_assignment() {
        let store = SquawkStore::new(EventQueue::new());
        store.insert("BAW123");
        store.assign_squawk("BAW123", "4721");

        assert!(!store.assign_squawk("BAW123", "4781"));
        assert!(!store.assign_squawk("BAW123", "47"));
        assert_eq!(store.assigned_code("BAW123").as_deref(), Some("4721"));
    }

    #[test]
    fn test_request_picks_free_codes() {
        let store = SquawkStore::new(EventQueue::new());
        store.insert("A");
        store.insert("B");

        assert_eq!(store.request_squawk("A").as_deref(), Some("0101"));
        assert_eq!(store.request_squawk("B").as_deref(), Some("0102"));
        assert_eq!(store.request_squawk("NOPE"), None);
    }

    #[test]
    fn test_request_skips_reserved_codes() {
        let store = SquawkStore::with_range(EventQueue::new(), 0o7000, 0o7001);
        store.insert("A");
        assert_eq!(store.request_squawk("A").as_deref(), Some("7001"));
    }

    #[test]
    fn test_exhausted_pool() {
        let store = SquawkStore::with_range(EventQueue::new(), 0o4000, 0o4000);
        store.insert("A");
        store.insert("B");

        assert!(store.request_squawk("A").is_some());
        assert_eq!(store.request_squawk("B"), None);
        assert_eq!(store.assigned_code("B"), None);
    }
}
