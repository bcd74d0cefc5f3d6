//! Pending notifications awaiting dispatch.
//!
//! Capability modules push the events their writes produce here; the host
//! drains the queue through [`PluginHost::pump`](crate::PluginHost::pump).
//! Draining pops one event at a time and releases the lock before delivery,
//! so a plugin writing from inside a handler appends behind the current event
//! instead of re-entering dispatch.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use neoradar_sdk::Event;

/// FIFO of events shared between the capability modules and the host
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Arc<Mutex<VecDeque<Event>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Event>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an event behind everything already queued
    pub fn push(&self, event: impl Into<Event>) {
        self.lock().push_back(event.into());
    }

    /// Remove the oldest event
    pub fn pop(&self) -> Option<Event> {
        self.lock().pop_front()
    }

    /// Take every queued event, oldest first
    pub fn drain(&self) -> Vec<Event> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
