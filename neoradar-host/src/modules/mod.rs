//! In-memory implementations of the capability modules.
//!
//! Each store owns the host state of one domain behind a lock and implements
//! the matching SDK trait for plugins. Stores also expose host-side methods
//! (prefixed by what the network or user did: `connect`, `receive_*`, ...)
//! that the client calls when state changes outside any plugin.
//!
//! Every successful write pushes its notifications onto the shared
//! [`EventQueue`] while the store's write lock is still held, so events for
//! one entity are queued in the order the changes happened. Rejected writes
//! change nothing and queue nothing.

mod aircraft;
mod airport;
mod chat;
mod controller;
mod controller_data;
mod euroscope;
mod flightplan;
mod fsd;
mod logger;
mod package;
mod sectors;
mod squawk;
mod tag;

pub use aircraft::AircraftStore;
pub use airport::AirportStore;
pub use chat::{ChatStore, OutgoingMessage};
pub use controller::ControllerStore;
pub use controller_data::ControllerDataStore;
pub use euroscope::EuroScopeStore;
pub use flightplan::FlightplanStore;
pub use fsd::FsdStore;
pub use logger::TracingLogger;
pub use package::PackageInfo;
pub use sectors::SectorStore;
pub use squawk::SquawkStore;
pub use tag::{ScopedTags, TagStore};

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// A plugin panicking inside a handler must not take host state down with it,
// so poisoned locks are recovered rather than propagated.
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
