//! neoradar-host - reference host for NeoRadar plugins
//!
//! The host side of the plugin contract:
//!
//! - [`PluginHost`] loads plugin libraries, checks their SDK version, drives
//!   the `initialize -> events -> shutdown` lifecycle and isolates panics
//! - [`HostCore`] implements every capability module in memory and queues
//!   the notifications its writes produce
//! - [`PluginHost::pump`] delivers queued events to active plugins, one at a
//!   time, in the order they were produced
//!
//! # Example
//!
//! ```no_run
//! use neoradar_host::{HostConfig, PluginHost};
//!
//! let config = HostConfig::load(None)?;
//! let mut host = PluginHost::from_config(&config);
//! host.load_all()?;
//! host.initialize_all();
//!
//! host.core().modules().airport.add_airport("EGLL", &["27L", "27R"]);
//! host.pump();
//!
//! host.shutdown_all();
//! # Ok::<(), neoradar_host::PluginHostError>(())
//! ```

mod config;
mod core;
mod error;
mod host;
mod instance;
mod lifecycle;
pub mod modules;
mod queue;
mod registry;
pub mod version;

pub use config::{CONFIG_FILE_NAME, HostConfig};
pub use core::{HostCore, HostModules};
pub use error::PluginHostError;
pub use host::{
    DiscoveredPlugin, LibraryReport, PluginHost, PluginHostConfig, PluginInfo, PluginState,
    REGISTRY_FILE_NAME, inspect_library,
};
pub use instance::InstanceHandle;
pub use lifecycle::{LifecycleState, PluginSlot};
pub use queue::EventQueue;
pub use registry::PluginRegistry;
pub use version::VersionCheck;
