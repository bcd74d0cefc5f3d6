//! neoradar-sdk - Plugin SDK for the NeoRadar ATC client
//!
//! This crate is the contract between the client (the host) and a plugin
//! compiled on its own. It contains:
//!
//! - the capability modules a plugin calls to read and change host state,
//!   reached through [`CoreApi`]
//! - the [`Plugin`] trait: lifecycle methods plus one notification hook per
//!   event kind, all hooks defaulting to no-ops
//! - the [`export_plugin!`] macro that generates the unmangled entry points a
//!   host looks up by symbol name
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use neoradar_sdk::aircraft::AircraftConnectedEvent;
//! use neoradar_sdk::{ClientInformation, CoreApi, Plugin, PluginMetadata, export_plugin};
//!
//! #[derive(Default)]
//! pub struct ExamplePlugin {
//!     core: Option<Arc<dyn CoreApi>>,
//! }
//!
//! impl Plugin for ExamplePlugin {
//!     fn initialize(&mut self, _: &PluginMetadata, core: Arc<dyn CoreApi>, info: ClientInformation) {
//!         core.logger().info(&format!("Client: {} v{}", info.client_name, info.client_version));
//!         self.core = Some(core);
//!     }
//!
//!     fn shutdown(&mut self) {
//!         self.core = None;
//!     }
//!
//!     fn metadata(&self) -> PluginMetadata {
//!         PluginMetadata::new("ExamplePlugin", "1.0.0", "Example Author")
//!     }
//!
//!     fn on_aircraft_connected(&mut self, event: &AircraftConnectedEvent) {
//!         if let Some(core) = &self.core {
//!             core.logger().info(&format!("Aircraft connected: {}", event.callsign));
//!         }
//!     }
//! }
//!
//! export_plugin!(ExamplePlugin);
//! ```

pub mod aircraft;
pub mod airport;
pub mod chat;
pub mod controller;
pub mod controller_data;
pub mod core_api;
pub mod euroscope;
pub mod event;
pub mod flightplan;
pub mod fsd;
pub mod logger;
pub mod package;
pub mod sectors;
pub mod squawk;
pub mod tag;
pub mod types;

use std::os::raw::c_int;
use std::sync::Arc;

pub use core_api::CoreApi;
pub use event::Event;
pub use types::*;

use aircraft::{AircraftConnectedEvent, AircraftDisconnectedEvent, PositionUpdateEvent};
use airport::{
    AirportAddedEvent, AirportConfigurationsUpdatedEvent, AirportRemovedEvent,
    AirportStatusChangedEvent, RunwayStatusChangedEvent,
};
use chat::{
    ATISInfoMessageReceivedEvent, AtcMessageReceivedEvent, BroadcastMessageReceivedEvent,
    FlightplanMessageReceivedEvent, FrequencyMessageReceivedEvent, PrivateMessageReceivedEvent,
    ServerMessageReceivedEvent, SupervisorMessageReceivedEvent,
};
use controller::{
    AtcPositionUpdateEvent, AtisLinesUpdateEvent, CapabilitiesUpdateEvent,
    ControllerConnectedEvent, ControllerDisconnectedEvent, IsControllerATCEvent,
};
use controller_data::{
    AircraftAssignedSpeedChangedEvent, AircraftBeaconCodeChangedEvent,
    AircraftCDMStatusChangedEvent, AircraftHandoffCancelledEvent, AircraftHandoffRejectedEvent,
    AircraftHeadingChangedEvent, AircraftInitiatedTrackingEvent, AircraftOwnedByChangedEvent,
    AircraftScratchpadUpdatedEvent, AircraftTemporaryAltitudeChangedEvent,
    AircraftTerminatedTrackingEvent, ControllerDataUpdatedEvent,
};
use euroscope::{
    EuroScopeProxyServerClientConnectedEvent, EuroScopeProxyServerClientDisconnectedEvent,
    EuroScopeProxyServerErrorEvent, EuroScopeProxyServerStartEvent, EuroScopeProxyServerStopEvent,
};
use flightplan::{
    FlightplanRemovedEvent, FlightplanRouteChangedEvent, FlightplanUpdatedEvent,
    FlightplanVoiceTypeChangedEvent,
};
use fsd::{
    FsdConnectedEvent, FsdConnectionModelUpdatedEvent, FsdConnectionStateChangeEvent,
    FsdDisconnectedEvent, FsdErrorEvent,
};
use sectors::OwnedSectorUpdatedEvent;
use squawk::SquawkAssignedEvent;
use tag::{DropdownActionEvent, TagActionEvent};

/// SDK version this crate implements. Plugins export it through
/// [`export_plugin!`]; hosts compare it against their own before loading.
pub const SDK_VERSION: SdkVersion =
    SdkVersion::new(SDK_VERSION_MAJOR, SDK_VERSION_MINOR, SDK_VERSION_PATCH);

pub const SDK_VERSION_MAJOR: u32 = 1;
pub const SDK_VERSION_MINOR: u32 = 0;
pub const SDK_VERSION_PATCH: u32 = 3;

// ─── Exported symbol names ───────────────────────────────────────────

pub const SYMBOL_VERSION_MAJOR: &[u8] = b"GetPluginSDKVersionMajor";
pub const SYMBOL_VERSION_MINOR: &[u8] = b"GetPluginSDKVersionMinor";
pub const SYMBOL_VERSION_PATCH: &[u8] = b"GetPluginSDKVersionPatch";
pub const SYMBOL_CREATE_INSTANCE: &[u8] = b"CreatePluginInstance";
pub const SYMBOL_DESTROY_INSTANCE: &[u8] = b"DestroyPluginInstance";

/// Signature of the `GetPluginSDKVersion*` symbols
pub type VersionFn = extern "C" fn() -> c_int;
/// Signature of `CreatePluginInstance`
pub type CreateInstanceFn = extern "C" fn() -> *mut PluginInstance;
/// Signature of `DestroyPluginInstance`
pub type DestroyInstanceFn = extern "C" fn(*mut PluginInstance);

/// The plugin contract - implement this to create a NeoRadar plugin.
///
/// Lifecycle: `Uninitialized -> Active -> ShutDown`. The host calls
/// [`initialize`](Plugin::initialize) once, delivers events while the plugin is
/// active, then calls [`shutdown`](Plugin::shutdown) and destroys the
/// instance. [`metadata`](Plugin::metadata) may be called in any state.
///
/// All event hooks have default no-op implementations, so a plugin only
/// overrides the events it cares about. Hooks are called synchronously on
/// the host's dispatch thread: keep them short and hand longer work to a
/// thread of your own. The payload reference is only valid for the call.
pub trait Plugin: Send {
    /// Called once before any event is delivered.
    ///
    /// `core` stays valid until `shutdown` returns. There is no error channel:
    /// a plugin that cannot start should log through `core.logger()` and stay
    /// inert.
    fn initialize(
        &mut self,
        metadata: &PluginMetadata,
        core: Arc<dyn CoreApi>,
        info: ClientInformation,
    );

    /// Release resources and drop the `CoreApi` handle. No calls into the host
    /// are allowed afterwards.
    fn shutdown(&mut self);

    /// Static identity. Must not have side effects or depend on lifecycle state.
    fn metadata(&self) -> PluginMetadata;

    // ─── Aircraft ────────────────────────────────────────────────────

    fn on_aircraft_connected(&mut self, _event: &AircraftConnectedEvent) {}

    fn on_aircraft_disconnected(&mut self, _event: &AircraftDisconnectedEvent) {}

    fn on_position_update(&mut self, _event: &PositionUpdateEvent) {}

    // ─── Airport ─────────────────────────────────────────────────────

    fn on_airport_added(&mut self, _event: &AirportAddedEvent) {}

    fn on_airport_removed(&mut self, _event: &AirportRemovedEvent) {}

    fn on_airport_status_changed(&mut self, _event: &AirportStatusChangedEvent) {}

    fn on_runway_status_changed(&mut self, _event: &RunwayStatusChangedEvent) {}

    fn on_airport_configurations_updated(&mut self, _event: &AirportConfigurationsUpdatedEvent) {}

    // ─── Controller ──────────────────────────────────────────────────

    fn on_atc_position_update(&mut self, _event: &AtcPositionUpdateEvent) {}

    fn on_atis_lines_update(&mut self, _event: &AtisLinesUpdateEvent) {}

    fn on_capabilities_update(&mut self, _event: &CapabilitiesUpdateEvent) {}

    fn on_controller_disconnected(&mut self, _event: &ControllerDisconnectedEvent) {}

    fn on_controller_connected(&mut self, _event: &ControllerConnectedEvent) {}

    fn on_is_controller_atc(&mut self, _event: &IsControllerATCEvent) {}

    // ─── Controller data ─────────────────────────────────────────────

    fn on_controller_data_updated(&mut self, _event: &ControllerDataUpdatedEvent) {}

    fn on_aircraft_beacon_code_changed(&mut self, _event: &AircraftBeaconCodeChangedEvent) {}

    fn on_aircraft_handoff_cancelled(&mut self, _event: &AircraftHandoffCancelledEvent) {}

    fn on_aircraft_owned_by_changed(&mut self, _event: &AircraftOwnedByChangedEvent) {}

    fn on_aircraft_handoff_rejected(&mut self, _event: &AircraftHandoffRejectedEvent) {}

    fn on_aircraft_terminated_tracking(&mut self, _event: &AircraftTerminatedTrackingEvent) {}

    fn on_aircraft_initiated_tracking(&mut self, _event: &AircraftInitiatedTrackingEvent) {}

    fn on_aircraft_temporary_altitude_changed(
        &mut self,
        _event: &AircraftTemporaryAltitudeChangedEvent,
    ) {
    }

    fn on_aircraft_cdm_status_changed(&mut self, _event: &AircraftCDMStatusChangedEvent) {}

    fn on_aircraft_scratchpad_updated(&mut self, _event: &AircraftScratchpadUpdatedEvent) {}

    fn on_aircraft_heading_changed(&mut self, _event: &AircraftHeadingChangedEvent) {}

    fn on_aircraft_assigned_speed_changed(&mut self, _event: &AircraftAssignedSpeedChangedEvent) {}

    // ─── EuroScope proxy ─────────────────────────────────────────────

    fn on_euroscope_proxy_server_start(&mut self, _event: &EuroScopeProxyServerStartEvent) {}

    fn on_euroscope_proxy_server_stop(&mut self, _event: &EuroScopeProxyServerStopEvent) {}

    fn on_euroscope_proxy_server_client_connected(
        &mut self,
        _event: &EuroScopeProxyServerClientConnectedEvent,
    ) {
    }

    fn on_euroscope_proxy_server_client_disconnected(
        &mut self,
        _event: &EuroScopeProxyServerClientDisconnectedEvent,
    ) {
    }

    fn on_euroscope_proxy_server_error(&mut self, _event: &EuroScopeProxyServerErrorEvent) {}

    // ─── Flight plans ────────────────────────────────────────────────

    fn on_flightplan_updated(&mut self, _event: &FlightplanUpdatedEvent) {}

    fn on_flightplan_removed(&mut self, _event: &FlightplanRemovedEvent) {}

    fn on_flightplan_voice_type_changed(&mut self, _event: &FlightplanVoiceTypeChangedEvent) {}

    fn on_flightplan_route_changed(&mut self, _event: &FlightplanRouteChangedEvent) {}

    // ─── FSD ─────────────────────────────────────────────────────────

    fn on_fsd_error(&mut self, _event: &FsdErrorEvent) {}

    fn on_fsd_connection_state_change(&mut self, _event: &FsdConnectionStateChangeEvent) {}

    fn on_fsd_connected(&mut self, _event: &FsdConnectedEvent) {}

    fn on_fsd_disconnected(&mut self, _event: &FsdDisconnectedEvent) {}

    fn on_fsd_connection_model_updated(&mut self, _event: &FsdConnectionModelUpdatedEvent) {}

    // ─── Sectors ─────────────────────────────────────────────────────

    fn on_owned_sector_updated(&mut self, _event: &OwnedSectorUpdatedEvent) {}

    // ─── Chat ────────────────────────────────────────────────────────

    fn on_frequency_message_received(&mut self, _event: &FrequencyMessageReceivedEvent) {}

    fn on_flightplan_message_received(&mut self, _event: &FlightplanMessageReceivedEvent) {}

    fn on_atis_info_message_received(&mut self, _event: &ATISInfoMessageReceivedEvent) {}

    fn on_private_message_received(&mut self, _event: &PrivateMessageReceivedEvent) {}

    fn on_broadcast_message_received(&mut self, _event: &BroadcastMessageReceivedEvent) {}

    fn on_supervisor_message_received(&mut self, _event: &SupervisorMessageReceivedEvent) {}

    fn on_server_message_received(&mut self, _event: &ServerMessageReceivedEvent) {}

    fn on_atc_message_received(&mut self, _event: &AtcMessageReceivedEvent) {}

    // ─── Squawk ──────────────────────────────────────────────────────

    fn on_squawk_assigned(&mut self, _event: &SquawkAssignedEvent) {}

    // ─── Tags ────────────────────────────────────────────────────────

    fn on_tag_action(&mut self, _event: &TagActionEvent) {}

    fn on_tag_dropdown_action(&mut self, _event: &DropdownActionEvent) {}
}

/// Thin, FFI-safe handle around a boxed plugin.
///
/// `CreatePluginInstance` hands one of these to the host as a raw pointer.
/// The host becomes its sole owner and gives it back to the plugin's own
/// `DestroyPluginInstance` once `shutdown` has returned, so the allocation is
/// freed by the binary that made it.
pub struct PluginInstance {
    plugin: Box<dyn Plugin>,
}

impl PluginInstance {
    pub fn new(plugin: Box<dyn Plugin>) -> Self {
        Self { plugin }
    }

    /// Move the instance to the heap and give up ownership
    pub fn into_raw(self) -> *mut PluginInstance {
        Box::into_raw(Box::new(self))
    }

    /// Take back ownership of a pointer made by [`into_raw`](Self::into_raw).
    ///
    /// # Safety
    ///
    /// `ptr` must come from `into_raw` in the same binary and must not be used
    /// again afterwards.
    pub unsafe fn from_raw(ptr: *mut PluginInstance) -> Box<PluginInstance> {
        unsafe { Box::from_raw(ptr) }
    }

    pub fn plugin(&self) -> &dyn Plugin {
        self.plugin.as_ref()
    }

    pub fn plugin_mut(&mut self) -> &mut dyn Plugin {
        self.plugin.as_mut()
    }
}

/// Export a plugin type for dynamic loading.
///
/// The type must implement [`Plugin`] and [`Default`].
///
/// # Usage
///
/// ```ignore
/// neoradar_sdk::export_plugin!(MyPlugin);
/// ```
///
/// # Generated Functions
///
/// - `GetPluginSDKVersionMajor()`, `GetPluginSDKVersionMinor()`,
///   `GetPluginSDKVersionPatch()`: the SDK version the plugin was built with
/// - `CreatePluginInstance()`: allocates a new instance; the caller owns it
/// - `DestroyPluginInstance()`: frees an instance made by `CreatePluginInstance`
#[macro_export]
macro_rules! export_plugin {
    ($plugin_type:ty) => {
        #[unsafe(no_mangle)]
        #[allow(non_snake_case)]
        pub extern "C" fn GetPluginSDKVersionMajor() -> ::std::os::raw::c_int {
            $crate::SDK_VERSION.major as ::std::os::raw::c_int
        }

        #[unsafe(no_mangle)]
        #[allow(non_snake_case)]
        pub extern "C" fn GetPluginSDKVersionMinor() -> ::std::os::raw::c_int {
            $crate::SDK_VERSION.minor as ::std::os::raw::c_int
        }

        #[unsafe(no_mangle)]
        #[allow(non_snake_case)]
        pub extern "C" fn GetPluginSDKVersionPatch() -> ::std::os::raw::c_int {
            $crate::SDK_VERSION.patch as ::std::os::raw::c_int
        }

        #[unsafe(no_mangle)]
        #[allow(non_snake_case)]
        pub extern "C" fn CreatePluginInstance() -> *mut $crate::PluginInstance {
            let plugin: Box<dyn $crate::Plugin> = Box::new(<$plugin_type>::default());
            $crate::PluginInstance::new(plugin).into_raw()
        }

        #[unsafe(no_mangle)]
        #[allow(non_snake_case)]
        pub extern "C" fn DestroyPluginInstance(ptr: *mut $crate::PluginInstance) {
            if !ptr.is_null() {
                unsafe {
                    drop($crate::PluginInstance::from_raw(ptr));
                }
            }
        }
    };
}
