//! Owned event taxonomy for the host side of dispatch.
//!
//! A host builds an [`Event`] when domain state changes and calls
//! [`Event::dispatch`] for each plugin. Dispatch lends the payload to the
//! matching `on_*` hook for the duration of the call only; the event stays
//! owned by the host.

use serde::{Deserialize, Serialize};

use crate::Plugin;
use crate::{aircraft, airport, chat, controller, controller_data, euroscope, flightplan, fsd};
use crate::{sectors, squawk, tag};

/// Declares the `Event` enum together with its routing to `Plugin` hooks, so
/// a variant cannot exist without a hook.
macro_rules! events {
    ($($variant:ident($payload:ty) => $hook:ident,)+) => {
        /// Every notification the host can deliver to a plugin
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "kind", content = "payload")]
        #[non_exhaustive]
        pub enum Event {
            $($variant($payload),)+
        }

        impl Event {
            /// Stable name of the event kind, used in logs
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }

            /// Deliver this event to the plugin's matching hook
            pub fn dispatch(&self, plugin: &mut dyn Plugin) {
                match self {
                    $(Self::$variant(payload) => plugin.$hook(payload),)+
                }
            }
        }

        $(
            impl From<$payload> for Event {
                fn from(payload: $payload) -> Self {
                    Self::$variant(payload)
                }
            }
        )+

        /// Names of all event kinds, in declaration order
        pub const EVENT_KINDS: &[&str] = &[$(stringify!($variant),)+];
    };
}

events! {
    // Aircraft
    AircraftConnected(aircraft::AircraftConnectedEvent) => on_aircraft_connected,
    AircraftDisconnected(aircraft::AircraftDisconnectedEvent) => on_aircraft_disconnected,
    PositionUpdate(aircraft::PositionUpdateEvent) => on_position_update,

    // Airport
    AirportAdded(airport::AirportAddedEvent) => on_airport_added,
    AirportRemoved(airport::AirportRemovedEvent) => on_airport_removed,
    AirportStatusChanged(airport::AirportStatusChangedEvent) => on_airport_status_changed,
    RunwayStatusChanged(airport::RunwayStatusChangedEvent) => on_runway_status_changed,
    AirportConfigurationsUpdated(airport::AirportConfigurationsUpdatedEvent) => on_airport_configurations_updated,

    // Controller
    AtcPositionUpdate(controller::AtcPositionUpdateEvent) => on_atc_position_update,
    AtisLinesUpdate(controller::AtisLinesUpdateEvent) => on_atis_lines_update,
    CapabilitiesUpdate(controller::CapabilitiesUpdateEvent) => on_capabilities_update,
    ControllerDisconnected(controller::ControllerDisconnectedEvent) => on_controller_disconnected,
    ControllerConnected(controller::ControllerConnectedEvent) => on_controller_connected,
    IsControllerATC(controller::IsControllerATCEvent) => on_is_controller_atc,

    // Controller data
    ControllerDataUpdated(controller_data::ControllerDataUpdatedEvent) => on_controller_data_updated,
    AircraftBeaconCodeChanged(controller_data::AircraftBeaconCodeChangedEvent) => on_aircraft_beacon_code_changed,
    AircraftHandoffCancelled(controller_data::AircraftHandoffCancelledEvent) => on_aircraft_handoff_cancelled,
    AircraftOwnedByChanged(controller_data::AircraftOwnedByChangedEvent) => on_aircraft_owned_by_changed,
    AircraftHandoffRejected(controller_data::AircraftHandoffRejectedEvent) => on_aircraft_handoff_rejected,
    AircraftTerminatedTracking(controller_data::AircraftTerminatedTrackingEvent) => on_aircraft_terminated_tracking,
    AircraftInitiatedTracking(controller_data::AircraftInitiatedTrackingEvent) => on_aircraft_initiated_tracking,
    AircraftTemporaryAltitudeChanged(controller_data::AircraftTemporaryAltitudeChangedEvent) => on_aircraft_temporary_altitude_changed,
    AircraftCDMStatusChanged(controller_data::AircraftCDMStatusChangedEvent) => on_aircraft_cdm_status_changed,
    AircraftScratchpadUpdated(controller_data::AircraftScratchpadUpdatedEvent) => on_aircraft_scratchpad_updated,
    AircraftHeadingChanged(controller_data::AircraftHeadingChangedEvent) => on_aircraft_heading_changed,
    AircraftAssignedSpeedChanged(controller_data::AircraftAssignedSpeedChangedEvent) => on_aircraft_assigned_speed_changed,

    // EuroScope proxy
    EuroScopeProxyServerStart(euroscope::EuroScopeProxyServerStartEvent) => on_euroscope_proxy_server_start,
    EuroScopeProxyServerStop(euroscope::EuroScopeProxyServerStopEvent) => on_euroscope_proxy_server_stop,
    EuroScopeProxyServerClientConnected(euroscope::EuroScopeProxyServerClientConnectedEvent) => on_euroscope_proxy_server_client_connected,
    EuroScopeProxyServerClientDisconnected(euroscope::EuroScopeProxyServerClientDisconnectedEvent) => on_euroscope_proxy_server_client_disconnected,
    EuroScopeProxyServerError(euroscope::EuroScopeProxyServerErrorEvent) => on_euroscope_proxy_server_error,

    // Flight plans
    FlightplanUpdated(flightplan::FlightplanUpdatedEvent) => on_flightplan_updated,
    FlightplanRemoved(flightplan::FlightplanRemovedEvent) => on_flightplan_removed,
    FlightplanVoiceTypeChanged(flightplan::FlightplanVoiceTypeChangedEvent) => on_flightplan_voice_type_changed,
    FlightplanRouteChanged(flightplan::FlightplanRouteChangedEvent) => on_flightplan_route_changed,

    // FSD
    FsdError(fsd::FsdErrorEvent) => on_fsd_error,
    FsdConnectionStateChange(fsd::FsdConnectionStateChangeEvent) => on_fsd_connection_state_change,
    FsdConnected(fsd::FsdConnectedEvent) => on_fsd_connected,
    FsdDisconnected(fsd::FsdDisconnectedEvent) => on_fsd_disconnected,
    FsdConnectionModelUpdated(fsd::FsdConnectionModelUpdatedEvent) => on_fsd_connection_model_updated,

    // Sectors
    OwnedSectorUpdated(sectors::OwnedSectorUpdatedEvent) => on_owned_sector_updated,

    // Chat
    FrequencyMessageReceived(chat::FrequencyMessageReceivedEvent) => on_frequency_message_received,
    FlightplanMessageReceived(chat::FlightplanMessageReceivedEvent) => on_flightplan_message_received,
    ATISInfoMessageReceived(chat::ATISInfoMessageReceivedEvent) => on_atis_info_message_received,
    PrivateMessageReceived(chat::PrivateMessageReceivedEvent) => on_private_message_received,
    BroadcastMessageReceived(chat::BroadcastMessageReceivedEvent) => on_broadcast_message_received,
    SupervisorMessageReceived(chat::SupervisorMessageReceivedEvent) => on_supervisor_message_received,
    ServerMessageReceived(chat::ServerMessageReceivedEvent) => on_server_message_received,
    AtcMessageReceived(chat::AtcMessageReceivedEvent) => on_atc_message_received,

    // Squawk
    SquawkAssigned(squawk::SquawkAssignedEvent) => on_squawk_assigned,

    // Tags
    TagAction(tag::TagActionEvent) => on_tag_action,
    TagDropdownAction(tag::DropdownActionEvent) => on_tag_dropdown_action,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::{AirportStatus, AirportStatusChangedEvent, RunwayStatusChangedEvent};
    use crate::{ClientInformation, CoreApi, PluginMetadata};
    use std::sync::Arc;

    #[derive(Default)]
    struct RunwayWatcher {
        runway_changes: Vec<RunwayStatusChangedEvent>,
    }

    impl Plugin for RunwayWatcher {
        fn initialize(&mut self, _: &PluginMetadata, _: Arc<dyn CoreApi>, _: ClientInformation) {}

        fn shutdown(&mut self) {}

        fn metadata(&self) -> PluginMetadata {
            PluginMetadata::new("runway-watcher", "0.1.0", "test")
        }

        fn on_runway_status_changed(&mut self, event: &RunwayStatusChangedEvent) {
            self.runway_changes.push(event.clone());
        }
    }

    fn runway_event() -> RunwayStatusChangedEvent {
        RunwayStatusChangedEvent {
            icao: "KJFK".to_string(),
            runway: "04L".to_string(),
            active: true,
            is_arrival: false,
        }
    }

    #[test]
    fn test_event_kind_count() {
        assert_eq!(EVENT_KINDS.len(), 52);
    }

    #[test]
    fn test_event_kinds_are_unique() {
        let mut kinds = EVENT_KINDS.to_vec();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), EVENT_KINDS.len());
    }

    #[test]
    fn test_dispatch_routes_to_matching_hook() {
        let mut plugin = RunwayWatcher::default();
        let event = Event::from(runway_event());

        event.dispatch(&mut plugin);

        assert_eq!(plugin.runway_changes, vec![runway_event()]);
    }

    #[test]
    fn test_dispatch_ignores_other_kinds() {
        let mut plugin = RunwayWatcher::default();
        let event = Event::from(AirportStatusChangedEvent {
            icao: "KJFK".to_string(),
            status: AirportStatus::Observed,
        });

        event.dispatch(&mut plugin);

        assert!(plugin.runway_changes.is_empty());
    }

    #[test]
    fn test_kind_matches_variant_name() {
        assert_eq!(Event::from(runway_event()).kind(), "RunwayStatusChanged");
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(Event::from(runway_event())).unwrap();
        assert_eq!(json["kind"], "RunwayStatusChanged");
        assert_eq!(json["payload"]["icao"], "KJFK");
        assert_eq!(json["payload"]["is_arrival"], false);
    }
}
