//! Shared fixtures for host integration tests

#![allow(dead_code)]

use std::path::Path;

use neoradar_host::{HostCore, PluginHostConfig};
use neoradar_sdk::ClientInformation;
use neoradar_sdk::CoreApi;
use neoradar_sdk::aircraft::{Aircraft, AircraftPosition};
use neoradar_sdk::airport::{AirportStatus, RunwayType};
use neoradar_sdk::controller::{AtcPositionUpdateEvent, Controller, Facility};
use neoradar_sdk::flightplan::{Flightplan, VoiceType};
use neoradar_sdk::fsd::ConnectionModel;
use neoradar_sdk::sectors::Sector;
use neoradar_sdk::tag::{DropdownDefinition, TagActionDefinition};

pub fn host_config(dir: &Path) -> PluginHostConfig {
    PluginHostConfig {
        plugin_dirs: vec![dir.join("plugins")],
        registry_path: dir.join("plugins").join("registry.toml"),
        client: ClientInformation {
            client_name: "NeoRadar".to_string(),
            client_version: "1.0.3".to_string(),
            fdps_version: "1.0.3".to_string(),
            combined_version: "1.0.3/1.0.3".to_string(),
            documents_path: dir.join("documents"),
        },
        allow_patch_mismatch: true,
    }
}

/// Walk the host through a session that produces every event kind at least
/// once: traffic, airports, controllers, a network connection, tracking and
/// handoffs, flight plans, the EuroScope proxy, chat, squawks and tags.
pub fn produce_every_event(core: &HostCore) {
    let modules = core.modules();

    // Aircraft
    assert!(core.add_aircraft(Aircraft {
        callsign: "BAW123".to_string(),
        ..Default::default()
    }));
    assert!(modules.aircraft.update_position(
        "BAW123",
        AircraftPosition {
            latitude: 51.47,
            longitude: -0.45,
            altitude: 3000,
            ..Default::default()
        }
    ));

    // Airport
    assert!(modules.airport.add_airport("EGLL", &["27L", "27R"]));
    assert!(core.airport().set_airport_status("EGLL", AirportStatus::Observed));
    assert!(core.airport().set_runway_status("EGLL", "27R", RunwayType::Departure));
    assert!(core.airport().delete_airport("EGLL"));

    // Controller
    assert!(modules.controller.connect(Controller {
        callsign: "EGLL_TWR".to_string(),
        facility: Facility::Tower,
        frequencies: vec![118_500],
        is_atc: true,
        ..Default::default()
    }));
    assert!(modules.controller.update_position(AtcPositionUpdateEvent {
        callsign: "EGLL_TWR".to_string(),
        facility: Facility::Tower,
        frequencies: vec![118_500],
        latitude: 51.47,
        longitude: -0.46,
        visibility_range: 50,
    }));
    assert!(modules
        .controller
        .update_atis("EGLL_TWR", vec!["HEATHROW INFO A".to_string()]));
    assert!(modules
        .controller
        .update_capabilities("EGLL_TWR", vec!["SECPOS".to_string()]));
    assert!(modules.controller.disconnect("EGLL_TWR"));

    // Network connection and sectors
    modules.sectors.load(vec![Sector {
        id: "LON_S".to_string(),
        name: "London South".to_string(),
        owner: Some("EGLL_N_APP".to_string()),
    }]);
    let model = ConnectionModel {
        callsign: "EGLL_N_APP".to_string(),
        facility: Facility::Approach,
        frequency: Some(119_725),
        ..Default::default()
    };
    assert!(core.connect(model.clone()));
    assert!(modules.fsd.update_model(ConnectionModel {
        frequency: Some(134_975),
        ..model
    }));

    // Controller data
    let data = core.controller_data();
    assert!(data.set_scratchpad("BAW123", "RW27"));
    assert!(data.set_temporary_altitude("BAW123", 6000));
    assert!(data.set_assigned_heading("BAW123", 270));
    assert!(data.set_assigned_speed("BAW123", 220));
    assert!(data.initiate_tracking("BAW123"));
    assert!(modules.controller_data.offer_handoff("BAW123", "EGLL_TWR"));
    assert!(modules.controller_data.cancel_handoff("BAW123"));
    assert!(modules.controller_data.offer_handoff("BAW123", "EGLL_TWR"));
    assert!(modules.controller_data.reject_handoff("BAW123"));
    assert!(data.terminate_tracking("BAW123"));
    assert!(modules.controller_data.set_owner("BAW123", Some("LON_S_CTR")));
    assert!(modules.controller_data.set_beacon_code("BAW123", "4721"));
    assert!(modules.controller_data.set_cdm_status("BAW123", "TSAT 1205"));

    // Flight plans
    let plan = Flightplan {
        callsign: "BAW123".to_string(),
        origin: "EGLL".to_string(),
        destination: "LFPG".to_string(),
        route: "MID UL612 BOGNA".to_string(),
        cruise_altitude: 25000,
        voice_type: VoiceType::Voice,
        ..Default::default()
    };
    modules.flightplan.file(plan.clone());
    modules.flightplan.file(Flightplan {
        route: "DVR UL9 KONAN".to_string(),
        voice_type: VoiceType::Text,
        ..plan
    });
    assert!(modules.flightplan.remove("BAW123"));

    // EuroScope proxy
    assert!(modules.euroscope.started(6809));
    assert!(modules.euroscope.client_connected("es-1"));
    assert!(modules.euroscope.client_disconnected("es-1"));
    modules.euroscope.error("bind failed on secondary port");
    assert!(modules.euroscope.stopped());

    // Chat
    modules.chat.receive_frequency(119_725, "BAW123", "request descent");
    modules.chat.receive_flightplan("BAW123", "EGLL_DEL", "route amended");
    modules
        .chat
        .receive_atis("EGLL_ATIS", vec!["INFORMATION A".to_string()]);
    modules.chat.receive_private("EGLL_TWR", "hi");
    modules.chat.receive_broadcast("SUP", "event tonight");
    modules.chat.receive_supervisor("SUP", "check your ATIS");
    modules.chat.receive_server("SERVER", "welcome");
    modules.chat.receive_atc("LON_S_CTR", "releasing BAW123");

    // Squawk
    assert!(core.squawk().assign_squawk("BAW123", "4721"));

    // Tags
    let session = core.session("tags-fixture");
    let action = session
        .tag()
        .register_tag_action(&TagActionDefinition {
            name: "ready".to_string(),
            requires_input: false,
        })
        .unwrap();
    let dropdown = session
        .tag()
        .register_dropdown(&DropdownDefinition {
            name: "stand".to_string(),
            options: vec!["501".to_string(), "502".to_string()],
        })
        .unwrap();
    assert!(modules.tag.trigger_action("tag-1", &action, "BAW123", None));
    assert!(modules.tag.select_dropdown(&dropdown, "BAW123", "502"));

    // Teardown
    assert!(core.remove_aircraft("BAW123"));
    modules.fsd.error(131, "callsign in use");
    assert!(core.disconnect(Some("logoff")));
}
