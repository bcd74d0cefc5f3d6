//! Flight plan capability module

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FlightRules {
    #[default]
    Ifr,
    Vfr,
}

/// Radio capability the pilot filed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum VoiceType {
    #[default]
    Unknown,
    /// Full voice
    Voice,
    /// Receive voice, reply by text
    Receive,
    /// Text only
    Text,
}

/// A filed flight plan, keyed by callsign
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flightplan {
    pub callsign: String,
    pub origin: String,
    pub destination: String,
    pub alternate: String,
    pub aircraft_type: String,
    pub flight_rules: FlightRules,
    /// Filed cruise altitude in feet
    pub cruise_altitude: i32,
    pub route: String,
    pub remarks: String,
    pub voice_type: VoiceType,
}

// ─── Events ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightplanUpdatedEvent {
    pub callsign: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightplanRemovedEvent {
    pub callsign: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightplanVoiceTypeChangedEvent {
    pub callsign: String,
    pub voice_type: VoiceType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightplanRouteChangedEvent {
    pub callsign: String,
    pub route: String,
}

// ─── Capability ──────────────────────────────────────────────────────

pub trait FlightplanApi: Send + Sync {
    fn all(&self) -> Vec<Flightplan>;

    fn by_callsign(&self, callsign: &str) -> Option<Flightplan>;

    /// Amend the route; rejected for unknown callsigns or an empty route
    fn set_route(&self, callsign: &str, route: &str) -> bool;

    fn set_remarks(&self, callsign: &str, remarks: &str) -> bool;

    /// Amend the cruise altitude in feet; must be positive
    fn set_cruise_altitude(&self, callsign: &str, altitude: i32) -> bool;
}
