//! Aircraft capability module

use serde::{Deserialize, Serialize};

/// Mean Earth radius in nautical miles
const EARTH_RADIUS_NM: f64 = 3440.065;

/// Transponder mode reported by the pilot client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TransponderMode {
    #[default]
    Standby,
    ModeC,
    Ident,
}

/// Transponder state of an aircraft
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transponder {
    /// Four-digit octal code as squawked by the pilot
    pub code: String,
    pub mode: TransponderMode,
}

/// Last reported position of an aircraft
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AircraftPosition {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// True altitude in feet
    pub altitude: i32,
    /// True heading in degrees
    pub heading: f64,
    /// Ground speed in knots
    pub ground_speed: u32,
    /// Vertical speed in feet per minute
    pub vertical_speed: i32,
    pub on_ground: bool,
}

impl AircraftPosition {
    /// Great-circle distance to another position in nautical miles
    pub fn distance_to(&self, other: &AircraftPosition) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_NM * a.sqrt().asin()
    }
}

/// An aircraft known to the host, keyed by callsign
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aircraft {
    pub callsign: String,
    pub position: AircraftPosition,
    pub transponder: Transponder,
}

// ─── Events ──────────────────────────────────────────────────────────

/// An aircraft connected to the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftConnectedEvent {
    pub callsign: String,
}

/// An aircraft left the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftDisconnectedEvent {
    pub callsign: String,
}

/// An aircraft reported a new position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdateEvent {
    pub callsign: String,
    pub position: AircraftPosition,
}

// ─── Capability ──────────────────────────────────────────────────────

/// Read access to the aircraft the host currently tracks.
pub trait AircraftApi: Send + Sync {
    /// All connected aircraft
    fn all(&self) -> Vec<Aircraft>;

    /// Look up an aircraft by callsign
    fn by_callsign(&self, callsign: &str) -> Option<Aircraft>;

    /// Last reported position of an aircraft
    fn position(&self, callsign: &str) -> Option<AircraftPosition> {
        self.by_callsign(callsign).map(|aircraft| aircraft.position)
    }

    /// Great-circle distance between two aircraft in nautical miles.
    ///
    /// Returns `None` if either callsign is unknown.
    fn distance_between(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.position(from)?;
        let to = self.position(to)?;
        Some(from.distance_to(&to))
    }
}
