//! Controller capability module

use serde::{Deserialize, Serialize};

/// Facility type of a controller position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Facility {
    #[default]
    Observer,
    FlightServiceStation,
    Delivery,
    Ground,
    Tower,
    Approach,
    Centre,
}

/// A controller station known to the host, keyed by callsign
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Controller {
    pub callsign: String,
    pub facility: Facility,
    /// Network rating
    pub rating: u8,
    /// Primary frequency first, in kHz
    pub frequencies: Vec<u32>,
    pub latitude: f64,
    pub longitude: f64,
    /// Visibility range in nautical miles
    pub visibility_range: u32,
    /// False for observers and supervisors without a position
    pub is_atc: bool,
    pub atis_lines: Vec<String>,
    pub capabilities: Vec<String>,
}

impl Controller {
    /// Primary frequency, if the station has one
    pub fn primary_frequency(&self) -> Option<u32> {
        self.frequencies.first().copied()
    }
}

// ─── Events ──────────────────────────────────────────────────────────

/// Position report from a controller station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtcPositionUpdateEvent {
    pub callsign: String,
    pub facility: Facility,
    pub frequencies: Vec<u32>,
    pub latitude: f64,
    pub longitude: f64,
    pub visibility_range: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtisLinesUpdateEvent {
    pub callsign: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitiesUpdateEvent {
    pub callsign: String,
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerDisconnectedEvent {
    pub callsign: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConnectedEvent {
    pub callsign: String,
}

/// The host resolved whether a station is a real ATC position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsControllerATCEvent {
    pub callsign: String,
    pub is_atc: bool,
}

// ─── Capability ──────────────────────────────────────────────────────

pub trait ControllerApi: Send + Sync {
    /// All connected controller stations
    fn all(&self) -> Vec<Controller>;

    fn by_callsign(&self, callsign: &str) -> Option<Controller>;

    /// The user's own callsign, `None` while not connected
    fn my_callsign(&self) -> Option<String>;

    /// Controllers whose frequency list contains `frequency` (kHz)
    fn on_frequency(&self, frequency: u32) -> Vec<Controller> {
        self.all()
            .into_iter()
            .filter(|controller| controller.frequencies.contains(&frequency))
            .collect()
    }
}
