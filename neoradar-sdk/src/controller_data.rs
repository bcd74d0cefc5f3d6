//! Controller data capability module
//!
//! Per-aircraft data that controllers attach to a track: ownership, assigned
//! values, scratchpad and CDM status.

use serde::{Deserialize, Serialize};

/// Controller-assigned data for one aircraft, keyed by callsign
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControllerDataRecord {
    pub callsign: String,
    /// Callsign of the controller tracking the aircraft
    pub owned_by: Option<String>,
    /// Controller a handoff is pending to
    pub handoff_target: Option<String>,
    /// Assigned squawk code
    pub beacon_code: Option<String>,
    pub scratchpad: String,
    /// Temporary (cleared) altitude in feet
    pub temporary_altitude: Option<i32>,
    /// Assigned heading in degrees, 1 to 360
    pub assigned_heading: Option<u16>,
    /// Assigned speed in knots
    pub assigned_speed: Option<u32>,
    pub cdm_status: Option<String>,
}

// ─── Events ──────────────────────────────────────────────────────────

/// Something in an aircraft's controller data changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerDataUpdatedEvent {
    pub callsign: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftBeaconCodeChangedEvent {
    pub callsign: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftHandoffCancelledEvent {
    pub callsign: String,
    /// Controller that cancelled the handoff
    pub by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftOwnedByChangedEvent {
    pub callsign: String,
    pub previous_owner: Option<String>,
    pub owned_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftHandoffRejectedEvent {
    pub callsign: String,
    /// Controller that refused the handoff
    pub by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftTerminatedTrackingEvent {
    pub callsign: String,
    pub by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftInitiatedTrackingEvent {
    pub callsign: String,
    pub by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftTemporaryAltitudeChangedEvent {
    pub callsign: String,
    pub altitude: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftCDMStatusChangedEvent {
    pub callsign: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftScratchpadUpdatedEvent {
    pub callsign: String,
    pub scratchpad: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftHeadingChangedEvent {
    pub callsign: String,
    pub heading: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftAssignedSpeedChangedEvent {
    pub callsign: String,
    pub speed: u32,
}

// ─── Capability ──────────────────────────────────────────────────────

/// Reads and amends controller data.
///
/// Writes return `false` for unknown callsigns, out-of-range values, or when
/// the user is not allowed to amend the track (owned by another controller).
pub trait ControllerDataApi: Send + Sync {
    fn by_callsign(&self, callsign: &str) -> Option<ControllerDataRecord>;

    fn set_scratchpad(&self, callsign: &str, scratchpad: &str) -> bool;

    fn set_temporary_altitude(&self, callsign: &str, altitude: i32) -> bool;

    /// Heading must be within 1..=360
    fn set_assigned_heading(&self, callsign: &str, heading: u16) -> bool;

    fn set_assigned_speed(&self, callsign: &str, speed: u32) -> bool;

    /// Start tracking an aircraft; fails if another controller owns it
    fn initiate_tracking(&self, callsign: &str) -> bool;

    /// Stop tracking an aircraft; fails unless the user owns it
    fn terminate_tracking(&self, callsign: &str) -> bool;

    /// True if the user currently tracks the aircraft
    fn is_tracked_by_me(&self, callsign: &str) -> bool;
}
