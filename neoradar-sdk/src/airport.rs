//! Airport capability module
//!
//! Airports are keyed by ICAO code. Each airport has a set of active arrival
//! runways and a set of active departure runways, and is either actively
//! controlled or only observed.

use serde::{Deserialize, Serialize};

/// Whether the user controls an airport or only watches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum AirportStatus {
    #[default]
    Active,
    Observed,
}

/// Which runway set an operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum RunwayType {
    Departure,
    Arrival,
}

/// One entry of a batch runway update
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunwayStatusChange {
    pub icao: String,
    pub runway: String,
    pub runway_type: RunwayType,
}

impl RunwayStatusChange {
    pub fn new(icao: impl Into<String>, runway: impl Into<String>, runway_type: RunwayType) -> Self {
        Self {
            icao: icao.into(),
            runway: runway.into(),
            runway_type,
        }
    }
}

/// Runway configuration of one airport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportConfig {
    pub icao: String,
    /// Active arrival runways
    pub arr_runways: Vec<String>,
    /// Active departure runways
    pub dep_runways: Vec<String>,
    pub status: AirportStatus,
}

impl AirportConfig {
    /// Runways active for the given type
    pub fn runways(&self, runway_type: RunwayType) -> &[String] {
        match runway_type {
            RunwayType::Departure => &self.dep_runways,
            RunwayType::Arrival => &self.arr_runways,
        }
    }
}

/// Outcome of [`AirportApi::batch_update_runways`].
///
/// Every input entry lands in exactly one of the four partitions, in the
/// order it was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchRunwayResult {
    pub added: Vec<RunwayStatusChange>,
    pub failed_additions: Vec<RunwayStatusChange>,
    pub removed: Vec<RunwayStatusChange>,
    pub failed_removals: Vec<RunwayStatusChange>,
}

impl BatchRunwayResult {
    /// Total number of entries accounted for
    pub fn len(&self) -> usize {
        self.added.len() + self.failed_additions.len() + self.removed.len() + self.failed_removals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if no entry failed
    pub fn all_succeeded(&self) -> bool {
        self.failed_additions.is_empty() && self.failed_removals.is_empty()
    }
}

// ─── Events ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportAddedEvent {
    pub icao: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportRemovedEvent {
    pub icao: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportStatusChangedEvent {
    pub icao: String,
    pub status: AirportStatus,
}

/// A runway was activated or deactivated for arrivals or departures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunwayStatusChangedEvent {
    pub icao: String,
    pub runway: String,
    /// True if the runway became active, false if it was removed
    pub active: bool,
    /// True for the arrival set, false for the departure set
    pub is_arrival: bool,
}

/// The set of airport configurations changed as a whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportConfigurationsUpdatedEvent {
    /// Number of configurations after the update
    pub configuration_count: usize,
}

// ─── Capability ──────────────────────────────────────────────────────

/// Airport configuration reads and writes.
///
/// Writes return `false` when rejected (unknown ICAO, unknown runway) and leave
/// host state untouched.
pub trait AirportApi: Send + Sync {
    /// All airport configurations
    fn configurations(&self) -> Vec<AirportConfig>;

    /// Configuration of one airport, `None` if the ICAO is unknown
    fn configuration_by_icao(&self, icao: &str) -> Option<AirportConfig>;

    /// True if `runway` is an active departure runway at `icao`
    fn is_dep_runway_active(&self, icao: &str, runway: &str) -> bool;

    /// True if `runway` is an active arrival runway at `icao`
    fn is_arr_runway_active(&self, icao: &str, runway: &str) -> bool;

    /// Activate a runway for departures or arrivals
    fn set_runway_status(&self, icao: &str, runway: &str, runway_type: RunwayType) -> bool;

    /// Show or hide extended runway centerlines for an airport
    fn set_show_runway_centerlines(&self, icao: &str, show: bool) -> bool;

    /// Deactivate a runway for departures or arrivals
    fn remove_runway_status(&self, icao: &str, runway: &str, runway_type: RunwayType) -> bool;

    /// Apply many runway changes in one call.
    ///
    /// Entries are evaluated one by one in the order given, additions first.
    /// A failed entry does not roll back or block its siblings.
    fn batch_update_runways(
        &self,
        to_add: &[RunwayStatusChange],
        to_remove: &[RunwayStatusChange],
    ) -> BatchRunwayResult;

    /// Remove an airport from the system
    fn delete_airport(&self, icao: &str) -> bool;

    /// Change whether an airport is active or observed
    fn set_airport_status(&self, icao: &str, status: AirportStatus) -> bool;
}
