//! Sector ownership capability module

use serde::{Deserialize, Serialize};

/// An airspace sector from the loaded package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub name: String,
    /// Callsign of the controller owning the sector, if any
    pub owner: Option<String>,
}

/// The set of sectors owned by the user changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedSectorUpdatedEvent {
    /// IDs of all sectors the user owns after the change
    pub sectors: Vec<String>,
}

pub trait SectorsApi: Send + Sync {
    /// Sectors currently owned by the user
    fn owned_sectors(&self) -> Vec<Sector>;

    /// Owner of a sector; `None` if the sector is unknown or unowned
    fn sector_owner(&self, sector_id: &str) -> Option<String>;
}
