use std::collections::BTreeMap;
use std::sync::RwLock;

use neoradar_sdk::sectors::{OwnedSectorUpdatedEvent, Sector, SectorsApi};

use super::{read, write};
use crate::queue::EventQueue;

#[derive(Debug, Default)]
struct Sectors {
    by_id: BTreeMap<String, Sector>,
    me: Option<String>,
}

impl Sectors {
    fn owned_ids(&self) -> Vec<String> {
        match &self.me {
            Some(me) => self
                .by_id
                .values()
                .filter(|s| s.owner.as_ref() == Some(me))
                .map(|s| s.id.clone())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Sectors of the loaded package and who owns them
#[derive(Debug)]
pub struct SectorStore {
    state: RwLock<Sectors>,
    queue: EventQueue,
}

impl SectorStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            state: RwLock::new(Sectors::default()),
            queue,
        }
    }

    /// Replace the sector list, e.g. after loading a package
    pub fn load(&self, sectors: Vec<Sector>) {
        let mut state = write(&self.state);
        let before = state.owned_ids();
        state.by_id = sectors.into_iter().map(|s| (s.id.clone(), s)).collect();
        self.notify_if_changed(&state, before);
    }

    pub fn set_my_callsign(&self, callsign: Option<&str>) {
        let mut state = write(&self.state);
        let before = state.owned_ids();
        state.me = callsign.map(str::to_string);
        self.notify_if_changed(&state, before);
    }

    /// Ownership of sectors moved, as computed by the client's sector logic.
    ///
    /// Unknown sector ids are ignored.
    pub fn assign(&self, owners: &[(&str, Option<&str>)]) {
        let mut state = write(&self.state);
        let before = state.owned_ids();
        for (id, owner) in owners {
            if let Some(sector) = state.by_id.get_mut(*id) {
                sector.owner = owner.map(str::to_string);
            }
        }
        self.notify_if_changed(&state, before);
    }

    fn notify_if_changed(&self, state: &Sectors, before: Vec<String>) {
        let sectors = state.owned_ids();
        if sectors != before {
            self.queue.push(OwnedSectorUpdatedEvent { sectors });
        }
    }
}

impl SectorsApi for SectorStore {
    fn owned_sectors(&self) -> Vec<Sector> {
        let state = read(&self.state);
        let Some(me) = &state.me else {
            return Vec::new();
        };
        state
            .by_id
            .values()
            .filter(|s| s.owner.as_ref() == Some(me))
            .cloned()
            .collect()
    }

    fn sector_owner(&self, sector_id: &str) -> Option<String> {
        read(&self.state).by_id.get(sector_id)?.owner.clone()
    }
}
