use std::collections::BTreeMap;
use std::sync::RwLock;

use neoradar_sdk::aircraft::{
    Aircraft, AircraftApi, AircraftConnectedEvent, AircraftDisconnectedEvent, AircraftPosition,
    PositionUpdateEvent,
};

use super::{read, write};
use crate::queue::EventQueue;

/// Connected aircraft, keyed by callsign
#[derive(Debug)]
pub struct AircraftStore {
    aircraft: RwLock<BTreeMap<String, Aircraft>>,
    queue: EventQueue,
}

impl AircraftStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            aircraft: RwLock::new(BTreeMap::new()),
            queue,
        }
    }

    /// An aircraft appeared on the network. `false` if already connected.
    pub fn connect(&self, aircraft: Aircraft) -> bool {
        let mut all = write(&self.aircraft);
        if all.contains_key(&aircraft.callsign) {
            return false;
        }
        self.queue.push(AircraftConnectedEvent {
            callsign: aircraft.callsign.clone(),
        });
        all.insert(aircraft.callsign.clone(), aircraft);
        true
    }

    /// A position report arrived for a connected aircraft
    pub fn update_position(&self, callsign: &str, position: AircraftPosition) -> bool {
        let mut all = write(&self.aircraft);
        let Some(aircraft) = all.get_mut(callsign) else {
            return false;
        };
        aircraft.position = position;
        self.queue.push(PositionUpdateEvent {
            callsign: callsign.to_string(),
            position,
        });
        true
    }

    pub fn disconnect(&self, callsign: &str) -> bool {
        let mut all = write(&self.aircraft);
        if all.remove(callsign).is_none() {
            return false;
        }
        self.queue.push(AircraftDisconnectedEvent {
            callsign: callsign.to_string(),
        });
        true
    }
}

impl AircraftApi for AircraftStore {
    fn all(&self) -> Vec<Aircraft> {
        read(&self.aircraft).values().cloned().collect()
    }

    fn by_callsign(&self, callsign: &str) -> Option<Aircraft> {
        read(&self.aircraft).get(callsign).cloned()
    }
}
