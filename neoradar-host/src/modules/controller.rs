use std::collections::BTreeMap;
use std::sync::RwLock;

use neoradar_sdk::controller::{
    AtcPositionUpdateEvent, AtisLinesUpdateEvent, CapabilitiesUpdateEvent, Controller,
    ControllerApi, ControllerConnectedEvent, ControllerDisconnectedEvent, IsControllerATCEvent,
};

use super::{read, write};
use crate::queue::EventQueue;

#[derive(Debug, Default)]
struct Controllers {
    by_callsign: BTreeMap<String, Controller>,
    me: Option<String>,
}

/// Controller stations seen on the network
#[derive(Debug)]
pub struct ControllerStore {
    state: RwLock<Controllers>,
    queue: EventQueue,
}

impl ControllerStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            state: RwLock::new(Controllers::default()),
            queue,
        }
    }

    /// Record the user's own callsign, or clear it on disconnect
    pub fn set_my_callsign(&self, callsign: Option<&str>) {
        write(&self.state).me = callsign.map(str::to_string);
    }

    /// A controller station connected
    pub fn connect(&self, controller: Controller) -> bool {
        let mut state = write(&self.state);
        if state.by_callsign.contains_key(&controller.callsign) {
            return false;
        }
        self.queue.push(ControllerConnectedEvent {
            callsign: controller.callsign.clone(),
        });
        if controller.is_atc {
            self.queue.push(IsControllerATCEvent {
                callsign: controller.callsign.clone(),
                is_atc: true,
            });
        }
        state
            .by_callsign
            .insert(controller.callsign.clone(), controller);
        true
    }

    /// A position update from a connected station
    pub fn update_position(&self, update: AtcPositionUpdateEvent) -> bool {
        let mut state = write(&self.state);
        let Some(controller) = state.by_callsign.get_mut(&update.callsign) else {
            return false;
        };
        controller.facility = update.facility;
        controller.frequencies.clone_from(&update.frequencies);
        controller.latitude = update.latitude;
        controller.longitude = update.longitude;
        controller.visibility_range = update.visibility_range;
        self.queue.push(update);
        true
    }

    pub fn update_atis(&self, callsign: &str, lines: Vec<String>) -> bool {
        let mut state = write(&self.state);
        let Some(controller) = state.by_callsign.get_mut(callsign) else {
            return false;
        };
        controller.atis_lines.clone_from(&lines);
        self.queue.push(AtisLinesUpdateEvent {
            callsign: callsign.to_string(),
            lines,
        });
        true
    }

    pub fn update_capabilities(&self, callsign: &str, capabilities: Vec<String>) -> bool {
        let mut state = write(&self.state);
        let Some(controller) = state.by_callsign.get_mut(callsign) else {
            return false;
        };
        controller.capabilities.clone_from(&capabilities);
        self.queue.push(CapabilitiesUpdateEvent {
            callsign: callsign.to_string(),
            capabilities,
        });
        true
    }

    /// The network reported whether a station is a real ATC position
    pub fn set_is_atc(&self, callsign: &str, is_atc: bool) -> bool {
        let mut state = write(&self.state);
        let Some(controller) = state.by_callsign.get_mut(callsign) else {
            return false;
        };
        if controller.is_atc != is_atc {
            controller.is_atc = is_atc;
            self.queue.push(IsControllerATCEvent {
                callsign: callsign.to_string(),
                is_atc,
            });
        }
        true
    }

    pub fn disconnect(&self, callsign: &str) -> bool {
        let mut state = write(&self.state);
        if state.by_callsign.remove(callsign).is_none() {
            return false;
        }
        self.queue.push(ControllerDisconnectedEvent {
            callsign: callsign.to_string(),
        });
        true
    }
}

impl ControllerApi for ControllerStore {
    fn all(&self) -> Vec<Controller> {
        read(&self.state).by_callsign.values().cloned().collect()
    }

    fn by_callsign(&self, callsign: &str) -> Option<Controller> {
        read(&self.state).by_callsign.get(callsign).cloned()
    }

    fn my_callsign(&self) -> Option<String> {
        read(&self.state).me.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neoradar_sdk::controller::Facility;

    fn tower() -> Controller {
        Controller {
            callsign: "EGLL_TWR".to_string(),
            facility: Facility::Tower,
            frequencies: vec![118_505, 118_700],
            is_atc: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_connect_queues_connected_and_atc() {
        let queue = EventQueue::new();
        let store = ControllerStore::new(queue.clone());
        assert!(store.connect(tower()));

        let kinds: Vec<&str> = queue.drain().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, ["ControllerConnected", "IsControllerATC"]);
    }

    #[test]
    fn test_on_frequency() {
        let store = ControllerStore::new(EventQueue::new());
        store.connect(tower());

        assert_eq!(store.on_frequency(118_700).len(), 1);
        assert!(store.on_frequency(121_500).is_empty());
    }

    #[test]
    fn test_atis_update_and_disconnect() {
        let store = ControllerStore::new(EventQueue::new());
        store.connect(tower());

        assert!(store.update_atis("EGLL_TWR", vec!["INFO A".to_string()]));
        assert_eq!(store.by_callsign("EGLL_TWR").unwrap().atis_lines, ["INFO A"]);

        assert!(store.disconnect("EGLL_TWR"));
        assert!(!store.update_atis("EGLL_TWR", Vec::new()));
    }

    #[test]
    fn test_my_callsign() {
        let store = ControllerStore::new(EventQueue::new());
        assert_eq!(store.my_callsign(), None);
        store.set_my_callsign(Some("EGLL_APP"));
        assert_eq!(store.my_callsign().as_deref(), Some("EGLL_APP"));
    }
}
