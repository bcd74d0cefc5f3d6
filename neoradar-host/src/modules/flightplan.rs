use std::collections::BTreeMap;
use std::sync::RwLock;

use neoradar_sdk::flightplan::{
    Flightplan, FlightplanApi, FlightplanRemovedEvent, FlightplanRouteChangedEvent,
    FlightplanUpdatedEvent, FlightplanVoiceTypeChangedEvent, VoiceType,
};

use super::{read, write};
use crate::queue::EventQueue;

/// Filed flight plans, keyed by callsign
#[derive(Debug)]
pub struct FlightplanStore {
    plans: RwLock<BTreeMap<String, Flightplan>>,
    queue: EventQueue,
}

impl FlightplanStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            plans: RwLock::new(BTreeMap::new()),
            queue,
        }
    }

    /// A flight plan was filed or amended on the network.
    ///
    /// Queues `FlightplanUpdated`, preceded by `FlightplanRouteChanged` and
    /// `FlightplanVoiceTypeChanged` when an existing plan's route or voice
    /// type differs.
    pub fn file(&self, plan: Flightplan) {
        let mut plans = write(&self.plans);
        if let Some(previous) = plans.get(&plan.callsign) {
            if previous.route != plan.route {
                self.queue.push(FlightplanRouteChangedEvent {
                    callsign: plan.callsign.clone(),
                    route: plan.route.clone(),
                });
            }
            if previous.voice_type != plan.voice_type {
                self.queue.push(FlightplanVoiceTypeChangedEvent {
                    callsign: plan.callsign.clone(),
                    voice_type: plan.voice_type,
                });
            }
        }
        self.queue.push(FlightplanUpdatedEvent {
            callsign: plan.callsign.clone(),
        });
        plans.insert(plan.callsign.clone(), plan);
    }

    pub fn set_voice_type(&self, callsign: &str, voice_type: VoiceType) -> bool {
        let mut plans = write(&self.plans);
        let Some(plan) = plans.get_mut(callsign) else {
            return false;
        };
        if plan.voice_type != voice_type {
            plan.voice_type = voice_type;
            self.queue.push(FlightplanVoiceTypeChangedEvent {
                callsign: callsign.to_string(),
                voice_type,
            });
        }
        true
    }

    pub fn remove(&self, callsign: &str) -> bool {
        let mut plans = write(&self.plans);
        if plans.remove(callsign).is_none() {
            return false;
        }
        self.queue.push(FlightplanRemovedEvent {
            callsign: callsign.to_string(),
        });
        true
    }

    fn amend<F>(&self, callsign: &str, change: F) -> bool
    where
        F: FnOnce(&mut Flightplan),
    {
        let mut plans = write(&self.plans);
        let Some(plan) = plans.get_mut(callsign) else {
            return false;
        };
        change(plan);
        self.queue.push(FlightplanUpdatedEvent {
            callsign: callsign.to_string(),
        });
        true
    }
}

impl FlightplanApi for FlightplanStore {
    fn all(&self) -> Vec<Flightplan> {
        read(&self.plans).values().cloned().collect()
    }

    fn by_callsign(&self, callsign: &str) -> Option<Flightplan> {
        read(&self.plans).get(callsign).cloned()
    }

    fn set_route(&self, callsign: &str, route: &str) -> bool {
        let route = route.trim();
        if route.is_empty() {
            return false;
        }
        self.amend(callsign, |plan| {
            plan.route = route.to_string();
            self.queue.push(FlightplanRouteChangedEvent {
                callsign: plan.callsign.clone(),
                route: plan.route.clone(),
            });
        })
    }

    fn set_remarks(&self, callsign: &str, remarks: &str) -> bool {
        self.amend(callsign, |plan| plan.remarks = remarks.to_string())
    }

    fn set_cruise_altitude(&self, callsign: &str, altitude: i32) -> bool {
        if altitude <= 0 {
            return false;
        }
        self.amend(callsign, |plan| plan.cruise_altitude = altitude)
    }
}
