use std::collections::BTreeMap;
use std::sync::RwLock;

use neoradar_sdk::Event;
use neoradar_sdk::controller_data::{
    AircraftAssignedSpeedChangedEvent, AircraftBeaconCodeChangedEvent,
    AircraftCDMStatusChangedEvent, AircraftHandoffCancelledEvent, AircraftHandoffRejectedEvent,
    AircraftHeadingChangedEvent, AircraftInitiatedTrackingEvent, AircraftOwnedByChangedEvent,
    AircraftScratchpadUpdatedEvent, AircraftTemporaryAltitudeChangedEvent,
    AircraftTerminatedTrackingEvent, ControllerDataApi, ControllerDataRecord,
    ControllerDataUpdatedEvent,
};

use super::{read, write};
use crate::queue::EventQueue;

#[derive(Debug, Default)]
struct ControllerData {
    records: BTreeMap<String, ControllerDataRecord>,
    me: Option<String>,
}

/// Controller-assigned data per aircraft
#[derive(Debug)]
pub struct ControllerDataStore {
    state: RwLock<ControllerData>,
    queue: EventQueue,
}

impl ControllerDataStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            state: RwLock::new(ControllerData::default()),
            queue,
        }
    }

    pub fn set_my_callsign(&self, callsign: Option<&str>) {
        write(&self.state).me = callsign.map(str::to_string);
    }

    /// Start holding data for an aircraft. `false` if already present.
    pub fn insert(&self, callsign: &str) -> bool {
        let mut state = write(&self.state);
        if state.records.contains_key(callsign) {
            return false;
        }
        state.records.insert(
            callsign.to_string(),
            ControllerDataRecord {
                callsign: callsign.to_string(),
                ..Default::default()
            },
        );
        true
    }

    pub fn remove(&self, callsign: &str) -> bool {
        write(&self.state).records.remove(callsign).is_some()
    }

    /// Apply `change` to a record and queue `event` plus `ControllerDataUpdated`.
    ///
    /// `change` returns `None` to reject, leaving the record as it was.
    fn update<F>(&self, callsign: &str, change: F) -> bool
    where
        F: FnOnce(&mut ControllerDataRecord, Option<&str>) -> Option<Event>,
    {
        let mut state = write(&self.state);
        let ControllerData { records, me } = &mut *state;
        let Some(record) = records.get_mut(callsign) else {
            return false;
        };
        let mut candidate = record.clone();
        let Some(event) = change(&mut candidate, me.as_deref()) else {
            return false;
        };
        *record = candidate;
        self.queue.push(event);
        self.queue.push(ControllerDataUpdatedEvent {
            callsign: callsign.to_string(),
        });
        true
    }

    /// Another controller changed ownership of an aircraft
    pub fn set_owner(&self, callsign: &str, owner: Option<&str>) -> bool {
        self.update(callsign, |record, _| {
            let previous_owner = record.owned_by.take();
            record.owned_by = owner.map(str::to_string);
            record.handoff_target = None;
            Some(Event::from(AircraftOwnedByChangedEvent {
                callsign: record.callsign.clone(),
                previous_owner,
                owned_by: record.owned_by.clone(),
            }))
        })
    }

    pub fn set_beacon_code(&self, callsign: &str, code: &str) -> bool {
        self.update(callsign, |record, _| {
            record.beacon_code = Some(code.to_string());
            Some(Event::from(AircraftBeaconCodeChangedEvent {
                callsign: record.callsign.clone(),
                code: code.to_string(),
            }))
        })
    }

    pub fn set_cdm_status(&self, callsign: &str, status: &str) -> bool {
        self.update(callsign, |record, _| {
            record.cdm_status = Some(status.to_string());
            Some(Event::from(AircraftCDMStatusChangedEvent {
                callsign: record.callsign.clone(),
                status: status.to_string(),
            }))
        })
    }

    /// The owner offered the aircraft to `target`
    pub fn offer_handoff(&self, callsign: &str, target: &str) -> bool {
        let mut state = write(&self.state);
        let Some(record) = state.records.get_mut(callsign) else {
            return false;
        };
        if record.owned_by.is_none() {
            return false;
        }
        record.handoff_target = Some(target.to_string());
        self.queue.push(ControllerDataUpdatedEvent {
            callsign: callsign.to_string(),
        });
        true
    }

    /// The owner withdrew a pending handoff
    pub fn cancel_handoff(&self, callsign: &str) -> bool {
        self.update(callsign, |record, _| {
            record.handoff_target.take()?;
            Some(Event::from(AircraftHandoffCancelledEvent {
                callsign: record.callsign.clone(),
                by: record.owned_by.clone().unwrap_or_default(),
            }))
        })
    }

    /// The handoff target refused the aircraft
    pub fn reject_handoff(&self, callsign: &str) -> bool {
        self.update(callsign, |record, _| {
            let by = record.handoff_target.take()?;
            Some(Event::from(AircraftHandoffRejectedEvent {
                callsign: record.callsign.clone(),
                by,
            }))
        })
    }
}

impl ControllerDataApi for ControllerDataStore {
    fn by_callsign(&self, callsign: &str) -> Option<ControllerDataRecord> {
        read(&self.state).records.get(callsign).cloned()
    }

    fn set_scratchpad(&self, callsign: &str, scratchpad: &str) -> bool {
        self.update(callsign, |record, _| {
            record.scratchpad = scratchpad.to_string();
            Some(Event::from(AircraftScratchpadUpdatedEvent {
                callsign: record.callsign.clone(),
                scratchpad: scratchpad.to_string(),
            }))
        })
    }

    fn set_temporary_altitude(&self, callsign: &str, altitude: i32) -> bool {
        self.update(callsign, |record, _| {
            record.temporary_altitude = Some(altitude);
            Some(Event::from(AircraftTemporaryAltitudeChangedEvent {
                callsign: record.callsign.clone(),
                altitude,
            }))
        })
    }

    fn set_assigned_heading(&self, callsign: &str, heading: u16) -> bool {
        if !(1..=360).contains(&heading) {
            tracing::debug!(callsign, heading, "Assigned heading rejected: out of range");
            return false;
        }
        self.update(callsign, |record, _| {
            record.assigned_heading = Some(heading);
            Some(Event::from(AircraftHeadingChangedEvent {
                callsign: record.callsign.clone(),
                heading,
            }))
        })
    }

    fn set_assigned_speed(&self, callsign: &str, speed: u32) -> bool {
        self.update(callsign, |record, _| {
            record.assigned_speed = Some(speed);
            Some(Event::from(AircraftAssignedSpeedChangedEvent {
                callsign: record.callsign.clone(),
                speed,
            }))
        })
    }

    fn initiate_tracking(&self, callsign: &str) -> bool {
        self.update(callsign, |record, me| {
            let me = me?;
            if record.owned_by.as_deref().is_some_and(|owner| owner != me) {
                return None;
            }
            record.owned_by = Some(me.to_string());
            Some(Event::from(AircraftInitiatedTrackingEvent {
                callsign: record.callsign.clone(),
                by: me.to_string(),
            }))
        })
    }

    fn terminate_tracking(&self, callsign: &str) -> bool {
        self.update(callsign, |record, me| {
            let me = me?;
            if record.owned_by.as_deref() != Some(me) {
                return None;
            }
            record.owned_by = None;
            record.handoff_target = None;
            Some(Event::from(AircraftTerminatedTrackingEvent {
                callsign: record.callsign.clone(),
                by: me.to_string(),
            }))
        })
    }

    fn is_tracked_by_me(&self, callsign: &str) -> bool {
        let state = read(&self.state);
        match (state.records.get(callsign), state.me.as_deref()) {
            (Some(record), Some(me)) => record.owned_by.as_deref() == Some(me),
            _ => false,
        }
    }
}
