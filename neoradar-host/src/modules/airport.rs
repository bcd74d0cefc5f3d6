use std::collections::BTreeMap;
use std::sync::RwLock;

use neoradar_sdk::airport::{
    AirportAddedEvent, AirportApi, AirportConfig, AirportConfigurationsUpdatedEvent,
    AirportRemovedEvent, AirportStatus, AirportStatusChangedEvent, BatchRunwayResult,
    RunwayStatusChange, RunwayStatusChangedEvent, RunwayType,
};

use super::{read, write};
use crate::queue::EventQueue;

#[derive(Debug)]
struct AirportEntry {
    /// Runway designators published for this airport
    runways: Vec<String>,
    config: AirportConfig,
    show_centerlines: bool,
}

impl AirportEntry {
    /// Active runways of one kind. `None` for kinds this host does not track.
    fn active_mut(&mut self, runway_type: RunwayType) -> Option<&mut Vec<String>> {
        match runway_type {
            RunwayType::Departure => Some(&mut self.config.dep_runways),
            RunwayType::Arrival => Some(&mut self.config.arr_runways),
            _ => None,
        }
    }
}

/// Airport configurations, keyed by ICAO
#[derive(Debug)]
pub struct AirportStore {
    airports: RwLock<BTreeMap<String, AirportEntry>>,
    queue: EventQueue,
}

impl AirportStore {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            airports: RwLock::new(BTreeMap::new()),
            queue,
        }
    }

    /// Add an airport with the runways its sector file publishes.
    ///
    /// Starts `Active` with no runway in use. Returns `false` if the ICAO is
    /// already known.
    pub fn add_airport(&self, icao: &str, runways: &[&str]) -> bool {
        let mut airports = write(&self.airports);
        if airports.contains_key(icao) {
            return false;
        }
        airports.insert(
            icao.to_string(),
            AirportEntry {
                runways: runways.iter().map(|r| r.to_string()).collect(),
                config: AirportConfig {
                    icao: icao.to_string(),
                    arr_runways: Vec::new(),
                    dep_runways: Vec::new(),
                    status: AirportStatus::Active,
                },
                show_centerlines: false,
            },
        );
        self.queue.push(AirportAddedEvent {
            icao: icao.to_string(),
        });
        self.queue.push(AirportConfigurationsUpdatedEvent {
            configuration_count: airports.len(),
        });
        tracing::debug!(icao, "Airport added");
        true
    }

    /// Whether extended centerlines are shown. `None` for unknown airports.
    pub fn shows_centerlines(&self, icao: &str) -> Option<bool> {
        read(&self.airports).get(icao).map(|e| e.show_centerlines)
    }

    fn is_active(&self, icao: &str, runway: &str, runway_type: RunwayType) -> bool {
        read(&self.airports)
            .get(icao)
            .is_some_and(|e| e.config.runways(runway_type).iter().any(|r| r == runway))
    }

    fn activate(
        airports: &mut BTreeMap<String, AirportEntry>,
        queue: &EventQueue,
        change: &RunwayStatusChange,
    ) -> bool {
        let Some(entry) = airports.get_mut(&change.icao) else {
            tracing::debug!(icao = %change.icao, "Runway activation rejected: unknown airport");
            return false;
        };
        if !entry.runways.contains(&change.runway) {
            tracing::debug!(
                icao = %change.icao,
                runway = %change.runway,
                "Runway activation rejected: unknown runway"
            );
            return false;
        }
        let Some(active) = entry.active_mut(change.runway_type) else {
            tracing::debug!(
                icao = %change.icao,
                "Runway activation rejected: unknown runway type"
            );
            return false;
        };
        if !active.contains(&change.runway) {
            active.push(change.runway.clone());
            queue.push(RunwayStatusChangedEvent {
                icao: change.icao.clone(),
                runway: change.runway.clone(),
                active: true,
                is_arrival: change.runway_type == RunwayType::Arrival,
            });
        }
        true
    }

    fn deactivate(
        airports: &mut BTreeMap<String, AirportEntry>,
        queue: &EventQueue,
        change: &RunwayStatusChange,
    ) -> bool {
        let Some(entry) = airports.get_mut(&change.icao) else {
            return false;
        };
        let Some(active) = entry.active_mut(change.runway_type) else {
            tracing::debug!(
                icao = %change.icao,
                "Runway removal rejected: unknown runway type"
            );
            return false;
        };
        let Some(index) = active.iter().position(|r| *r == change.runway) else {
            tracing::debug!(
                icao = %change.icao,
                runway = %change.runway,
                "Runway removal rejected: runway not active"
            );
            return false;
        };
        active.remove(index);
        queue.push(RunwayStatusChangedEvent {
            icao: change.icao.clone(),
            runway: change.runway.clone(),
            active: false,
            is_arrival: change.runway_type == RunwayType::Arrival,
        });
        true
    }
}

impl AirportApi for AirportStore {
    fn configurations(&self) -> Vec<AirportConfig> {
        read(&self.airports)
            .values()
            .map(|e| e.config.clone())
            .collect()
    }

    fn configuration_by_icao(&self, icao: &str) -> Option<AirportConfig> {
        read(&self.airports).get(icao).map(|e| e.config.clone())
    }

    fn is_dep_runway_active(&self, icao: &str, runway: &str) -> bool {
        self.is_active(icao, runway, RunwayType::Departure)
    }

    fn is_arr_runway_active(&self, icao: &str, runway: &str) -> bool {
        self.is_active(icao, runway, RunwayType::Arrival)
    }

    fn set_runway_status(&self, icao: &str, runway: &str, runway_type: RunwayType) -> bool {
        let mut airports = write(&self.airports);
        Self::activate(
            &mut airports,
            &self.queue,
            &RunwayStatusChange::new(icao, runway, runway_type),
        )
    }

    fn set_show_runway_centerlines(&self, icao: &str, show: bool) -> bool {
        match write(&self.airports).get_mut(icao) {
            Some(entry) => {
                entry.show_centerlines = show;
                true
            }
            None => false,
        }
    }

    fn remove_runway_status(&self, icao: &str, runway: &str, runway_type: RunwayType) -> bool {
        let mut airports = write(&self.airports);
        Self::deactivate(
            &mut airports,
            &self.queue,
            &RunwayStatusChange::new(icao, runway, runway_type),
        )
    }

    fn batch_update_runways(
        &self,
        to_add: &[RunwayStatusChange],
        to_remove: &[RunwayStatusChange],
    ) -> BatchRunwayResult {
        let mut airports = write(&self.airports);
        let mut result = BatchRunwayResult::default();

        for change in to_add {
            if Self::activate(&mut airports, &self.queue, change) {
                result.added.push(change.clone());
            } else {
                result.failed_additions.push(change.clone());
            }
        }
        for change in to_remove {
            if Self::deactivate(&mut airports, &self.queue, change) {
                result.removed.push(change.clone());
            } else {
                result.failed_removals.push(change.clone());
            }
        }

        if !result.added.is_empty() || !result.removed.is_empty() {
            self.queue.push(AirportConfigurationsUpdatedEvent {
                configuration_count: airports.len(),
            });
        }

        tracing::debug!(
            added = result.added.len(),
            failed_additions = result.failed_additions.len(),
            removed = result.removed.len(),
            failed_removals = result.failed_removals.len(),
            "Batch runway update"
        );
        result
    }

    fn delete_airport(&self, icao: &str) -> bool {
        let mut airports = write(&self.airports);
        if airports.remove(icao).is_none() {
            return false;
        }
        self.queue.push(AirportRemovedEvent {
            icao: icao.to_string(),
        });
        self.queue.push(AirportConfigurationsUpdatedEvent {
            configuration_count: airports.len(),
        });
        true
    }

    fn set_airport_status(&self, icao: &str, status: AirportStatus) -> bool {
        let mut airports = write(&self.airports);
        let Some(entry) = airports.get_mut(icao) else {
            return false;
        };
        if entry.config.status != status {
            entry.config.status = status;
            self.queue.push(AirportStatusChangedEvent {
                icao: icao.to_string(),
                status,
            });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neoradar_sdk::Event;

    fn store() -> (AirportStore, EventQueue) {
        let queue = EventQueue::new();
        let store = AirportStore::new(queue.clone());
        assert!(store.add_airport("KJFK", &["04L", "04R", "22L", "22R", "13L", "31R"]));
        queue.drain();
        (store, queue)
    }

    #[test]
    fn test_add_airport_twice_is_rejected() {
        let (store, queue) = store();
        assert!(!store.add_airport("KJFK", &["04L"]));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_set_runway_status_queues_change() {
        let (store, queue) = store();
        assert!(store.set_runway_status("KJFK", "22R", RunwayType::Arrival));

        assert!(store.is_arr_runway_active("KJFK", "22R"));
        assert!(!store.is_dep_runway_active("KJFK", "22R"));
        assert_eq!(
            queue.pop(),
            Some(Event::from(RunwayStatusChangedEvent {
                icao: "KJFK".to_string(),
                runway: "22R".to_string(),
                active: true,
                is_arrival: true,
            }))
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_setting_active_runway_again_is_quiet() {
        let (store, queue) = store();
        store.set_runway_status("KJFK", "04L", RunwayType::Departure);
        queue.drain();

        assert!(store.set_runway_status("KJFK", "04L", RunwayType::Departure));
        assert!(queue.is_empty());
        assert_eq!(store.configuration_by_icao("KJFK").unwrap().dep_runways, ["04L"]);
    }

    #[test]
    fn test_unknown_runway_is_rejected() {
        let (store, queue) = store();
        assert!(!store.set_runway_status("KJFK", "09", RunwayType::Departure));
        assert!(!store.set_runway_status("EGLL", "09L", RunwayType::Departure));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_remove_inactive_runway_is_rejected() {
        let (store, _) = store();
        assert!(!store.remove_runway_status("KJFK", "04L", RunwayType::Departure));
    }

    #[test]
    fn test_remove_runway_status() {
        let (store, queue) = store();
        store.set_runway_status("KJFK", "04L", RunwayType::Departure);
        queue.drain();

        assert!(store.remove_runway_status("KJFK", "04L", RunwayType::Departure));
        assert!(!store.is_dep_runway_active("KJFK", "04L"));
        assert_eq!(queue.pop().map(|e| e.kind()), Some("RunwayStatusChanged"));
    }

    #[test]
    fn test_centerlines() {
        let (store, _) = store();
        assert_eq!(store.shows_centerlines("KJFK"), Some(false));
        assert!(store.set_show_runway_centerlines("KJFK", true));
        assert_eq!(store.shows_centerlines("KJFK"), Some(true));
        assert!(!store.set_show_runway_centerlines("ZZZZ", true));
    }

    #[test]
    fn test_delete_airport() {
        let (store, queue) = store();
        assert!(store.delete_airport("KJFK"));
        assert!(store.configuration_by_icao("KJFK").is_none());

        let kinds: Vec<&str> = queue.drain().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, ["AirportRemoved", "AirportConfigurationsUpdated"]);
        assert!(!store.delete_airport("KJFK"));
    }

    #[test]
    fn test_unchanged_status_queues_nothing() {
        let (store, queue) = store();
        assert!(store.set_airport_status("KJFK", AirportStatus::Active));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_batch_emits_single_configurations_update() {
        let (store, queue) = store();
        let result = store.batch_update_runways(
            &[
                RunwayStatusChange::new("KJFK", "04L", RunwayType::Departure),
                RunwayStatusChange::new("KJFK", "04R", RunwayType::Arrival),
            ],
            &[],
        );
        assert!(result.all_succeeded());

        let kinds: Vec<&str> = queue.drain().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            [
                "RunwayStatusChanged",
                "RunwayStatusChanged",
                "AirportConfigurationsUpdated"
            ]
        );
    }

    #[test]
    fn test_batch_entries_see_earlier_entries() {
        let (store, _) = store();
        let change = RunwayStatusChange::new("KJFK", "13L", RunwayType::Departure);

        let result = store.batch_update_runways(&[change.clone()], &[change.clone()]);

        assert_eq!(result.added, [change.clone()]);
        assert_eq!(result.removed, [change]);
        assert!(!store.is_dep_runway_active("KJFK", "13L"));
    }

    #[test]
    fn test_configurations_sorted_by_icao() {
        let (store, _) = store();
        store.add_airport("EGLL", &["27L", "27R"]);
        let icaos: Vec<String> = store.configurations().into_iter().map(|c| c.icao).collect();
        assert_eq!(icaos, ["EGLL", "KJFK"]);
    }

    #[test]
    fn test_runway_kinds_select_their_own_list() {
        let (store, _) = store();
        let mut airports = write(&store.airports);
        let entry = airports.get_mut("KJFK").unwrap();

        entry.active_mut(RunwayType::Departure).unwrap().push("04L".to_string());
        entry.active_mut(RunwayType::Arrival).unwrap().push("04R".to_string());

        assert_eq!(entry.config.dep_runways, ["04L"]);
        assert_eq!(entry.config.arr_runways, ["04R"]);
    }

    #[test]
    fn test_removal_under_other_kind_fails_in_batch() {
        let (store, queue) = store();
        store.set_runway_status("KJFK", "04L", RunwayType::Arrival);
        let before = store.configuration_by_icao("KJFK");
        queue.drain();

        let wrong_kind = RunwayStatusChange {
            icao: "KJFK".to_string(),
            runway: "04L".to_string(),
            runway_type: RunwayType::Departure,
        };
        let result = store.batch_update_runways(&[], std::slice::from_ref(&wrong_kind));

        assert_eq!(result.failed_removals, [wrong_kind]);
        assert!(result.removed.is_empty());
        assert_eq!(store.configuration_by_icao("KJFK"), before);
        assert!(queue.is_empty());
    }
}
