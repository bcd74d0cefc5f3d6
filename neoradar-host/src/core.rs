//! The host's [`CoreApi`]: one set of capability stores shared by every
//! plugin, seen through a per-plugin session.

use std::path::PathBuf;
use std::sync::Arc;

use neoradar_sdk::CoreApi;
use neoradar_sdk::aircraft::{Aircraft, AircraftApi};
use neoradar_sdk::airport::AirportApi;
use neoradar_sdk::chat::ChatApi;
use neoradar_sdk::controller::ControllerApi;
use neoradar_sdk::controller_data::ControllerDataApi;
use neoradar_sdk::euroscope::EuroScopeApi;
use neoradar_sdk::flightplan::FlightplanApi;
use neoradar_sdk::fsd::{ConnectionModel, FsdApi};
use neoradar_sdk::logger::LoggerApi;
use neoradar_sdk::package::PackageApi;
use neoradar_sdk::sectors::SectorsApi;
use neoradar_sdk::squawk::SquawkApi;
use neoradar_sdk::tag::TagApi;

use crate::modules::{
    AircraftStore, AirportStore, ChatStore, ControllerDataStore, ControllerStore, EuroScopeStore,
    FlightplanStore, FsdStore, PackageInfo, ScopedTags, SectorStore, SquawkStore, TagStore,
    TracingLogger,
};
use crate::queue::EventQueue;

/// Host state for every capability domain.
///
/// The client drives these directly when the network or the user changes
/// something; plugins reach them through [`CoreApi`].
#[derive(Debug)]
pub struct HostModules {
    pub aircraft: AircraftStore,
    pub airport: AirportStore,
    pub chat: ChatStore,
    pub controller: ControllerStore,
    pub controller_data: ControllerDataStore,
    pub euroscope: EuroScopeStore,
    pub flightplan: FlightplanStore,
    pub fsd: FsdStore,
    pub sectors: SectorStore,
    pub squawk: SquawkStore,
    pub tag: Arc<TagStore>,
    pub package: PackageInfo,
}

impl HostModules {
    fn new(queue: &EventQueue, package_path: PathBuf) -> Self {
        Self {
            aircraft: AircraftStore::new(queue.clone()),
            airport: AirportStore::new(queue.clone()),
            chat: ChatStore::new(queue.clone()),
            controller: ControllerStore::new(queue.clone()),
            controller_data: ControllerDataStore::new(queue.clone()),
            euroscope: EuroScopeStore::new(queue.clone()),
            flightplan: FlightplanStore::new(queue.clone()),
            fsd: FsdStore::new(queue.clone()),
            sectors: SectorStore::new(queue.clone()),
            squawk: SquawkStore::new(queue.clone()),
            tag: Arc::new(TagStore::new(queue.clone())),
            package: PackageInfo::new(package_path),
        }
    }
}

/// A [`CoreApi`] implementation backed by [`HostModules`].
///
/// [`session`](HostCore::session) hands each plugin its own view: the same
/// stores, but a logger and tag registrations attributed to that plugin.
#[derive(Debug, Clone)]
pub struct HostCore {
    modules: Arc<HostModules>,
    queue: EventQueue,
    tags: ScopedTags,
    logger: TracingLogger,
}

const HOST_SESSION: &str = "host";

impl HostCore {
    pub fn new() -> Self {
        Self::with_package(PathBuf::new())
    }

    pub fn with_package(package_path: impl Into<PathBuf>) -> Self {
        let queue = EventQueue::new();
        let modules = Arc::new(HostModules::new(&queue, package_path.into()));
        Self {
            tags: ScopedTags::new(modules.tag.clone(), HOST_SESSION),
            logger: TracingLogger::new(HOST_SESSION),
            modules,
            queue,
        }
    }

    /// The `CoreApi` handed to `plugin` at initialization
    pub fn session(&self, plugin: &str) -> Arc<dyn CoreApi> {
        Arc::new(Self {
            modules: self.modules.clone(),
            queue: self.queue.clone(),
            tags: ScopedTags::new(self.modules.tag.clone(), plugin),
            logger: TracingLogger::new(plugin),
        })
    }

    pub fn modules(&self) -> &HostModules {
        &self.modules
    }

    /// Events produced by writes, waiting for dispatch
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// An aircraft joined the network: track it in every per-aircraft store
    pub fn add_aircraft(&self, aircraft: Aircraft) -> bool {
        let callsign = aircraft.callsign.clone();
        if !self.modules.aircraft.connect(aircraft) {
            return false;
        }
        self.modules.controller_data.insert(&callsign);
        self.modules.squawk.insert(&callsign);
        true
    }

    pub fn remove_aircraft(&self, callsign: &str) -> bool {
        if !self.modules.aircraft.disconnect(callsign) {
            return false;
        }
        self.modules.controller_data.remove(callsign);
        self.modules.squawk.remove(callsign);
        true
    }

    /// The user connected to the network as `model.callsign`
    pub fn connect(&self, model: ConnectionModel) -> bool {
        let callsign = model.callsign.clone();
        self.modules.fsd.begin_connect(model);
        if !self.modules.fsd.connected() {
            return false;
        }
        self.set_my_callsign(Some(&callsign));
        tracing::info!(callsign = %callsign, "Connected to network");
        true
    }

    pub fn disconnect(&self, reason: Option<&str>) -> bool {
        if !self.modules.fsd.disconnected(reason) {
            return false;
        }
        self.set_my_callsign(None);
        tracing::info!(reason = reason.unwrap_or("none"), "Disconnected from network");
        true
    }

    fn set_my_callsign(&self, callsign: Option<&str>) {
        self.modules.controller.set_my_callsign(callsign);
        self.modules.controller_data.set_my_callsign(callsign);
        self.modules.sectors.set_my_callsign(callsign);
    }
}

impl Default for HostCore {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreApi for HostCore {
    fn aircraft(&self) -> &dyn AircraftApi {
        &self.modules.aircraft
    }

    fn airport(&self) -> &dyn AirportApi {
        &self.modules.airport
    }

    fn chat(&self) -> &dyn ChatApi {
        &self.modules.chat
    }

    fn controller(&self) -> &dyn ControllerApi {
        &self.modules.controller
    }

    fn controller_data(&self) -> &dyn ControllerDataApi {
        &self.modules.controller_data
    }

    fn euroscope(&self) -> &dyn EuroScopeApi {
        &self.modules.euroscope
    }

    fn flightplan(&self) -> &dyn FlightplanApi {
        &self.modules.flightplan
    }

    fn fsd(&self) -> &dyn FsdApi {
        &self.modules.fsd
    }

    fn sectors(&self) -> &dyn SectorsApi {
        &self.modules.sectors
    }

    fn squawk(&self) -> &dyn SquawkApi {
        &self.modules.squawk
    }

    fn tag(&self) -> &dyn TagApi {
        &self.tags
    }

    fn package(&self) -> &dyn PackageApi {
        &self.modules.package
    }

    fn logger(&self) -> &dyn LoggerApi {
        &self.logger
    }
}
