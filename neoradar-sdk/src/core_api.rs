//! CoreApi - the plugin's only way into host state

use crate::aircraft::AircraftApi;
use crate::airport::AirportApi;
use crate::chat::ChatApi;
use crate::controller::ControllerApi;
use crate::controller_data::ControllerDataApi;
use crate::euroscope::EuroScopeApi;
use crate::flightplan::FlightplanApi;
use crate::fsd::FsdApi;
use crate::logger::LoggerApi;
use crate::package::PackageApi;
use crate::sectors::SectorsApi;
use crate::squawk::SquawkApi;
use crate::tag::TagApi;

/// Capability registry handed to a plugin in `initialize`.
///
/// Each accessor is a constant-time lookup returning a live reference to one
/// host-owned capability module. The module behind an accessor never changes
/// for the session, so a plugin may hold on to the `CoreApi` until
/// `shutdown`; it must not cache the data the modules return.
///
/// The host implements this trait; plugins only call it.
pub trait CoreApi: Send + Sync {
    fn aircraft(&self) -> &dyn AircraftApi;

    fn airport(&self) -> &dyn AirportApi;

    fn chat(&self) -> &dyn ChatApi;

    fn controller(&self) -> &dyn ControllerApi;

    fn controller_data(&self) -> &dyn ControllerDataApi;

    fn euroscope(&self) -> &dyn EuroScopeApi;

    fn flightplan(&self) -> &dyn FlightplanApi;

    fn fsd(&self) -> &dyn FsdApi;

    fn sectors(&self) -> &dyn SectorsApi;

    fn squawk(&self) -> &dyn SquawkApi;

    fn tag(&self) -> &dyn TagApi;

    fn package(&self) -> &dyn PackageApi;

    fn logger(&self) -> &dyn LoggerApi;
}
