//! Minimal NeoRadar plugin
//!
//! Build with `cargo build -p basic-plugin --release`, then copy the library
//! into `<plugin dir>/basic-plugin/` and run `neoradar plugin enable basic-plugin`.

use std::sync::Arc;

use neoradar_sdk::aircraft::AircraftConnectedEvent;
use neoradar_sdk::chat::PrivateMessageReceivedEvent;
use neoradar_sdk::{ClientInformation, CoreApi, Plugin, PluginMetadata, export_plugin};

#[derive(Default)]
pub struct ExamplePlugin {
    core: Option<Arc<dyn CoreApi>>,
}

impl ExamplePlugin {
    fn log(&self, message: &str) {
        if let Some(core) = &self.core {
            core.logger().info(message);
        }
    }
}

impl Plugin for ExamplePlugin {
    fn initialize(
        &mut self,
        _metadata: &PluginMetadata,
        core: Arc<dyn CoreApi>,
        info: ClientInformation,
    ) {
        self.core = Some(core);
        self.log("ExamplePlugin initialized");
        self.log(&format!(
            "Client: {} v{}",
            info.client_name, info.client_version
        ));
    }

    fn shutdown(&mut self) {
        self.log("ExamplePlugin shutting down");
        self.core = None;
    }

    fn metadata(&self) -> PluginMetadata {
        PluginMetadata::new("ExamplePlugin", "1.0.0", "Example Author")
    }

    fn on_aircraft_connected(&mut self, event: &AircraftConnectedEvent) {
        self.log(&format!("Aircraft connected: {}", event.callsign));
    }

    fn on_private_message_received(&mut self, event: &PrivateMessageReceivedEvent) {
        self.log(&format!(
            "Private message from {}: {}",
            event.sent_from, event.message
        ));
    }
}

export_plugin!(ExamplePlugin);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_before_initialize() {
        let plugin = ExamplePlugin::default();
        let metadata = plugin.metadata();
        assert_eq!(metadata.name, "ExamplePlugin");
        assert_eq!(metadata.version, "1.0.0");
        assert_eq!(metadata.author, "Example Author");
    }

    #[test]
    fn test_exported_version_matches_sdk() {
        assert_eq!(
            GetPluginSDKVersionMajor(),
            neoradar_sdk::SDK_VERSION.major as std::os::raw::c_int
        );
        assert_eq!(
            GetPluginSDKVersionMinor(),
            neoradar_sdk::SDK_VERSION.minor as std::os::raw::c_int
        );
        assert_eq!(
            GetPluginSDKVersionPatch(),
            neoradar_sdk::SDK_VERSION.patch as std::os::raw::c_int
        );
    }

    #[test]
    fn test_create_and_destroy_instance() {
        let ptr = CreatePluginInstance();
        assert!(!ptr.is_null());
        DestroyPluginInstance(ptr);
        DestroyPluginInstance(std::ptr::null_mut());
    }

    #[test]
    fn test_hooks_without_core_are_silent() {
        let mut plugin = ExamplePlugin::default();
        plugin.on_aircraft_connected(&AircraftConnectedEvent {
            callsign: "DLH4AB".to_string(),
        });
        plugin.shutdown();
        assert!(plugin.core.is_none());
    }
}
