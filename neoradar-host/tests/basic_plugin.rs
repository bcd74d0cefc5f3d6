//! The bundled demo plugin running inside the host

mod common;

use basic_plugin::ExamplePlugin;
use neoradar_host::{LifecycleState, PluginHost, PluginState};
use neoradar_sdk::aircraft::Aircraft;
use tempfile::TempDir;

#[test]
fn test_demo_plugin_handles_traffic_and_chat() {
    let dir = TempDir::new().unwrap();
    let mut host = PluginHost::new(common::host_config(dir.path()));
    let name = host.add_plugin(Box::new(ExamplePlugin::default())).unwrap();
    assert_eq!(name, "ExamplePlugin");
    assert_eq!(host.initialize_all(), 1);

    assert!(host.core().add_aircraft(Aircraft {
        callsign: "AFR1234".to_string(),
        ..Default::default()
    }));
    host.core()
        .modules()
        .chat
        .receive_private("LFPG_TWR", "contact ground 121.8");
    assert_eq!(host.pump(), 2);

    let info = host.get_plugin_info("ExamplePlugin").unwrap();
    assert_eq!(info.state, PluginState::Loaded);
    assert_eq!(info.lifecycle, LifecycleState::Active);

    host.shutdown_all();
    assert_eq!(
        host.get_plugin_info("ExamplePlugin").unwrap().lifecycle,
        LifecycleState::ShutDown
    );
}
