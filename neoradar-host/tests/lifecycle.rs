//! Plugin lifecycle as seen from the host

mod common;

use std::sync::{Arc, Mutex};

use neoradar_host::{
    HostCore, InstanceHandle, LifecycleState, PluginHost, PluginHostError, PluginSlot,
    PluginState,
};
use neoradar_sdk::{ClientInformation, CoreApi, Plugin, PluginInstance, PluginMetadata};
use tempfile::TempDir;

/// Keeps what it was handed at initialization
#[derive(Default)]
struct Witness {
    received: Arc<Mutex<Option<(PluginMetadata, ClientInformation)>>>,
    core: Option<Arc<dyn CoreApi>>,
}

impl Plugin for Witness {
    fn initialize(
        &mut self,
        metadata: &PluginMetadata,
        core: Arc<dyn CoreApi>,
        info: ClientInformation,
    ) {
        core.logger().info("witness up");
        *self.received.lock().unwrap() = Some((metadata.clone(), info));
        self.core = Some(core);
    }

    fn shutdown(&mut self) {
        self.core = None;
    }

    fn metadata(&self) -> PluginMetadata {
        PluginMetadata::new("witness", "2.1.0", "NeoRadar")
    }
}

/// Panics as soon as it is initialized
struct Doomed;

impl Plugin for Doomed {
    fn initialize(&mut self, _: &PluginMetadata, _: Arc<dyn CoreApi>, _: ClientInformation) {
        panic!("no package loaded");
    }

    fn shutdown(&mut self) {
        unreachable!("shutdown after a failed initialize");
    }

    fn metadata(&self) -> PluginMetadata {
        PluginMetadata::new("doomed", "0.0.1", "tests")
    }
}

#[test]
fn test_metadata_is_identical_in_every_state() {
    let core = HostCore::new();
    let mut slot = PluginSlot::new(InstanceHandle::from_plugin(Box::new(Witness::default())));

    let before = slot.metadata();
    slot.initialize(core.session("witness"), ClientInformation::default())
        .unwrap();
    let active = slot.metadata();
    slot.shutdown().unwrap();
    let after = slot.metadata();

    assert_eq!(before, active);
    assert_eq!(active, after);
    assert_eq!(&before, slot.declared_metadata());
}

#[test]
fn test_initialize_receives_metadata_and_client_information() {
    let dir = TempDir::new().unwrap();
    let config = common::host_config(dir.path());
    let expected_client = config.client.clone();
    let witness = Witness::default();
    let received = witness.received.clone();

    let mut host = PluginHost::new(config);
    host.add_plugin(Box::new(witness)).unwrap();
    host.initialize_plugin("witness").unwrap();

    let (metadata, client) = received.lock().unwrap().clone().unwrap();
    assert_eq!(metadata, PluginMetadata::new("witness", "2.1.0", "NeoRadar"));
    assert_eq!(client, expected_client);
}

#[test]
fn test_double_initialize_is_refused() {
    let dir = TempDir::new().unwrap();
    let mut host = PluginHost::new(common::host_config(dir.path()));
    host.add_plugin(Box::new(Witness::default())).unwrap();

    host.initialize_plugin("witness").unwrap();
    let err = host.initialize_plugin("witness").unwrap_err();
    assert!(matches!(
        err,
        PluginHostError::InvalidLifecycle {
            state: LifecycleState::Active,
            ..
        }
    ));
}

#[test]
fn test_panic_in_initialize_marks_plugin_failed() {
    let dir = TempDir::new().unwrap();
    let mut host = PluginHost::new(common::host_config(dir.path()));
    host.add_plugin(Box::new(Doomed)).unwrap();
    host.add_plugin(Box::new(Witness::default())).unwrap();

    assert_eq!(host.initialize_all(), 1);

    let doomed = host.get_plugin_info("doomed").unwrap();
    assert!(matches!(doomed.state, PluginState::Failed { .. }));
    assert_eq!(doomed.lifecycle, LifecycleState::ShutDown);
    assert_eq!(
        host.get_plugin_info("witness").unwrap().lifecycle,
        LifecycleState::Active
    );

    // Must not call Doomed::shutdown
    host.shutdown_all();
}

#[test]
fn test_dropping_host_shuts_down_plugins() {
    let dir = TempDir::new().unwrap();
    let mut host = PluginHost::new(common::host_config(dir.path()));
    host.add_plugin(Box::new(Witness::default())).unwrap();
    host.initialize_all();

    let info = host.list_plugins();
    assert_eq!(info.len(), 1);
    drop(host);
}

#[test]
fn test_foreign_instance_runs_full_lifecycle() {
    extern "C" fn destroy(ptr: *mut PluginInstance) {
        // SAFETY: only called with the pointer created below
        drop(unsafe { PluginInstance::from_raw(ptr) });
    }

    let raw = PluginInstance::new(Box::new(Witness::default())).into_raw();
    let handle = unsafe { InstanceHandle::from_raw(raw, destroy) }.unwrap();
    let mut slot = PluginSlot::new(handle);
    let core = HostCore::new();

    assert_eq!(slot.state(), LifecycleState::Uninitialized);
    slot.initialize(core.session(slot.name()), ClientInformation::default())
        .unwrap();
    slot.shutdown().unwrap();
    assert_eq!(slot.state(), LifecycleState::ShutDown);
    assert!(slot.shutdown().is_err());
}
