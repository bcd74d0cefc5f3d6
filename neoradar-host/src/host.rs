//! PluginHost - loads plugins, drives their lifecycle and dispatches events

use libloading::{Library, Symbol};
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};

use neoradar_sdk::{
    ClientInformation, CreateInstanceFn, DestroyInstanceFn, Event, Plugin, PluginMetadata,
    SYMBOL_CREATE_INSTANCE, SYMBOL_DESTROY_INSTANCE, SYMBOL_VERSION_MAJOR, SYMBOL_VERSION_MINOR,
    SYMBOL_VERSION_PATCH, SdkVersion, VersionFn,
};

use crate::config::HostConfig;
use crate::core::HostCore;
use crate::error::PluginHostError;
use crate::instance::InstanceHandle;
use crate::lifecycle::{LifecycleState, PluginSlot};
use crate::registry::PluginRegistry;
use crate::version::{VersionCheck, check_sdk_compatibility, from_raw_components};

pub const REGISTRY_FILE_NAME: &str = "registry.toml";

/// A plugin with its runtime state
struct LoadedPlugin {
    /// The plugin instance and its lifecycle state
    slot: PluginSlot,
    state: PluginState,
    /// Registry key: the plugin's directory name, if it came from one
    dir_name: Option<String>,
    /// Library the instance was created from
    path: Option<PathBuf>,
    /// Keep the library loaded. Declared after `slot` so the instance is
    /// destroyed before the code backing it is unmapped.
    _library: Option<Library>,
}

impl LoadedPlugin {
    fn matches(&self, name: &str) -> bool {
        self.slot.name() == name || self.dir_name.as_deref() == Some(name)
    }

    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: self.slot.name().to_string(),
            metadata: self.slot.metadata(),
            lifecycle: self.slot.state(),
            state: self.state.clone(),
            path: self.path.clone(),
        }
    }

    /// Shut down with panic isolation. No-op unless the slot is active.
    fn shutdown(&mut self) {
        if self.slot.state() != LifecycleState::Active {
            return;
        }
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| self.slot.shutdown()));
        if result.is_err() {
            tracing::error!(plugin = %self.slot.name(), "Plugin panicked in shutdown");
            self.slot.abandon();
            self.state = PluginState::Failed {
                error: "Plugin panicked in shutdown".to_string(),
            };
        }
    }
}

impl Drop for LoadedPlugin {
    fn drop(&mut self) {
        // Shutdown must run before the instance is destroyed and the library
        // is unloaded
        self.shutdown();
    }
}

/// State of a loaded plugin
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PluginState {
    /// Plugin is loaded and receives events once initialized
    Loaded,
    /// Plugin is disabled
    Disabled { reason: String },
    /// Plugin has failed (panicked)
    Failed { error: String },
}

impl std::fmt::Display for PluginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded => f.write_str("loaded"),
            Self::Disabled { reason } => write!(f, "disabled ({reason})"),
            Self::Failed { error } => write!(f, "failed ({error})"),
        }
    }
}

/// Configuration for PluginHost
#[derive(Debug, Clone)]
pub struct PluginHostConfig {
    /// Directories searched for plugin subdirectories, in order
    pub plugin_dirs: Vec<PathBuf>,
    /// Path to the registry of enabled plugins
    pub registry_path: PathBuf,
    /// Passed to every plugin at initialization
    pub client: ClientInformation,
    /// Load plugins whose SDK patch version differs from the host's
    pub allow_patch_mismatch: bool,
}

impl Default for PluginHostConfig {
    fn default() -> Self {
        HostConfig::default().plugin_host_config()
    }
}

/// Information about a plugin
#[derive(Debug, Clone, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub metadata: PluginMetadata,
    pub lifecycle: LifecycleState,
    pub state: PluginState,
    /// Library path, `None` for plugins added in-process
    pub path: Option<PathBuf>,
}

/// A plugin directory found on disk
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredPlugin {
    /// Directory name, the key used by the registry
    pub name: String,
    pub dir: PathBuf,
    /// Library inside the directory, if one was found
    pub library: Option<PathBuf>,
    pub enabled: bool,
}

/// What a plugin library reports about itself, without initializing it
#[derive(Debug, Clone, Serialize)]
pub struct LibraryReport {
    pub path: PathBuf,
    pub sdk_version: SdkVersion,
    pub compatibility: VersionCheck,
    /// Only read when the library is loadable
    pub metadata: Option<PluginMetadata>,
}

/// The plugin host owns plugin instances, calls their lifecycle methods and
/// delivers events to them one at a time.
pub struct PluginHost {
    /// Loaded plugins in load order
    plugins: Vec<LoadedPlugin>,
    core: HostCore,
    config: PluginHostConfig,
}

impl PluginHost {
    /// Create a plugin host with a fresh [`HostCore`]
    pub fn new(config: PluginHostConfig) -> Self {
        Self::with_core(config, HostCore::new())
    }

    /// Create a plugin host whose plugins see the given core
    pub fn with_core(config: PluginHostConfig, core: HostCore) -> Self {
        Self {
            plugins: Vec::new(),
            core,
            config,
        }
    }

    /// Create a plugin host from a loaded [`HostConfig`]
    pub fn from_config(config: &HostConfig) -> Self {
        Self::with_core(
            config.plugin_host_config(),
            HostCore::with_package(config.package_path.clone()),
        )
    }

    pub fn core(&self) -> &HostCore {
        &self.core
    }

    pub fn config(&self) -> &PluginHostConfig {
        &self.config
    }

    /// Discover and load all enabled plugins.
    ///
    /// A plugin that fails to load is logged and skipped. Returns the number
    /// of plugins loaded.
    pub fn load_all(&mut self) -> Result<usize, PluginHostError> {
        let mut loaded = 0;

        for plugin in self.discover()? {
            if !plugin.enabled {
                tracing::debug!(plugin = %plugin.name, "Plugin disabled, skipping");
                continue;
            }

            match self.load_plugin_dir(&plugin.dir) {
                Ok(name) => {
                    tracing::info!(plugin = %name, dir = %plugin.dir.display(), "Plugin loaded");
                    loaded += 1;
                }
                Err(e) => {
                    tracing::error!(plugin = %plugin.name, error = %e, "Failed to load plugin");
                }
            }
        }

        Ok(loaded)
    }

    /// Plugin directories under every configured plugin dir, in search order
    pub fn discover(&self) -> Result<Vec<DiscoveredPlugin>, PluginHostError> {
        let registry = PluginRegistry::load(&self.config.registry_path)?;
        let mut found = Vec::new();

        for base_dir in &self.config.plugin_dirs {
            if !base_dir.exists() {
                tracing::debug!(dir = %base_dir.display(), "Plugin directory does not exist");
                continue;
            }

            let mut dirs = Vec::new();
            for entry in std::fs::read_dir(base_dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    dirs.push(path);
                }
            }
            dirs.sort();

            for dir in dirs {
                let Some(name) = dir.file_name().and_then(|n| n.to_str()).map(str::to_string)
                else {
                    continue;
                };
                found.push(DiscoveredPlugin {
                    library: find_library(&dir, &name).ok(),
                    enabled: registry.is_enabled(&name),
                    name,
                    dir,
                });
            }
        }

        Ok(found)
    }

    /// Load the library inside one plugin directory
    pub fn load_plugin_dir(&mut self, dir: &Path) -> Result<String, PluginHostError> {
        if !dir.is_dir() {
            return Err(PluginHostError::PluginDirNotFound {
                path: dir.to_path_buf(),
            });
        }
        let dir_name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let lib_path = find_library(dir, &dir_name)?;
        self.load(&lib_path, Some(dir_name))
    }

    /// Load a plugin library and create its instance. Returns the plugin name.
    ///
    /// The plugin is not initialized; call [`initialize_plugin`] or
    /// [`initialize_all`].
    ///
    /// [`initialize_plugin`]: Self::initialize_plugin
    /// [`initialize_all`]: Self::initialize_all
    pub fn load_library(&mut self, path: &Path) -> Result<String, PluginHostError> {
        self.load(path, None)
    }

    fn load(&mut self, path: &Path, dir_name: Option<String>) -> Result<String, PluginHostError> {
        let (library, version) = open_library(path)?;

        match check_sdk_compatibility(version) {
            VersionCheck::Compatible => {}
            VersionCheck::PatchMismatch { host, plugin } if self.config.allow_patch_mismatch => {
                tracing::warn!(
                    path = %path.display(),
                    host = %host,
                    plugin = %plugin,
                    "Plugin SDK patch version differs from host"
                );
            }
            VersionCheck::PatchMismatch { host, plugin }
            | VersionCheck::Incompatible { host, plugin } => {
                return Err(PluginHostError::SdkVersionMismatch { host, plugin });
            }
        }

        let instance = create_instance(&library, path)?;
        let slot = PluginSlot::new(instance);
        let name = slot.name().to_string();

        // Dropping `slot` on this path hands the instance back to the library
        // before `library` itself is dropped
        if self.plugins.iter().any(|p| p.slot.name() == name) {
            return Err(PluginHostError::AlreadyLoaded { name });
        }

        tracing::debug!(plugin = %name, sdk = %version, "Plugin instance created");
        self.plugins.push(LoadedPlugin {
            slot,
            state: PluginState::Loaded,
            dir_name,
            path: Some(path.to_path_buf()),
            _library: Some(library),
        });
        Ok(name)
    }

    /// Add a plugin compiled into the host binary
    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) -> Result<String, PluginHostError> {
        let slot = PluginSlot::new(InstanceHandle::from_plugin(plugin));
        let name = slot.name().to_string();
        if self.plugins.iter().any(|p| p.slot.name() == name) {
            return Err(PluginHostError::AlreadyLoaded { name });
        }
        self.plugins.push(LoadedPlugin {
            slot,
            state: PluginState::Loaded,
            dir_name: None,
            path: None,
            _library: None,
        });
        Ok(name)
    }

    /// Initialize one plugin.
    ///
    /// A panic inside the plugin marks it failed and returns
    /// [`PluginHostError::Panicked`].
    pub fn initialize_plugin(&mut self, name: &str) -> Result<(), PluginHostError> {
        let core = &self.core;
        let client = &self.config.client;
        let plugin = self
            .plugins
            .iter_mut()
            .find(|p| p.matches(name))
            .ok_or_else(|| PluginHostError::NotFound {
                name: name.to_string(),
            })?;

        if plugin.state != PluginState::Loaded {
            return Err(PluginHostError::Unavailable {
                name: plugin.slot.name().to_string(),
                state: plugin.state.clone(),
            });
        }

        let session = core.session(plugin.slot.name());
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            plugin.slot.initialize(session, client.clone())
        }));

        match result {
            Ok(Ok(())) => {
                tracing::info!(plugin = %plugin.slot.name(), "Plugin initialized");
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                tracing::error!(plugin = %plugin.slot.name(), "Plugin panicked in initialize");
                plugin.slot.abandon();
                plugin.state = PluginState::Failed {
                    error: "Plugin panicked in initialize".to_string(),
                };
                Err(PluginHostError::Panicked {
                    name: plugin.slot.name().to_string(),
                    operation: "initialize",
                })
            }
        }
    }

    /// Initialize every loaded plugin that has not been initialized yet, in
    /// load order. Returns the number initialized.
    pub fn initialize_all(&mut self) -> usize {
        let pending: Vec<String> = self
            .plugins
            .iter()
            .filter(|p| {
                p.state == PluginState::Loaded
                    && p.slot.state() == LifecycleState::Uninitialized
            })
            .map(|p| p.slot.name().to_string())
            .collect();

        pending
            .iter()
            .filter(|name| match self.initialize_plugin(name) {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(plugin = %name, error = %e, "Failed to initialize plugin");
                    false
                }
            })
            .count()
    }

    /// Deliver an event to every active plugin, in load order.
    ///
    /// Events are dispatched with panic isolation - if a plugin panics,
    /// it is marked failed and other plugins continue to receive events.
    pub fn dispatch(&mut self, event: &Event) {
        for plugin in &mut self.plugins {
            if plugin.state != PluginState::Loaded
                || plugin.slot.state() != LifecycleState::Active
            {
                continue;
            }

            let result =
                std::panic::catch_unwind(AssertUnwindSafe(|| plugin.slot.deliver(event)));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(plugin = %plugin.slot.name(), error = %e, "Event not delivered");
                }
                Err(_) => {
                    tracing::error!(
                        plugin = %plugin.slot.name(),
                        event = event.kind(),
                        "Plugin panicked, disabling"
                    );
                    plugin.slot.abandon();
                    plugin.state = PluginState::Failed {
                        error: format!("Plugin panicked handling {}", event.kind()),
                    };
                }
            }
        }
    }

    /// Dispatch queued events until the queue is empty.
    ///
    /// Events queued by plugins while handling an event are delivered in the
    /// same call, after everything queued before them. Returns the number of
    /// events dispatched.
    pub fn pump(&mut self) -> usize {
        let mut dispatched = 0;
        loop {
            let Some(event) = self.core.queue().pop() else {
                break;
            };
            tracing::trace!(event = event.kind(), "Dispatching event");
            self.dispatch(&event);
            dispatched += 1;
        }
        dispatched
    }

    /// Shut down every active plugin, newest first
    pub fn shutdown_all(&mut self) {
        for plugin in self.plugins.iter_mut().rev() {
            plugin.shutdown();
        }
    }

    /// Shut down a plugin if needed and remove it
    pub fn unload_plugin(&mut self, name: &str) -> Result<(), PluginHostError> {
        let index = self
            .plugins
            .iter()
            .position(|p| p.matches(name))
            .ok_or_else(|| PluginHostError::NotFound {
                name: name.to_string(),
            })?;

        let plugin = self.plugins.remove(index);
        tracing::info!(plugin = %plugin.slot.name(), "Plugin unloaded");
        Ok(())
    }

    /// List all plugins in load order
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(LoadedPlugin::info).collect()
    }

    /// Get information about a specific plugin
    pub fn get_plugin_info(&self, name: &str) -> Option<PluginInfo> {
        self.plugins
            .iter()
            .find(|p| p.matches(name))
            .map(LoadedPlugin::info)
    }

    /// Get the number of loaded plugins
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Enable a plugin in the registry
    pub fn enable_plugin(&mut self, name: &str) -> Result<(), PluginHostError> {
        let mut registry = PluginRegistry::load(&self.config.registry_path)?;
        registry.enable(name);
        registry.save(&self.config.registry_path)?;
        Ok(())
    }

    /// Disable a plugin
    pub fn disable_plugin(&mut self, name: &str) -> Result<(), PluginHostError> {
        let mut registry = PluginRegistry::load(&self.config.registry_path)?;
        registry.disable(name);
        registry.save(&self.config.registry_path)?;

        // Update in-memory state if loaded
        if let Some(plugin) = self.plugins.iter_mut().find(|p| p.matches(name)) {
            plugin.state = PluginState::Disabled {
                reason: "Disabled by user".to_string(),
            };
        }

        Ok(())
    }
}

impl Drop for PluginHost {
    fn drop(&mut self) {
        self.shutdown_all();
    }
}

/// Read a plugin library's SDK version and metadata without initializing it
pub fn inspect_library(path: &Path) -> Result<LibraryReport, PluginHostError> {
    let (library, sdk_version) = open_library(path)?;
    let compatibility = check_sdk_compatibility(sdk_version);

    let metadata = if compatibility.is_loadable() {
        let instance = create_instance(&library, path)?;
        let metadata = instance.plugin().metadata();
        drop(instance);
        Some(metadata)
    } else {
        None
    };

    Ok(LibraryReport {
        path: path.to_path_buf(),
        sdk_version,
        compatibility,
        metadata,
    })
}

/// Find the library file in a plugin directory
fn find_library(dir: &Path, name: &str) -> Result<PathBuf, PluginHostError> {
    // Look for <name>.so (or .dylib on macOS, .dll on Windows)
    let extensions: &[&str] = if cfg!(target_os = "macos") {
        &["dylib", "so"]
    } else if cfg!(target_os = "windows") {
        &["dll"]
    } else {
        &["so"]
    };

    for ext in extensions {
        let lib_path = dir.join(format!("{name}.{ext}"));
        if lib_path.exists() {
            return Ok(lib_path);
        }

        // Also try lib<name>.<ext> format
        let lib_path = dir.join(format!("lib{name}.{ext}"));
        if lib_path.exists() {
            return Ok(lib_path);
        }
    }

    Err(PluginHostError::LibraryNotFound {
        dir: dir.to_path_buf(),
    })
}

/// Load a library and read the SDK version it was built against
fn open_library(path: &Path) -> Result<(Library, SdkVersion), PluginHostError> {
    // SAFETY: loading runs the library's initializers. Plugins are trusted
    // code the user installed and enabled.
    let library = unsafe { Library::new(path)? };

    let (major, minor, patch) = {
        // SAFETY: the SDK declares these symbols as `extern "C" fn() -> c_int`
        let major: Symbol<VersionFn> = unsafe { library.get(SYMBOL_VERSION_MAJOR)? };
        let minor: Symbol<VersionFn> = unsafe { library.get(SYMBOL_VERSION_MINOR)? };
        let patch: Symbol<VersionFn> = unsafe { library.get(SYMBOL_VERSION_PATCH)? };
        (major(), minor(), patch())
    };

    let version = from_raw_components(major, minor, patch).ok_or(
        PluginHostError::InvalidSdkVersion {
            major,
            minor,
            patch,
        },
    )?;
    Ok((library, version))
}

/// Create an instance through the library's exported factory.
///
/// The returned handle must be dropped before `library`.
fn create_instance(library: &Library, path: &Path) -> Result<InstanceHandle, PluginHostError> {
    // SAFETY: signatures match the ones `export_plugin!` generates
    let create: Symbol<CreateInstanceFn> = unsafe { library.get(SYMBOL_CREATE_INSTANCE)? };
    let destroy: Symbol<DestroyInstanceFn> = unsafe { library.get(SYMBOL_DESTROY_INSTANCE)? };
    let destroy: DestroyInstanceFn = *destroy;

    // SAFETY: the pointer comes from this library's factory, paired with its
    // own destroy function, and the caller keeps the library loaded
    unsafe { InstanceHandle::from_raw(create(), destroy) }.ok_or_else(|| {
        PluginHostError::NullInstance {
            name: path.display().to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use neoradar_sdk::CoreApi;
    use neoradar_sdk::airport::AirportAddedEvent;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    type Log = Arc<Mutex<Vec<String>>>;

    struct TestPlugin {
        name: &'static str,
        log: Log,
        panic_on_event: bool,
    }

    impl TestPlugin {
        fn boxed(name: &'static str, log: &Log) -> Box<dyn Plugin> {
            Box::new(Self {
                name,
                log: log.clone(),
                panic_on_event: false,
            })
        }

        fn record(&self, what: &str) {
            self.log.lock().unwrap().push(format!("{}:{what}", self.name));
        }
    }

    impl Plugin for TestPlugin {
        fn initialize(&mut self, _: &PluginMetadata, _: Arc<dyn CoreApi>, _: ClientInformation) {
            self.record("initialize");
        }

        fn shutdown(&mut self) {
            self.record("shutdown");
        }

        fn metadata(&self) -> PluginMetadata {
            PluginMetadata::new(self.name, "1.0.0", "tests")
        }

        fn on_airport_added(&mut self, event: &AirportAddedEvent) {
            if self.panic_on_event {
                panic!("boom");
            }
            self.record(&event.icao);
        }
    }

    fn test_config(dir: &TempDir) -> PluginHostConfig {
        PluginHostConfig {
            plugin_dirs: vec![dir.path().join("plugins")],
            registry_path: dir.path().join("plugins").join(REGISTRY_FILE_NAME),
            client: ClientInformation::default(),
            allow_patch_mismatch: true,
        }
    }

    fn airport_added(icao: &str) -> Event {
        Event::from(AirportAddedEvent {
            icao: icao.to_string(),
        })
    }

    #[test]
    fn test_add_and_initialize_plugins() {
        let dir = TempDir::new().unwrap();
        let log = Log::default();
        let mut host = PluginHost::new(test_config(&dir));

        host.add_plugin(TestPlugin::boxed("a", &log)).unwrap();
        host.add_plugin(TestPlugin::boxed("b", &log)).unwrap();
        assert_eq!(host.plugin_count(), 2);
        assert_eq!(host.initialize_all(), 2);
        assert_eq!(host.initialize_all(), 0);

        let info = host.get_plugin_info("a").unwrap();
        assert_eq!(info.lifecycle, LifecycleState::Active);
        assert_eq!(info.state, PluginState::Loaded);
        assert!(info.path.is_none());
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let log = Log::default();
        let mut host = PluginHost::new(test_config(&dir));

        host.add_plugin(TestPlugin::boxed("a", &log)).unwrap();
        let err = host.add_plugin(TestPlugin::boxed("a", &log)).unwrap_err();
        assert!(matches!(err, PluginHostError::AlreadyLoaded { .. }));
    }

    #[test]
    fn test_dispatch_skips_uninitialized_plugins() {
        let dir = TempDir::new().unwrap();
        let log = Log::default();
        let mut host = PluginHost::new(test_config(&dir));
        host.add_plugin(TestPlugin::boxed("a", &log)).unwrap();

        host.dispatch(&airport_added("EGLL"));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_panicking_plugin_is_isolated() {
        let dir = TempDir::new().unwrap();
        let log = Log::default();
        let mut host = PluginHost::new(test_config(&dir));
        host.add_plugin(Box::new(TestPlugin {
            name: "bad",
            log: log.clone(),
            panic_on_event: true,
        }))
        .unwrap();
        host.add_plugin(TestPlugin::boxed("good", &log)).unwrap();
        host.initialize_all();

        host.dispatch(&airport_added("EGLL"));
        host.dispatch(&airport_added("EGKK"));

        let bad = host.get_plugin_info("bad").unwrap();
        assert!(matches!(bad.state, PluginState::Failed { .. }));
        assert_eq!(bad.lifecycle, LifecycleState::ShutDown);
        assert!(log.lock().unwrap().contains(&"good:EGKK".to_string()));
    }

    #[test]
    fn test_shutdown_all_runs_in_reverse_order() {
        let dir = TempDir::new().unwrap();
        let log = Log::default();
        let mut host = PluginHost::new(test_config(&dir));
        host.add_plugin(TestPlugin::boxed("a", &log)).unwrap();
        host.add_plugin(TestPlugin::boxed("b", &log)).unwrap();
        host.initialize_all();
        log.lock().unwrap().clear();

        host.shutdown_all();
        host.shutdown_all();

        assert_eq!(*log.lock().unwrap(), ["b:shutdown", "a:shutdown"]);
    }

    #[test]
    fn test_unload_shuts_down_active_plugin() {
        let dir = TempDir::new().unwrap();
        let log = Log::default();
        let mut host = PluginHost::new(test_config(&dir));
        host.add_plugin(TestPlugin::boxed("a", &log)).unwrap();
        host.initialize_plugin("a").unwrap();

        host.unload_plugin("a").unwrap();
        assert_eq!(host.plugin_count(), 0);
        assert_eq!(log.lock().unwrap().last().map(String::as_str), Some("a:shutdown"));

        let err = host.unload_plugin("a").unwrap_err();
        assert!(matches!(err, PluginHostError::NotFound { .. }));
    }

    #[test]
    fn test_pump_drains_queue() {
        let dir = TempDir::new().unwrap();
        let log = Log::default();
        let mut host = PluginHost::new(test_config(&dir));
        host.add_plugin(TestPlugin::boxed("a", &log)).unwrap();
        host.initialize_all();

        host.core().modules().airport.add_airport("EGLL", &["27L"]);
        // AirportAdded + AirportConfigurationsUpdated
        assert_eq!(host.pump(), 2);
        assert!(host.core().queue().is_empty());
        assert!(log.lock().unwrap().contains(&"a:EGLL".to_string()));
    }

    #[test]
    fn test_enable_disable_plugin() {
        let dir = TempDir::new().unwrap();
        let log = Log::default();
        let config = test_config(&dir);
        let registry_path = config.registry_path.clone();
        let mut host = PluginHost::new(config);
        host.add_plugin(TestPlugin::boxed("a", &log)).unwrap();

        host.enable_plugin("a").unwrap();
        assert!(PluginRegistry::load(&registry_path).unwrap().is_enabled("a"));

        host.disable_plugin("a").unwrap();
        assert!(!PluginRegistry::load(&registry_path).unwrap().is_enabled("a"));
        assert!(matches!(
            host.get_plugin_info("a").unwrap().state,
            PluginState::Disabled { .. }
        ));
        let err = host.initialize_plugin("a").unwrap_err();
        assert!(matches!(
            err,
            PluginHostError::Unavailable {
                state: PluginState::Disabled { .. },
                ..
            }
        ));
        assert_eq!(err.to_string(), "Plugin 'a' is disabled (Disabled by user)");
    }

    #[test]
    fn test_discover_finds_plugin_dirs() {
        let dir = TempDir::new().unwrap();
        let plugins = dir.path().join("plugins");
        std::fs::create_dir_all(plugins.join("alpha")).unwrap();
        std::fs::create_dir_all(plugins.join("beta")).unwrap();
        std::fs::write(plugins.join("alpha").join("libalpha.so"), b"").unwrap();

        let mut host = PluginHost::new(test_config(&dir));
        host.enable_plugin("beta").unwrap();

        let found = host.discover().unwrap();
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta"]);
        if cfg!(target_os = "linux") {
            assert!(found[0].library.is_some());
        }
        assert!(found[1].library.is_none());
        assert!(!found[0].enabled);
        assert!(found[1].enabled);
    }

    #[test]
    fn test_load_all_skips_broken_plugins() {
        let dir = TempDir::new().unwrap();
        let plugins = dir.path().join("plugins");
        std::fs::create_dir_all(plugins.join("broken")).unwrap();
        std::fs::write(plugins.join("broken").join("broken.so"), b"not a library").unwrap();

        let mut host = PluginHost::new(test_config(&dir));
        host.enable_plugin("broken").unwrap();

        assert_eq!(host.load_all().unwrap(), 0);
        assert_eq!(host.plugin_count(), 0);
    }

    #[test]
    fn test_load_library_rejects_non_library() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.so");
        std::fs::write(&path, b"not a library").unwrap();

        let mut host = PluginHost::new(test_config(&dir));
        let err = host.load_library(&path).unwrap_err();
        assert!(matches!(err, PluginHostError::LibraryLoad(_)));
        assert!(inspect_library(&path).is_err());
    }

    #[test]
    fn test_load_plugin_dir_missing() {
        let dir = TempDir::new().unwrap();
        let mut host = PluginHost::new(test_config(&dir));

        let err = host.load_plugin_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, PluginHostError::PluginDirNotFound { .. }));

        std::fs::create_dir_all(dir.path().join("empty")).unwrap();
        let err = host.load_plugin_dir(&dir.path().join("empty")).unwrap_err();
        assert!(matches!(err, PluginHostError::LibraryNotFound { .. }));
    }

    #[test]
    fn test_plugin_info_serializes() {
        let info = PluginInfo {
            name: "a".to_string(),
            metadata: PluginMetadata::new("a", "1.0.0", "tests"),
            lifecycle: LifecycleState::Active,
            state: PluginState::Failed {
                error: "boom".to_string(),
            },
            path: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["lifecycle"], "active");
        assert_eq!(json["state"]["status"], "failed");
        assert_eq!(json["state"]["error"], "boom");
    }
}
