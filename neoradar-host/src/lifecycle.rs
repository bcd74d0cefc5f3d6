//! Plugin lifecycle state machine.
//!
//! `Uninitialized -> Active -> ShutDown`. The plugin contract leaves misuse
//! (initializing twice, calls after shutdown) undefined, so [`PluginSlot`]
//! refuses it before it reaches the plugin.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use neoradar_sdk::{ClientInformation, CoreApi, Event, PluginMetadata};

use crate::error::PluginHostError;
use crate::instance::InstanceHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Uninitialized,
    Active,
    ShutDown,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::ShutDown => "shut down",
        })
    }
}

/// A plugin instance together with its lifecycle state
pub struct PluginSlot {
    metadata: PluginMetadata,
    state: LifecycleState,
    instance: InstanceHandle,
}

impl PluginSlot {
    /// Wrap a freshly created instance. Reads its metadata once.
    pub fn new(instance: InstanceHandle) -> Self {
        let metadata = instance.plugin().metadata();
        Self {
            metadata,
            state: LifecycleState::Uninitialized,
            instance,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Metadata as the plugin reports it now. Valid in every state.
    pub fn metadata(&self) -> PluginMetadata {
        self.instance.plugin().metadata()
    }

    /// Metadata read when the slot was created
    pub fn declared_metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn refuse(&self, operation: &'static str) -> PluginHostError {
        PluginHostError::InvalidLifecycle {
            name: self.metadata.name.clone(),
            operation,
            state: self.state,
        }
    }

    pub fn initialize(
        &mut self,
        core: Arc<dyn CoreApi>,
        info: ClientInformation,
    ) -> Result<(), PluginHostError> {
        if self.state != LifecycleState::Uninitialized {
            return Err(self.refuse("initialize"));
        }
        // Plugins may write through `core` from inside `initialize`
        self.state = LifecycleState::Active;
        self.instance
            .plugin_mut()
            .initialize(&self.metadata, core, info);
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<(), PluginHostError> {
        if self.state != LifecycleState::Active {
            return Err(self.refuse("shut down"));
        }
        self.state = LifecycleState::ShutDown;
        self.instance.plugin_mut().shutdown();
        Ok(())
    }

    /// Deliver one event. Only active plugins receive events.
    pub fn deliver(&mut self, event: &Event) -> Result<(), PluginHostError> {
        if self.state != LifecycleState::Active {
            return Err(self.refuse("receive events"));
        }
        event.dispatch(self.instance.plugin_mut());
        Ok(())
    }

    /// Mark an active plugin as shut down without calling into it
    pub(crate) fn abandon(&mut self) {
        self.state = LifecycleState::ShutDown;
    }
}
