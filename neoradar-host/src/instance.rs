//! Ownership of a plugin instance, wherever it was allocated.

use std::ptr::NonNull;

use neoradar_sdk::{DestroyInstanceFn, Plugin, PluginInstance};

/// A plugin instance owned by the host.
///
/// Instances created by a loaded library are handed back to that library's
/// `DestroyPluginInstance` on drop, so the allocation is freed by the binary
/// that made it. Statically linked plugins are plain boxes.
pub enum InstanceHandle {
    /// Plugin compiled into the host binary
    Owned(Box<dyn Plugin>),
    /// Plugin created by a dynamic library's `CreatePluginInstance`
    Foreign {
        ptr: NonNull<PluginInstance>,
        destroy: DestroyInstanceFn,
    },
}

impl InstanceHandle {
    pub fn from_plugin(plugin: Box<dyn Plugin>) -> Self {
        Self::Owned(plugin)
    }

    /// Take ownership of an instance returned by `CreatePluginInstance`.
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must come from the `CreatePluginInstance` of the library that
    /// also exported `destroy`, must not be owned by anything else, and that
    /// library must stay loaded until this handle is dropped.
    pub unsafe fn from_raw(ptr: *mut PluginInstance, destroy: DestroyInstanceFn) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self::Foreign { ptr, destroy })
    }

    pub fn plugin(&self) -> &dyn Plugin {
        match self {
            Self::Owned(plugin) => plugin.as_ref(),
            // SAFETY: ptr is valid and uniquely owned until drop (see from_raw)
            Self::Foreign { ptr, .. } => unsafe { ptr.as_ref() }.plugin(),
        }
    }

    pub fn plugin_mut(&mut self) -> &mut dyn Plugin {
        match self {
            Self::Owned(plugin) => plugin.as_mut(),
            // SAFETY: as above, and &mut self guarantees exclusive access
            Self::Foreign { ptr, .. } => unsafe { ptr.as_mut() }.plugin_mut(),
        }
    }
}

impl Drop for InstanceHandle {
    fn drop(&mut self) {
        if let Self::Foreign { ptr, destroy } = self {
            destroy(ptr.as_ptr());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neoradar_sdk::{ClientInformation, CoreApi, PluginMetadata};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DESTROYED: AtomicUsize = AtomicUsize::new(0);

    struct Probe;

    impl Plugin for Probe {
        fn initialize(&mut self, _: &PluginMetadata, _: Arc<dyn CoreApi>, _: ClientInformation) {}

        fn shutdown(&mut self) {}

        fn metadata(&self) -> PluginMetadata {
            PluginMetadata::new("probe", "0.1.0", "tests")
        }
    }

    extern "C" fn destroy_probe(ptr: *mut PluginInstance) {
        DESTROYED.fetch_add(1, Ordering::SeqCst);
        // SAFETY: only called with pointers from PluginInstance::into_raw below
        drop(unsafe { PluginInstance::from_raw(ptr) });
    }

    #[test]
    fn test_owned_handle_exposes_plugin() {
        let handle = InstanceHandle::from_plugin(Box::new(Probe));
        assert_eq!(handle.plugin().metadata().name, "probe");
    }

    #[test]
    fn test_null_pointer_is_rejected() {
        let handle = unsafe { InstanceHandle::from_raw(std::ptr::null_mut(), destroy_probe) };
        assert!(handle.is_none());
    }

    #[test]
    fn test_foreign_handle_calls_destroy_on_drop() {
        let before = DESTROYED.load(Ordering::SeqCst);
        let raw = PluginInstance::new(Box::new(Probe)).into_raw();

        let mut handle = unsafe { InstanceHandle::from_raw(raw, destroy_probe) }.unwrap();
        assert_eq!(handle.plugin_mut().metadata().name, "probe");
        drop(handle);

        assert_eq!(DESTROYED.load(Ordering::SeqCst), before + 1);
    }
}
