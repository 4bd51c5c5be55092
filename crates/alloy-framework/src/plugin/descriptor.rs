//! Plugin descriptor — the static, `Copy` handle to a plugin.
//!
//! Unlike the teacher's `define_plugin!`-produced descriptor (which also
//! carries a Tower handler chain and inter-plugin service dependency list),
//! this descriptor is a plain struct literal: the plugin runtime has no
//! service-provider dependency graph to maintain (spec SPEC_FULL §9 "Macro-
//! free plugin construction").

use std::sync::Arc;

use super::core::Plugin;

/// A static, `Copy` descriptor that identifies and instantiates a plugin.
///
/// Build with an ordinary struct literal:
///
/// ```rust,ignore
/// pub static NOTES: PluginDescriptor = PluginDescriptor {
///     name: "notes",
///     create: || Arc::new(NotesPlugin::default()),
/// };
/// ```
#[derive(Clone, Copy)]
pub struct PluginDescriptor {
    /// Short name used in `enabledPlugins` and as the config-section key.
    pub name: &'static str,
    /// Factory function that creates the live [`Plugin`] instance.
    pub create: fn() -> Arc<dyn Plugin>,
}

impl PluginDescriptor {
    /// Creates the live plugin from the factory function.
    #[inline]
    pub fn instantiate(&self) -> Arc<dyn Plugin> {
        (self.create)()
    }
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .finish()
    }
}
