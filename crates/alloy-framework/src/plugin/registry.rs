//! Plugin Registry (component G): startup-time map from short name to
//! [`PluginDescriptor`], filtered and validated per spec §4.6.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_core::CoreError;
use tracing::info;

use crate::plugin::core::{Plugin, ToolDescriptor};
use crate::plugin::descriptor::PluginDescriptor;
use crate::schema::validate_schema_shape;

/// Startup-built registry of instantiated plugins, keyed by short name.
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
    /// Builds a registry from `available` descriptors, restricted to the
    /// names in `enabled_plugins`.
    ///
    /// - An `enabled_plugins` entry with no matching descriptor `fails with
    ///   UnknownPlugin`.
    /// - Two descriptors sharing a name `fail with DuplicatePlugin`.
    /// - Every tool must have a unique name within its plugin, a non-empty
    ///   description, and a well-formed input schema.
    pub async fn build(
        available: &[PluginDescriptor],
        enabled_plugins: &[String],
    ) -> Result<Self, CoreError> {
        let mut by_name: HashMap<&'static str, &PluginDescriptor> = HashMap::new();
        for descriptor in available {
            if by_name.insert(descriptor.name, descriptor).is_some() {
                return Err(CoreError::DuplicatePlugin(descriptor.name.to_string()));
            }
        }

        let mut plugins = HashMap::new();
        for name in enabled_plugins {
            let descriptor = by_name
                .get(name.as_str())
                .ok_or_else(|| CoreError::UnknownPlugin(name.clone()))?;

            let instance = descriptor.instantiate();
            validate_plugin(&instance)?;
            instance.setup().await?;

            info!(plugin = name.as_str(), "plugin registered");
            plugins.insert(name.clone(), instance);
        }

        Ok(Self { plugins })
    }

    /// Looks up a plugin by short name.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn Plugin>, CoreError> {
        self.plugins
            .get(name)
            .ok_or_else(|| CoreError::UnknownPlugin(name.to_string()))
    }

    /// Iterates all registered plugins.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Plugin>)> {
        self.plugins.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether the registry has no registered plugins.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

fn validate_plugin(plugin: &Arc<dyn Plugin>) -> Result<(), CoreError> {
    let mut seen = std::collections::HashSet::new();
    for tool in plugin.tools() {
        if tool.name.is_empty() {
            return Err(CoreError::InvalidIdentifier(format!(
                "plugin '{}' declares a tool with an empty name",
                plugin.name()
            )));
        }
        if tool.description.is_empty() {
            return Err(CoreError::InvalidIdentifier(format!(
                "tool '{}' on plugin '{}' has an empty description",
                tool.name,
                plugin.name()
            )));
        }
        if !validate_schema_shape(&tool.input_schema) {
            return Err(CoreError::InvalidIdentifier(format!(
                "tool '{}' on plugin '{}' has a malformed input schema",
                tool.name,
                plugin.name()
            )));
        }
        if !seen.insert(tool.name.as_str()) {
            return Err(CoreError::InvalidIdentifier(format!(
                "plugin '{}' declares tool '{}' more than once",
                plugin.name(),
                tool.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::PluginInterface;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct Dummy;

    #[async_trait]
    impl Plugin for Dummy {
        fn name(&self) -> &str {
            "dummy"
        }
        fn tools(&self) -> &[ToolDescriptor] {
            &[]
        }
        async fn call_tool(
            &self,
            _tool: &str,
            _input: Value,
            _iface: &PluginInterface,
        ) -> Result<Value, CoreError> {
            Ok(json!(null))
        }
    }

    const DUMMY: PluginDescriptor = PluginDescriptor {
        name: "dummy",
        create: || Arc::new(Dummy),
    };

    #[tokio::test]
    async fn unknown_enabled_plugin_fails() {
        let available = [DUMMY];
        let err = PluginRegistry::build(&available, &["missing".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownPlugin(_)));
    }

    #[tokio::test]
    async fn duplicate_descriptor_name_fails() {
        let available = [DUMMY, DUMMY];
        let err = PluginRegistry::build(&available, &[]).await.unwrap_err();
        assert!(matches!(err, CoreError::DuplicatePlugin(_)));
    }

    #[tokio::test]
    async fn enabled_plugin_is_registered() {
        let available = [DUMMY];
        let registry = PluginRegistry::build(&available, &["dummy".to_string()])
            .await
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("dummy").is_ok());
    }
}
