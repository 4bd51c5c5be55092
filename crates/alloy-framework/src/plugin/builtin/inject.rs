//! `inject`: the configuration-driven static injection plugin (spec §6).
//!
//! Unlike a code-driven plugin's [`Plugin::provide_injections`], this
//! plugin's fragments come entirely from `pluginConfig.inject` and may use
//! either anchor (`latest` or `earliest`). Anchor-aware placement needs the
//! transcript length, which the [`Plugin`] trait's injection hook does not
//! have — so `inject`'s entries are read straight off [`PluginInterface`]'s
//! config by [`load_config`] and turned into [`PreparedInjection`]s by the
//! activation loop that calls [`PreparedInjection::from_static`], the same
//! way every other plugin's dynamic injections become
//! [`PreparedInjection::from_dynamic`]. This plugin still registers like any
//! other so it participates in `enabledPlugins` and descriptor validation.

use async_trait::async_trait;
use serde_json::Value;

use alloy_core::{ContextInjection, CoreError, InjectionConfig};

use crate::factory::PluginInterface;
use crate::plugin::core::{Plugin, ToolDescriptor};

/// Short name this plugin is registered under.
pub const NAME: &str = "inject";

/// Parses the list of [`InjectionConfig`] entries out of this plugin's
/// config section. An absent or malformed list yields no injections rather
/// than a startup failure (spec §4.8: "a failed injection build must not
/// crash the activation").
pub fn load_config(config: &Value) -> Vec<InjectionConfig> {
    match config {
        Value::Array(_) => serde_json::from_value(config.clone()).unwrap_or_default(),
        Value::Object(map) => map
            .get("injections")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// A no-op [`Plugin`] occupying the `inject` registry slot. Its fragments
/// are sourced directly from config by [`load_config`], not through
/// [`Plugin::provide_injections`] (see module docs).
#[derive(Debug, Default)]
pub struct InjectPlugin {
    tools: Vec<ToolDescriptor>,
}

#[async_trait]
impl Plugin for InjectPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    async fn call_tool(
        &self,
        tool: &str,
        _input: Value,
        _iface: &PluginInterface,
    ) -> Result<Value, CoreError> {
        Err(CoreError::UnknownTool {
            plugin: NAME.to_string(),
            tool: tool.to_string(),
        })
    }

    /// Always empty: `inject`'s fragments bypass this hook (module docs).
    async fn provide_injections(&self, _iface: &PluginInterface) -> Vec<ContextInjection> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_core::{Anchor, InjectionContent};
    use serde_json::json;

    #[test]
    fn parses_bare_array_config() {
        let config = json!([
            {"id": "welcome", "content": "hi there", "depth": 0},
        ]);
        let parsed = load_config(&config);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "welcome");
        assert_eq!(parsed[0].anchor, Anchor::Latest);
        assert_eq!(parsed[0].priority, 0);
    }

    #[test]
    fn parses_wrapped_object_config() {
        let config = json!({"injections": [
            {"id": "rules", "content": "be nice", "depth": 1, "anchor": "earliest", "priority": 5},
        ]});
        let parsed = load_config(&config);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].anchor, Anchor::Earliest);
        assert_eq!(parsed[0].priority, 5);
        assert_eq!(parsed[0].content, InjectionContent::Text("be nice".into()));
    }

    #[test]
    fn malformed_config_yields_no_injections() {
        assert!(load_config(&json!("not a list")).is_empty());
        assert!(load_config(&json!(null)).is_empty());
        assert!(load_config(&json!([{"id": "bad"}])).is_empty());
    }

    #[test]
    fn has_no_tools() {
        let plugin = InjectPlugin::default();
        assert!(plugin.tools().is_empty());
        assert_eq!(plugin.name(), NAME);
    }
}
