//! The live [`Plugin`] trait: tools, injections, and the tool-execution
//! hook (spec §2, §4.6–§4.8).

use async_trait::async_trait;
use serde_json::Value;

use alloy_core::CoreError;

use crate::factory::PluginInterface;

/// One callable tool a plugin exposes to the LLM.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Tool name, unique within the owning plugin (spec §4.6).
    pub name: String,
    /// Non-empty human-readable description shown to the LLM.
    pub description: String,
    /// JSON-schema-shaped input schema, checked by
    /// `alloy_framework::schema::validate_input`.
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Builds a tool descriptor.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// A live plugin instance: its declared tools, tool handler, and optional
/// injection provider / post-execution hook.
///
/// Plugins are statically linked (spec §4.6: "the host compiles plugins
/// in"). Implementors are typically zero-sized or hold only shared,
/// `Send + Sync` state — per-channel state lives in the State Store, not on
/// the plugin instance.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Short name this plugin is registered under (must match the
    /// corresponding [`PluginDescriptor::name`](super::PluginDescriptor::name)).
    fn name(&self) -> &str;

    /// Tools this plugin exposes. Must have unique names, non-empty
    /// descriptions, and well-formed input schemas (spec §4.6).
    fn tools(&self) -> &[ToolDescriptor];

    /// Runs once after the plugin is instantiated, before it serves any
    /// activation (spec §3: "optional lifecycle hooks: initial-setup").
    /// A failure here is startup-fatal, mirroring `UnknownPlugin`/
    /// `DuplicatePlugin` in spec §4.6.
    async fn setup(&self) -> Result<(), CoreError> {
        Ok(())
    }

    /// Invokes `tool` with already-schema-validated `input`.
    async fn call_tool(
        &self,
        tool: &str,
        input: Value,
        iface: &PluginInterface,
    ) -> Result<Value, CoreError>;

    /// Returns this plugin's dynamic context injections for the current
    /// activation (spec §4.5). Defaults to none.
    async fn provide_injections(&self, _iface: &PluginInterface) -> Vec<alloy_core::ContextInjection> {
        Vec::new()
    }

    /// Runs after a tool call returns, with access to the result (spec
    /// §4.8 step 5). Errors from this hook are logged, not propagated.
    async fn on_tool_execution(
        &self,
        _tool: &str,
        _input: &Value,
        _result: &Result<Value, CoreError>,
        _iface: &PluginInterface,
    ) {
    }
}
