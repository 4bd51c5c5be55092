//! Tool Dispatcher (component I): schema-validated tool-call routing with
//! a post-execution hook (spec §4.8).

use serde_json::Value;
use tracing::{Level, debug, span};

use alloy_core::CoreError;

use crate::factory::PluginInterface;
use crate::plugin::PluginRegistry;
use crate::schema::validate_input;

/// Routes tool calls to registered plugins.
pub struct ToolDispatcher<'a> {
    registry: &'a PluginRegistry,
}

impl<'a> ToolDispatcher<'a> {
    /// Creates a dispatcher over `registry`.
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self { registry }
    }

    /// Dispatches one tool call (spec §4.8 steps 1–6).
    ///
    /// Handler errors propagate as `ToolExecutionError` with the plugin's
    /// identity attached; they do not kill the activation. The
    /// post-execution hook's own errors are logged and swallowed inside the
    /// plugin's `on_tool_execution` implementation — this dispatcher always
    /// runs it and ignores its return, since the trait method itself returns
    /// `()` (spec §4.8 step 5).
    pub async fn dispatch(
        &self,
        plugin_name: &str,
        tool_name: &str,
        input: Value,
        iface: &PluginInterface,
    ) -> Result<Value, CoreError> {
        let span = span!(
            Level::DEBUG,
            "dispatch",
            plugin = plugin_name,
            tool = tool_name
        );
        let _enter = span.enter();

        let plugin = self.registry.get(plugin_name)?;

        let tool = plugin
            .tools()
            .iter()
            .find(|t| t.name == tool_name)
            .ok_or_else(|| CoreError::UnknownTool {
                plugin: plugin_name.to_string(),
                tool: tool_name.to_string(),
            })?;

        validate_input(plugin_name, tool_name, &tool.input_schema, &input)?;

        debug!("invoking tool handler");
        let result = plugin
            .call_tool(tool_name, input.clone(), iface)
            .await
            .map_err(|e| CoreError::ToolExecutionError {
                plugin: plugin_name.to_string(),
                tool: tool_name.to_string(),
                reason: e.to_string(),
            });

        plugin
            .on_tool_execution(tool_name, &input, &result, iface)
            .await;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ContextFactory;
    use crate::plugin::{Plugin, PluginDescriptor, ToolDescriptor};
    use alloy_core::{ActivationContext, ChannelId, ChatHost, HostError, InheritanceInfo, MessageId, Scope};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct Echo {
        tools: Vec<ToolDescriptor>,
    }

    #[async_trait]
    impl Plugin for Echo {
        fn name(&self) -> &str {
            "echo"
        }
        fn tools(&self) -> &[ToolDescriptor] {
            &self.tools
        }
        async fn call_tool(
            &self,
            _tool: &str,
            input: Value,
            _iface: &PluginInterface,
        ) -> Result<Value, CoreError> {
            Ok(input)
        }
    }

    fn echo_descriptor() -> PluginDescriptor {
        PluginDescriptor {
            name: "echo",
            create: || {
                Arc::new(Echo {
                    tools: vec![ToolDescriptor::new(
                        "say",
                        "echoes the input",
                        json!({"required": ["text"], "properties": {"text": {"type": "string"}}}),
                    )],
                })
            },
        }
    }

    struct NullHost;

    #[async_trait]
    impl ChatHost for NullHost {
        async fn send_message(
            &self,
            _channel: &ChannelId,
            _content: &str,
        ) -> Result<Vec<MessageId>, HostError> {
            Ok(vec![])
        }
        async fn pin_message(&self, _channel: &ChannelId, _message: &MessageId) -> Result<(), HostError> {
            Ok(())
        }
    }

    fn dummy_iface(store: Arc<alloy_runtime::StateStore>) -> PluginInterface {
        let context = ActivationContext::new(
            vec![],
            ChannelId::new("c1").unwrap(),
            MessageId::new("m1"),
            InheritanceInfo::default(),
            HashMap::new(),
        );
        ContextFactory::new(context, store, Arc::new(NullHost)).bind(
            "echo",
            None,
            None,
            json!({}),
            Scope::Channel,
        )
    }

    #[tokio::test]
    async fn unknown_plugin_fails() {
        let registry = PluginRegistry::build(&[], &[]).await.unwrap();
        let dispatcher = ToolDispatcher::new(&registry);
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(alloy_runtime::StateStore::new(dir.path().to_path_buf()));
        let iface = dummy_iface(store);
        let err = dispatcher
            .dispatch("echo", "say", json!({}), &iface)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownPlugin(_)));
    }

    #[tokio::test]
    async fn invalid_input_fails_validation() {
        let available = [echo_descriptor()];
        let registry = PluginRegistry::build(&available, &["echo".to_string()]).await.unwrap();
        let dispatcher = ToolDispatcher::new(&registry);
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(alloy_runtime::StateStore::new(dir.path().to_path_buf()));
        let iface = dummy_iface(store);
        let err = dispatcher
            .dispatch("echo", "say", json!({}), &iface)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn valid_call_returns_handler_result() {
        let available = [echo_descriptor()];
        let registry = PluginRegistry::build(&available, &["echo".to_string()]).await.unwrap();
        let dispatcher = ToolDispatcher::new(&registry);
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(alloy_runtime::StateStore::new(dir.path().to_path_buf()));
        let iface = dummy_iface(store);
        let result = dispatcher
            .dispatch("echo", "say", json!({"text": "hi"}), &iface)
            .await
            .unwrap();
        assert_eq!(result, json!({"text": "hi"}));
    }
}
