//! `notes`: a small example plugin demonstrating epic-scoped state, tools,
//! and dynamic context injection, grounded in the plugin-runtime spec's
//! data model (§3, §4.3, §4.7).
//!
//! Notes are stored as epic-scope events (one `{"op":"add","text":...}`
//! delta per `add_note` call) so deleted/rolled-back messages naturally
//! roll their notes back too (spec §4.3 "Rollback monotonicity"). The
//! reduced state is a JSON array of strings.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use alloy_core::{ContextInjection, CoreError, Reducer, Scope};
use alloy_framework::factory::PluginInterface;
use alloy_framework::plugin::{Plugin, PluginDescriptor, ToolDescriptor};

/// Short name this plugin is registered under.
pub const NAME: &str = "notes";

/// Static descriptor for the host's `enabledPlugins` list.
pub static NOTES: PluginDescriptor = PluginDescriptor {
    name: NAME,
    create: || Arc::new(NotesPlugin::new()),
};

/// Folds one `add_note` delta into the accumulated notes array.
///
/// Unknown `op` values are ignored rather than treated as corrupt state —
/// a future plugin version can add new delta shapes without invalidating
/// old event logs.
pub fn reduce_notes(state: Option<Value>, delta: &Value) -> Value {
    let mut notes: Vec<String> = state
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    if delta.get("op").and_then(Value::as_str) == Some("add")
        && let Some(text) = delta.get("text").and_then(Value::as_str)
    {
        notes.push(text.to_string());
    }

    json!(notes)
}

/// Returns the [`Reducer`] a host must pass to `ContextFactory::bind` when
/// activating the `notes` plugin for epic-scope reads/writes.
pub fn reducer() -> Arc<dyn Reducer> {
    Arc::new(reduce_notes)
}

#[derive(Debug, Default)]
pub struct NotesPlugin {
    tools: Vec<ToolDescriptor>,
}

impl NotesPlugin {
    pub fn new() -> Self {
        Self {
            tools: vec![
                ToolDescriptor::new(
                    "add_note",
                    "Adds a short text note to this channel's notebook.",
                    json!({
                        "type": "object",
                        "required": ["text"],
                        "properties": {"text": {"type": "string"}},
                    }),
                ),
                ToolDescriptor::new(
                    "list_notes",
                    "Lists all notes recorded so far in this channel.",
                    json!({"type": "object", "properties": {}}),
                ),
            ],
        }
    }

    async fn notes(&self, iface: &PluginInterface) -> Vec<String> {
        match iface.get_state(Scope::Epic).await {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl Plugin for NotesPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    async fn call_tool(
        &self,
        tool: &str,
        input: Value,
        iface: &PluginInterface,
    ) -> Result<Value, CoreError> {
        match tool {
            "add_note" => {
                let text = input
                    .get("text")
                    .and_then(Value::as_str)
                    .ok_or_else(|| CoreError::InvalidInput {
                        plugin: NAME.to_string(),
                        tool: tool.to_string(),
                        reason: "missing 'text'".into(),
                    })?;
                iface
                    .set_state(Scope::Epic, json!({"op": "add", "text": text}))
                    .await?;
                Ok(json!({"ok": true}))
            }
            "list_notes" => Ok(json!({"notes": self.notes(iface).await})),
            other => Err(CoreError::UnknownTool {
                plugin: NAME.to_string(),
                tool: other.to_string(),
            }),
        }
    }

    /// Surfaces the note count as a system fragment that stays near the
    /// end of the transcript while the channel is active and ages back to
    /// depth 4 as more messages arrive (spec §4.4).
    async fn provide_injections(&self, iface: &PluginInterface) -> Vec<ContextInjection> {
        let notes = self.notes(iface).await;
        if notes.is_empty() {
            return Vec::new();
        }
        let summary = format!("{} note(s) recorded: {}", notes.len(), notes.join("; "));
        vec![
            ContextInjection::new("summary", summary, 4)
                .with_last_modified_at(iface.current_message_id().clone())
                .as_system(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_core::{ActivationContext, ChannelId, ChatHost, HostError, InheritanceInfo, MessageId};
    use alloy_framework::factory::ContextFactory;
    use alloy_runtime::StateStore;
    use std::collections::HashMap;

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

    fn iface_for(
        store: Arc<StateStore>,
        message_ids: Vec<MessageId>,
        current: MessageId,
    ) -> PluginInterface {
        let context = ActivationContext::new(
            message_ids,
            ChannelId::new("c1").unwrap(),
            current,
            InheritanceInfo::default(),
            HashMap::new(),
        );
        ContextFactory::new(context, store, Arc::new(NullHost)).bind(
            NAME,
            None,
            Some(reducer()),
            json!({}),
            Scope::Epic,
        )
    }

    #[tokio::test]
    async fn add_then_list_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(StateStore::new(dir.path()));
        let plugin = NotesPlugin::new();

        let ids = vec![MessageId::new("m1")];
        let iface = iface_for(store.clone(), ids, MessageId::new("m1"));
        plugin
            .call_tool("add_note", json!({"text": "buy milk"}), &iface)
            .await
            .unwrap();

        let result = plugin.call_tool("list_notes", json!({}), &iface).await.unwrap();
        assert_eq!(result, json!({"notes": ["buy milk"]}));
    }

    #[tokio::test]
    async fn rolled_back_message_drops_its_note() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(StateStore::new(dir.path()));
        let plugin = NotesPlugin::new();

        let iface1 = iface_for(store.clone(), vec![MessageId::new("m1")], MessageId::new("m1"));
        plugin
            .call_tool("add_note", json!({"text": "first"}), &iface1)
            .await
            .unwrap();

        let iface2 = iface_for(
            store.clone(),
            vec![MessageId::new("m1"), MessageId::new("m2")],
            MessageId::new("m2"),
        );
        plugin
            .call_tool("add_note", json!({"text": "second"}), &iface2)
            .await
            .unwrap();

        // m1 is no longer live: only "second" should survive replay.
        let iface_after_rollback = iface_for(store, vec![MessageId::new("m2")], MessageId::new("m2"));
        let result = plugin
            .call_tool("list_notes", json!({}), &iface_after_rollback)
            .await
            .unwrap();
        assert_eq!(result, json!({"notes": ["second"]}));
    }

    #[tokio::test]
    async fn injection_surfaces_note_count() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(StateStore::new(dir.path()));
        let plugin = NotesPlugin::new();

        let iface = iface_for(store, vec![MessageId::new("m1")], MessageId::new("m1"));
        plugin
            .call_tool("add_note", json!({"text": "buy milk"}), &iface)
            .await
            .unwrap();

        let injections = plugin.provide_injections(&iface).await;
        assert_eq!(injections.len(), 1);
        assert!(injections[0].as_system);
        assert!(matches!(&injections[0].content, alloy_core::InjectionContent::Text(s) if s.contains("buy milk")));
    }
}
