//! Context Factory (component H): binds a plugin to one activation and
//! exposes the narrow [`PluginInterface`] (spec §4.7, §6).

use std::collections::HashSet;
use std::sync::Arc;

use alloy_core::{
    ActivationContext, ChannelId, ChatHost, CoreError, HostError, InheritanceInfo, MessageId,
    MessagesSince, Reducer, Scope, ScopedBlob,
};
use alloy_runtime::StateStore;
use serde_json::Value;
use tracing::warn;

/// Holds the frozen [`ActivationContext`] and the process-singleton
/// [`StateStore`], producing a [`PluginInterface`] per plugin via
/// [`bind`](ContextFactory::bind).
///
/// Must not be shared across concurrently-running activations (spec §5:
/// "must not share a ContextFactory instance").
pub struct ContextFactory {
    context: ActivationContext,
    store: Arc<StateStore>,
    host: Arc<dyn ChatHost>,
}

impl ContextFactory {
    /// Creates a factory for one activation.
    pub fn new(context: ActivationContext, store: Arc<StateStore>, host: Arc<dyn ChatHost>) -> Self {
        Self {
            context,
            store,
            host,
        }
    }

    /// Replaces the frozen message-id snapshot between activations. Must
    /// never be called mid-build (spec §4.7 `updateMessageIds`).
    pub fn update_message_ids(&mut self, ordered_message_ids: Vec<MessageId>) {
        self.context = self.context.with_message_ids(ordered_message_ids);
    }

    /// Binds a plugin instance to this activation, producing its
    /// [`PluginInterface`].
    pub fn bind(
        &self,
        plugin_name: impl Into<String>,
        inheritance: Option<InheritanceInfo>,
        reducer: Option<Arc<dyn Reducer>>,
        plugin_config: Value,
        configured_scope: Scope,
    ) -> PluginInterface {
        PluginInterface {
            plugin_name: plugin_name.into(),
            channel_id: self.context.channel_id.clone(),
            current_message_id: self.context.current_message_id.clone(),
            context_message_ids: self.context.live_message_ids(),
            configured_scope,
            plugin_config,
            inheritance: inheritance.unwrap_or_else(|| self.context.inheritance.clone()),
            guild_id: self.context.guild_id.clone(),
            bot_name: self.context.bot_name.clone(),
            reducer,
            store: self.store.clone(),
            host: self.host.clone(),
            context: self.context.clone(),
        }
    }
}

/// The narrow contract a plugin author writes against (spec §6).
pub struct PluginInterface {
    plugin_name: String,
    channel_id: ChannelId,
    current_message_id: MessageId,
    context_message_ids: HashSet<MessageId>,
    configured_scope: Scope,
    plugin_config: Value,
    inheritance: InheritanceInfo,
    guild_id: Option<String>,
    bot_name: Option<String>,
    reducer: Option<Arc<dyn Reducer>>,
    store: Arc<StateStore>,
    host: Arc<dyn ChatHost>,
    context: ActivationContext,
}

impl PluginInterface {
    /// Channel this activation is bound to.
    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// The message id that triggered this activation.
    pub fn current_message_id(&self) -> &MessageId {
        &self.current_message_id
    }

    /// Read-only set of message ids currently live in this activation.
    pub fn context_message_ids(&self) -> &HashSet<MessageId> {
        &self.context_message_ids
    }

    /// The scope this plugin was configured with (`pluginConfig.state_scope`,
    /// default `channel`).
    pub fn configured_scope(&self) -> Scope {
        self.configured_scope
    }

    /// This plugin's raw configuration section.
    pub fn plugin_config(&self) -> &Value {
        &self.plugin_config
    }

    /// Inheritance hints bound to this activation.
    pub fn inheritance(&self) -> &InheritanceInfo {
        &self.inheritance
    }

    /// Opaque guild/server identifier passed through from the host.
    pub fn guild_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }

    /// Opaque bot display name passed through from the host.
    pub fn bot_name(&self) -> Option<&str> {
        self.bot_name.as_deref()
    }

    /// `n - 1 - pos(id)`, or infinite if `id` is absent (spec §4.7).
    pub fn messages_since_id(&self, id: Option<&MessageId>) -> MessagesSince {
        self.context.messages_since(id)
    }

    /// `getState(scope)` bound to this channel and plugin (spec §4.7).
    ///
    /// Read failures (`IoFailure`, `CorruptData`) are tolerated: logged as a
    /// warning and returned as `None`, per spec §7's propagation policy. An
    /// epic-scope read with no bound reducer logs a warning and falls back
    /// to channel semantics (spec §4.7), rather than failing outright.
    pub async fn get_state(&self, scope: Scope) -> Option<ScopedBlob> {
        match scope {
            Scope::Global => self.get_global().await,
            Scope::Channel => self.get_channel().await,
            Scope::Epic => {
                if self.reducer.is_none() {
                    warn!(
                        plugin = %self.plugin_name,
                        "epic read has no bound reducer; falling back to channel semantics"
                    );
                    return self.get_channel().await;
                }
                self.get_epic(None).await
            }
        }
    }

    /// `getStateAtMessage(id)` (spec §4.7): replay up to `id` using the
    /// frozen live-message set. Requires a reducer; logs a warning and
    /// returns `None` otherwise.
    pub async fn get_state_at_message(&self, id: &MessageId) -> Option<ScopedBlob> {
        if self.reducer.is_none() {
            warn!(
                plugin = %self.plugin_name,
                "getStateAtMessage requires a reducer; returning no state"
            );
            return None;
        }
        self.get_epic(Some(id)).await
    }

    async fn get_global(&self) -> Option<ScopedBlob> {
        let plugin = self.plugin_id();
        match self.store.get_global(&plugin).await {
            Ok(blob) => blob,
            Err(err) => {
                warn!(plugin = %self.plugin_name, error = %err, "getState(global) failed");
                None
            }
        }
    }

    async fn get_channel(&self) -> Option<ScopedBlob> {
        let plugin = self.plugin_id();
        match self
            .store
            .get_channel(&plugin, &self.channel_id, Some(&self.inheritance))
            .await
        {
            Ok((blob, _metadata)) => blob,
            Err(err) => {
                warn!(plugin = %self.plugin_name, error = %err, "getState(channel) failed");
                None
            }
        }
    }

    async fn get_epic(&self, upto: Option<&MessageId>) -> Option<ScopedBlob> {
        let reducer = self.reducer.as_ref()?;
        let plugin = self.plugin_id();
        let log = match self.store.get_events(&plugin, &self.channel_id).await {
            Ok(log) => log,
            Err(err) => {
                warn!(plugin = %self.plugin_name, error = %err, "getState(epic) failed");
                return None;
            }
        };
        alloy_runtime::replay::replay(&log, upto, Some(&self.context_message_ids), reducer.as_ref())
    }

    /// `setState(scope, v)` bound to this channel and plugin (spec §4.7).
    /// Write failures propagate, per spec §7 ("writes never silently
    /// drop").
    pub async fn set_state(&self, scope: Scope, value: ScopedBlob) -> Result<(), CoreError> {
        let plugin = self.plugin_id();
        match scope {
            Scope::Global => self
                .store
                .set_global(&plugin, value)
                .await
                .map_err(|e| io_failure(&e)),
            Scope::Channel => self
                .store
                .set_channel(
                    &plugin,
                    &self.channel_id,
                    value,
                    Some(self.current_message_id.clone()),
                )
                .await
                .map_err(|e| io_failure(&e)),
            Scope::Epic => {
                let event = alloy_core::StateEvent {
                    message_id: self.current_message_id.clone(),
                    timestamp: now_rfc3339(),
                    delta: value,
                };
                self.store
                    .append_or_replace_event(&plugin, &self.channel_id, event)
                    .await
                    .map_err(|e| io_failure(&e))
            }
        }
    }

    /// Sends `content` to this activation's channel, passed through to the
    /// host untouched (spec §6).
    pub async fn send_message(&self, content: &str) -> Result<Vec<MessageId>, HostError> {
        self.host.send_message(&self.channel_id, content).await
    }

    /// Pins `message` in this activation's channel.
    pub async fn pin_message(&self, message: &MessageId) -> Result<(), HostError> {
        self.host.pin_message(&self.channel_id, message).await
    }

    fn plugin_id(&self) -> alloy_core::PluginId {
        // Validated once at registry build time; the plugin name is a
        // config-section key and is re-checked here defensively.
        alloy_core::PluginId::new(self.plugin_name.clone())
            .expect("plugin name was already validated at registration")
    }
}

fn io_failure(err: &alloy_runtime::RuntimeError) -> CoreError {
    match err {
        alloy_runtime::RuntimeError::Core(core_err) => core_err.clone(),
        alloy_runtime::RuntimeError::Io { path, .. } => CoreError::IoFailure {
            path: path.display().to_string(),
            reason: err.to_string(),
        },
        alloy_runtime::RuntimeError::CorruptState { path, reason } => CoreError::CorruptData {
            path: path.display().to_string(),
            reason: reason.clone(),
        },
        other => CoreError::IoFailure {
            path: String::new(),
            reason: other.to_string(),
        },
    }
}

/// Epoch-seconds timestamp for a newly appended epic event. Informational
/// only (spec §4.3: "the timestamp field is informational"); ordering is by
/// `message_id`, never by this value.
fn now_rfc3339() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    secs.to_string()
}
