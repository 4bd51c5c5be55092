//! [`ActivationContext`] — the per-activation frozen snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::ids::{ChannelId, MessageId};

/// One-hop inheritance hints for a channel (spec §4.2).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InheritanceInfo {
    /// Parent channel whose channel-scope state this channel inherits from.
    pub parent_channel_id: Option<ChannelId>,
    /// History-origin channel, checked before `parent_channel_id` (spec §4.2
    /// step 1 takes priority over step 2).
    pub history_origin_channel_id: Option<ChannelId>,
}

/// Immutable snapshot bound to one activation: the ordered message-id
/// sequence, channel/current-message identity, and inheritance hints.
///
/// Does not change during one build of injections (spec §3); refreshed
/// between activations via [`ActivationContext::with_message_ids`].
#[derive(Debug, Clone)]
pub struct ActivationContext {
    /// Oldest-to-newest ordered message ids visible to this activation.
    ordered_message_ids: Arc<Vec<MessageId>>,
    /// `message_id -> index` lookup, derived once from `ordered_message_ids`.
    position: Arc<HashMap<MessageId, usize>>,
    /// Channel this activation is bound to.
    pub channel_id: ChannelId,
    /// The message id that triggered this activation.
    pub current_message_id: MessageId,
    /// Inheritance hints for `channel_id`.
    pub inheritance: InheritanceInfo,
    /// Opaque per-plugin configuration section, keyed by plugin short name.
    pub plugin_config: Arc<HashMap<String, Value>>,
    /// Opaque guild/server identifier passed through from the host.
    pub guild_id: Option<String>,
    /// Opaque bot display name passed through from the host.
    pub bot_name: Option<String>,
}

impl ActivationContext {
    /// Builds a new activation snapshot.
    pub fn new(
        ordered_message_ids: Vec<MessageId>,
        channel_id: ChannelId,
        current_message_id: MessageId,
        inheritance: InheritanceInfo,
        plugin_config: HashMap<String, Value>,
    ) -> Self {
        let position = ordered_message_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();
        Self {
            ordered_message_ids: Arc::new(ordered_message_ids),
            position: Arc::new(position),
            channel_id,
            current_message_id,
            inheritance,
            plugin_config: Arc::new(plugin_config),
            guild_id: None,
            bot_name: None,
        }
    }

    /// Attaches the opaque guild id and bot display name.
    pub fn with_host_identity(mut self, guild_id: Option<String>, bot_name: Option<String>) -> Self {
        self.guild_id = guild_id;
        self.bot_name = bot_name;
        self
    }

    /// The frozen, oldest-to-newest ordered message id sequence.
    pub fn ordered_message_ids(&self) -> &[MessageId] {
        &self.ordered_message_ids
    }

    /// The set of message ids currently live in this activation's context,
    /// used to filter epic replay (spec §4.3 step 3).
    pub fn live_message_ids(&self) -> std::collections::HashSet<MessageId> {
        self.ordered_message_ids.iter().cloned().collect()
    }

    /// Returns the zero-based position of `id` in the ordered sequence, if
    /// present.
    pub fn position_of(&self, id: &MessageId) -> Option<usize> {
        self.position.get(id).copied()
    }

    /// The number of messages in the frozen snapshot.
    pub fn len(&self) -> usize {
        self.ordered_message_ids.len()
    }

    /// Whether the frozen snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.ordered_message_ids.is_empty()
    }

    /// `n - 1 - pos(id)`, or `+∞` if `id` is absent or `None` (spec §4.7).
    pub fn messages_since(&self, id: Option<&MessageId>) -> MessagesSince {
        match id.and_then(|id| self.position_of(id)) {
            Some(pos) => MessagesSince::Count(self.len() - 1 - pos),
            None => MessagesSince::Infinite,
        }
    }

    /// Returns a copy of this context with the frozen message-id snapshot
    /// replaced. Must only be called between activations, never mid-build
    /// (spec §4.7: `updateMessageIds`).
    pub fn with_message_ids(&self, ordered_message_ids: Vec<MessageId>) -> Self {
        Self::new(
            ordered_message_ids,
            self.channel_id.clone(),
            self.current_message_id.clone(),
            self.inheritance.clone(),
            (*self.plugin_config).clone(),
        )
        .with_host_identity(self.guild_id.clone(), self.bot_name.clone())
    }
}

/// Result of [`ActivationContext::messages_since`] — a plain integer would
/// force an awkward sentinel; this makes "infinite" unrepresentable as a
/// valid count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagesSince {
    /// `id` was found at `len - 1 - pos` messages ago.
    Count(usize),
    /// `id` was absent from the frozen snapshot.
    Infinite,
}
