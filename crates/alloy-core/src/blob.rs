//! Opaque state blobs and channel-scope metadata.
//!
//! The core never interprets blob contents (spec §9): a blob is modeled as a
//! bare [`serde_json::Value`], encoded/decoded entirely on the plugin side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ChannelId, MessageId};

/// An opaque value stored under `global` or `channel` scope.
pub type ScopedBlob = Value;

/// Ancestry and freshness metadata stored alongside a channel-scoped blob.
///
/// Written atomically with its blob (spec §3: "a reader either sees both or
/// neither").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelMetadata {
    /// Message id at which this state was last modified, if any.
    #[serde(rename = "lastModifiedMessageId")]
    pub last_modified_message_id: Option<MessageId>,

    /// Set when this channel's state was copied from a parent via
    /// `parentChannelId` inheritance.
    #[serde(rename = "parentChannelId", skip_serializing_if = "Option::is_none")]
    pub parent_channel_id: Option<ChannelId>,

    /// Set when this channel's state was copied from a history-origin parent.
    #[serde(
        rename = "historyOriginChannelId",
        skip_serializing_if = "Option::is_none"
    )]
    pub history_origin_channel_id: Option<ChannelId>,
}

impl ChannelMetadata {
    /// Metadata for state with no known last-modification point and no
    /// inherited ancestry — the "not found, not inherited" case of spec
    /// §4.2 step 3.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A channel-scoped blob paired with its metadata, as read from or written
/// to `{cacheDir}/plugins/{pluginId}/channel/{channelId}.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelState {
    /// The plugin's opaque state.
    pub state: ScopedBlob,
    /// Ancestry/freshness metadata.
    pub metadata: ChannelMetadata,
}
