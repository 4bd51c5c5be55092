//! The narrow host contract: `sendMessage`/`pinMessage`, passed through to
//! plugins untouched (spec §6).
//!
//! The core never implements this trait — the host chat-platform client
//! does, and is treated purely as an external collaborator (spec §1).

use async_trait::async_trait;
use thiserror::Error;

use crate::ids::{ChannelId, MessageId};

/// Opaque failure from the host's chat-platform client.
///
/// The core does not interpret the reason; it only propagates it to the
/// plugin that made the call.
#[derive(Debug, Clone, Error)]
#[error("host error: {0}")]
pub struct HostError(pub String);

/// Narrow contract a host chat application implements so plugins can send
/// and pin messages without the core depending on any transport.
#[async_trait]
pub trait ChatHost: Send + Sync {
    /// Sends `content` to `channel`, returning the id(s) of the sent
    /// message(s).
    async fn send_message(
        &self,
        channel: &ChannelId,
        content: &str,
    ) -> Result<Vec<MessageId>, HostError>;

    /// Pins `message` in `channel`.
    async fn pin_message(&self, channel: &ChannelId, message: &MessageId) -> Result<(), HostError>;
}
