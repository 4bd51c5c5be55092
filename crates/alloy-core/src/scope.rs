//! [`Scope`] — the three state consistency models a plugin may opt into.

use serde::{Deserialize, Serialize};

/// The consistency model backing a plugin's persisted state.
///
/// See spec §4.2 (global/channel) and §4.3 (epic) for the semantics of each
/// variant; they are fundamentally different and not interchangeable at
/// runtime without an explicit migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// A single unrewindable blob shared across all channels.
    Global,
    /// Per-channel state with one-hop read-only inheritance.
    Channel,
    /// Event-sourced per-channel state with rollback and fork.
    Epic,
}

impl Default for Scope {
    /// `state_scope` defaults to `channel` per spec §6.
    fn default() -> Self {
        Scope::Channel
    }
}
