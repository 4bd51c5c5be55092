//! # Alloy
//!
//! A file-backed plugin runtime for conversational bots.
//!
//! Alloy lets small, independently authored extensions expose callable
//! *tools* an LLM can invoke, inject durable text fragments into LLM
//! context at computed positions, and persist per-plugin state under three
//! consistency models: unrewindable global, per-channel with one-hop
//! inheritance, and event-sourced with rollback and fork.
//!
//! This facade crate re-exports the three layers a host application wires
//! together:
//!
//! - [`alloy_core`] — the opaque data model (blobs, events, injections,
//!   identifiers) and the [`alloy_core::ChatHost`] contract a host
//!   implements.
//! - [`alloy_runtime`] — the disk-backed State Store, Scope Resolver,
//!   Event Replayer, configuration loader, and logging initializer.
//! - [`alloy_framework`] — the Depth Calculator, Injection Placer, Plugin
//!   Registry, Context Factory, and Tool Dispatcher.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use alloy::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = alloy_runtime::config::load_config()?;
//!     alloy_runtime::logging::init_from_config(&config.logging);
//!
//!     let store = Arc::new(StateStore::new(config.cache_dir.clone()));
//!     let registry = PluginRegistry::build(&[], &config.enabled_plugins).await?;
//!
//!     // ... build an ActivationContext per incoming message, bind()
//!     // plugins via a ContextFactory, and dispatch tool calls through
//!     // a ToolDispatcher.
//!     Ok(())
//! }
//! ```

pub use alloy_core;
pub use alloy_framework;
pub use alloy_runtime;

pub use alloy_core::{
    ActivationContext, Anchor, ChannelId, ChannelMetadata, ChannelState, ChatHost, ContextInjection,
    CoreError, CoreResult, EventLog, HostError, InheritanceInfo, InjectionConfig, InjectionContent,
    MessageId, MessagesSince, PluginId, Reducer, Scope, ScopedBlob, StateEvent, TranscriptEntry,
};
pub use alloy_framework::{
    ContextFactory, Plugin, PluginDescriptor, PluginInterface, PluginRegistry, PreparedInjection,
    ToolDescriptor, ToolDispatcher,
};
pub use alloy_runtime::{AlloyRuntimeConfig, StateStore};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use alloy::prelude::*;
/// ```
pub mod prelude {
    pub use alloy_core::{
        ActivationContext, Anchor, ChannelId, ChatHost, ContextInjection, CoreError, HostError,
        InheritanceInfo, InjectionConfig, MessageId, PluginId, Reducer, Scope, ScopedBlob,
    };
    pub use alloy_framework::{
        ContextFactory, Plugin, PluginDescriptor, PluginInterface, PluginRegistry, ToolDescriptor,
        ToolDispatcher,
    };
    pub use alloy_runtime::StateStore;
}
