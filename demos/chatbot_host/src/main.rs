//! Chatbot Host Demo
//!
//! A minimal host that wires up every component of the Alloy plugin
//! runtime for one simulated activation: load configuration, build a
//! plugin registry, bind a [`ContextFactory`], dispatch a couple of tool
//! calls, collect dynamic injections, and place them into a transcript.
//!
//! # Running the Example
//!
//! ```bash
//! cargo run --package alloy-chatbot-host
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use alloy::prelude::*;
use alloy_core::TranscriptEntry;
use alloy_framework::dispatcher::ToolDispatcher;
use alloy_framework::placer::{self, PreparedInjection};
use alloy_framework::plugin::PluginRegistry;
use alloy_runtime::config::ConfigLoader;
use alloy_runtime::logging;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use tracing::info;

/// A [`ChatHost`] that prints to stdout instead of talking to a real
/// chat platform.
struct StdoutHost;

#[async_trait]
impl ChatHost for StdoutHost {
    async fn send_message(&self, channel: &ChannelId, content: &str) -> Result<Vec<MessageId>, HostError> {
        println!("[{channel}] bot: {content}");
        Ok(vec![MessageId::new("reply-1")])
    }

    async fn pin_message(&self, channel: &ChannelId, message: &MessageId) -> Result<(), HostError> {
        println!("[{channel}] pinned {message}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loads `alloy.yaml` from the current directory if present, otherwise
    // falls back to defaults.
    let mut config = ConfigLoader::default().load()?;
    if config.enabled_plugins.is_empty() {
        config.enabled_plugins = vec!["notes".to_string()];
    }
    logging::init_from_config(&config.logging);

    let store = Arc::new(StateStore::new(config.cache_dir.clone()));
    let available = [alloy_notes_plugin::NOTES];
    let registry = PluginRegistry::build(&available, &config.enabled_plugins).await?;
    info!(plugins = registry.len(), "registry built");

    let host: Arc<dyn ChatHost> = Arc::new(StdoutHost);
    let channel_id = ChannelId::new("demo-channel")?;

    // First activation: the user asks the bot to remember something.
    let message_ids = vec![MessageId::new("m1")];
    let context = ActivationContext::new(
        message_ids.clone(),
        channel_id.clone(),
        MessageId::new("m1"),
        InheritanceInfo::default(),
        HashMap::new(),
    );
    let factory = ContextFactory::new(context, store.clone(), host.clone());
    let scope = config.state_scope("notes");
    let iface = factory.bind(
        "notes",
        None,
        Some(alloy_notes_plugin::reducer()),
        config.plugin_section("notes"),
        scope,
    );

    let dispatcher = ToolDispatcher::new(&registry);
    dispatcher
        .dispatch("notes", "add_note", json!({"text": "pick up dry cleaning"}), &iface)
        .await?;
    let listed = dispatcher.dispatch("notes", "list_notes", json!({}), &iface).await?;
    info!(?listed, "notes after first activation");

    // Second activation: a later message in the same channel. Dynamic
    // injections surface the running note count near the end of the
    // transcript.
    let message_ids = vec![MessageId::new("m1"), MessageId::new("m2")];
    let context = ActivationContext::new(
        message_ids.clone(),
        channel_id.clone(),
        MessageId::new("m2"),
        InheritanceInfo::default(),
        HashMap::new(),
    );
    let factory = ContextFactory::new(context, store, host);
    let iface = factory.bind(
        "notes",
        None,
        Some(alloy_notes_plugin::reducer()),
        config.plugin_section("notes"),
        scope,
    );

    let plugin = registry.get("notes")?;
    let injections = plugin.provide_injections(&iface).await;
    let prepared: Vec<PreparedInjection> = injections
        .into_iter()
        .map(|injection| PreparedInjection::from_dynamic("notes", injection, &message_ids))
        .collect();

    let transcript = vec![
        TranscriptEntry::original("user: remember to pick up dry cleaning"),
        TranscriptEntry::original("user: what's on my list?"),
    ];
    let rendered = placer::place(transcript, prepared);
    for entry in &rendered {
        println!("{}", entry.content);
    }

    Ok(())
}
