//! State Store (component B): the process-singleton cache+disk layer.
//!
//! One [`StateStore`] per `cacheDir`. Per-plugin caches are held behind
//! `tokio::sync::RwLock`, mirroring the teacher's per-domain
//! `AsyncRwLock<HashMap<...>>` cache pattern.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use alloy_core::{
    ChannelId, ChannelMetadata, ChannelState, EventLog, InheritanceInfo, MessageId, PluginId,
    ScopedBlob, StateEvent, append_or_replace,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::RuntimeResult;
use crate::{atomic, paths, resolver};

#[derive(Default)]
struct PluginCache {
    global: Option<ScopedBlob>,
    channels: HashMap<ChannelId, ChannelState>,
    events: HashMap<ChannelId, EventLog>,
}

/// Cache+disk layer for plugin state. Safe to share across activations via
/// `Arc<StateStore>`; internal locking is per plugin, not global.
pub struct StateStore {
    cache_dir: PathBuf,
    caches: RwLock<HashMap<PluginId, Arc<RwLock<PluginCache>>>>,
}

impl StateStore {
    /// Creates a store rooted at `cache_dir`. Does not touch the filesystem
    /// until the first read or write.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            caches: RwLock::new(HashMap::new()),
        }
    }

    async fn plugin_cache(&self, plugin: &PluginId) -> Arc<RwLock<PluginCache>> {
        if let Some(cache) = self.caches.read().await.get(plugin) {
            return cache.clone();
        }
        let mut caches = self.caches.write().await;
        caches
            .entry(plugin.clone())
            .or_insert_with(|| Arc::new(RwLock::new(PluginCache::default())))
            .clone()
    }

    /// `getGlobal(pluginId) -> Blob|null` (spec §4.2).
    pub async fn get_global(&self, plugin: &PluginId) -> RuntimeResult<Option<ScopedBlob>> {
        let cache = self.plugin_cache(plugin).await;
        {
            let read = cache.read().await;
            if let Some(blob) = &read.global {
                return Ok(Some(blob.clone()));
            }
        }

        let path = paths::global_path(&self.cache_dir, plugin);
        let loaded: Option<ScopedBlob> = atomic::read_json(&path).await?;
        if let Some(blob) = &loaded {
            cache.write().await.global = Some(blob.clone());
        }
        Ok(loaded)
    }

    /// `setGlobal(pluginId, blob)` (spec §4.2).
    pub async fn set_global(&self, plugin: &PluginId, blob: ScopedBlob) -> RuntimeResult<()> {
        let path = paths::global_path(&self.cache_dir, plugin);
        atomic::write_json(&path, &blob).await?;
        self.plugin_cache(plugin).await.write().await.global = Some(blob);
        Ok(())
    }

    /// `getChannel(pluginId, channelId, inheritance?) -> (blob, metadata)`
    /// (spec §4.2). A miss falls through to the Scope Resolver using
    /// already-loaded parent state; parents are never mutated.
    pub async fn get_channel(
        &self,
        plugin: &PluginId,
        channel: &ChannelId,
        inheritance: Option<&InheritanceInfo>,
    ) -> RuntimeResult<(Option<ScopedBlob>, ChannelMetadata)> {
        let cache = self.plugin_cache(plugin).await;
        if let Some(state) = cache.read().await.channels.get(channel) {
            return Ok((Some(state.state.clone()), state.metadata.clone()));
        }

        let path = paths::channel_path(&self.cache_dir, plugin, channel);
        if let Some(state) = atomic::read_json::<ChannelState>(&path).await? {
            cache
                .write()
                .await
                .channels
                .insert(channel.clone(), state.clone());
            return Ok((Some(state.state), state.metadata));
        }

        let Some(inheritance) = inheritance else {
            return Ok((None, ChannelMetadata::empty()));
        };

        let history_origin_state = match &inheritance.history_origin_channel_id {
            Some(id) => self.load_channel_state(&cache, plugin, id).await?,
            None => None,
        };
        let parent_state = match &inheritance.parent_channel_id {
            Some(id) => self.load_channel_state(&cache, plugin, id).await?,
            None => None,
        };

        let (blob, metadata) = resolver::resolve_inheritance(
            inheritance,
            history_origin_state.as_ref(),
            parent_state.as_ref(),
        );
        Ok((blob, metadata))
    }

    /// Loads a candidate parent's channel state via the cache/disk path,
    /// without recursing into its own inheritance (spec §9: one-hop only).
    async fn load_channel_state(
        &self,
        cache: &Arc<RwLock<PluginCache>>,
        plugin: &PluginId,
        channel: &ChannelId,
    ) -> RuntimeResult<Option<ChannelState>> {
        if let Some(state) = cache.read().await.channels.get(channel) {
            return Ok(Some(state.clone()));
        }
        let path = paths::channel_path(&self.cache_dir, plugin, channel);
        let loaded = atomic::read_json::<ChannelState>(&path).await?;
        if let Some(state) = &loaded {
            cache
                .write()
                .await
                .channels
                .insert(channel.clone(), state.clone());
        }
        Ok(loaded)
    }

    /// `setChannel(pluginId, channelId, blob, messageId?)` (spec §4.2).
    /// Writes the blob and metadata atomically; always creates a physical
    /// file for `channel`, severing any prior inheritance link.
    pub async fn set_channel(
        &self,
        plugin: &PluginId,
        channel: &ChannelId,
        blob: ScopedBlob,
        message_id: Option<MessageId>,
    ) -> RuntimeResult<()> {
        let state = ChannelState {
            state: blob,
            metadata: ChannelMetadata {
                last_modified_message_id: message_id,
                parent_channel_id: None,
                history_origin_channel_id: None,
            },
        };

        let path = paths::channel_path(&self.cache_dir, plugin, channel);
        atomic::write_json(&path, &state).await?;

        self.plugin_cache(plugin)
            .await
            .write()
            .await
            .channels
            .insert(channel.clone(), state);
        Ok(())
    }

    /// `getEvents(pluginId, channelId) -> EventLog` (spec §4.2).
    pub async fn get_events(&self, plugin: &PluginId, channel: &ChannelId) -> RuntimeResult<EventLog> {
        let cache = self.plugin_cache(plugin).await;
        if let Some(log) = cache.read().await.events.get(channel) {
            return Ok(log.clone());
        }

        let path = paths::epic_path(&self.cache_dir, plugin, channel);
        let log: EventLog = atomic::read_json(&path).await?.unwrap_or_default();
        cache
            .write()
            .await
            .events
            .insert(channel.clone(), log.clone());
        Ok(log)
    }

    /// `appendOrReplaceEvent(pluginId, channelId, event)` (spec §4.2).
    pub async fn append_or_replace_event(
        &self,
        plugin: &PluginId,
        channel: &ChannelId,
        event: StateEvent,
    ) -> RuntimeResult<()> {
        let mut log = self.get_events(plugin, channel).await?;
        append_or_replace(&mut log, event);

        let path = paths::epic_path(&self.cache_dir, plugin, channel);
        atomic::write_json(&path, &log).await?;

        self.plugin_cache(plugin)
            .await
            .write()
            .await
            .events
            .insert(channel.clone(), log);
        Ok(())
    }

    /// `forkEvents(pluginId, fromChannelId, toChannelId, uptoMessageId)`
    /// (spec §4.2/§4.3). Copies the filtered prefix into a new log on disk
    /// and in the cache; `from` is left untouched.
    pub async fn fork_events(
        &self,
        plugin: &PluginId,
        from_channel: &ChannelId,
        to_channel: &ChannelId,
        upto: &MessageId,
    ) -> RuntimeResult<()> {
        let parent_log = self.get_events(plugin, from_channel).await?;
        let forked = crate::replay::fork_events(&parent_log, upto);

        debug!(
            plugin = plugin.as_str(),
            from = from_channel.as_str(),
            to = to_channel.as_str(),
            events = forked.len(),
            "forked epic event log"
        );

        let path = paths::epic_path(&self.cache_dir, plugin, to_channel);
        atomic::write_json(&path, &forked).await?;

        self.plugin_cache(plugin)
            .await
            .write()
            .await
            .events
            .insert(to_channel.clone(), forked);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pid(s: &str) -> PluginId {
        PluginId::new(s).unwrap()
    }
    fn cid(s: &str) -> ChannelId {
        ChannelId::new(s).unwrap()
    }

    #[tokio::test]
    async fn global_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());
        let plugin = pid("notes");

        assert_eq!(store.get_global(&plugin).await.unwrap(), None);
        store.set_global(&plugin, json!({"n": 1})).await.unwrap();
        assert_eq!(
            store.get_global(&plugin).await.unwrap(),
            Some(json!({"n": 1}))
        );
    }

    #[tokio::test]
    async fn channel_inheritance_is_copy_by_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());
        let plugin = pid("notes");
        let parent = cid("parent");
        let child = cid("child");

        store
            .set_channel(&plugin, &parent, json!({"counter": 5}), Some(MessageId::new("m1")))
            .await
            .unwrap();

        let inheritance = InheritanceInfo {
            parent_channel_id: Some(parent.clone()),
            history_origin_channel_id: None,
        };
        let (blob, metadata) = store
            .get_channel(&plugin, &child, Some(&inheritance))
            .await
            .unwrap();
        assert_eq!(blob, Some(json!({"counter": 5})));
        assert_eq!(metadata.parent_channel_id, Some(parent.clone()));

        store
            .set_channel(&plugin, &child, json!({"counter": 6}), Some(MessageId::new("m2")))
            .await
            .unwrap();

        let (parent_blob, _) = store.get_channel(&plugin, &parent, None).await.unwrap();
        assert_eq!(parent_blob, Some(json!({"counter": 5})));
    }

    #[tokio::test]
    async fn events_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = pid("notes");
        let channel = cid("c1");

        {
            let store = StateStore::new(dir.path());
            store
                .append_or_replace_event(
                    &plugin,
                    &channel,
                    StateEvent {
                        message_id: MessageId::new("m1"),
                        timestamp: "t".into(),
                        delta: json!(1),
                    },
                )
                .await
                .unwrap();
        }

        let store = StateStore::new(dir.path());
        let log = store.get_events(&plugin, &channel).await.unwrap();
        assert_eq!(log.len(), 1);
    }
}
