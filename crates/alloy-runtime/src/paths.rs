//! Path Mapper (component A): `(cacheDir, pluginId, scope, channelId?) →
//! PathBuf`, pure and I/O-free.

use std::path::{Path, PathBuf};

use alloy_core::{ChannelId, CoreError, CoreResult, PluginId, Scope};

/// Path to a plugin's global-scope state file.
///
/// `{cacheDir}/plugins/{pluginId}/global.json`
pub fn global_path(cache_dir: &Path, plugin: &PluginId) -> PathBuf {
    plugin_root(cache_dir, plugin).join("global.json")
}

/// Path to a plugin's channel-scope state file for `channel`.
///
/// `{cacheDir}/plugins/{pluginId}/channel/{channelId}.json`
pub fn channel_path(cache_dir: &Path, plugin: &PluginId, channel: &ChannelId) -> PathBuf {
    plugin_root(cache_dir, plugin)
        .join("channel")
        .join(format!("{channel}.json"))
}

/// Path to a plugin's epic-scope event log for `channel`.
///
/// `{cacheDir}/plugins/{pluginId}/epic/{channelId}.json`
pub fn epic_path(cache_dir: &Path, plugin: &PluginId, channel: &ChannelId) -> PathBuf {
    plugin_root(cache_dir, plugin)
        .join("epic")
        .join(format!("{channel}.json"))
}

/// Dispatches on `scope` to the matching path function. `channel` is
/// required for `Scope::Channel` and `Scope::Epic`.
pub fn resolve(
    cache_dir: &Path,
    plugin: &PluginId,
    scope: Scope,
    channel: Option<&ChannelId>,
) -> CoreResult<PathBuf> {
    match scope {
        Scope::Global => Ok(global_path(cache_dir, plugin)),
        Scope::Channel => {
            let channel = channel.ok_or_else(|| {
                CoreError::InvalidIdentifier("channel scope requires a channelId".into())
            })?;
            Ok(channel_path(cache_dir, plugin, channel))
        }
        Scope::Epic => {
            let channel = channel.ok_or_else(|| {
                CoreError::InvalidIdentifier("epic scope requires a channelId".into())
            })?;
            Ok(epic_path(cache_dir, plugin, channel))
        }
    }
}

fn plugin_root(cache_dir: &Path, plugin: &PluginId) -> PathBuf {
    cache_dir.join("plugins").join(plugin.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PluginId {
        PluginId::new(s).unwrap()
    }
    fn cid(s: &str) -> ChannelId {
        ChannelId::new(s).unwrap()
    }

    #[test]
    fn global_layout() {
        let p = global_path(Path::new("/data"), &pid("notes"));
        assert_eq!(p, PathBuf::from("/data/plugins/notes/global.json"));
    }

    #[test]
    fn channel_layout() {
        let p = channel_path(Path::new("/data"), &pid("notes"), &cid("c1"));
        assert_eq!(p, PathBuf::from("/data/plugins/notes/channel/c1.json"));
    }

    #[test]
    fn epic_layout() {
        let p = epic_path(Path::new("/data"), &pid("notes"), &cid("c1"));
        assert_eq!(p, PathBuf::from("/data/plugins/notes/epic/c1.json"));
    }

    #[test]
    fn resolve_requires_channel_for_non_global() {
        assert!(resolve(Path::new("/data"), &pid("notes"), Scope::Channel, None).is_err());
        assert!(resolve(Path::new("/data"), &pid("notes"), Scope::Global, None).is_ok());
    }
}
