//! Configuration schema for the Alloy plugin runtime (spec §6).
//!
//! ```yaml
//! cache_dir: "./bot_data"
//! enabled_plugins: [notes, inject]
//! plugin_config:
//!   notes:
//!     state_scope: channel
//!   inject:
//!     injections:
//!       - id: persona
//!         content: "You are a helpful assistant."
//!         depth: 0
//!         anchor: latest
//! logging:
//!   level: info
//!   format: pretty
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root configuration for the plugin runtime.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlloyRuntimeConfig {
    /// Base directory under which `plugins/{pluginId}/...` is rooted.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Short names of plugins to activate; unknown names fail at registry
    /// build time (spec §4.6).
    #[serde(default)]
    pub enabled_plugins: Vec<String>,

    /// Per-plugin configuration sections, keyed by plugin short name.
    #[serde(default)]
    pub plugin_config: HashMap<String, Value>,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".")
}

impl AlloyRuntimeConfig {
    /// Returns the raw config section for `plugin_name`, or an empty JSON
    /// object when absent.
    pub fn plugin_section(&self, plugin_name: &str) -> Value {
        self.plugin_config
            .get(plugin_name)
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()))
    }

    /// Extracts the `state_scope` for `plugin_name` (defaults to `channel`,
    /// spec §6).
    pub fn state_scope(&self, plugin_name: &str) -> alloy_core::Scope {
        self.plugin_config
            .get(plugin_name)
            .and_then(|v| v.get("state_scope"))
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    /// Extracts `plugin_name`'s configuration section into a strongly-typed
    /// `T`, the way an adapter would via `extract_adapter` in the teacher's
    /// config schema. Missing sections extract from an empty object, so `T`
    /// should derive `Default`-friendly `Deserialize` impls for its fields.
    pub fn extract_plugin_config<T: serde::de::DeserializeOwned>(
        &self,
        plugin_name: &str,
    ) -> Result<T, figment::Error> {
        let value = self.plugin_section(plugin_name);
        figment::Figment::from(figment::providers::Serialized::defaults(value)).extract()
    }
}

/// Logging configuration, carried from the teacher's `alloy-runtime`
/// ambient stack unchanged (spec expansion: "Ambient stack / Logging").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Module-specific log level overrides, e.g. `{ "alloy_runtime": "debug" }`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            filters: HashMap::new(),
        }
    }
}

/// Log level enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Converts to a filter directive string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for structured logging.
    Json,
}
