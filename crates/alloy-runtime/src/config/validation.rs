//! Configuration validation utilities.

use std::collections::HashSet;

use super::error::{ConfigError, ConfigResult};
use super::schema::AlloyRuntimeConfig;

/// Validates the entire configuration.
///
/// Duplicate `enabled_plugins` entries and plugin-id path-unsafety are
/// caught here rather than left to `PluginRegistry::build` so config errors
/// surface at load time with file/line-adjacent context.
pub fn validate_config(config: &AlloyRuntimeConfig) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for name in &config.enabled_plugins {
        if name.is_empty() {
            return Err(ConfigError::validation("enabled_plugins entry is empty"));
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::validation(format!(
                "duplicate entry in enabled_plugins: {name}"
            )));
        }
    }

    for name in config.plugin_config.keys() {
        if name.contains('/') || name.contains('\\') {
            return Err(ConfigError::validation(format!(
                "plugin_config key '{name}' is not a valid plugin short name"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_enabled_plugins() {
        let cfg = AlloyRuntimeConfig {
            enabled_plugins: vec!["notes".into(), "notes".into()],
            ..Default::default()
        };
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn accepts_empty_config() {
        assert!(validate_config(&AlloyRuntimeConfig::default()).is_ok());
    }
}
