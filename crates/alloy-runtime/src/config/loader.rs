//! Configuration file loader.

use super::error::{ConfigError, ConfigResult};
use super::schema::AlloyRuntimeConfig;
use super::validation::validate_config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration loader with support for multiple search paths.
pub struct ConfigLoader {
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Creates a new configuration loader with no search paths.
    pub fn new() -> Self {
        Self {
            search_paths: Vec::new(),
        }
    }

    /// Adds a search path for configuration files.
    pub fn add_search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds the current directory to search paths.
    pub fn with_current_dir(self) -> Self {
        if let Ok(cwd) = std::env::current_dir() {
            self.add_search_path(cwd)
        } else {
            self
        }
    }

    /// Loads configuration from the first available source, or defaults if
    /// none is found.
    pub fn load(&self) -> ConfigResult<AlloyRuntimeConfig> {
        if let Some(path) = self.find_config_file() {
            return self.load_from_file(&path);
        }
        info!("No configuration file found, using defaults");
        Ok(AlloyRuntimeConfig::default())
    }

    /// Loads configuration from a specific file.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<AlloyRuntimeConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = self.parse_yaml(&content)?;

        validate_config(&config)?;

        debug!(
            "Configuration loaded with {} enabled plugin(s)",
            config.enabled_plugins.len()
        );
        Ok(config)
    }

    /// Loads configuration from a YAML string.
    pub fn load_from_str(&self, yaml: &str) -> ConfigResult<AlloyRuntimeConfig> {
        let config = self.parse_yaml(yaml)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Finds the first available configuration file.
    fn find_config_file(&self) -> Option<PathBuf> {
        const CONFIG_NAMES: &[&str] = &["alloy.yaml", "alloy.yml", ".alloy.yaml", ".alloy.yml"];

        for search_path in &self.search_paths {
            for name in CONFIG_NAMES {
                let path = search_path.join(name);
                debug!("Checking for config file: {}", path.display());
                if path.exists() {
                    info!("Found configuration file: {}", path.display());
                    return Some(path);
                }
            }
        }

        None
    }

    /// Parses YAML content after expanding environment variable references.
    fn parse_yaml(&self, content: &str) -> ConfigResult<AlloyRuntimeConfig> {
        let expanded = expand_env_vars(content);
        serde_yaml::from_str(&expanded).map_err(ConfigError::from)
    }
}

/// Expands environment variables in the format `${VAR_NAME}` or
/// `${VAR_NAME:-default}`.
fn expand_env_vars(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        let Some(end_rel) = rest[start..].find('}') else {
            result.push_str(rest);
            return result;
        };
        let end = start + end_rel;
        result.push_str(&rest[..start]);

        let inner = &rest[start + 2..end];
        let (var_name, default_value) = match inner.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (inner, None),
        };

        let value = std::env::var(var_name)
            .ok()
            .or_else(|| default_value.map(String::from))
            .unwrap_or_default();
        result.push_str(&value);

        rest = &rest[end + 1..];
    }
    result.push_str(rest);
    result
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().with_current_dir()
    }
}

/// Convenience function to load configuration with default search paths.
pub fn load_config() -> ConfigResult<AlloyRuntimeConfig> {
    ConfigLoader::default().load()
}

/// Convenience function to load configuration from a specific file.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<AlloyRuntimeConfig> {
    ConfigLoader::new().load_from_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_yaml() {
        let loader = ConfigLoader::new();
        let config = loader.load_from_str("").unwrap();
        assert!(config.enabled_plugins.is_empty());
    }

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
cache_dir: "./bot_data"
enabled_plugins: [notes, inject]
"#;
        let loader = ConfigLoader::new();
        let config = loader.load_from_str(yaml).unwrap();
        assert_eq!(config.enabled_plugins, vec!["notes", "inject"]);
        assert_eq!(config.cache_dir, PathBuf::from("./bot_data"));
    }

    #[test]
    fn env_var_expansion() {
        // SAFETY: test runs single-threaded within this process.
        unsafe { std::env::set_var("ALLOY_TEST_DIR", "/tmp/alloy-test") };
        let yaml = "cache_dir: \"${ALLOY_TEST_DIR}\"\n";
        let config = ConfigLoader::new().load_from_str(yaml).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/alloy-test"));
        unsafe { std::env::remove_var("ALLOY_TEST_DIR") };
    }

    #[test]
    fn env_var_default_value() {
        let yaml = "cache_dir: \"${ALLOY_NONEXISTENT:-./fallback}\"\n";
        let config = ConfigLoader::new().load_from_str(yaml).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("./fallback"));
    }

    #[test]
    fn rejects_duplicate_plugin_names() {
        let yaml = "enabled_plugins: [notes, notes]\n";
        assert!(ConfigLoader::new().load_from_str(yaml).is_err());
    }
}
