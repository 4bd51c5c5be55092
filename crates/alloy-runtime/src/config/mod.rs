//! Configuration module for Alloy runtime.
//!
//! This module provides YAML-based configuration loading and validation
//! for the plugin runtime: enabled plugins, per-plugin config sections,
//! cache directory, and logging.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, load_config, load_config_from_file};
pub use schema::{AlloyRuntimeConfig, LogFormat, LogLevel, LoggingConfig};
pub use validation::validate_config;
