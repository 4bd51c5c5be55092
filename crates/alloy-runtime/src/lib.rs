//! Alloy Runtime — the disk-backed half of the Alloy plugin runtime.
//!
//! This crate provides:
//! - Path policy for per-plugin state on disk (`paths`)
//! - The cache+disk State Store (`store`)
//! - One-hop channel inheritance resolution (`resolver`)
//! - Epic-scoped event replay and forking (`replay`)
//! - Atomic (temp-file + rename) writes (`atomic`)
//! - Configuration loading and validation (`config`)
//! - Logging initialization (`logging`)
//!
//! It has no knowledge of context injection, tool dispatch, or plugin
//! registration — those live in `alloy-framework`, which depends on this
//! crate for persistence.
//!
//! ```ignore
//! use alloy_runtime::{config::load_config, store::StateStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     alloy_runtime::logging::init_from_config(&config.logging);
//!
//!     let store = StateStore::new(config.cache_dir.clone());
//!     // ... hand `store` to a ContextFactory in alloy-framework
//!     Ok(())
//! }
//! ```

pub mod atomic;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod replay;
pub mod resolver;
pub mod store;

pub use config::{AlloyRuntimeConfig, ConfigError, ConfigLoader, ConfigResult};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use store::StateStore;

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
