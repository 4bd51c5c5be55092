//! Plugin system for the Alloy plugin runtime.
//!
//! A [`Plugin`] is a live trait object exposing tools, optional dynamic
//! context injections, and an optional tool-execution hook. A
//! [`PluginDescriptor`] is the static, `Copy` handle the host links in;
//! [`PluginRegistry::build`] turns a list of descriptors plus
//! `enabledPlugins` into instantiated, validated plugins.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use alloy_framework::plugin::{Plugin, PluginDescriptor, ToolDescriptor};
//!
//! struct Notes;
//!
//! #[async_trait::async_trait]
//! impl Plugin for Notes {
//!     fn name(&self) -> &str { "notes" }
//!     fn tools(&self) -> &[ToolDescriptor] { &[] }
//!     async fn call_tool(&self, _: &str, input: serde_json::Value, iface: &alloy_framework::factory::PluginInterface)
//!         -> Result<serde_json::Value, alloy_core::CoreError> {
//!         Ok(input)
//!     }
//! }
//!
//! pub static NOTES: PluginDescriptor = PluginDescriptor {
//!     name: "notes",
//!     create: || Arc::new(Notes),
//! };
//! ```

pub mod core;
pub mod descriptor;
pub mod registry;

pub mod builtin;

pub use core::{Plugin, ToolDescriptor};
pub use descriptor::PluginDescriptor;
pub use registry::PluginRegistry;
