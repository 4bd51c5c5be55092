//! # Alloy Framework
//!
//! The in-memory half of the Alloy plugin runtime: the pieces that turn
//! persisted state (`alloy-runtime`) and opaque data types (`alloy-core`)
//! into a live activation.
//!
//! - [`depth`] — Depth Calculator (component E): the aging rule for
//!   dynamic injections.
//! - [`placer`] — Injection Placer (component F): dedup/sort/insert of
//!   fragments into a transcript, plus transcript rendering.
//! - [`plugin`] — the live [`plugin::Plugin`] trait, [`plugin::PluginDescriptor`],
//!   and the Plugin Registry (component G).
//! - [`factory`] — Context Factory (component H): binds a plugin instance
//!   to one activation.
//! - [`dispatcher`] — Tool Dispatcher (component I): schema-validated
//!   tool-call routing.
//! - [`schema`] — the minimal JSON-schema-shaped input validator used by
//!   the dispatcher and plugin registry.

pub mod depth;
pub mod dispatcher;
pub mod factory;
pub mod placer;
pub mod plugin;
pub mod schema;

pub use dispatcher::ToolDispatcher;
pub use factory::{ContextFactory, PluginInterface};
pub use placer::{PreparedInjection, place, render_entry};
pub use plugin::{Plugin, PluginDescriptor, PluginRegistry, ToolDescriptor};
