//! # Alloy Core
//!
//! Core data model and error taxonomy for the Alloy plugin runtime.
//!
//! This crate is deliberately inert: it defines the opaque blob/event/
//! injection shapes shared by `alloy-runtime` (the State Store, Scope
//! Resolver, and Event Replayer) and `alloy-framework` (the Depth
//! Calculator, Injection Placer, Context Factory, and Tool Dispatcher), plus
//! the [`host::ChatHost`] contract a hosting application implements. It does
//! no I/O and depends on neither `tokio` nor a transport stack.

pub mod blob;
pub mod context;
pub mod error;
pub mod event;
pub mod host;
pub mod ids;
pub mod injection;
pub mod reducer;
pub mod scope;

pub use blob::{ChannelMetadata, ChannelState, ScopedBlob};
pub use context::{ActivationContext, InheritanceInfo, MessagesSince};
pub use error::{CoreError, CoreResult};
pub use event::{EventLog, StateEvent, append_or_replace};
pub use host::{ChatHost, HostError};
pub use ids::{ChannelId, MessageId, PluginId};
pub use injection::{Anchor, ContextInjection, InjectionConfig, InjectionContent, TranscriptEntry};
pub use reducer::Reducer;
pub use scope::Scope;

/// Prelude for common imports.
pub mod prelude {
    pub use super::blob::{ChannelMetadata, ChannelState, ScopedBlob};
    pub use super::context::{ActivationContext, InheritanceInfo, MessagesSince};
    pub use super::error::{CoreError, CoreResult};
    pub use super::event::{EventLog, StateEvent};
    pub use super::host::{ChatHost, HostError};
    pub use super::ids::{ChannelId, MessageId, PluginId};
    pub use super::injection::{Anchor, ContextInjection, InjectionConfig, InjectionContent};
    pub use super::reducer::Reducer;
    pub use super::scope::Scope;
}
