//! Unified error taxonomy for the Alloy plugin runtime.
//!
//! The runtime recognizes a single closed set of error kinds (see
//! [`CoreError`]) shared by the State Store, Scope Resolver, Event Replayer,
//! Injection Placer, and Tool Dispatcher. Unlike the legacy transport/adapter
//! split in earlier Alloy crates, these error kinds are not domain-partitioned
//! — the plugin runtime is small enough that one enum covers it.

use thiserror::Error;

/// Errors raised by the plugin runtime.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// A path component (plugin id, channel id) contained a path separator
    /// or a `..` segment.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A tool call, or plugin lookup, referenced a plugin short name that is
    /// not registered.
    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),

    /// Two descriptors were registered under the same short name.
    #[error("duplicate plugin: {0}")]
    DuplicatePlugin(String),

    /// A tool call referenced a tool name the plugin does not declare.
    #[error("unknown tool '{tool}' on plugin '{plugin}'")]
    UnknownTool {
        /// Plugin short name.
        plugin: String,
        /// Tool name that was not found.
        tool: String,
    },

    /// A tool call's input failed schema validation.
    #[error("invalid input for tool '{tool}' on plugin '{plugin}': {reason}")]
    InvalidInput {
        /// Plugin short name.
        plugin: String,
        /// Tool name.
        tool: String,
        /// Human-readable validation failure.
        reason: String,
    },

    /// A filesystem read or write failed.
    #[error("I/O failure at {path}: {reason}")]
    IoFailure {
        /// Path that failed.
        path: String,
        /// Underlying reason.
        reason: String,
    },

    /// On-disk data could not be parsed as the expected shape.
    #[error("corrupt data at {path}: {reason}")]
    CorruptData {
        /// Path that failed to parse.
        path: String,
        /// Underlying reason.
        reason: String,
    },

    /// A tool handler returned an error during execution.
    #[error("tool '{tool}' on plugin '{plugin}' failed: {reason}")]
    ToolExecutionError {
        /// Plugin short name.
        plugin: String,
        /// Tool name.
        tool: String,
        /// Underlying reason.
        reason: String,
    },

    /// An epic-scope operation was attempted without a reducer.
    #[error("epic scope operation on plugin '{0}' requires a reducer")]
    ReducerRequired(String),
}

/// Result type used throughout the plugin runtime.
pub type CoreResult<T> = Result<T, CoreError>;
