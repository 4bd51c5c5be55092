//! Runtime error types: state store, scope resolution, and replay.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the State Store, Scope Resolver, and Event Replayer.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Delegated from the core data model (bad identifiers, unknown plugin).
    #[error(transparent)]
    Core(#[from] alloy_core::CoreError),

    /// Reading or writing a state file on disk failed.
    #[error("I/O failure on {path}: {source}")]
    Io {
        /// Path of the file being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A state file exists but could not be deserialized.
    #[error("corrupt state file at {path}: {reason}")]
    CorruptState {
        /// Path of the offending file.
        path: PathBuf,
        /// Deserialization failure description.
        reason: String,
    },

}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

impl RuntimeError {
    /// Wraps a filesystem error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wraps a deserialization failure with the offending path.
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptState {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
