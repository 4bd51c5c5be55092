//! Identifier newtypes with path-safety validation.
//!
//! Plugin ids and channel ids are used as filesystem path components (see
//! `alloy-runtime::paths`); both reject separators and `..` segments at
//! construction so an invalid identifier fails fast with
//! [`CoreError::InvalidIdentifier`] rather than surfacing as a confusing I/O
//! error later.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

fn validate(kind: &str, raw: &str) -> CoreResult<()> {
    if raw.is_empty()
        || raw.contains('/')
        || raw.contains('\\')
        || raw.split('/').any(|seg| seg == "..")
        || raw == ".."
    {
        return Err(CoreError::InvalidIdentifier(format!(
            "{kind} '{raw}' contains a path separator or '..' segment"
        )));
    }
    Ok(())
}

macro_rules! id_newtype {
    ($name:ident, $kind:literal) => {
        #[doc = concat!("A validated ", $kind, " identifier.")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Validates and wraps a raw identifier.
            pub fn new(raw: impl Into<String>) -> CoreResult<Self> {
                let raw = raw.into();
                validate($kind, &raw)?;
                Ok(Self(raw))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(raw: String) -> CoreResult<Self> {
                Self::new(raw)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            fn try_from(raw: &str) -> CoreResult<Self> {
                Self::new(raw)
            }
        }
    };
}

id_newtype!(PluginId, "plugin id");
id_newtype!(ChannelId, "channel id");

/// A chronologically-ordered message identifier.
///
/// Lexicographic comparison of `MessageId` values is assumed to match
/// temporal order — this is a producer contract the core does not verify
/// (see spec §3, §9: "the spec documents this as an input contract rather
/// than guessing at a broader policy").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps a raw message id. Message ids are not path components and are
    /// not subjected to the separator check applied to plugin/channel ids.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for MessageId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_separators() {
        assert!(PluginId::new("a/b").is_err());
        assert!(PluginId::new("a\\b").is_err());
        assert!(ChannelId::new("..").is_err());
        assert!(ChannelId::new("a/../b").is_err());
    }

    #[test]
    fn accepts_plain_names() {
        assert!(PluginId::new("notes").is_ok());
        assert!(ChannelId::new("channel-123").is_ok());
    }
}
