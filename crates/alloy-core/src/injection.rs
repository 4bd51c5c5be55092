//! Context-injection data model: [`ContextInjection`], [`InjectionConfig`],
//! [`Anchor`], and the rendered [`TranscriptEntry`].

use serde::{Deserialize, Serialize};

use crate::ids::MessageId;

/// Where a fragment's depth is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Depth is measured from the newest message end.
    Latest,
    /// Depth is measured from the start of the transcript.
    Earliest,
}

impl Default for Anchor {
    /// `anchor` defaults to `latest` (spec §3, §6).
    fn default() -> Self {
        Anchor::Latest
    }
}

/// Rendered content for one transcript entry.
///
/// A plugin may submit either flat text or a list of structured content
/// blocks; both render inline per spec §6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InjectionContent {
    /// Plain text content.
    Text(String),
    /// A list of structured content blocks, rendered block-wise.
    Blocks(Vec<serde_json::Value>),
}

impl InjectionContent {
    /// Renders this content to a single string, inlining blocks.
    pub fn render(&self) -> String {
        match self {
            InjectionContent::Text(s) => s.clone(),
            InjectionContent::Blocks(blocks) => blocks
                .iter()
                .map(|b| match b.get("text").and_then(|v| v.as_str()) {
                    Some(s) => s.to_string(),
                    None => b.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// A dynamic context fragment authored by a plugin's injection provider.
///
/// Deduplicated with `InjectionConfig` entries by `(pluginId, id)`, last
/// submission wins (spec §3, §4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextInjection {
    /// Id, unique per plugin per context build.
    pub id: String,
    /// Rendered content.
    pub content: InjectionContent,
    /// Non-negative target depth this fragment ages toward.
    pub target_depth: u32,
    /// Message id this fragment was last modified at, if any.
    ///
    /// Absent means "settled" at `target_depth` (spec §3).
    pub last_modified_at: Option<MessageId>,
    /// Higher priority is inserted earlier at the same resolved index.
    pub priority: i32,
    /// Whether to render as a system entry (`System>[{pluginId}]: `) or a
    /// persona entry.
    pub as_system: bool,
}

impl ContextInjection {
    /// Creates an injection settled at `target_depth` with default priority
    /// and no system flag.
    pub fn new(id: impl Into<String>, content: impl Into<InjectionContent>, target_depth: u32) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            target_depth,
            last_modified_at: None,
            priority: 0,
            as_system: false,
        }
    }

    /// Sets the message id this fragment was last modified at.
    pub fn with_last_modified_at(mut self, id: MessageId) -> Self {
        self.last_modified_at = Some(id);
        self
    }

    /// Sets the insertion priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Marks this injection to render as a system entry.
    pub fn as_system(mut self) -> Self {
        self.as_system = true;
        self
    }
}

impl From<&str> for InjectionContent {
    fn from(s: &str) -> Self {
        InjectionContent::Text(s.to_string())
    }
}

impl From<String> for InjectionContent {
    fn from(s: String) -> Self {
        InjectionContent::Text(s)
    }
}

/// A statically configured injection, sourced from `pluginConfig` rather
/// than a plugin's runtime provider (spec §3, §6 — the `inject` plugin's
/// configuration surface).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionConfig {
    /// Id, shares the dedup namespace with plugin-dynamic injections.
    pub id: String,
    /// Rendered content.
    pub content: InjectionContent,
    /// Target depth.
    pub depth: u32,
    /// Anchor, defaults to `latest`.
    #[serde(default)]
    pub anchor: Anchor,
    /// Insertion priority, defaults to 0.
    #[serde(default)]
    pub priority: i32,
}

/// One finished entry in the LLM-facing transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Rendered text content.
    pub content: String,
    /// `Some(pluginId)` when this entry is a rendered injection; `None` for
    /// an original transcript message.
    pub injected_by: Option<String>,
}

impl TranscriptEntry {
    /// Wraps an original (non-injected) transcript message.
    pub fn original(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            injected_by: None,
        }
    }
}
