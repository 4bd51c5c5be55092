//! Injection Placer (component F): dedup/sort/insert algorithm over a
//! transcript (spec §4.5), plus transcript entry rendering (spec §6).

use alloy_core::{Anchor, ContextInjection, InjectionConfig, InjectionContent, MessageId, TranscriptEntry};

use crate::depth::effective_depth;

/// One injection ready for placement: resolved effective depth, anchor,
/// identity, priority, and rendered content.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedInjection {
    /// Short name of the plugin that submitted this injection.
    pub plugin_id: String,
    /// Injection id, unique within `plugin_id`.
    pub id: String,
    /// Content to render.
    pub content: InjectionContent,
    /// Already-aged depth (from the Depth Calculator for dynamic
    /// injections, or the raw configured depth for static ones).
    pub effective_depth: u32,
    /// Where `effective_depth` is measured from.
    pub anchor: Anchor,
    /// Higher priority is inserted earlier at the same resolved index.
    pub priority: i32,
    /// Whether to render as a system entry or a persona entry.
    pub as_system: bool,
}

impl PreparedInjection {
    /// Resolves a plugin-dynamic injection, always `latest`-anchored; depth
    /// ages toward `target_depth` via the Depth Calculator (spec §4.4).
    pub fn from_dynamic(
        plugin_id: impl Into<String>,
        injection: ContextInjection,
        ordered_message_ids: &[MessageId],
    ) -> Self {
        let depth = effective_depth(
            injection.last_modified_at.as_ref(),
            injection.target_depth,
            ordered_message_ids,
        );
        Self {
            plugin_id: plugin_id.into(),
            id: injection.id,
            content: injection.content,
            effective_depth: depth,
            anchor: Anchor::Latest,
            priority: injection.priority,
            as_system: injection.as_system,
        }
    }

    /// Resolves a statically configured injection. No aging applies — the
    /// configured depth is used verbatim against the declared anchor (spec
    /// §4.4 "For a static InjectionConfig with anchor: earliest...").
    pub fn from_static(plugin_id: impl Into<String>, config: InjectionConfig) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            id: config.id,
            content: config.content,
            effective_depth: config.depth,
            anchor: config.anchor,
            priority: config.priority,
            as_system: false,
        }
    }
}

/// Renders one prepared injection into a [`TranscriptEntry`] (spec §6):
/// `asSystem: true` → `System>[{pluginId}]: {content}`; otherwise a
/// persona-style entry for `plugin_id`.
pub fn render_entry(injection: &PreparedInjection) -> TranscriptEntry {
    let rendered = injection.content.render();
    let content = if injection.as_system {
        format!("System>[{}]: {}", injection.plugin_id, rendered)
    } else {
        format!("{}: {}", injection.plugin_id, rendered)
    };
    TranscriptEntry {
        content,
        injected_by: Some(injection.plugin_id.clone()),
    }
}

/// Places `injections` into `transcript`, implementing spec §4.5 steps 1–4.
///
/// 1. Deduplicate by `(plugin_id, id)`, later entries in the input slice
///    overwrite earlier ones (plugin-dynamic injections should be passed
///    after config-sourced ones so they win ties, per spec §4.5 "last
///    resolves as last-wins with plugin-dynamic winning").
/// 2. Compute each injection's clamped insertion index.
/// 3. Sort by `(index asc, priority desc, plugin_id asc, id asc)`.
/// 4. Insert from highest index to lowest so earlier insertions do not
///    invalidate later indices.
pub fn place(
    transcript: Vec<TranscriptEntry>,
    injections: Vec<PreparedInjection>,
) -> Vec<TranscriptEntry> {
    let n = transcript.len();
    let deduped = dedupe(injections);

    let mut placements: Vec<(usize, PreparedInjection)> = deduped
        .into_iter()
        .map(|injection| (insertion_index(&injection, n), injection))
        .collect();

    placements.sort_by(|(idx_a, a), (idx_b, b)| {
        idx_a
            .cmp(idx_b)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.plugin_id.cmp(&b.plugin_id))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut result = transcript;
    for (index, injection) in placements.into_iter().rev() {
        result.insert(index, render_entry(&injection));
    }
    result
}

fn dedupe(injections: Vec<PreparedInjection>) -> Vec<PreparedInjection> {
    let mut by_key: Vec<(String, String)> = Vec::new();
    let mut kept: Vec<PreparedInjection> = Vec::new();

    for injection in injections {
        let key = (injection.plugin_id.clone(), injection.id.clone());
        if let Some(pos) = by_key.iter().position(|k| k == &key) {
            kept[pos] = injection;
        } else {
            by_key.push(key);
            kept.push(injection);
        }
    }
    kept
}

fn insertion_index(injection: &PreparedInjection, n: usize) -> usize {
    match injection.anchor {
        Anchor::Latest => n.saturating_sub(injection.effective_depth as usize),
        Anchor::Earliest => (injection.effective_depth as usize).min(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn injection(plugin: &str, id: &str, depth: u32, priority: i32) -> PreparedInjection {
        PreparedInjection {
            plugin_id: plugin.into(),
            id: id.into(),
            content: InjectionContent::Text(format!("{plugin}:{id}")),
            effective_depth: depth,
            anchor: Anchor::Latest,
            priority,
            as_system: false,
        }
    }

    fn transcript(n: usize) -> Vec<TranscriptEntry> {
        (0..n).map(|i| TranscriptEntry::original(format!("msg{i}"))).collect()
    }

    #[test]
    fn dedup_keeps_last_submission() {
        let first = injection("notes", "a", 0, 0);
        let mut second = injection("notes", "a", 0, 0);
        second.content = InjectionContent::Text("updated".into());
        let placed = place(transcript(2), vec![first, second]);
        assert!(placed.iter().any(|e| e.content.contains("updated")));
    }

    #[test]
    fn depth_clamps_to_transcript_bounds() {
        let huge_depth = injection("notes", "a", 100, 0);
        let placed = place(transcript(3), vec![huge_depth]);
        assert_eq!(placed.len(), 4);
        assert_eq!(placed[0].content, "notes: notes:a");
    }

    #[test]
    fn higher_priority_inserted_earlier_at_same_index() {
        let low = injection("b", "x", 0, 0);
        let high = injection("a", "y", 0, 5);
        let placed = place(transcript(1), vec![low, high]);
        // both resolve to index 1 (end); high priority goes first at that index.
        assert_eq!(placed[1].content, "a: a:y");
        assert_eq!(placed[2].content, "b: b:x");
    }

    #[test]
    fn insertion_is_stable_relative_to_existing_transcript() {
        let inj = injection("notes", "a", 1, 0);
        let placed = place(transcript(3), vec![inj]);
        assert_eq!(placed.len(), 4);
        assert_eq!(placed[2].content, "notes: notes:a");
    }

    #[test]
    fn from_static_earliest_uses_configured_depth_verbatim() {
        let config = InjectionConfig {
            id: "welcome".into(),
            content: InjectionContent::Text("hi".into()),
            depth: 2,
            anchor: Anchor::Earliest,
            priority: 0,
        };
        let prepared = PreparedInjection::from_static("inject", config);
        assert_eq!(prepared.anchor, Anchor::Earliest);
        assert_eq!(prepared.effective_depth, 2);
    }

    #[test]
    fn from_dynamic_ages_via_depth_calculator() {
        let ids: Vec<MessageId> = (0..5).map(|i| MessageId::new(format!("m{i}"))).collect();
        let injection = ContextInjection::new("a", "text", 3).with_last_modified_at(ids[4].clone());
        let prepared = PreparedInjection::from_dynamic("notes", injection, &ids);
        assert_eq!(prepared.anchor, Anchor::Latest);
        assert_eq!(prepared.effective_depth, 0);
    }

    #[test]
    fn system_flag_renders_with_system_prefix() {
        let mut inj = injection("notes", "a", 0, 0);
        inj.as_system = true;
        let entry = render_entry(&inj);
        assert!(entry.content.starts_with("System>[notes]: "));
    }
}
