//! Scope Resolver (component C): one-hop channel-state inheritance as a
//! pure function over already-loaded parent state (spec §4.2, §9 "cyclic
//! inheritance" note — no recursion, one hop only).

use alloy_core::{ChannelId, ChannelMetadata, ChannelState, InheritanceInfo, ScopedBlob};

/// Resolves a `getChannel` miss against `inheritance`, given the already
/// loaded state of the candidate parent channels (or `None` if that parent
/// has no state of its own).
///
/// Priority: `history_origin_channel_id` before `parent_channel_id` (spec
/// §4.2 steps 1–2); neither present, or neither has state, returns the
/// "not found" case with empty metadata.
pub fn resolve_inheritance(
    inheritance: &InheritanceInfo,
    history_origin_state: Option<&ChannelState>,
    parent_state: Option<&ChannelState>,
) -> (Option<ScopedBlob>, ChannelMetadata) {
    if let (Some(origin_id), Some(state)) = (
        inheritance.history_origin_channel_id.as_ref(),
        history_origin_state,
    ) {
        return (
            Some(state.state.clone()),
            inherited_metadata(state, origin_id.clone(), Origin::History),
        );
    }

    if let (Some(parent_id), Some(state)) = (inheritance.parent_channel_id.as_ref(), parent_state) {
        return (
            Some(state.state.clone()),
            inherited_metadata(state, parent_id.clone(), Origin::Parent),
        );
    }

    (None, ChannelMetadata::empty())
}

enum Origin {
    History,
    Parent,
}

fn inherited_metadata(parent: &ChannelState, id: ChannelId, origin: Origin) -> ChannelMetadata {
    let mut metadata = ChannelMetadata {
        last_modified_message_id: parent.metadata.last_modified_message_id.clone(),
        ..ChannelMetadata::empty()
    };
    match origin {
        Origin::History => metadata.history_origin_channel_id = Some(id),
        Origin::Parent => metadata.parent_channel_id = Some(id),
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(blob: serde_json::Value, last_modified: &str) -> ChannelState {
        ChannelState {
            state: blob,
            metadata: ChannelMetadata {
                last_modified_message_id: Some(alloy_core::MessageId::new(last_modified)),
                ..ChannelMetadata::empty()
            },
        }
    }

    #[test]
    fn no_hints_returns_not_found() {
        let (blob, meta) = resolve_inheritance(&InheritanceInfo::default(), None, None);
        assert_eq!(blob, None);
        assert_eq!(meta, ChannelMetadata::empty());
    }

    #[test]
    fn history_origin_takes_priority_over_parent() {
        let inheritance = InheritanceInfo {
            parent_channel_id: Some(ChannelId::new("parent").unwrap()),
            history_origin_channel_id: Some(ChannelId::new("origin").unwrap()),
        };
        let origin_state = state(json!({"a": 1}), "m1");
        let parent_state = state(json!({"a": 2}), "m2");

        let (blob, meta) =
            resolve_inheritance(&inheritance, Some(&origin_state), Some(&parent_state));
        assert_eq!(blob, Some(json!({"a": 1})));
        assert_eq!(
            meta.history_origin_channel_id,
            Some(ChannelId::new("origin").unwrap())
        );
        assert_eq!(meta.parent_channel_id, None);
    }

    #[test]
    fn falls_back_to_parent_when_no_history_state() {
        let inheritance = InheritanceInfo {
            parent_channel_id: Some(ChannelId::new("parent").unwrap()),
            history_origin_channel_id: Some(ChannelId::new("origin").unwrap()),
        };
        let parent_state = state(json!({"counter": 5}), "m2");

        let (blob, meta) = resolve_inheritance(&inheritance, None, Some(&parent_state));
        assert_eq!(blob, Some(json!({"counter": 5})));
        assert_eq!(
            meta.parent_channel_id,
            Some(ChannelId::new("parent").unwrap())
        );
    }
}
