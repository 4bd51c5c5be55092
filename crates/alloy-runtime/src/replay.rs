//! Event Replayer (component D): pure functions over an already-loaded
//! [`EventLog`].

use std::collections::HashSet;

use alloy_core::{EventLog, MessageId, Reducer, StateEvent};
use serde_json::Value;

/// Reconstructs epic state by folding events up to `upto` (inclusive),
/// skipping any event whose `messageId` is absent from `live` when
/// provided.
///
/// - `upto = None` means "replay everything".
/// - `live = None` means "no rollback filtering".
///
/// Pure: no I/O, no implicit side effects (spec §4.3 invariant).
pub fn replay(
    log: &EventLog,
    upto: Option<&MessageId>,
    live: Option<&HashSet<MessageId>>,
    reducer: &dyn Reducer,
) -> Option<Value> {
    let mut state: Option<Value> = None;
    for event in log {
        if let Some(upto) = upto {
            if &event.message_id > upto {
                break;
            }
        }
        if let Some(live) = live {
            if !live.contains(&event.message_id) {
                continue;
            }
        }
        state = Some(reducer.apply(state, &event.delta));
    }
    state
}

/// Copies every event with `message_id <= upto` from `parent` into a new
/// log for a forked channel (spec §4.3 "Fork").
pub fn fork_events(parent: &EventLog, upto: &MessageId) -> EventLog {
    parent
        .iter()
        .filter(|event| &event.message_id <= upto)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(id: &str, delta: Value) -> StateEvent {
        StateEvent {
            message_id: MessageId::new(id),
            timestamp: "2026-01-01T00:00:00Z".into(),
            delta,
        }
    }

    fn sum_reducer() -> impl Reducer {
        |state: Option<Value>, delta: &Value| {
            let prev = state.and_then(|v| v.as_i64()).unwrap_or(0);
            let add = delta.as_i64().unwrap_or(0);
            json!(prev + add)
        }
    }

    #[test]
    fn replay_everything_with_no_bound() {
        let log = vec![event("m1", json!(1)), event("m2", json!(2))];
        let result = replay(&log, None, None, &sum_reducer());
        assert_eq!(result, Some(json!(3)));
    }

    #[test]
    fn replay_stops_at_upto_bound() {
        let log = vec![event("m1", json!(1)), event("m2", json!(2))];
        let upto = MessageId::new("m1");
        let result = replay(&log, Some(&upto), None, &sum_reducer());
        assert_eq!(result, Some(json!(1)));
    }

    #[test]
    fn replay_skips_dead_messages() {
        let log = vec![event("m1", json!(1)), event("m2", json!(2))];
        let live: HashSet<MessageId> = [MessageId::new("m1")].into_iter().collect();
        let result = replay(&log, None, Some(&live), &sum_reducer());
        assert_eq!(result, Some(json!(1)));
    }

    #[test]
    fn fork_copies_prefix_only() {
        let log = vec![
            event("m1", json!(1)),
            event("m2", json!(2)),
            event("m3", json!(3)),
        ];
        let forked = fork_events(&log, &MessageId::new("m2"));
        assert_eq!(forked.len(), 2);
        assert_eq!(forked[1].message_id, MessageId::new("m2"));
    }
}
