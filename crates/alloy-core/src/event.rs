//! Epic-scope events and logs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::MessageId;

/// One entry in an epic-scope [`EventLog`].
///
/// At most one event exists per message id within a channel's log; writing
/// a new event for an existing id replaces the prior one (spec §3 — losing
/// history here is intentional, see spec §9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    /// Chronologically-ordered message id this event is attached to.
    #[serde(rename = "messageId")]
    pub message_id: MessageId,
    /// Informational timestamp; ordering is by `message_id` only (spec §4.3).
    pub timestamp: String,
    /// Opaque payload, interpreted only by the plugin-supplied reducer.
    pub delta: Value,
}

/// An ordered sequence of [`StateEvent`]s for one channel, kept sorted by
/// `message_id` on disk.
pub type EventLog = Vec<StateEvent>;

/// Inserts or replaces the event for `event.message_id`, keeping the log
/// sorted by message id.
///
/// This is the shared implementation backing
/// `StateStore::append_or_replace_event`; it lives here (rather than in
/// `alloy-runtime`) so the sort/replace invariant can be unit tested without
/// any file I/O.
pub fn append_or_replace(log: &mut EventLog, event: StateEvent) {
    match log.binary_search_by(|e| e.message_id.cmp(&event.message_id)) {
        Ok(idx) => log[idx] = event,
        Err(idx) => log.insert(idx, event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(id: &str, n: i64) -> StateEvent {
        StateEvent {
            message_id: MessageId::new(id),
            timestamp: "2026-01-01T00:00:00Z".into(),
            delta: Value::from(n),
        }
    }

    #[test]
    fn replaces_existing_message_id() {
        let mut log = vec![ev("m1", 1), ev("m2", 2)];
        append_or_replace(&mut log, ev("m1", 99));
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].delta, Value::from(99));
    }

    #[test]
    fn keeps_sorted_on_insert() {
        let mut log = vec![ev("m1", 1), ev("m3", 3)];
        append_or_replace(&mut log, ev("m2", 2));
        let ids: Vec<_> = log.iter().map(|e| e.message_id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }
}
