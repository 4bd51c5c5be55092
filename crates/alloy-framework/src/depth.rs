//! Depth Calculator (component E): pure aging function for dynamic
//! injections (spec §4.4). No I/O; callable independently of the Context
//! Factory for unit testing (spec §8 invariant 6).

use alloy_core::MessageId;

/// Computes the effective insertion depth for a `latest`-anchored dynamic
/// injection.
///
/// - `last_modified_at = None`, or absent from `ordered_message_ids` →
///   `target_depth`.
/// - Else `aged = n - 1 - pos(last_modified_at)`; returns `min(aged,
///   target_depth)`.
///
/// A freshly-modified injection starts near the end of the transcript
/// (depth 0) and ages toward `target_depth` as more messages arrive.
pub fn effective_depth(
    last_modified_at: Option<&MessageId>,
    target_depth: u32,
    ordered_message_ids: &[MessageId],
) -> u32 {
    let Some(id) = last_modified_at else {
        return target_depth;
    };
    let Some(pos) = ordered_message_ids.iter().position(|m| m == id) else {
        return target_depth;
    };
    let n = ordered_message_ids.len();
    let aged = (n - 1 - pos) as u32;
    aged.min(target_depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<MessageId> {
        (0..n).map(|i| MessageId::new(format!("m{i}"))).collect()
    }

    #[test]
    fn no_last_modified_returns_target() {
        let seq = ids(5);
        assert_eq!(effective_depth(None, 3, &seq), 3);
    }

    #[test]
    fn absent_last_modified_returns_target() {
        let seq = ids(5);
        let missing = MessageId::new("unknown");
        assert_eq!(effective_depth(Some(&missing), 3, &seq), 3);
    }

    #[test]
    fn ages_toward_target_as_messages_arrive() {
        let seq = ids(5);
        // last message in the sequence: aged = 5 - 1 - 4 = 0
        assert_eq!(effective_depth(Some(&seq[4]), 3, &seq), 0);
        // first message: aged = 5 - 1 - 0 = 4, clamped to target 3
        assert_eq!(effective_depth(Some(&seq[0]), 3, &seq), 3);
        // middle message: aged = 5 - 1 - 2 = 2, below target 3
        assert_eq!(effective_depth(Some(&seq[2]), 3, &seq), 2);
    }
}
