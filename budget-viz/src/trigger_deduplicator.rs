use crate::types::{Trigger, TriggerKind};

/// Identity used to recognise a trigger that was already acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKey {
    /// Caller-supplied id.
    Explicit(u64),
    /// Kind plus host timestamp.
    Stamped(TriggerKind, u64),
    /// Fabricated for triggers carrying neither id nor timestamp.
    Fallback(u64),
}

/// Remembers the last processed trigger so that a host re-delivering the same
/// event acts on it only once.
///
/// Only the most recent key is kept: an equality check, not a set. Two
/// triggers with distinct timestamps are always distinct, however close.
#[derive(Debug, Default)]
pub struct TriggerDeduplicator {
    last_key: Option<TriggerKey>,
    next_fallback: u64,
}

impl TriggerDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the identity key of `trigger`. Triggers without id or
    /// timestamp get a fresh monotonic fallback id on every call.
    pub fn key_for(&mut self, trigger: &Trigger) -> TriggerKey {
        match (trigger.id, trigger.occurred_at) {
            (Some(id), _) => TriggerKey::Explicit(id),
            (None, Some(at)) => TriggerKey::Stamped(trigger.kind, at),
            (None, None) => {
                let id = self.next_fallback;
                self.next_fallback = self.next_fallback.wrapping_add(1);
                TriggerKey::Fallback(id)
            }
        }
    }

    /// Records `trigger` and returns its key, or `None` when it repeats the
    /// last processed trigger.
    pub fn admit(&mut self, trigger: &Trigger) -> Option<TriggerKey> {
        let key = self.key_for(trigger);
        if self.last_key == Some(key) {
            return None;
        }
        self.last_key = Some(key);
        Some(key)
    }

    pub fn last_key(&self) -> Option<TriggerKey> {
        self.last_key
    }

    pub fn reset(&mut self) {
        self.last_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_trigger_is_admitted_once() {
        let mut dedup = TriggerDeduplicator::new();
        let trigger = Trigger::income(100.0, 1_700_000_000_000);
        assert!(dedup.admit(&trigger).is_some());
        assert!(dedup.admit(&trigger).is_none());
        assert!(dedup.admit(&trigger).is_none());
    }

    #[test]
    fn distinct_timestamps_are_distinct_triggers() {
        let mut dedup = TriggerDeduplicator::new();
        assert!(dedup.admit(&Trigger::income(100.0, 10)).is_some());
        assert!(dedup.admit(&Trigger::income(100.0, 11)).is_some());
    }

    #[test]
    fn kind_is_part_of_the_identity() {
        let mut dedup = TriggerDeduplicator::new();
        assert!(dedup.admit(&Trigger::income(10.0, 5)).is_some());
        assert!(dedup.admit(&Trigger::expense(10.0, 5)).is_some());
    }

    #[test]
    fn only_the_last_key_is_remembered() {
        let mut dedup = TriggerDeduplicator::new();
        let first = Trigger::income(10.0, 1);
        let second = Trigger::expense(10.0, 2);
        assert!(dedup.admit(&first).is_some());
        assert!(dedup.admit(&second).is_some());
        assert!(dedup.admit(&first).is_some());
    }

    #[test]
    fn explicit_id_wins_over_timestamp() {
        let mut dedup = TriggerDeduplicator::new();
        let a = Trigger::income(10.0, 1).with_id(42);
        let b = Trigger::expense(99.0, 2).with_id(42);
        assert_eq!(dedup.admit(&a), Some(TriggerKey::Explicit(42)));
        assert!(dedup.admit(&b).is_none());
    }

    #[test]
    fn missing_identity_gets_monotonic_fallback() {
        let mut dedup = TriggerDeduplicator::new();
        let bare = Trigger {
            kind: TriggerKind::Income,
            amount: 10.0,
            occurred_at: None,
            id: None,
        };
        assert_eq!(dedup.admit(&bare), Some(TriggerKey::Fallback(0)));
        assert_eq!(dedup.admit(&bare), Some(TriggerKey::Fallback(1)));
    }
}
