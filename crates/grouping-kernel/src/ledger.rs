//! The meeting ledger: every pair that has already shared a group.
//!
//! Append-only. Each session owns exactly one ledger; nothing is global.

use std::collections::HashSet;

use crate::bounds::pair_count;
use crate::partition::{Group, Partition};

/// Canonical unordered pair of two distinct participant ids.
///
/// The lexicographically smaller id is always stored first, so `(a, b)` and
/// `(b, a)` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(String, String);

impl PairKey {
    /// Returns `None` when both ids are the same participant.
    pub fn new(a: &str, b: &str) -> Option<Self> {
        match a.cmp(b) {
            std::cmp::Ordering::Less => Some(Self(a.to_string(), b.to_string())),
            std::cmp::Ordering::Greater => Some(Self(b.to_string(), a.to_string())),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

/// Set of pairs that have met in a committed round.
#[derive(Debug, Clone)]
pub struct MeetingLedger {
    pairs: HashSet<PairKey>,
    total_pairs: usize,
}

impl MeetingLedger {
    /// Create an empty ledger for a population of `population` participants.
    pub fn new(population: usize) -> Self {
        Self {
            pairs: HashSet::new(),
            total_pairs: pair_count(population),
        }
    }

    /// Record every pair in `group`. Returns the number of newly added pairs.
    ///
    /// Re-recording pairs that are already present changes nothing.
    pub fn record(&mut self, group: &Group) -> usize {
        let before = self.pairs.len();
        self.pairs
            .extend(group.pairs().filter_map(|(a, b)| PairKey::new(a, b)));
        self.pairs.len() - before
    }

    /// Record a whole partition in one batch.
    ///
    /// New keys are collected before any insertion, so the ledger only ever
    /// moves from the pre-round state to the full post-round state.
    pub fn record_partition(&mut self, partition: &Partition) -> usize {
        let fresh: HashSet<PairKey> = partition
            .groups()
            .iter()
            .flat_map(|g| g.pairs())
            .filter_map(|(a, b)| PairKey::new(a, b))
            .filter(|key| !self.pairs.contains(key))
            .collect();
        let added = fresh.len();
        self.pairs.extend(fresh);
        added
    }

    pub fn has_met(&self, a: &str, b: &str) -> bool {
        PairKey::new(a, b).is_some_and(|key| self.pairs.contains(&key))
    }

    /// Pairs in `group` that are already in the ledger.
    pub fn repeat_count(&self, group: &Group) -> usize {
        group.pairs().filter(|(a, b)| self.has_met(a, b)).count()
    }

    /// Fraction of all possible pairs already recorded, in `[0, 1]`.
    pub fn coverage(&self) -> f64 {
        if self.total_pairs == 0 {
            return 0.0;
        }
        self.pairs.len() as f64 / self.total_pairs as f64
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn pairs(&self) -> impl Iterator<Item = &PairKey> {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[&str]) -> Group {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(PairKey::new("kim", "lee"), PairKey::new("lee", "kim"));
        let key = PairKey::new("lee", "kim").unwrap();
        assert_eq!(key.first(), "kim");
        assert_eq!(key.second(), "lee");
        assert!(PairKey::new("kim", "kim").is_none());
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut ledger = MeetingLedger::new(6);
        let g = group(&["a", "b", "c"]);

        assert_eq!(ledger.record(&g), 3);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.record(&g), 0);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_has_met_either_order() {
        let mut ledger = MeetingLedger::new(4);
        ledger.record(&group(&["a", "b"]));
        assert!(ledger.has_met("a", "b"));
        assert!(ledger.has_met("b", "a"));
        assert!(!ledger.has_met("a", "c"));
        assert!(!ledger.has_met("a", "a"));
    }

    #[test]
    fn test_coverage() {
        let mut ledger = MeetingLedger::new(4);
        assert_eq!(ledger.coverage(), 0.0);
        ledger.record(&group(&["a", "b", "c"]));
        assert!((ledger.coverage() - 0.5).abs() < f64::EPSILON);
        ledger.record(&group(&["a", "b", "c", "d"]));
        assert!((ledger.coverage() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_partition_counts_only_new_pairs() {
        let mut ledger = MeetingLedger::new(6);
        ledger.record(&group(&["a", "b"]));

        let partition = Partition::new(vec![group(&["a", "b", "c"]), group(&["d", "e", "f"])]);
        assert_eq!(ledger.repeat_count(&partition.groups()[0]), 1);

        let added = ledger.record_partition(&partition);
        assert_eq!(added, 5);
        assert_eq!(ledger.len(), 6);
    }
}
