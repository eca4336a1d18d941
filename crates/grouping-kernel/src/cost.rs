//! Partition cost: repeated meetings plus category imbalance, weighted.
//!
//! ```text
//! cost = Σ_g repeats(g) * w_repeat + imbalance(g) * w_balance
//! ```
//!
//! Lower is better and zero means a perfect round: nobody meets anyone twice
//! and every group matches the ideal category split. Evaluation never
//! touches the ledger mutably.

use serde::{Deserialize, Serialize};

use crate::error::{GroupingError, Result};
use crate::ledger::MeetingLedger;
use crate::participant::{Category, Participant, Roster};
use crate::partition::Partition;

/// Relative weights of the two cost terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    /// Cost per pair that already met
    pub repeat: u64,
    /// Cost per unit of category imbalance
    pub balance: u64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            repeat: 1,
            balance: 2,
        }
    }
}

/// Unweighted terms for a single group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupCost {
    pub repeats: usize,
    pub imbalance: usize,
}

/// Cost of a whole partition with its unweighted breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PartitionCost {
    pub repeats: usize,
    pub imbalance: usize,
    pub total: u64,
}

impl PartitionCost {
    pub fn is_perfect(&self) -> bool {
        self.total == 0
    }
}

/// Scores candidate partitions against a ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostModel {
    weights: CostWeights,
}

impl CostModel {
    pub fn new(weights: CostWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> CostWeights {
        self.weights
    }

    /// Score resolved group members.
    pub fn group_cost(&self, members: &[&Participant], ledger: &MeetingLedger) -> GroupCost {
        let mut repeats = 0;
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                if ledger.has_met(a.id(), b.id()) {
                    repeats += 1;
                }
            }
        }

        GroupCost {
            repeats,
            imbalance: imbalance(members.iter().map(|p| p.category()), members.len()),
        }
    }

    /// Score a list of groups given as resolved members.
    pub fn score_groups<'a, 'p: 'a, I>(&self, groups: I, ledger: &MeetingLedger) -> PartitionCost
    where
        I: IntoIterator<Item = &'a [&'p Participant]>,
    {
        groups
            .into_iter()
            .map(|members| self.group_cost(members, ledger))
            .fold(PartitionCost::default(), |acc, g| self.accumulate(acc, g))
    }

    /// Per-group terms for a partition of ids, in group order.
    pub fn group_costs(
        &self,
        partition: &Partition,
        roster: &Roster,
        ledger: &MeetingLedger,
    ) -> Result<Vec<GroupCost>> {
        partition
            .groups()
            .iter()
            .map(|group| {
                let members = group
                    .members()
                    .iter()
                    .map(|id| {
                        roster.get(id).ok_or_else(|| {
                            GroupingError::structural(format!("unknown participant '{}'", id))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.group_cost(&members, ledger))
            })
            .collect()
    }

    /// Score a partition of ids, resolving categories through the roster.
    pub fn evaluate(
        &self,
        partition: &Partition,
        roster: &Roster,
        ledger: &MeetingLedger,
    ) -> Result<PartitionCost> {
        Ok(self.total(&self.group_costs(partition, roster, ledger)?))
    }

    /// Combine per-group terms into a weighted partition cost.
    pub fn total(&self, groups: &[GroupCost]) -> PartitionCost {
        groups
            .iter()
            .fold(PartitionCost::default(), |acc, g| self.accumulate(acc, *g))
    }

    fn accumulate(&self, acc: PartitionCost, group: GroupCost) -> PartitionCost {
        PartitionCost {
            repeats: acc.repeats + group.repeats,
            imbalance: acc.imbalance + group.imbalance,
            total: acc.total
                + group.repeats as u64 * self.weights.repeat
                + group.imbalance as u64 * self.weights.balance,
        }
    }
}

/// Distance of a group's category counts from the ideal split.
///
/// `|a - floor(k/2)| + |b - (k - floor(k/2))|` for a group of size `k`.
pub fn imbalance(categories: impl IntoIterator<Item = Category>, group_size: usize) -> usize {
    let (mut a, mut b) = (0usize, 0usize);
    for category in categories {
        match category {
            Category::A => a += 1,
            Category::B => b += 1,
        }
    }
    a.abs_diff(Category::A.ideal_count(group_size)) + b.abs_diff(Category::B.ideal_count(group_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Group;

    fn roster() -> Roster {
        Roster::new(vec![
            Participant::new("a1", Category::A),
            Participant::new("a2", Category::A),
            Participant::new("b1", Category::B),
            Participant::new("b2", Category::B),
        ])
        .unwrap()
    }

    fn partition(groups: &[&[&str]]) -> Partition {
        Partition::new(
            groups
                .iter()
                .map(|g| g.iter().map(|s| s.to_string()).collect::<Group>())
                .collect(),
        )
    }

    #[test]
    fn test_imbalance() {
        use Category::{A, B};
        assert_eq!(imbalance([A, B], 2), 0);
        assert_eq!(imbalance([A, A], 2), 2);
        assert_eq!(imbalance([A, B, B], 3), 0);
        assert_eq!(imbalance([A, A, B], 3), 2);
        assert_eq!(imbalance([B, B, B, B], 4), 4);
    }

    #[test]
    fn test_empty_ledger_cost_is_pure_imbalance() {
        let roster = roster();
        let ledger = MeetingLedger::new(roster.len());
        let model = CostModel::default();

        let balanced = partition(&[&["a1", "b1"], &["a2", "b2"]]);
        let cost = model.evaluate(&balanced, &roster, &ledger).unwrap();
        assert_eq!(cost.repeats, 0);
        assert!(cost.is_perfect());

        let skewed = partition(&[&["a1", "a2"], &["b1", "b2"]]);
        let cost = model.evaluate(&skewed, &roster, &ledger).unwrap();
        assert_eq!(cost.repeats, 0);
        assert_eq!(cost.imbalance, 4);
        assert_eq!(cost.total, 8);
    }

    #[test]
    fn test_repeats_are_counted_against_ledger() {
        let roster = roster();
        let mut ledger = MeetingLedger::new(roster.len());
        let first = partition(&[&["a1", "b1"], &["a2", "b2"]]);
        ledger.record_partition(&first);

        let model = CostModel::default();
        let cost = model.evaluate(&first, &roster, &ledger).unwrap();
        assert_eq!(cost.repeats, 2);
        assert_eq!(cost.imbalance, 0);
        assert_eq!(cost.total, 2);

        let fresh = partition(&[&["a1", "b2"], &["a2", "b1"]]);
        assert!(model.evaluate(&fresh, &roster, &ledger).unwrap().is_perfect());
    }

    #[test]
    fn test_custom_weights() {
        let roster = roster();
        let mut ledger = MeetingLedger::new(roster.len());
        ledger.record_partition(&partition(&[&["a1", "a2"], &["b1", "b2"]]));

        let model = CostModel::new(CostWeights {
            repeat: 10,
            balance: 1,
        });
        let cost = model
            .evaluate(&partition(&[&["a1", "a2"], &["b1", "b2"]]), &roster, &ledger)
            .unwrap();
        assert_eq!(cost.total, 2 * 10 + 4);
    }

    #[test]
    fn test_group_costs_follow_group_order() {
        let roster = roster();
        let mut ledger = MeetingLedger::new(roster.len());
        ledger.record_partition(&partition(&[&["a1", "b1"], &["a2", "b2"]]));

        let model = CostModel::default();
        let candidate = partition(&[&["a1", "a2"], &["b1", "b2"]]);
        let groups = model.group_costs(&candidate, &roster, &ledger).unwrap();
        assert_eq!(
            groups,
            vec![
                GroupCost {
                    repeats: 0,
                    imbalance: 2
                },
                GroupCost {
                    repeats: 0,
                    imbalance: 2
                },
            ]
        );
        assert_eq!(
            model.total(&groups),
            model.evaluate(&candidate, &roster, &ledger).unwrap()
        );

        let repeated = partition(&[&["b1", "a1"], &["a2", "b2"]]);
        let groups = model.group_costs(&repeated, &roster, &ledger).unwrap();
        assert_eq!(groups[0].repeats, 1);
        assert_eq!(groups[1].repeats, 1);
    }

    #[test]
    fn test_unknown_member_fails() {
        let roster = roster();
        let ledger = MeetingLedger::new(roster.len());
        let result = CostModel::default().evaluate(
            &partition(&[&["a1", "zz"], &["a2", "b2"]]),
            &roster,
            &ledger,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_evaluation_does_not_mutate_ledger() {
        let roster = roster();
        let ledger = MeetingLedger::new(roster.len());
        CostModel::default()
            .evaluate(&partition(&[&["a1", "b1"], &["a2", "b2"]]), &roster, &ledger)
            .unwrap();
        assert!(ledger.is_empty());
    }
}
