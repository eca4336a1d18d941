//! Committed rounds and the history export record.

use serde::{Deserialize, Serialize};

use crate::cost::{GroupCost, PartitionCost};
use crate::participant::ParticipantId;
use crate::partition::Partition;

/// A committed round.
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    /// 1-based round number
    pub number: usize,
    pub partition: Partition,
    /// Cost against the ledger as it was before this round was committed
    pub cost: PartitionCost,
    /// Unweighted terms per group, in partition order
    pub group_costs: Vec<GroupCost>,
    /// Pairs this round added to the ledger
    pub new_pairs: usize,
}

/// Persistable session history.
///
/// Field names and nesting are a fixed external contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryExport {
    pub total_people: usize,
    pub group_size: usize,
    pub rounds: Vec<RoundExport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundExport {
    pub round: usize,
    pub groups: Vec<Vec<ParticipantId>>,
}

impl HistoryExport {
    pub fn from_rounds(total_people: usize, group_size: usize, rounds: &[Round]) -> Self {
        Self {
            total_people,
            group_size,
            rounds: rounds.iter().map(RoundExport::from).collect(),
        }
    }
}

impl From<&Round> for RoundExport {
    fn from(round: &Round) -> Self {
        Self {
            round: round.number,
            groups: round.partition.to_id_lists(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Group;

    #[test]
    fn test_export_shape() {
        let round = Round {
            number: 1,
            partition: Partition::new(vec![
                ["a", "b"].iter().map(|s| s.to_string()).collect::<Group>(),
                ["c", "d"].iter().map(|s| s.to_string()).collect::<Group>(),
            ]),
            cost: PartitionCost::default(),
            group_costs: vec![GroupCost::default(); 2],
            new_pairs: 2,
        };

        let export = HistoryExport::from_rounds(4, 2, &[round]);
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total_people": 4,
                "group_size": 2,
                "rounds": [
                    { "round": 1, "groups": [["a", "b"], ["c", "d"]] }
                ]
            })
        );
    }
}
