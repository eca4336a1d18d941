//! Groups and partitions: one round's division of the population.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GroupingError, Result};
use crate::participant::{ParticipantId, Roster};

/// A group of participant identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group {
    members: Vec<ParticipantId>,
}

impl Group {
    pub fn new(members: Vec<ParticipantId>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[ParticipantId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every unordered pair of members, in member order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.members.iter().enumerate().flat_map(move |(i, a)| {
            self.members[i + 1..]
                .iter()
                .map(move |b| (a.as_str(), b.as_str()))
        })
    }
}

impl FromIterator<ParticipantId> for Group {
    fn from_iter<I: IntoIterator<Item = ParticipantId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// An ordered sequence of groups covering the population exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition {
    groups: Vec<Group>,
}

impl Partition {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Member ids per group, the shape used by the history export.
    pub fn to_id_lists(&self) -> Vec<Vec<ParticipantId>> {
        self.groups.iter().map(|g| g.members.clone()).collect()
    }

    /// Check the structural invariants against a roster.
    ///
    /// Requires `roster.len() / group_size` groups of exactly `group_size`
    /// known, pairwise distinct members that jointly cover the roster.
    pub fn validate(&self, roster: &Roster, group_size: usize) -> Result<()> {
        let expected_groups = roster.len() / group_size;
        if self.groups.len() != expected_groups {
            return Err(GroupingError::structural(format!(
                "partition has {} groups, expected {}",
                self.groups.len(),
                expected_groups
            )));
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(roster.len());
        for (index, group) in self.groups.iter().enumerate() {
            if group.len() != group_size {
                return Err(GroupingError::structural(format!(
                    "group {} has {} members, expected {}",
                    index + 1,
                    group.len(),
                    group_size
                )));
            }
            for member in &group.members {
                if !roster.contains(member) {
                    return Err(GroupingError::structural(format!(
                        "group {} contains unknown participant '{}'",
                        index + 1,
                        member
                    )));
                }
                if !seen.insert(member.as_str()) {
                    return Err(GroupingError::structural(format!(
                        "participant '{}' appears in more than one slot",
                        member
                    )));
                }
            }
        }

        if seen.len() != roster.len() {
            return Err(GroupingError::structural(format!(
                "partition covers {} of {} participants",
                seen.len(),
                roster.len()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{Category, Participant};

    fn roster(ids: &[&str]) -> Roster {
        Roster::new(
            ids.iter()
                .map(|id| Participant::new(*id, Category::A))
                .collect(),
        )
        .unwrap()
    }

    fn group(ids: &[&str]) -> Group {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pairs_enumerates_each_pair_once() {
        let g = group(&["a", "b", "c", "d"]);
        let pairs: Vec<_> = g.pairs().collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], ("a", "b"));
        assert_eq!(pairs[5], ("c", "d"));
    }

    #[test]
    fn test_valid_partition() {
        let roster = roster(&["a", "b", "c", "d"]);
        let partition = Partition::new(vec![group(&["a", "c"]), group(&["d", "b"])]);
        assert!(partition.validate(&roster, 2).is_ok());
    }

    #[test]
    fn test_duplicate_member_is_violation() {
        let roster = roster(&["a", "b", "c", "d"]);
        let partition = Partition::new(vec![group(&["a", "b"]), group(&["a", "d"])]);
        let err = partition.validate(&roster, 2).unwrap_err();
        assert!(matches!(err, GroupingError::StructuralViolation { .. }));
    }

    #[test]
    fn test_wrong_group_size_is_violation() {
        let roster = roster(&["a", "b", "c", "d"]);
        let partition = Partition::new(vec![group(&["a", "b", "c"]), group(&["d"])]);
        assert!(partition.validate(&roster, 2).is_err());
    }

    #[test]
    fn test_unknown_member_is_violation() {
        let roster = roster(&["a", "b", "c", "d"]);
        let partition = Partition::new(vec![group(&["a", "b"]), group(&["c", "x"])]);
        assert!(partition.validate(&roster, 2).is_err());
    }

    #[test]
    fn test_missing_group_is_violation() {
        let roster = roster(&["a", "b", "c", "d"]);
        let partition = Partition::new(vec![group(&["a", "b"])]);
        assert!(partition.validate(&roster, 2).is_err());
    }

    #[test]
    fn test_serializes_as_nested_lists() {
        let partition = Partition::new(vec![group(&["a", "b"]), group(&["c", "d"])]);
        let json = serde_json::to_value(&partition).unwrap();
        assert_eq!(json, serde_json::json!([["a", "b"], ["c", "d"]]));
    }
}
