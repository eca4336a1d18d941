//! Participants and the roster they are drawn from.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GroupingError, Result};

/// Unique participant identity (a nickname in practice).
pub type ParticipantId = String;

/// Binary categorical attribute used for group balance.
///
/// `A` is the category whose ideal per-group count is `floor(k/2)`;
/// `B` takes the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    A,
    B,
}

impl Category {
    /// Ideal number of members of this category in a group of `group_size`.
    pub fn ideal_count(self, group_size: usize) -> usize {
        match self {
            Category::A => group_size / 2,
            Category::B => group_size - group_size / 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::A => write!(f, "A"),
            Category::B => write!(f, "B"),
        }
    }
}

/// An immutable participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    category: Category,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, category: Category) -> Self {
        Self {
            id: id.into(),
            category,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.id, self.category)
    }
}

/// The fixed population of a session, indexed by identity.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
    index: HashMap<ParticipantId, usize>,
}

impl Roster {
    /// Build a roster, rejecting empty populations and duplicate identities.
    pub fn new(participants: Vec<Participant>) -> Result<Self> {
        if participants.is_empty() {
            return Err(GroupingError::invalid("population is empty"));
        }

        let mut index = HashMap::with_capacity(participants.len());
        for (position, participant) in participants.iter().enumerate() {
            if index.insert(participant.id.clone(), position).is_some() {
                return Err(GroupingError::invalid(format!(
                    "duplicate participant id '{}'",
                    participant.id
                )));
            }
        }

        Ok(Self {
            participants,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.index.get(id).map(|&i| &self.participants[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Category of a participant, if the id belongs to this roster.
    pub fn category_of(&self, id: &str) -> Option<Category> {
        self.get(id).map(Participant::category)
    }

    /// Count participants in each category as `(a, b)`.
    pub fn category_counts(&self) -> (usize, usize) {
        let a = self
            .participants
            .iter()
            .filter(|p| p.category == Category::A)
            .count();
        (a, self.participants.len() - a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_counts_split_odd_groups() {
        assert_eq!(Category::A.ideal_count(5), 2);
        assert_eq!(Category::B.ideal_count(5), 3);
        assert_eq!(Category::A.ideal_count(4), 2);
        assert_eq!(Category::B.ideal_count(4), 2);
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        let err = Roster::new(vec![
            Participant::new("kim", Category::A),
            Participant::new("kim", Category::B),
        ])
        .unwrap_err();
        assert!(matches!(err, GroupingError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_roster_rejects_empty() {
        assert!(Roster::new(Vec::new()).is_err());
    }

    #[test]
    fn test_roster_lookup() {
        let roster = Roster::new(vec![
            Participant::new("kim", Category::A),
            Participant::new("park", Category::B),
            Participant::new("lee", Category::B),
        ])
        .unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.category_of("park"), Some(Category::B));
        assert_eq!(roster.category_of("choi"), None);
        assert_eq!(roster.category_counts(), (1, 2));
    }

    #[test]
    fn test_display() {
        let p = Participant::new("kim", Category::A);
        assert_eq!(p.to_string(), "kim(A)");
    }
}
