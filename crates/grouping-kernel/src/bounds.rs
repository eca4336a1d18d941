//! Combinatorial limits on non-repeating rounds.
//!
//! Splitting `N` people into groups of `k` consumes `N/k * C(k,2)` pairs per
//! round out of `C(N,2)` possible pairs, so no schedule can run more than
//! `C(N,2) / (N/k * C(k,2))` rounds without someone meeting twice.
//!
//! The numbers here are for reporting only and never steer the search.

use serde::Serialize;

use crate::error::{GroupingError, Result};

/// Derived limits for a population of `total_people` split into groups of `group_size`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundBounds {
    pub total_people: usize,
    pub group_size: usize,
    /// Groups per round (N / k)
    pub num_groups: usize,
    /// C(N, 2)
    pub total_pairs: usize,
    /// C(k, 2)
    pub pairs_per_group: usize,
    pub pairs_per_round: usize,
    pub max_rounds_theoretical: f64,
    pub max_rounds_practical: usize,
}

impl RoundBounds {
    /// Analyze `(N, k)`.
    ///
    /// Fails when `k < 2` or `N` is not a positive multiple of `k`.
    pub fn analyze(total_people: usize, group_size: usize) -> Result<Self> {
        validate_dimensions(total_people, group_size)?;

        let num_groups = total_people / group_size;
        let total_pairs = pair_count(total_people);
        let pairs_per_group = pair_count(group_size);
        let pairs_per_round = num_groups * pairs_per_group;
        let max_rounds_theoretical = total_pairs as f64 / pairs_per_round as f64;

        Ok(Self {
            total_people,
            group_size,
            num_groups,
            total_pairs,
            pairs_per_group,
            pairs_per_round,
            max_rounds_theoretical,
            // Integer division keeps the floor exact for large N.
            max_rounds_practical: total_pairs / pairs_per_round,
        })
    }

    /// Closed-form estimate `(N-1)/(k-1)`.
    ///
    /// This is an approximation of `max_rounds_theoretical`, not an exact bound.
    pub fn approximate_rounds(&self) -> f64 {
        (self.total_people - 1) as f64 / (self.group_size - 1) as f64
    }

    pub fn feasibility(&self) -> Feasibility {
        match self.max_rounds_practical {
            0 => Feasibility::Infeasible,
            1..=2 => Feasibility::Limited,
            _ => Feasibility::Plentiful,
        }
    }

    pub fn rating(&self) -> ScenarioRating {
        match self.max_rounds_practical {
            0 => ScenarioRating::Impossible,
            1 => ScenarioRating::Limited,
            2..=3 => ScenarioRating::Good,
            _ => ScenarioRating::Excellent,
        }
    }
}

/// Coarse verdict on whether a configuration supports a useful number of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Feasibility {
    /// Three or more rounds
    Plentiful,
    /// One or two rounds
    Limited,
    /// Not even one full round without repeats
    Infeasible,
}

/// Rating used when comparing several configurations side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScenarioRating {
    Excellent,
    Good,
    Limited,
    Impossible,
}

/// Analyze several `(N, k)` scenarios, keeping failures per row.
pub fn compare_scenarios(scenarios: &[(usize, usize)]) -> Vec<Result<RoundBounds>> {
    scenarios
        .iter()
        .map(|&(people, size)| RoundBounds::analyze(people, size))
        .collect()
}

/// C(n, 2)
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

pub(crate) fn validate_dimensions(total_people: usize, group_size: usize) -> Result<()> {
    if group_size < 2 {
        return Err(GroupingError::invalid(format!(
            "group size must be at least 2, got {}",
            group_size
        )));
    }
    if total_people == 0 {
        return Err(GroupingError::invalid("population is empty"));
    }
    if total_people % group_size != 0 {
        return Err(GroupingError::invalid(format!(
            "{} people cannot be split evenly into groups of {}",
            total_people, group_size
        )));
    }
    Ok(())
}
