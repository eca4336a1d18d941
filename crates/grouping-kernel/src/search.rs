//! Randomized multi-start search for the next round's partition.
//!
//! Each iteration shuffles the whole population and slices it into
//! consecutive blocks of `group_size`, which is always a structurally valid
//! partition. The cheapest candidate seen so far is kept, and the loop stops
//! as soon as a zero-cost candidate turns up or the budget runs out.
//!
//! This is an anytime heuristic: an exhausted budget still yields the best
//! partition found, with its (non-zero) cost.

use std::time::{Duration, Instant};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::bounds::validate_dimensions;
use crate::config::SearchConfig;
use crate::cost::{CostModel, PartitionCost};
use crate::error::{GroupingError, Result};
use crate::ledger::MeetingLedger;
use crate::participant::{Participant, Roster};
use crate::partition::{Group, Partition};

/// Result of one search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best partition found
    pub partition: Partition,
    /// Its cost against the ledger at search time
    pub cost: PartitionCost,
    /// Candidates sampled
    pub iterations: usize,
    /// 1-based iteration that produced a zero-cost partition, if any
    pub perfect_at: Option<usize>,
}

impl SearchOutcome {
    pub fn is_perfect(&self) -> bool {
        self.cost.is_perfect()
    }
}

/// Search engine owning its pseudo-random source.
///
/// Two engines built with the same seed produce the same sequence of
/// candidates for the same inputs.
pub struct GroupingSearch<R = ChaCha8Rng> {
    config: SearchConfig,
    cost_model: CostModel,
    rng: R,
}

impl GroupingSearch<ChaCha8Rng> {
    /// Create an engine with a fixed seed.
    pub fn seeded(config: SearchConfig, cost_model: CostModel, seed: u64) -> Self {
        Self::with_rng(config, cost_model, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create an engine seeded from the thread-local generator.
    pub fn from_entropy(config: SearchConfig, cost_model: CostModel) -> Self {
        Self::seeded(config, cost_model, rand::random())
    }
}

impl<R: Rng> GroupingSearch<R> {
    pub fn with_rng(config: SearchConfig, cost_model: CostModel, rng: R) -> Self {
        Self {
            config,
            cost_model,
            rng,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Find the lowest-cost partition within the budget.
    ///
    /// The ledger is only read.
    pub fn search(
        &mut self,
        roster: &Roster,
        group_size: usize,
        ledger: &MeetingLedger,
    ) -> Result<SearchOutcome> {
        validate_dimensions(roster.len(), group_size)?;
        if self.config.max_iterations == 0 {
            return Err(GroupingError::invalid(
                "search.max_iterations must be at least 1",
            ));
        }

        let deadline = self
            .config
            .time_budget_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        let mut order: Vec<&Participant> = roster.participants().iter().collect();
        let mut best: Option<(Vec<&Participant>, PartitionCost)> = None;
        let mut iterations = 0;
        let mut perfect_at = None;

        while self.should_continue(iterations, best.as_ref().map(|(_, c)| c), deadline) {
            order.shuffle(&mut self.rng);
            iterations += 1;

            let cost = self.cost_model.score_groups(order.chunks(group_size), ledger);
            if best.as_ref().is_none_or(|(_, b)| cost.total < b.total) {
                debug!(
                    iteration = iterations,
                    cost = cost.total,
                    repeats = cost.repeats,
                    imbalance = cost.imbalance,
                    "Improved candidate"
                );
                if cost.is_perfect() {
                    perfect_at = Some(iterations);
                }
                best = Some((order.clone(), cost));
            }
        }

        let (order, cost) = best.ok_or_else(|| {
            GroupingError::structural("search finished without evaluating a candidate")
        })?;

        if let Some(at) = perfect_at {
            debug!(iteration = at, "Perfect partition found, stopping early");
        }

        Ok(SearchOutcome {
            partition: to_partition(&order, group_size),
            cost,
            iterations,
            perfect_at,
        })
    }

    fn should_continue(
        &self,
        iterations: usize,
        best: Option<&PartitionCost>,
        deadline: Option<Instant>,
    ) -> bool {
        // Always evaluate at least one candidate, even with an expired deadline.
        if iterations == 0 {
            return true;
        }
        if iterations >= self.config.max_iterations {
            return false;
        }
        if best.is_some_and(PartitionCost::is_perfect) {
            return false;
        }
        deadline.is_none_or(|d| Instant::now() < d)
    }
}

fn to_partition(order: &[&Participant], group_size: usize) -> Partition {
    Partition::new(
        order
            .chunks(group_size)
            .map(|chunk| chunk.iter().map(|p| p.id().to_string()).collect::<Group>())
            .collect(),
    )
}
