//! Round orchestration: one session owns its ledger and history.
//!
//! ## Usage
//!
//! ```ignore
//! use grouping_kernel::{EngineConfig, Session};
//!
//! let mut session = Session::new(participants, 12, &EngineConfig::default())?;
//! let round = session.create_round()?;
//! println!("round {} cost {}", round.number, round.cost.total);
//! println!("{:.1}% of pairs met", session.statistics().coverage * 100.0);
//! ```

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::bounds::RoundBounds;
use crate::config::EngineConfig;
use crate::cost::CostModel;
use crate::error::Result;
use crate::history::{HistoryExport, Round};
use crate::ledger::MeetingLedger;
use crate::participant::{Participant, Roster};
use crate::search::GroupingSearch;

/// Read-only snapshot of session progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Pairs recorded in the ledger
    pub recorded_pairs: usize,
    pub total_pairs: usize,
    /// recorded_pairs / total_pairs
    pub coverage: f64,
    pub rounds_elapsed: usize,
    pub max_rounds_practical: usize,
    /// Never negative; zero once the practical limit is reached
    pub rounds_remaining: usize,
}

/// A grouping session over a fixed population and group size.
pub struct Session<R = ChaCha8Rng> {
    id: Uuid,
    roster: Roster,
    group_size: usize,
    bounds: RoundBounds,
    ledger: MeetingLedger,
    history: Vec<Round>,
    round_counter: usize,
    search: GroupingSearch<R>,
}

impl Session<ChaCha8Rng> {
    /// Create a session from engine configuration.
    ///
    /// Fails when the population cannot be split evenly into groups of
    /// `group_size`, when `group_size < 2`, or when ids are not unique.
    pub fn new(
        participants: Vec<Participant>,
        group_size: usize,
        config: &EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let cost_model = CostModel::new(config.weights);
        let search = match config.seed {
            Some(seed) => GroupingSearch::seeded(config.search.clone(), cost_model, seed),
            None => GroupingSearch::from_entropy(config.search.clone(), cost_model),
        };
        Self::with_search(participants, group_size, search)
    }
}

impl<R: Rng> Session<R> {
    /// Create a session around an already-built search engine.
    pub fn with_search(
        participants: Vec<Participant>,
        group_size: usize,
        search: GroupingSearch<R>,
    ) -> Result<Self> {
        let roster = Roster::new(participants)?;
        let bounds = RoundBounds::analyze(roster.len(), group_size)?;
        let ledger = MeetingLedger::new(roster.len());
        let id = Uuid::new_v4();

        info!(
            session = %id,
            people = roster.len(),
            group_size = group_size,
            groups = bounds.num_groups,
            max_rounds = bounds.max_rounds_practical,
            "Session created"
        );

        Ok(Self {
            id,
            roster,
            group_size,
            bounds,
            ledger,
            history: Vec::new(),
            round_counter: 0,
            search,
        })
    }

    /// Search, validate and commit the next round.
    ///
    /// The ledger is mutated only after the partition passes validation, and
    /// then all of its pairs are recorded in a single batch.
    pub fn create_round(&mut self) -> Result<&Round> {
        let outcome = self
            .search
            .search(&self.roster, self.group_size, &self.ledger)?;
        outcome.partition.validate(&self.roster, self.group_size)?;
        let group_costs =
            self.search
                .cost_model()
                .group_costs(&outcome.partition, &self.roster, &self.ledger)?;

        let new_pairs = self.ledger.record_partition(&outcome.partition);
        self.round_counter += 1;

        if outcome.is_perfect() {
            info!(
                session = %self.id,
                round = self.round_counter,
                iterations = outcome.iterations,
                new_pairs = new_pairs,
                coverage = self.ledger.coverage(),
                "Round committed"
            );
        } else {
            warn!(
                session = %self.id,
                round = self.round_counter,
                iterations = outcome.iterations,
                cost = outcome.cost.total,
                repeats = outcome.cost.repeats,
                imbalance = outcome.cost.imbalance,
                "Round committed with non-zero cost"
            );
        }

        self.history.push(Round {
            number: self.round_counter,
            partition: outcome.partition,
            cost: outcome.cost,
            group_costs,
            new_pairs,
        });

        // Just pushed, so the history is non-empty.
        Ok(&self.history[self.history.len() - 1])
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            recorded_pairs: self.ledger.len(),
            total_pairs: self.ledger.total_pairs(),
            coverage: self.ledger.coverage(),
            rounds_elapsed: self.round_counter,
            max_rounds_practical: self.bounds.max_rounds_practical,
            rounds_remaining: self
                .bounds
                .max_rounds_practical
                .saturating_sub(self.round_counter),
        }
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }

    /// History in the persistable export shape.
    pub fn export(&self) -> HistoryExport {
        HistoryExport::from_rounds(self.roster.len(), self.group_size, &self.history)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn bounds(&self) -> &RoundBounds {
        &self.bounds
    }

    pub fn ledger(&self) -> &MeetingLedger {
        &self.ledger
    }

    pub fn round_counter(&self) -> usize {
        self.round_counter
    }
}
