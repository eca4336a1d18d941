//! Grouping Kernel: round-constrained partitioning with a meeting ledger.
//!
//! This crate splits a fixed population into equal groups round after round,
//! steering away from pairs that already met while keeping each group's
//! binary category split close to even. It also computes how many
//! non-repeating rounds are combinatorially possible (the social-golfer bound).

pub mod bounds;
pub mod config;
pub mod cost;
pub mod error;
pub mod history;
pub mod ledger;
pub mod participant;
pub mod partition;
pub mod search;
pub mod session;

pub use bounds::{Feasibility, RoundBounds, ScenarioRating, compare_scenarios};
pub use config::{EngineConfig, SearchConfig};
pub use cost::{CostModel, CostWeights, GroupCost, PartitionCost};
pub use error::{GroupingError, Result};
pub use history::{HistoryExport, Round, RoundExport};
pub use ledger::{MeetingLedger, PairKey};
pub use participant::{Category, Participant, ParticipantId, Roster};
pub use partition::{Group, Partition};
pub use search::{GroupingSearch, SearchOutcome};
pub use session::{Session, Statistics};
