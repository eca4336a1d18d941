//! Grouping Experiment: the driver side of the grouping kernel.
//!
//! - Generates synthetic, category-balanced populations
//! - Formats bound analyses, round listings and statistics as text
//! - Persists session history as JSON
//! - Runs the interactive round-by-round command loop

pub mod driver;
pub mod generator;
pub mod report;
pub mod results;
