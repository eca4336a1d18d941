//! Error taxonomy for the grouping engine.
//!
//! A search that runs out of budget before reaching zero cost is not an
//! error; it is reported through a non-zero cost on the returned round.

use thiserror::Error;

/// Errors raised by the kernel.
#[derive(Debug, Error)]
pub enum GroupingError {
    /// Parameters that make a session or bound analysis impossible to build.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A proposed partition failed pre-commit validation.
    ///
    /// Indicates a bug in the search engine, never a user error.
    #[error("structural violation: {reason}")]
    StructuralViolation { reason: String },

    /// Engine configuration could not be parsed.
    #[error("failed to parse engine config: {0}")]
    Config(#[from] toml::de::Error),

    /// Engine configuration file could not be read.
    #[error("failed to read engine config: {0}")]
    Io(#[from] std::io::Error),
}

impl GroupingError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn structural(reason: impl Into<String>) -> Self {
        Self::StructuralViolation {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the kernel.
pub type Result<T> = std::result::Result<T, GroupingError>;
