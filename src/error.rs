//! Error types for the evolution engine.

use std::fmt;

/// Errors raised by the evolution engine.
///
/// All failures are surfaced before or at the start of a run; once the
/// generational loop is underway every stage is a pure array transform
/// over pre-sized buffers and cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A configuration scalar is invalid. Raised during validation,
    /// before any random state is created or consumed.
    InvalidConfiguration {
        /// The configuration field that failed validation.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },
    /// An epoch beyond the pre-generated randomness horizon was
    /// requested. Only reachable with up-front draw planning and
    /// indicates a planner/driver mismatch.
    DrawExhausted {
        /// The epoch that was requested.
        epoch: usize,
        /// Number of epochs the planner generated draws for.
        horizon: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidConfiguration { field, message } => {
                write!(f, "invalid configuration: {field}: {message}")
            }
            EngineError::DrawExhausted { epoch, horizon } => {
                write!(f, "draws exhausted: epoch {epoch} beyond horizon {horizon}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
