//! Path query error types.

use super::PathStrategy;
use crate::domain::{PathCriteria, StopCode};

/// Errors from path queries.
///
/// Request problems ([`PathError::InvalidRequest`], [`PathError::NotAdjacent`])
/// are kept apart from references to stops the map does not contain
/// ([`PathError::StopNotFound`]).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("invalid path request: {0}")]
    InvalidRequest(&'static str),

    /// Consecutive stops of a waypoint query are not joined by a route
    #[error("{from} and {to} are not adjacent")]
    NotAdjacent { from: StopCode, to: StopCode },

    #[error("stop {0} is not in the transport map")]
    StopNotFound(StopCode),

    #[error("{strategy} cannot optimise {criteria}, whose costs may be negative")]
    UnsupportedCriteria {
        strategy: PathStrategy,
        criteria: PathCriteria,
    },

    #[error("negative {0} cycle reachable from the origin")]
    NegativeCycle(PathCriteria),

    #[error("no path from {origin} to {destination}")]
    NoPath {
        origin: StopCode,
        destination: StopCode,
    },

    #[error("invalid path result: {0}")]
    InvalidResult(&'static str),

    /// The background query task panicked or was cancelled
    #[error("query worker failed: {0}")]
    Worker(String),
}
