//! Graph store error types.

use crate::domain::StopCode;

/// Errors raised by [`TransportMap`](super::TransportMap) operations.
///
/// The "not in graph" variants are distinct from [`GraphError::InvalidArgument`]
/// so callers can tell a stale handle from a malformed request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// No stop with this code
    #[error("stop {0} is not in the transport map")]
    UnknownStop(StopCode),

    /// Stop handle does not refer to a live vertex
    #[error("vertex #{0} is not in the transport map")]
    UnknownVertex(usize),

    /// Route handle does not refer to a live edge
    #[error("route #{0} is not in the transport map")]
    UnknownRoute(usize),

    #[error("no route between {0} and {1}")]
    NoRouteBetween(StopCode, StopCode),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
