//! Path query requests.

use std::collections::BTreeSet;

use super::PathError;
use crate::domain::{StopCode, TransportMode};

/// A least-cost path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRequest {
    pub origin: StopCode,
    pub destination: StopCode,

    /// Modes the path may use. Must not be empty.
    pub allowed_modes: BTreeSet<TransportMode>,

    /// Stops to pass through, in order. Each consecutive pair from the
    /// origin through to the destination must be joined by a route.
    pub waypoints: Vec<StopCode>,
}

impl PathRequest {
    /// A direct query allowing every mode.
    pub fn new(origin: StopCode, destination: StopCode) -> Self {
        Self {
            origin,
            destination,
            allowed_modes: TransportMode::all(),
            waypoints: Vec::new(),
        }
    }

    pub fn with_modes(mut self, modes: impl IntoIterator<Item = TransportMode>) -> Self {
        self.allowed_modes = modes.into_iter().collect();
        self
    }

    pub fn with_waypoints(mut self, waypoints: impl IntoIterator<Item = StopCode>) -> Self {
        self.waypoints = waypoints.into_iter().collect();
        self
    }

    /// Check the request on its own, without looking at any map.
    pub fn validate(&self) -> Result<(), PathError> {
        if self.allowed_modes.is_empty() {
            return Err(PathError::InvalidRequest("no transport modes allowed"));
        }
        if self.waypoints.is_empty() && self.origin == self.destination {
            return Err(PathError::InvalidRequest(
                "origin and destination are the same stop",
            ));
        }
        Ok(())
    }

    /// Origin, waypoints and destination, in travel order.
    pub fn stops(&self) -> impl Iterator<Item = &StopCode> + '_ {
        std::iter::once(&self.origin)
            .chain(&self.waypoints)
            .chain(std::iter::once(&self.destination))
    }
}
