//! The outcome of a successful path query.

use serde::Serialize;

use super::{Hop, PathError};
use crate::domain::{PathCriteria, RouteInfo, TransportMode};
use crate::network::{StopId, TransportMap};

/// A path through the map with its per-hop and total costs.
///
/// # Invariants
///
/// - At least two stops
/// - One mode and one cost triple per hop (`stops.len() - 1`)
/// - Totals are the sums of the hop costs; total distance and duration are
///   never negative
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    stops: Vec<StopId>,
    modes: Vec<TransportMode>,
    hops: Vec<RouteInfo>,
    totals: RouteInfo,
}

impl PathResult {
    pub fn new(
        stops: Vec<StopId>,
        modes: Vec<TransportMode>,
        hops: Vec<RouteInfo>,
    ) -> Result<Self, PathError> {
        if stops.len() < 2 {
            return Err(PathError::InvalidResult("a path needs at least two stops"));
        }
        if modes.len() != stops.len() - 1 || hops.len() != modes.len() {
            return Err(PathError::InvalidResult(
                "a path needs exactly one mode and one cost per hop",
            ));
        }
        let (distance, duration, sustainability) =
            hops.iter().fold((0.0, 0.0, 0.0), |(d, t, s), hop| {
                (d + hop.distance(), t + hop.duration(), s + hop.sustainability())
            });
        let totals = RouteInfo::new(distance, duration, sustainability)
            .map_err(|_| PathError::InvalidResult("path totals must be finite and non-negative"))?;
        Ok(Self {
            stops,
            modes,
            hops,
            totals,
        })
    }

    pub(crate) fn from_hops(stops: Vec<StopId>, hops: Vec<Hop>) -> Result<Self, PathError> {
        let modes = hops.iter().map(|hop| hop.mode).collect();
        let infos = hops.iter().map(|hop| hop.info).collect();
        Self::new(stops, modes, infos)
    }

    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    pub fn modes(&self) -> &[TransportMode] {
        &self.modes
    }

    /// Costs of each hop, after overlay adjustments.
    pub fn hops(&self) -> &[RouteInfo] {
        &self.hops
    }

    pub fn totals(&self) -> &RouteInfo {
        &self.totals
    }

    pub fn total(&self, criteria: PathCriteria) -> f64 {
        self.totals.get(criteria)
    }

    pub fn origin(&self) -> StopId {
        self.stops[0]
    }

    pub fn destination(&self) -> StopId {
        self.stops[self.stops.len() - 1]
    }

    pub fn hop_count(&self) -> usize {
        self.modes.len()
    }

    /// The same path travelled backwards, for a round trip.
    pub fn reversed(&self) -> Self {
        let mut reversed = self.clone();
        reversed.stops.reverse();
        reversed.modes.reverse();
        reversed.hops.reverse();
        reversed
    }

    /// Append a path that starts where this one ends.
    pub fn join(mut self, next: PathResult) -> Result<Self, PathError> {
        if next.origin() != self.destination() {
            return Err(PathError::InvalidResult(
                "joined paths must share the connecting stop",
            ));
        }
        self.stops.extend_from_slice(&next.stops[1..]);
        self.modes.extend(next.modes);
        self.hops.extend(next.hops);
        Self::new(self.stops, self.modes, self.hops)
    }

    /// "Alpha (bus) => Bravo (train) => Charlie"
    pub fn itinerary(&self, map: &TransportMap) -> String {
        let name = |id: StopId| {
            map.stop(id)
                .map(|stop| stop.name().to_string())
                .unwrap_or_else(|| format!("#{}", id.index()))
        };
        let mut text = String::new();
        for (stop, mode) in self.stops.iter().zip(&self.modes) {
            text.push_str(&format!("{} ({mode}) => ", name(*stop)));
        }
        text.push_str(&name(self.destination()));
        text
    }
}
