//! Per-query search state shared by every strategy.
//!
//! A [`QueryGraph`] fixes, for one query, which routes are usable and which
//! mode each one is travelled by. A [`SearchTable`] holds one
//! [`PathSegmentInfo`] per reached stop and arrival route, and implements the
//! relaxation rule.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, trace};

use super::{CostStrategy, PathError};
use crate::domain::{PathCriteria, Route, RouteInfo, TransportMode};
use crate::network::{RouteId, StopId, TransportMap};
use crate::overlay::Overlay;

/// The route and mode used to reach a stop, with that hop's costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hop {
    pub route: RouteId,
    pub mode: TransportMode,
    pub info: RouteInfo,
}

/// Best-known accumulated costs for one stop during one query.
///
/// `None` means the stop has not been reached on that metric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathSegmentInfo {
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub sustainability: Option<f64>,
    pub predecessor: Option<StopId>,
    pub hop: Option<Hop>,
}

impl PathSegmentInfo {
    /// The entry for the origin: zero on every metric, no predecessor.
    pub fn origin() -> Self {
        Self {
            distance: Some(0.0),
            duration: Some(0.0),
            sustainability: Some(0.0),
            predecessor: None,
            hop: None,
        }
    }

    pub fn get(&self, criteria: PathCriteria) -> Option<f64> {
        match criteria {
            PathCriteria::Distance => self.distance,
            PathCriteria::Duration => self.duration,
            PathCriteria::Sustainability => self.sustainability,
        }
    }

    fn set(&mut self, criteria: PathCriteria, value: f64) {
        let slot = match criteria {
            PathCriteria::Distance => &mut self.distance,
            PathCriteria::Duration => &mut self.duration,
            PathCriteria::Sustainability => &mut self.sustainability,
        };
        *slot = Some(value);
    }
}

/// A usable route for one query, fixed to its cheapest eligible mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeChoice {
    pub route: RouteId,
    pub ends: (StopId, StopId),
    pub mode: TransportMode,
    /// Costs after overlay adjustments.
    pub info: RouteInfo,
}

impl EdgeChoice {
    pub fn far_end(&self, from: StopId) -> StopId {
        if self.ends.0 == from {
            self.ends.1
        } else {
            self.ends.0
        }
    }
}

/// Pick the cheapest mode on a route among `allowed`.
///
/// Modes the route lacks or the overlay disables on it are skipped. Modes are
/// scanned in enumeration order and the first of equally cheap ones wins.
pub(crate) fn cheapest_mode(
    route_id: RouteId,
    route: &Route,
    allowed: &BTreeSet<TransportMode>,
    overlay: &Overlay,
    cost: CostStrategy,
) -> Option<(TransportMode, RouteInfo)> {
    let mut best: Option<(TransportMode, RouteInfo, f64)> = None;
    for (mode, info) in route.iter() {
        if !allowed.contains(&mode) || overlay.is_mode_disabled(route_id, mode) {
            continue;
        }
        let info = cost.effective_info(mode, info, overlay);
        let value = cost.cost_of(&info);
        if best.is_none_or(|(_, _, current)| value < current) {
            best = Some((mode, info, value));
        }
    }
    best.map(|(mode, info, _)| (mode, info))
}

/// The map as one query sees it.
#[derive(Debug, Clone)]
pub(crate) struct QueryGraph {
    edges: Vec<EdgeChoice>,
    incident: HashMap<StopId, Vec<usize>>,
    stop_count: usize,
}

impl QueryGraph {
    pub fn build(
        map: &TransportMap,
        overlay: &Overlay,
        cost: CostStrategy,
        allowed: &BTreeSet<TransportMode>,
    ) -> Self {
        let mut edges = Vec::new();
        let mut incident: HashMap<StopId, Vec<usize>> = HashMap::new();
        for route_id in map.route_ids() {
            if overlay.is_route_disabled(route_id) {
                continue;
            }
            let (Some(route), Some(ends)) = (map.route(route_id), map.endpoints(route_id)) else {
                continue;
            };
            let Some((mode, info)) = cheapest_mode(route_id, route, allowed, overlay, cost) else {
                trace!(route = route_id.index(), "no eligible mode");
                continue;
            };
            let index = edges.len();
            edges.push(EdgeChoice {
                route: route_id,
                ends,
                mode,
                info,
            });
            incident.entry(ends.0).or_default().push(index);
            incident.entry(ends.1).or_default().push(index);
        }
        Self {
            edges,
            incident,
            stop_count: map.stop_count(),
        }
    }

    pub fn edges(&self) -> &[EdgeChoice] {
        &self.edges
    }

    pub fn incident(&self, stop: StopId) -> impl Iterator<Item = &EdgeChoice> + '_ {
        self.incident
            .get(&stop)
            .into_iter()
            .flatten()
            .map(|&index| &self.edges[index])
    }

    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    /// Upper bound on the distinct arrivals a search can label: the origin,
    /// plus each usable route in either direction.
    pub fn arrival_count(&self) -> usize {
        2 * self.edges.len() + 1
    }
}

/// A stop together with the route it was reached by.
///
/// Labels are kept per arrival rather than per stop, so a route can be
/// crossed in one direction on the way to one stop and in the other on the
/// way to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Arrival {
    pub stop: StopId,
    pub via: Option<RouteId>,
}

impl Arrival {
    pub fn origin(stop: StopId) -> Self {
        Self { stop, via: None }
    }
}

#[derive(Debug, Clone, Copy)]
struct Label {
    segment: PathSegmentInfo,
    previous: Option<Arrival>,
}

/// Accumulated costs for every arrival reached so far in one query.
#[derive(Debug, Clone)]
pub(crate) struct SearchTable {
    criteria: PathCriteria,
    labels: BTreeMap<Arrival, Label>,
}

impl SearchTable {
    pub fn new(criteria: PathCriteria, origin: StopId) -> Self {
        let label = Label {
            segment: PathSegmentInfo::origin(),
            previous: None,
        };
        Self {
            criteria,
            labels: BTreeMap::from([(Arrival::origin(origin), label)]),
        }
    }

    pub fn cost(&self, arrival: Arrival) -> Option<f64> {
        self.labels
            .get(&arrival)
            .and_then(|label| label.segment.get(self.criteria))
    }

    /// Every arrival reached so far, in a stable order.
    pub fn arrivals(&self) -> impl Iterator<Item = Arrival> + '_ {
        self.labels.keys().copied()
    }

    /// The cheapest arrival at `stop`; the first in order wins a tie.
    pub fn best(&self, stop: StopId) -> Option<(Arrival, &PathSegmentInfo)> {
        let mut best: Option<(Arrival, &PathSegmentInfo, f64)> = None;
        for (arrival, label) in self.labels.range(Arrival::origin(stop)..) {
            if arrival.stop != stop {
                break;
            }
            let Some(cost) = label.segment.get(self.criteria) else {
                continue;
            };
            if best.is_none_or(|(_, _, current)| cost < current) {
                best = Some((*arrival, &label.segment, cost));
            }
        }
        best.map(|(arrival, segment, _)| (arrival, segment))
    }

    /// The label `edge` would give its far end if travelled from `from`, if
    /// that beats the far end's current cost for the same arrival route.
    ///
    /// A route is never travelled straight back the way `from` was reached,
    /// so an undirected route with a negative cost does not count as a cycle
    /// on its own.
    fn improvement(&self, from: Arrival, edge: &EdgeChoice) -> Option<(Arrival, Label)> {
        if from.via == Some(edge.route) {
            return None;
        }
        let source = &self.labels.get(&from)?.segment;
        let base = source.get(self.criteria)?;
        let to = Arrival {
            stop: edge.far_end(from.stop),
            via: Some(edge.route),
        };
        let candidate = base + edge.info.get(self.criteria);
        if self.cost(to).is_some_and(|current| candidate >= current) {
            return None;
        }

        let mut segment = PathSegmentInfo {
            predecessor: Some(from.stop),
            hop: Some(Hop {
                route: edge.route,
                mode: edge.mode,
                info: edge.info,
            }),
            ..PathSegmentInfo::default()
        };
        segment.set(self.criteria, candidate);
        for other in self.criteria.others() {
            let step = edge.info.get(other);
            segment.set(other, source.get(other).map_or(step, |so_far| so_far + step));
        }
        Some((
            to,
            Label {
                segment,
                previous: Some(from),
            },
        ))
    }

    /// Whether travelling `edge` from `from` would improve its far end.
    pub fn can_relax(&self, from: Arrival, edge: &EdgeChoice) -> bool {
        self.improvement(from, edge).is_some()
    }

    /// Apply the relaxation rule. Returns the improved arrival and its new
    /// cost.
    pub fn relax(&mut self, from: Arrival, edge: &EdgeChoice) -> Option<(Arrival, f64)> {
        let (to, label) = self.improvement(from, edge)?;
        let cost = label.segment.get(self.criteria)?;
        self.labels.insert(to, label);
        Some((to, cost))
    }

    /// Follow predecessors back from the cheapest arrival at `destination`.
    ///
    /// Returns `Ok(None)` if the destination was never reached. A chain
    /// longer than `limit` arrivals can only come from a negative cycle. The
    /// walk found may revisit a stop; loops that cost nothing are cut out and
    /// a loop with a negative cost is reported as a negative cycle.
    pub fn trace(
        &self,
        origin: StopId,
        destination: StopId,
        limit: usize,
    ) -> Result<Option<(Vec<StopId>, Vec<Hop>)>, PathError> {
        let Some((mut current, _)) = self.best(destination) else {
            return Ok(None);
        };
        let mut stops = vec![current.stop];
        let mut hops = Vec::new();
        while current != Arrival::origin(origin) {
            if stops.len() > limit {
                return Err(PathError::NegativeCycle(self.criteria));
            }
            let label = self
                .labels
                .get(&current)
                .ok_or(PathError::InvalidResult("broken predecessor chain"))?;
            let (Some(previous), Some(hop)) = (label.previous, label.segment.hop) else {
                return Err(PathError::InvalidResult("broken predecessor chain"));
            };
            hops.push(hop);
            stops.push(previous.stop);
            current = previous;
        }
        stops.reverse();
        hops.reverse();
        self.without_loops(stops, hops).map(Some)
    }

    /// Cut closed loops out of a walk so that no stop appears twice.
    fn without_loops(
        &self,
        walk: Vec<StopId>,
        hops: Vec<Hop>,
    ) -> Result<(Vec<StopId>, Vec<Hop>), PathError> {
        // Cost of the walk up to each of its stops.
        let mut reached = Vec::with_capacity(walk.len());
        reached.push(0.0);
        for hop in &hops {
            let so_far = reached.last().copied().unwrap_or(0.0);
            reached.push(so_far + hop.info.get(self.criteria));
        }

        // Each kept stop remembers its index in the walk.
        let mut kept: Vec<(StopId, usize)> = Vec::with_capacity(walk.len());
        let mut kept_hops: Vec<Hop> = Vec::with_capacity(hops.len());
        for (index, &stop) in walk.iter().enumerate() {
            match kept.iter().position(|&(seen, _)| seen == stop) {
                Some(position) => {
                    let loop_cost = reached[index] - reached[kept[position].1];
                    if loop_cost < 0.0 {
                        debug!(loop_cost, "walk loops at a negative cost");
                        return Err(PathError::NegativeCycle(self.criteria));
                    }
                    trace!(loop_cost, "cutting loop from walk");
                    kept.truncate(position + 1);
                    kept_hops.truncate(position);
                }
                None => {
                    if index > 0 {
                        kept_hops.push(hops[index - 1]);
                    }
                    kept.push((stop, index));
                }
            }
        }
        Ok((kept.into_iter().map(|(stop, _)| stop).collect(), kept_hops))
    }
}
