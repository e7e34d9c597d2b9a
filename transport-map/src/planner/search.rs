//! The route planner: one path strategy paired with one cost strategy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::table::QueryGraph;
use super::{CostStrategy, PathError, PathRequest, PathResult, bellman_ford, dfs, dijkstra, trip};
use crate::domain::{PathCriteria, StopCode};
use crate::network::{StopId, TransportMap};
use crate::overlay::Overlay;

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown path strategy: {0}")]
pub struct InvalidPathStrategy(String);

/// The search algorithm used for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathStrategy {
    /// Non-negative costs only.
    Dijkstra,
    /// Any costs; fails on negative cycles.
    BellmanFord,
    /// Depth-first, label-correcting. Non-negative costs only.
    DepthFirst,
}

impl PathStrategy {
    pub const ALL: [PathStrategy; 3] = [
        PathStrategy::Dijkstra,
        PathStrategy::BellmanFord,
        PathStrategy::DepthFirst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PathStrategy::Dijkstra => "dijkstra",
            PathStrategy::BellmanFord => "bellman-ford",
            PathStrategy::DepthFirst => "depth-first",
        }
    }

    /// Whether this algorithm is correct for the costs of `criteria`.
    pub fn supports(&self, criteria: PathCriteria) -> bool {
        match self {
            PathStrategy::BellmanFord => true,
            PathStrategy::Dijkstra | PathStrategy::DepthFirst => !criteria.may_be_negative(),
        }
    }
}

impl fmt::Display for PathStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathStrategy {
    type Err = InvalidPathStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(PathStrategy::Dijkstra),
            "bellman-ford" | "bellman_ford" | "bellman" => Ok(PathStrategy::BellmanFord),
            "depth-first" | "depth_first" | "dfs" => Ok(PathStrategy::DepthFirst),
            _ => Err(InvalidPathStrategy(s.to_string())),
        }
    }
}

/// Answers least-cost path queries over a map and its overlay.
///
/// The planner borrows both; build one per query batch.
#[derive(Debug, Clone, Copy)]
pub struct RoutePlanner<'a> {
    map: &'a TransportMap,
    overlay: &'a Overlay,
    strategy: PathStrategy,
    cost: CostStrategy,
}

impl<'a> RoutePlanner<'a> {
    /// Pair a strategy with a cost strategy.
    ///
    /// Fails if the algorithm cannot handle the costs it would be given.
    pub fn new(
        map: &'a TransportMap,
        overlay: &'a Overlay,
        strategy: PathStrategy,
        cost: CostStrategy,
    ) -> Result<Self, PathError> {
        if !strategy.supports(cost.criteria()) {
            return Err(PathError::UnsupportedCriteria {
                strategy,
                criteria: cost.criteria(),
            });
        }
        Ok(Self {
            map,
            overlay,
            strategy,
            cost,
        })
    }

    pub fn strategy(&self) -> PathStrategy {
        self.strategy
    }

    pub fn cost(&self) -> CostStrategy {
        self.cost
    }

    pub fn map(&self) -> &'a TransportMap {
        self.map
    }

    /// Find the least-cost path for `request`.
    ///
    /// Requests with waypoints are composed leg by leg.
    pub fn least_cost_path(&self, request: &PathRequest) -> Result<PathResult, PathError> {
        request.validate()?;
        if !request.waypoints.is_empty() {
            return trip::compose(self, request);
        }
        let origin = self.resolve(&request.origin)?;
        let destination = self.resolve(&request.destination)?;
        let graph = self.query_graph(request);
        self.search(&graph, origin, destination)
    }

    pub(super) fn resolve(&self, code: &StopCode) -> Result<StopId, PathError> {
        self.map
            .stop_id(code)
            .ok_or_else(|| PathError::StopNotFound(code.clone()))
    }

    pub(super) fn query_graph(&self, request: &PathRequest) -> QueryGraph {
        QueryGraph::build(self.map, self.overlay, self.cost, &request.allowed_modes)
    }

    /// Run the algorithm between two resolved stops.
    pub(super) fn search(
        &self,
        graph: &QueryGraph,
        origin: StopId,
        destination: StopId,
    ) -> Result<PathResult, PathError> {
        let criteria = self.cost.criteria();
        debug!(
            strategy = %self.strategy,
            %criteria,
            origin = origin.index(),
            destination = destination.index(),
            stops = graph.stop_count(),
            routes = graph.edges().len(),
            "searching"
        );

        let table = match self.strategy {
            PathStrategy::Dijkstra => dijkstra::search(graph, criteria, origin, destination),
            PathStrategy::BellmanFord => bellman_ford::search(graph, criteria, origin)?,
            PathStrategy::DepthFirst => dfs::search(graph, criteria, origin),
        };

        match table.trace(origin, destination, graph.arrival_count())? {
            Some((stops, hops)) => PathResult::from_hops(stops, hops),
            None => Err(self.no_path(origin, destination)),
        }
    }

    fn no_path(&self, origin: StopId, destination: StopId) -> PathError {
        let code = |id| self.map.stop(id).map(|stop| stop.code().clone());
        match (code(origin), code(destination)) {
            (Some(origin), Some(destination)) => PathError::NoPath {
                origin,
                destination,
            },
            _ => PathError::InvalidResult("search endpoint left the map"),
        }
    }
}
