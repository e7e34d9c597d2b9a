//! The transport map: an undirected graph of stops joined by routes.
//!
//! Stops are vertices keyed by their code; routes are edges carrying a
//! per-mode cost table. There is at most one route between any unordered pair
//! of stops. Handles ([`StopId`], [`RouteId`]) stay valid across removals of
//! other stops.

mod error;
mod import;
mod reach;
mod stats;

use std::collections::HashMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use tracing::{debug, trace};

use crate::domain::{Route, Stop, StopCode};

pub use error::GraphError;
pub use import::{ImportError, ImportSummary, ModeCosts, NetworkData, RouteRecord, StopRecord};
pub use stats::{Centrality, NetworkSummary};

/// Handle to a stop (vertex) in a [`TransportMap`].
pub type StopId = NodeIndex;

/// Handle to a route (edge) in a [`TransportMap`].
pub type RouteId = EdgeIndex;

/// Graph of stops and routes.
#[derive(Debug, Clone, Default)]
pub struct TransportMap {
    graph: StableUnGraph<Stop, Route>,
    by_code: HashMap<StopCode, StopId>,
}

impl TransportMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a stop, returning its handle.
    ///
    /// Inserting a stop whose code is already present returns the existing
    /// handle and leaves the stored stop unchanged.
    pub fn insert_stop(&mut self, stop: Stop) -> StopId {
        if let Some(&id) = self.by_code.get(stop.code()) {
            trace!(code = %stop.code(), "stop already present");
            return id;
        }
        let code = stop.code().clone();
        let id = self.graph.add_node(stop);
        self.by_code.insert(code, id);
        id
    }

    /// Insert a route between two stops identified by code.
    ///
    /// See [`TransportMap::insert_route_between`].
    pub fn insert_route(
        &mut self,
        a: &StopCode,
        b: &StopCode,
        route: Route,
    ) -> Result<RouteId, GraphError> {
        let a = self.require_code(a)?;
        let b = self.require_code(b)?;
        self.insert_route_between(a, b, route)
    }

    /// Insert a route between two existing stops.
    ///
    /// If the pair is already joined (in either direction) the existing route
    /// handle is returned and `route` is discarded.
    pub fn insert_route_between(
        &mut self,
        a: StopId,
        b: StopId,
        route: Route,
    ) -> Result<RouteId, GraphError> {
        self.require_stop(a)?;
        self.require_stop(b)?;
        if a == b {
            return Err(GraphError::InvalidArgument(
                "a route must join two different stops",
            ));
        }
        if let Some(existing) = self.graph.find_edge(a, b) {
            trace!(route = existing.index(), "route already present");
            return Ok(existing);
        }
        Ok(self.graph.add_edge(a, b, route))
    }

    /// Remove a stop and every route touching it.
    ///
    /// Returns the removed stop together with the handles of the removed
    /// routes, so callers holding per-route state can discard it.
    pub fn remove_stop(&mut self, id: StopId) -> Result<(Stop, Vec<RouteId>), GraphError> {
        let routes = self.incident_routes(id)?;
        let stop = self
            .graph
            .remove_node(id)
            .ok_or(GraphError::UnknownVertex(id.index()))?;
        self.by_code.remove(stop.code());
        debug!(code = %stop.code(), routes = routes.len(), "removed stop");
        Ok((stop, routes))
    }

    /// Remove a stop by code. See [`TransportMap::remove_stop`].
    pub fn remove_stop_by_code(
        &mut self,
        code: &StopCode,
    ) -> Result<(Stop, Vec<RouteId>), GraphError> {
        let id = self.require_code(code)?;
        self.remove_stop(id)
    }

    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.graph.node_weight(id)
    }

    pub fn stop_id(&self, code: &StopCode) -> Option<StopId> {
        self.by_code.get(code).copied()
    }

    pub fn stop_by_code(&self, code: &StopCode) -> Option<&Stop> {
        self.stop_id(code).and_then(|id| self.stop(id))
    }

    pub fn contains_stop(&self, id: StopId) -> bool {
        self.graph.contains_node(id)
    }

    pub fn has_stop(&self, code: &StopCode) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.graph.edge_weight(id)
    }

    /// The two stops a route joins, in insertion order.
    pub fn endpoints(&self, id: RouteId) -> Option<(StopId, StopId)> {
        self.graph.edge_endpoints(id)
    }

    /// The route joining two stops, if any.
    pub fn route_between(&self, a: StopId, b: StopId) -> Option<RouteId> {
        if !self.contains_stop(a) || !self.contains_stop(b) {
            return None;
        }
        self.graph.find_edge(a, b)
    }

    /// The route joining two stops identified by code.
    pub fn route_between_codes(&self, a: &StopCode, b: &StopCode) -> Result<RouteId, GraphError> {
        let a_id = self.require_code(a)?;
        let b_id = self.require_code(b)?;
        self.route_between(a_id, b_id)
            .ok_or_else(|| GraphError::NoRouteBetween(a.clone(), b.clone()))
    }

    /// Whether a route joins the two stops. Unknown stops are never adjacent.
    pub fn are_adjacent(&self, a: StopId, b: StopId) -> bool {
        self.route_between(a, b).is_some()
    }

    /// Stops joined to `id` by a route.
    pub fn neighbors(&self, id: StopId) -> Result<Vec<StopId>, GraphError> {
        self.require_stop(id)?;
        Ok(self.graph.neighbors(id).collect())
    }

    /// Stops joined by a route to the stop with the given code.
    pub fn neighbors_of(&self, code: &StopCode) -> Result<Vec<StopId>, GraphError> {
        let id = self.require_code(code)?;
        self.neighbors(id)
    }

    /// Routes touching a stop.
    pub fn incident_routes(&self, id: StopId) -> Result<Vec<RouteId>, GraphError> {
        self.require_stop(id)?;
        Ok(self.graph.edges(id).map(|edge| edge.id()).collect())
    }

    /// The endpoint of `route` that is not `stop`.
    ///
    /// Returns `Ok(None)` when `stop` is not an endpoint of `route`; fails
    /// only when either handle is unknown to the map.
    pub fn opposite(&self, stop: StopId, route: RouteId) -> Result<Option<StopId>, GraphError> {
        self.require_stop(stop)?;
        let (a, b) = self
            .endpoints(route)
            .ok_or(GraphError::UnknownRoute(route.index()))?;
        Ok(if a == stop {
            Some(b)
        } else if b == stop {
            Some(a)
        } else {
            None
        })
    }

    /// All stop handles, in index order.
    pub fn stop_ids(&self) -> impl Iterator<Item = StopId> + '_ {
        self.graph.node_indices()
    }

    /// All stops, in index order.
    pub fn stops(&self) -> impl Iterator<Item = (StopId, &Stop)> + '_ {
        self.graph
            .node_indices()
            .filter_map(|id| self.graph.node_weight(id).map(|stop| (id, stop)))
    }

    /// All route handles, in index order.
    pub fn route_ids(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.graph.edge_indices()
    }

    pub fn stop_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn route_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// "A -> B" label for a route, using stop names.
    pub fn route_label(&self, id: RouteId) -> Option<String> {
        let (a, b) = self.endpoints(id)?;
        Some(format!("{} -> {}", self.stop(a)?, self.stop(b)?))
    }

    fn require_stop(&self, id: StopId) -> Result<(), GraphError> {
        if self.contains_stop(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(id.index()))
        }
    }

    fn require_code(&self, code: &StopCode) -> Result<StopId, GraphError> {
        self.stop_id(code)
            .ok_or_else(|| GraphError::UnknownStop(code.clone()))
    }
}
