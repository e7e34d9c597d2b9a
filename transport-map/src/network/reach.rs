//! Reachability walks over the map, ignoring costs and the overlay.

use std::collections::{HashMap, VecDeque};

use petgraph::visit::{Bfs, Dfs};

use super::{GraphError, StopId, TransportMap};
use crate::domain::StopCode;

impl TransportMap {
    /// Stops at most `max_routes` routes away from `origin`, nearest first.
    ///
    /// The origin itself is not included, so a limit of zero yields nothing.
    pub fn stops_within(
        &self,
        origin: &StopCode,
        max_routes: usize,
    ) -> Result<Vec<StopId>, GraphError> {
        let origin = self.require_code(origin)?;
        let mut depth = HashMap::from([(origin, 0usize)]);
        let mut queue = VecDeque::from([origin]);
        let mut found = Vec::new();

        while let Some(stop) = queue.pop_front() {
            let next_depth = depth[&stop] + 1;
            if next_depth > max_routes {
                continue;
            }
            for neighbor in self.graph.neighbors(stop) {
                if depth.contains_key(&neighbor) {
                    continue;
                }
                depth.insert(neighbor, next_depth);
                found.push(neighbor);
                queue.push_back(neighbor);
            }
        }
        Ok(found)
    }

    /// Every stop connected to `origin`, in breadth-first order starting with
    /// the origin.
    pub fn breadth_first(&self, origin: &StopCode) -> Result<Vec<StopId>, GraphError> {
        let origin = self.require_code(origin)?;
        let mut bfs = Bfs::new(&self.graph, origin);
        let mut order = Vec::new();
        while let Some(stop) = bfs.next(&self.graph) {
            order.push(stop);
        }
        Ok(order)
    }

    /// Every stop connected to `origin`, in depth-first order starting with
    /// the origin.
    pub fn depth_first(&self, origin: &StopCode) -> Result<Vec<StopId>, GraphError> {
        let origin = self.require_code(origin)?;
        let mut dfs = Dfs::new(&self.graph, origin);
        let mut order = Vec::new();
        while let Some(stop) = dfs.next(&self.graph) {
            order.push(stop);
        }
        Ok(order)
    }
}
