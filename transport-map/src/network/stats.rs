//! Aggregate statistics over a transport map.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{StopId, TransportMap};
use crate::domain::{Stop, TransportMode};

/// A stop together with the number of routes touching it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centrality<'a> {
    pub id: StopId,
    pub stop: &'a Stop,
    pub routes: usize,
}

/// Snapshot of the headline counts, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub stops: usize,
    pub isolated_stops: usize,
    pub connected_stops: usize,
    pub routes: usize,
    pub routes_by_mode: BTreeMap<TransportMode, usize>,
}

impl TransportMap {
    fn degree(&self, id: StopId) -> usize {
        self.graph.edges(id).count()
    }

    /// Every stop with its route count, busiest first.
    ///
    /// Ties are ordered by name, ignoring case.
    pub fn centrality(&self) -> Vec<Centrality<'_>> {
        let mut ranked: Vec<_> = self
            .stops()
            .map(|(id, stop)| Centrality {
                id,
                stop,
                routes: self.degree(id),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.routes.cmp(&a.routes).then_with(|| {
                a.stop
                    .name()
                    .to_lowercase()
                    .cmp(&b.stop.name().to_lowercase())
            })
        });
        ranked
    }

    /// Stops with no routes.
    pub fn isolated_stop_count(&self) -> usize {
        self.stop_ids().filter(|&id| self.degree(id) == 0).count()
    }

    /// Stops with at least one route.
    pub fn connected_stop_count(&self) -> usize {
        self.stop_count() - self.isolated_stop_count()
    }

    /// Number of routes offering each mode. Every mode is present, including
    /// those with a zero count.
    pub fn routes_by_mode(&self) -> BTreeMap<TransportMode, usize> {
        let mut counts: BTreeMap<_, _> = TransportMode::ALL.into_iter().map(|m| (m, 0)).collect();
        for route in self.route_ids().filter_map(|id| self.route(id)) {
            for mode in route.modes() {
                *counts.entry(mode).or_default() += 1;
            }
        }
        counts
    }

    pub fn summary(&self) -> NetworkSummary {
        let isolated = self.isolated_stop_count();
        NetworkSummary {
            stops: self.stop_count(),
            isolated_stops: isolated,
            connected_stops: self.stop_count() - isolated,
            routes: self.route_count(),
            routes_by_mode: self.routes_by_mode(),
        }
    }
}
