//! Dijkstra's algorithm over non-negative costs.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use ordered_float::OrderedFloat;
use tracing::trace;

use super::table::{Arrival, QueryGraph, SearchTable};
use crate::domain::PathCriteria;
use crate::network::StopId;

pub(super) fn search(
    graph: &QueryGraph,
    criteria: PathCriteria,
    origin: StopId,
    destination: StopId,
) -> SearchTable {
    let mut table = SearchTable::new(criteria, origin);
    let mut queue = BinaryHeap::new();
    let mut settled = HashSet::new();
    queue.push(Reverse((OrderedFloat(0.0), Arrival::origin(origin))));

    while let Some(Reverse((_, arrival))) = queue.pop() {
        if !settled.insert(arrival) {
            continue;
        }
        if arrival.stop == destination {
            break;
        }
        for edge in graph.incident(arrival.stop) {
            let next = Arrival {
                stop: edge.far_end(arrival.stop),
                via: Some(edge.route),
            };
            if settled.contains(&next) {
                continue;
            }
            if let Some((to, cost)) = table.relax(arrival, edge) {
                queue.push(Reverse((OrderedFloat(cost), to)));
            }
        }
    }

    trace!(settled = settled.len(), "dijkstra finished");
    table
}
