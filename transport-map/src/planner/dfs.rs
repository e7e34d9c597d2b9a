//! Depth-first least-cost search.
//!
//! Arrivals are explored from an explicit stack. One is pushed again whenever
//! its cost improves, so the final costs match Dijkstra's for non-negative
//! metrics even though the visiting order differs.

use tracing::trace;

use super::table::{Arrival, QueryGraph, SearchTable};
use crate::domain::PathCriteria;
use crate::network::StopId;

pub(super) fn search(graph: &QueryGraph, criteria: PathCriteria, origin: StopId) -> SearchTable {
    let mut table = SearchTable::new(criteria, origin);
    let mut stack = vec![Arrival::origin(origin)];
    let mut visits = 0usize;

    while let Some(arrival) = stack.pop() {
        visits += 1;
        for edge in graph.incident(arrival.stop) {
            if let Some((to, _)) = table.relax(arrival, edge) {
                stack.push(to);
            }
        }
    }

    trace!(visits, "depth-first search finished");
    table
}
