//! Bellman-Ford over costs that may be negative.

use tracing::{debug, trace};

use super::PathError;
use super::table::{Arrival, QueryGraph, SearchTable};
use crate::domain::PathCriteria;
use crate::network::StopId;

/// Relax every usable route out of every labelled arrival until nothing
/// changes, for at most one pass fewer than there are possible arrivals.
/// Anything still relaxable after that lies on a negative cycle.
pub(super) fn search(
    graph: &QueryGraph,
    criteria: PathCriteria,
    origin: StopId,
) -> Result<SearchTable, PathError> {
    let mut table = SearchTable::new(criteria, origin);
    let passes = graph.arrival_count().saturating_sub(1);

    for pass in 0..passes {
        let mut changed = false;
        let arrivals: Vec<Arrival> = table.arrivals().collect();
        for arrival in arrivals {
            for edge in graph.incident(arrival.stop) {
                changed |= table.relax(arrival, edge).is_some();
            }
        }
        if !changed {
            trace!(pass, "bellman-ford converged");
            return Ok(table);
        }
    }

    let cyclic = table.arrivals().any(|arrival| {
        graph
            .incident(arrival.stop)
            .any(|edge| table.can_relax(arrival, edge))
    });
    if cyclic {
        debug!(%criteria, "negative cycle detected");
        return Err(PathError::NegativeCycle(criteria));
    }
    Ok(table)
}
