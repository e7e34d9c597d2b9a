//! Trips through ordered waypoints.

use tracing::debug;

use super::{PathError, PathRequest, PathResult, RoutePlanner};
use crate::network::StopId;

/// Chain least-cost legs origin → waypoint → … → destination into one path.
///
/// Every stop must exist and each consecutive pair must be joined by a
/// route; both are checked before any leg is searched. Totals cover every
/// leg.
pub(super) fn compose(
    planner: &RoutePlanner<'_>,
    request: &PathRequest,
) -> Result<PathResult, PathError> {
    let codes: Vec<_> = request.stops().collect();
    let stops = codes
        .iter()
        .map(|code| planner.resolve(code))
        .collect::<Result<Vec<StopId>, _>>()?;

    for (pair, names) in stops.windows(2).zip(codes.windows(2)) {
        if !planner.map().are_adjacent(pair[0], pair[1]) {
            return Err(PathError::NotAdjacent {
                from: names[0].clone(),
                to: names[1].clone(),
            });
        }
    }

    let graph = planner.query_graph(request);
    let mut legs = stops
        .windows(2)
        .map(|pair| planner.search(&graph, pair[0], pair[1]));

    let first = legs
        .next()
        .ok_or(PathError::InvalidRequest("a trip needs at least one leg"))??;
    let trip = legs.try_fold(first, |trip, leg| trip.join(leg?))?;

    debug!(
        legs = stops.len() - 1,
        stops = trip.stops().len(),
        "composed trip"
    );
    Ok(trip)
}
