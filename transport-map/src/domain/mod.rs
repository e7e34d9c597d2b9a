//! Domain types for the transport network.
//!
//! This module contains the validated value types shared by the graph store,
//! the overlay and the path planner. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod criteria;
mod route;
mod stop;
mod transport;

pub use criteria::{InvalidPathCriteria, PathCriteria};
pub use route::{InvalidRouteInfo, Route, RouteInfo};
pub use stop::{InvalidStop, Stop, StopCode};
pub use transport::{InvalidTransportMode, TransportMode};
