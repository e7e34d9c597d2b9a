//! Least-cost path planning.
//!
//! A query names a [`PathCriteria`](crate::domain::PathCriteria) to minimise
//! and the modes it may use. [`resolve_strategy`] picks an algorithm and a
//! [`CostStrategy`] for the criterion; a [`RoutePlanner`] runs the query
//! against a [`TransportMap`](crate::network::TransportMap) as seen through an
//! [`Overlay`](crate::overlay::Overlay).
//!
//! All algorithms share one relaxation rule (see [`PathSegmentInfo`]): each
//! route is travelled by its cheapest eligible mode, costs start unreached
//! rather than at a sentinel, and the two metrics not being minimised are
//! accumulated alongside for reporting.

mod bellman_ford;
mod config;
mod cost;
mod dfs;
mod dijkstra;
mod error;
mod factory;
mod request;
mod result;
mod search;
mod table;
mod trip;

#[cfg(test)]
mod scenario_tests;

pub use config::{ConfigError, RoutingConfig};
pub use cost::CostStrategy;
pub use error::PathError;
pub use factory::resolve_strategy;
pub use request::PathRequest;
pub use result::PathResult;
pub use search::{InvalidPathStrategy, PathStrategy, RoutePlanner};
pub use table::{Hop, PathSegmentInfo};
