//! Multi-modal transport network routing.
//!
//! Answers "what is the cheapest way from this stop to that one?", where
//! cheapest means shortest, fastest or most sustainable, over a network whose
//! routes each offer several modes of transport.
//!
//! - [`network`]: the stop/route graph and its statistics
//! - [`overlay`]: reversible, session-local switches layered over the graph
//! - [`planner`]: Dijkstra, Bellman-Ford and depth-first least-cost search
//! - [`session`]: all of the above behind one query surface

pub mod domain;
pub mod network;
pub mod overlay;
pub mod planner;
pub mod session;
