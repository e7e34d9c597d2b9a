//! The configuration overlay: session-local facts layered over the map.
//!
//! An [`Overlay`] records which routes are switched off, which modes are
//! switched off on particular routes, and how bicycle durations are scaled.
//! It is consulted by every path query and never alters the
//! [`TransportMap`](crate::network::TransportMap) itself.
//!
//! Mutations are expressed as [`OverlayCommand`] values and run through a
//! [`CommandLog`], which keeps one undo stack per [`CommandCategory`].

mod command;
mod error;
mod log;
mod persist;
mod state;

pub use command::{CommandCategory, OverlayCommand};
pub use error::{OverlayError, PersistError};
pub use log::{CommandLog, LoggedCommand};
pub use persist::{DisabledModes, OverlaySnapshot, StopPair};
pub use state::{
    DEFAULT_BICYCLE_SCALE, MAX_BICYCLE_SCALE, MIN_BICYCLE_SCALE, Overlay, check_bicycle_scale,
};
