//! Overlay mutations as values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Overlay, OverlayError};
use crate::domain::TransportMode;
use crate::network::{RouteId, TransportMap};

/// The undo stack a command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandCategory {
    Route,
    RouteMode,
    BicycleScale,
}

impl CommandCategory {
    pub const ALL: [CommandCategory; 3] = [
        CommandCategory::Route,
        CommandCategory::RouteMode,
        CommandCategory::BicycleScale,
    ];
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandCategory::Route => "route",
            CommandCategory::RouteMode => "route mode",
            CommandCategory::BicycleScale => "bicycle scale",
        })
    }
}

/// A reversible change to an [`Overlay`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayCommand {
    DisableRoute { route: RouteId },
    EnableRoute { route: RouteId },
    DisableMode { route: RouteId, mode: TransportMode },
    EnableMode { route: RouteId, mode: TransportMode },
    ChangeBicycleScale { from: f64, to: f64 },
}

impl OverlayCommand {
    /// A scale change from the overlay's current value to `to`.
    pub fn change_bicycle_scale(overlay: &Overlay, to: f64) -> Self {
        OverlayCommand::ChangeBicycleScale {
            from: overlay.bicycle_duration_scale(),
            to,
        }
    }

    pub fn category(&self) -> CommandCategory {
        match self {
            OverlayCommand::DisableRoute { .. } | OverlayCommand::EnableRoute { .. } => {
                CommandCategory::Route
            }
            OverlayCommand::DisableMode { .. } | OverlayCommand::EnableMode { .. } => {
                CommandCategory::RouteMode
            }
            OverlayCommand::ChangeBicycleScale { .. } => CommandCategory::BicycleScale,
        }
    }

    /// The route this command touches, if any.
    pub fn route(&self) -> Option<RouteId> {
        match *self {
            OverlayCommand::DisableRoute { route }
            | OverlayCommand::EnableRoute { route }
            | OverlayCommand::DisableMode { route, .. }
            | OverlayCommand::EnableMode { route, .. } => Some(route),
            OverlayCommand::ChangeBicycleScale { .. } => None,
        }
    }

    /// Apply the command. Returns whether the overlay changed.
    pub fn execute(&self, overlay: &mut Overlay) -> Result<bool, OverlayError> {
        Ok(match *self {
            OverlayCommand::DisableRoute { route } => overlay.disable_route(route),
            OverlayCommand::EnableRoute { route } => overlay.enable_route(route),
            OverlayCommand::DisableMode { route, mode } => overlay.disable_mode(route, mode),
            OverlayCommand::EnableMode { route, mode } => overlay.enable_mode(route, mode),
            OverlayCommand::ChangeBicycleScale { to, .. } => {
                let previous = overlay.set_bicycle_duration_scale(to)?;
                previous != to
            }
        })
    }

    /// Reverse an earlier [`execute`](Self::execute). A command that changed
    /// nothing is undone by doing nothing.
    pub fn undo(&self, changed: bool, overlay: &mut Overlay) -> Result<(), OverlayError> {
        if !changed {
            return Ok(());
        }
        match *self {
            OverlayCommand::DisableRoute { route } => {
                overlay.enable_route(route);
            }
            OverlayCommand::EnableRoute { route } => {
                overlay.disable_route(route);
            }
            OverlayCommand::DisableMode { route, mode } => {
                overlay.enable_mode(route, mode);
            }
            OverlayCommand::EnableMode { route, mode } => {
                overlay.disable_mode(route, mode);
            }
            OverlayCommand::ChangeBicycleScale { from, .. } => {
                overlay.set_bicycle_duration_scale(from)?;
            }
        }
        Ok(())
    }

    /// One-line description using stop names from `map`.
    pub fn describe(&self, map: &TransportMap) -> String {
        let label = |route: RouteId| {
            map.route_label(route)
                .unwrap_or_else(|| format!("route #{}", route.index()))
        };
        match *self {
            OverlayCommand::DisableRoute { route } => format!("disable {}", label(route)),
            OverlayCommand::EnableRoute { route } => format!("enable {}", label(route)),
            OverlayCommand::DisableMode { route, mode } => {
                format!("disable {mode} on {}", label(route))
            }
            OverlayCommand::EnableMode { route, mode } => {
                format!("enable {mode} on {}", label(route))
            }
            OverlayCommand::ChangeBicycleScale { from, to } => {
                format!("bicycle duration scale {from:.2} -> {to:.2}")
            }
        }
    }
}
