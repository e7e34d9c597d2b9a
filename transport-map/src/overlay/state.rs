//! Overlay state.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::trace;

use super::OverlayError;
use crate::domain::TransportMode;
use crate::network::RouteId;

pub const MIN_BICYCLE_SCALE: f64 = 0.25;
pub const MAX_BICYCLE_SCALE: f64 = 2.0;
pub const DEFAULT_BICYCLE_SCALE: f64 = 1.0;

/// Validate a bicycle duration scale.
pub fn check_bicycle_scale(scale: f64) -> Result<f64, OverlayError> {
    if (MIN_BICYCLE_SCALE..=MAX_BICYCLE_SCALE).contains(&scale) {
        Ok(scale)
    } else {
        Err(OverlayError::ScaleOutOfRange(scale))
    }
}

/// Disabled routes, disabled modes per route, and the bicycle duration scale.
///
/// Mutators return whether they changed anything, which is what lets a
/// command be undone exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    disabled_routes: HashSet<RouteId>,
    disabled_modes: HashMap<RouteId, BTreeSet<TransportMode>>,
    bicycle_duration_scale: f64,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            disabled_routes: HashSet::new(),
            disabled_modes: HashMap::new(),
            bicycle_duration_scale: DEFAULT_BICYCLE_SCALE,
        }
    }
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an overlay with a non-default bicycle scale.
    pub fn with_bicycle_scale(scale: f64) -> Result<Self, OverlayError> {
        Ok(Self {
            bicycle_duration_scale: check_bicycle_scale(scale)?,
            ..Self::default()
        })
    }

    pub fn disable_route(&mut self, route: RouteId) -> bool {
        let changed = self.disabled_routes.insert(route);
        trace!(route = route.index(), changed, "disable route");
        changed
    }

    pub fn enable_route(&mut self, route: RouteId) -> bool {
        let changed = self.disabled_routes.remove(&route);
        trace!(route = route.index(), changed, "enable route");
        changed
    }

    pub fn is_route_disabled(&self, route: RouteId) -> bool {
        self.disabled_routes.contains(&route)
    }

    /// Disable a mode on a route, whether or not the route offers it.
    pub fn disable_mode(&mut self, route: RouteId, mode: TransportMode) -> bool {
        let changed = self.disabled_modes.entry(route).or_default().insert(mode);
        trace!(route = route.index(), %mode, changed, "disable mode");
        changed
    }

    pub fn enable_mode(&mut self, route: RouteId, mode: TransportMode) -> bool {
        let Some(modes) = self.disabled_modes.get_mut(&route) else {
            return false;
        };
        let changed = modes.remove(&mode);
        if modes.is_empty() {
            self.disabled_modes.remove(&route);
        }
        trace!(route = route.index(), %mode, changed, "enable mode");
        changed
    }

    pub fn is_mode_disabled(&self, route: RouteId, mode: TransportMode) -> bool {
        self.disabled_modes
            .get(&route)
            .is_some_and(|modes| modes.contains(&mode))
    }

    /// Modes disabled on one route, in enumeration order.
    pub fn disabled_modes(&self, route: RouteId) -> impl Iterator<Item = TransportMode> + '_ {
        self.disabled_modes
            .get(&route)
            .into_iter()
            .flat_map(|modes| modes.iter().copied())
    }

    /// Every disabled route, in index order.
    pub fn disabled_routes(&self) -> Vec<RouteId> {
        let mut routes: Vec<_> = self.disabled_routes.iter().copied().collect();
        routes.sort();
        routes
    }

    /// Every route with at least one disabled mode, in index order.
    pub fn routes_with_disabled_modes(&self) -> Vec<(RouteId, &BTreeSet<TransportMode>)> {
        let mut entries: Vec<_> = self
            .disabled_modes
            .iter()
            .map(|(route, modes)| (*route, modes))
            .collect();
        entries.sort_by_key(|(route, _)| *route);
        entries
    }

    pub fn bicycle_duration_scale(&self) -> f64 {
        self.bicycle_duration_scale
    }

    /// Set the bicycle scale, returning the previous value.
    pub fn set_bicycle_duration_scale(&mut self, scale: f64) -> Result<f64, OverlayError> {
        let scale = check_bicycle_scale(scale)?;
        Ok(std::mem::replace(&mut self.bicycle_duration_scale, scale))
    }

    /// Clear all disabled routes and modes. The bicycle scale is kept.
    pub fn clear_disabled(&mut self) {
        self.disabled_routes.clear();
        self.disabled_modes.clear();
    }

    /// Drop every fact about a route that no longer exists.
    pub fn forget_route(&mut self, route: RouteId) {
        self.disabled_routes.remove(&route);
        self.disabled_modes.remove(&route);
    }

    /// Whether nothing is disabled.
    pub fn has_no_disabled(&self) -> bool {
        self.disabled_routes.is_empty() && self.disabled_modes.is_empty()
    }
}
