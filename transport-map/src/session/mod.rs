//! A routing session: one map, its overlay, the command log and the
//! configuration, behind the query surface used by front ends.

mod shared;

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{PathCriteria, Stop, StopCode, TransportMode};
use crate::network::{GraphError, ImportError, NetworkData, NetworkSummary, RouteId, TransportMap};
use crate::overlay::{
    CommandCategory, CommandLog, Overlay, OverlayCommand, OverlayError, PersistError,
};
use crate::planner::{
    ConfigError, CostStrategy, PathError, PathRequest, PathResult, PathStrategy, RoutePlanner,
    RoutingConfig,
};

pub use shared::SharedSession;

/// Error creating a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Owns all state for one user of the routing engine.
///
/// Not internally synchronised; see [`SharedSession`] for use from async
/// code.
#[derive(Debug)]
pub struct RoutingSession {
    map: TransportMap,
    overlay: Overlay,
    log: CommandLog,
    config: RoutingConfig,
}

impl RoutingSession {
    /// Start a session over `map`.
    ///
    /// If the configuration names an overlay file it is loaded (fail-soft).
    /// When there is no usable file the overlay starts empty with the
    /// configured bicycle scale.
    pub fn new(map: TransportMap, config: RoutingConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let fresh = Overlay::with_bicycle_scale(config.default_bicycle_scale)
            .map_err(|_| ConfigError::BicycleScale(config.default_bicycle_scale))?;
        let overlay = match &config.overlay_path {
            Some(path) => Overlay::load_or(path, &map, fresh),
            None => fresh,
        };
        info!(
            stops = map.stop_count(),
            routes = map.route_count(),
            "routing session started"
        );
        Ok(Self {
            map,
            overlay,
            log: CommandLog::new(),
            config,
        })
    }

    /// Start a session over a map populated from `data`.
    pub fn from_network(data: &NetworkData, config: RoutingConfig) -> Result<Self, SessionError> {
        let mut map = TransportMap::new();
        map.populate(data)?;
        Self::new(map, config)
    }

    pub fn map(&self) -> &TransportMap {
        &self.map
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// The strategy pairing used for `criteria`.
    pub fn resolve_strategy(&self, criteria: PathCriteria) -> (PathStrategy, CostStrategy) {
        self.config.resolve_strategy(criteria)
    }

    pub fn planner(&self, criteria: PathCriteria) -> Result<RoutePlanner<'_>, PathError> {
        let (strategy, cost) = self.resolve_strategy(criteria);
        RoutePlanner::new(&self.map, &self.overlay, strategy, cost)
    }

    /// Least-cost path minimising `criteria`, through any waypoints given.
    pub fn least_cost_path(
        &self,
        criteria: PathCriteria,
        request: &PathRequest,
    ) -> Result<PathResult, PathError> {
        self.planner(criteria)?.least_cost_path(request)
    }

    pub fn summary(&self) -> NetworkSummary {
        self.map.summary()
    }

    /// Remove a stop and every route touching it, purging the overlay and
    /// the command log of those routes.
    pub fn remove_stop(&mut self, code: &StopCode) -> Result<Stop, GraphError> {
        let (stop, routes) = self.map.remove_stop_by_code(code)?;
        for route in routes {
            self.log.forget_route(route, &mut self.overlay);
        }
        Ok(stop)
    }

    fn route(&self, a: &StopCode, b: &StopCode) -> Result<RouteId, OverlayError> {
        Ok(self.map.route_between_codes(a, b)?)
    }

    /// Run a command through the log. Returns whether the overlay changed.
    pub fn execute(&mut self, command: OverlayCommand) -> Result<bool, OverlayError> {
        if let Some(route) = command.route()
            && self.map.route(route).is_none()
        {
            return Err(GraphError::UnknownRoute(route.index()).into());
        }
        self.log.execute(command, &mut self.overlay)
    }

    pub fn disable_route(&mut self, a: &StopCode, b: &StopCode) -> Result<bool, OverlayError> {
        let route = self.route(a, b)?;
        self.execute(OverlayCommand::DisableRoute { route })
    }

    pub fn enable_route(&mut self, a: &StopCode, b: &StopCode) -> Result<bool, OverlayError> {
        let route = self.route(a, b)?;
        self.execute(OverlayCommand::EnableRoute { route })
    }

    pub fn disable_mode(
        &mut self,
        a: &StopCode,
        b: &StopCode,
        mode: TransportMode,
    ) -> Result<bool, OverlayError> {
        let route = self.route(a, b)?;
        self.execute(OverlayCommand::DisableMode { route, mode })
    }

    pub fn enable_mode(
        &mut self,
        a: &StopCode,
        b: &StopCode,
        mode: TransportMode,
    ) -> Result<bool, OverlayError> {
        let route = self.route(a, b)?;
        self.execute(OverlayCommand::EnableMode { route, mode })
    }

    pub fn set_bicycle_scale(&mut self, scale: f64) -> Result<bool, OverlayError> {
        self.execute(OverlayCommand::change_bicycle_scale(&self.overlay, scale))
    }

    /// Undo the newest command of one category.
    pub fn undo(&mut self, category: CommandCategory) -> Result<OverlayCommand, OverlayError> {
        self.log.undo(category, &mut self.overlay)
    }

    /// Clear every disabled route and mode. Not undoable.
    pub fn reset(&mut self) {
        self.log.reset_disabled(&mut self.overlay);
    }

    /// Save the overlay to `path`.
    pub fn save_overlay(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        self.overlay.save(&self.map, path)
    }

    /// Save the overlay to the configured path, if there is one.
    pub fn persist(&self) -> Result<bool, PersistError> {
        match &self.config.overlay_path {
            Some(path) => {
                self.save_overlay(path)?;
                Ok(true)
            }
            None => {
                debug!("no overlay path configured");
                Ok(false)
            }
        }
    }
}
