//! Routing configuration.

use std::path::PathBuf;

use super::{PathStrategy, resolve_strategy};
use crate::domain::PathCriteria;
use crate::overlay::{DEFAULT_BICYCLE_SCALE, MAX_BICYCLE_SCALE, MIN_BICYCLE_SCALE};

/// Error returned by [`RoutingConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{strategy} cannot be used for {criteria}")]
    UnsupportedStrategy {
        strategy: PathStrategy,
        criteria: PathCriteria,
    },

    #[error("default bicycle scale {0} is outside [0.25, 2.0]")]
    BicycleScale(f64),
}

/// Configuration for a routing session.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    /// Algorithm used when optimising distance.
    pub distance_strategy: PathStrategy,

    /// Algorithm used when optimising duration.
    pub duration_strategy: PathStrategy,

    /// Algorithm used when optimising sustainability.
    /// Only Bellman-Ford handles its negative costs.
    pub sustainability_strategy: PathStrategy,

    /// Bicycle duration scale for a fresh overlay.
    pub default_bicycle_scale: f64,

    /// Where the overlay is loaded from and saved to, if anywhere.
    pub overlay_path: Option<PathBuf>,
}

impl RoutingConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        distance_strategy: PathStrategy,
        duration_strategy: PathStrategy,
        sustainability_strategy: PathStrategy,
        default_bicycle_scale: f64,
        overlay_path: Option<PathBuf>,
    ) -> Self {
        Self {
            distance_strategy,
            duration_strategy,
            sustainability_strategy,
            default_bicycle_scale,
            overlay_path,
        }
    }

    pub fn strategy_for(&self, criteria: PathCriteria) -> PathStrategy {
        match criteria {
            PathCriteria::Distance => self.distance_strategy,
            PathCriteria::Duration => self.duration_strategy,
            PathCriteria::Sustainability => self.sustainability_strategy,
        }
    }

    /// Override the algorithm for one criterion.
    pub fn set_strategy(&mut self, criteria: PathCriteria, strategy: PathStrategy) {
        match criteria {
            PathCriteria::Distance => self.distance_strategy = strategy,
            PathCriteria::Duration => self.duration_strategy = strategy,
            PathCriteria::Sustainability => self.sustainability_strategy = strategy,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for criteria in PathCriteria::ALL {
            let strategy = self.strategy_for(criteria);
            if !strategy.supports(criteria) {
                return Err(ConfigError::UnsupportedStrategy { strategy, criteria });
            }
        }
        if !(MIN_BICYCLE_SCALE..=MAX_BICYCLE_SCALE).contains(&self.default_bicycle_scale) {
            return Err(ConfigError::BicycleScale(self.default_bicycle_scale));
        }
        Ok(())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            distance_strategy: resolve_strategy(PathCriteria::Distance).0,
            duration_strategy: resolve_strategy(PathCriteria::Duration).0,
            sustainability_strategy: resolve_strategy(PathCriteria::Sustainability).0,
            default_bicycle_scale: DEFAULT_BICYCLE_SCALE,
            overlay_path: None,
        }
    }
}
