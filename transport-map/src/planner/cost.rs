//! Cost strategies: how a route's cost triple maps to the scalar a search
//! minimises.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidRouteInfo, PathCriteria, RouteInfo, TransportMode};
use crate::overlay::Overlay;

/// Reads (and writes) one metric of a [`RouteInfo`].
///
/// The other two metrics are the strategy's [secondary](Self::secondary)
/// criteria; searches still accumulate them for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostStrategy {
    Distance,
    Duration,
    Sustainability,
}

impl CostStrategy {
    pub fn for_criteria(criteria: PathCriteria) -> Self {
        match criteria {
            PathCriteria::Distance => CostStrategy::Distance,
            PathCriteria::Duration => CostStrategy::Duration,
            PathCriteria::Sustainability => CostStrategy::Sustainability,
        }
    }

    pub fn criteria(&self) -> PathCriteria {
        match self {
            CostStrategy::Distance => PathCriteria::Distance,
            CostStrategy::Duration => PathCriteria::Duration,
            CostStrategy::Sustainability => PathCriteria::Sustainability,
        }
    }

    pub fn secondary(&self) -> [PathCriteria; 2] {
        self.criteria().others()
    }

    pub fn cost_of(&self, info: &RouteInfo) -> f64 {
        info.get(self.criteria())
    }

    /// Write the matching metric, with [`RouteInfo`]'s validation.
    pub fn set_cost(&self, info: &mut RouteInfo, value: f64) -> Result<(), InvalidRouteInfo> {
        info.set(self.criteria(), value)?;
        Ok(())
    }

    /// The costs of travelling `mode` as the overlay sees them: bicycle
    /// durations are multiplied by the overlay's scale.
    pub fn effective_info(&self, mode: TransportMode, info: &RouteInfo, overlay: &Overlay) -> RouteInfo {
        match mode {
            TransportMode::Bicycle => info.with_duration_scaled(overlay.bicycle_duration_scale()),
            _ => *info,
        }
    }
}

impl fmt::Display for CostStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.criteria(), f)
    }
}
