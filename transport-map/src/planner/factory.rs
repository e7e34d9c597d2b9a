//! Choosing a strategy pairing for a criterion.

use super::{CostStrategy, PathStrategy, RoutingConfig};
use crate::domain::PathCriteria;

/// The default pairing: Dijkstra for distance and duration, Bellman-Ford for
/// sustainability, whose costs may be negative.
pub fn resolve_strategy(criteria: PathCriteria) -> (PathStrategy, CostStrategy) {
    let strategy = match criteria {
        PathCriteria::Distance | PathCriteria::Duration => PathStrategy::Dijkstra,
        PathCriteria::Sustainability => PathStrategy::BellmanFord,
    };
    (strategy, CostStrategy::for_criteria(criteria))
}

impl RoutingConfig {
    /// The pairing for `criteria` under this configuration.
    pub fn resolve_strategy(&self, criteria: PathCriteria) -> (PathStrategy, CostStrategy) {
        (self.strategy_for(criteria), CostStrategy::for_criteria(criteria))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pairings() {
        assert_eq!(
            resolve_strategy(PathCriteria::Distance),
            (PathStrategy::Dijkstra, CostStrategy::Distance)
        );
        assert_eq!(
            resolve_strategy(PathCriteria::Duration),
            (PathStrategy::Dijkstra, CostStrategy::Duration)
        );
        assert_eq!(
            resolve_strategy(PathCriteria::Sustainability),
            (PathStrategy::BellmanFord, CostStrategy::Sustainability)
        );
    }

    #[test]
    fn default_config_matches_factory() {
        let config = RoutingConfig::default();
        for criteria in PathCriteria::ALL {
            assert_eq!(config.resolve_strategy(criteria), resolve_strategy(criteria));
        }
    }

    #[test]
    fn config_overrides_algorithm() {
        let config = RoutingConfig {
            duration_strategy: PathStrategy::DepthFirst,
            ..RoutingConfig::default()
        };
        assert_eq!(
            config.resolve_strategy(PathCriteria::Duration),
            (PathStrategy::DepthFirst, CostStrategy::Duration)
        );
    }

    #[test]
    fn every_default_pairing_is_supported() {
        for criteria in PathCriteria::ALL {
            let (strategy, cost) = resolve_strategy(criteria);
            assert!(strategy.supports(cost.criteria()));
        }
    }
}
