//! Optimisation criteria for path queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown criteria name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown path criteria: {0}")]
pub struct InvalidPathCriteria(String);

/// The metric a path query minimises.
///
/// The other two metrics are still accumulated along the chosen path for
/// reporting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PathCriteria {
    Distance,
    Duration,
    Sustainability,
}

impl PathCriteria {
    pub const ALL: [PathCriteria; 3] = [
        PathCriteria::Distance,
        PathCriteria::Duration,
        PathCriteria::Sustainability,
    ];

    /// Unit label for values of this metric.
    pub fn unit(&self) -> &'static str {
        match self {
            PathCriteria::Distance => "km",
            PathCriteria::Duration => "min",
            PathCriteria::Sustainability => "carbon",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PathCriteria::Distance => "distance",
            PathCriteria::Duration => "duration",
            PathCriteria::Sustainability => "sustainability",
        }
    }

    /// The two criteria other than this one, in enumeration order.
    pub fn others(&self) -> [PathCriteria; 2] {
        match self {
            PathCriteria::Distance => [PathCriteria::Duration, PathCriteria::Sustainability],
            PathCriteria::Duration => [PathCriteria::Distance, PathCriteria::Sustainability],
            PathCriteria::Sustainability => [PathCriteria::Distance, PathCriteria::Duration],
        }
    }

    /// Whether values of this metric can be negative (carbon credits).
    pub fn may_be_negative(&self) -> bool {
        matches!(self, PathCriteria::Sustainability)
    }
}

impl fmt::Display for PathCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PathCriteria {
    type Err = InvalidPathCriteria;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == lowered)
            .ok_or_else(|| InvalidPathCriteria(s.to_string()))
    }
}
