//! Transport modes offered on routes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0}")]
pub struct InvalidTransportMode(String);

/// A way of travelling along a route.
///
/// The declaration order is the enumeration order used everywhere a set of
/// modes is scanned, so ties between equally cheap modes are broken in favour
/// of the earlier variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Train,
    Bus,
    Boat,
    Walk,
    Bicycle,
}

impl TransportMode {
    /// All modes in enumeration order.
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Train,
        TransportMode::Bus,
        TransportMode::Boat,
        TransportMode::Walk,
        TransportMode::Bicycle,
    ];

    /// Lower-case name, as used in data files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::Boat => "boat",
            TransportMode::Walk => "walk",
            TransportMode::Bicycle => "bicycle",
        }
    }

    /// Every mode, as a set.
    pub fn all() -> BTreeSet<TransportMode> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = InvalidTransportMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == lowered)
            .ok_or_else(|| InvalidTransportMode(s.to_string()))
    }
}
