//! Route payloads: per-mode cost triples carried by a graph edge.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PathCriteria, TransportMode};

/// Error returned when a cost triple fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route info: {reason}")]
pub struct InvalidRouteInfo {
    reason: &'static str,
}

/// The (distance, duration, sustainability) cost of one mode on one route.
///
/// # Invariants
///
/// - All three values are finite
/// - Distance and duration are never negative
/// - Sustainability may be negative (a carbon credit)
///
/// # Examples
///
/// ```
/// use transport_map::domain::RouteInfo;
///
/// let walk = RouteInfo::new(12.0, 150.0, -1.0).unwrap();
/// assert_eq!(walk.sustainability(), -1.0);
///
/// assert!(RouteInfo::new(-1.0, 10.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRouteInfo")]
pub struct RouteInfo {
    distance: f64,
    duration: f64,
    sustainability: f64,
}

#[derive(Deserialize)]
struct RawRouteInfo {
    distance: f64,
    duration: f64,
    sustainability: f64,
}

impl TryFrom<RawRouteInfo> for RouteInfo {
    type Error = InvalidRouteInfo;

    fn try_from(raw: RawRouteInfo) -> Result<Self, Self::Error> {
        RouteInfo::new(raw.distance, raw.duration, raw.sustainability)
    }
}

fn check_non_negative(value: f64, reason: &'static str) -> Result<f64, InvalidRouteInfo> {
    if !value.is_finite() || value < 0.0 {
        return Err(InvalidRouteInfo { reason });
    }
    Ok(value)
}

fn check_finite(value: f64) -> Result<f64, InvalidRouteInfo> {
    if !value.is_finite() {
        return Err(InvalidRouteInfo {
            reason: "sustainability must be a finite value",
        });
    }
    Ok(value)
}

impl RouteInfo {
    /// Zero on every metric; the cost of standing still.
    pub const ZERO: RouteInfo = RouteInfo {
        distance: 0.0,
        duration: 0.0,
        sustainability: 0.0,
    };

    pub fn new(distance: f64, duration: f64, sustainability: f64) -> Result<Self, InvalidRouteInfo> {
        Ok(Self {
            distance: check_non_negative(distance, "distance must be a non-negative finite value")?,
            duration: check_non_negative(duration, "duration must be a non-negative finite value")?,
            sustainability: check_finite(sustainability)?,
        })
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn sustainability(&self) -> f64 {
        self.sustainability
    }

    /// Returns the value of the given metric.
    pub fn get(&self, criteria: PathCriteria) -> f64 {
        match criteria {
            PathCriteria::Distance => self.distance,
            PathCriteria::Duration => self.duration,
            PathCriteria::Sustainability => self.sustainability,
        }
    }

    pub fn set_distance(&mut self, distance: f64) -> Result<&mut Self, InvalidRouteInfo> {
        self.distance = check_non_negative(distance, "distance must be a non-negative finite value")?;
        Ok(self)
    }

    pub fn set_duration(&mut self, duration: f64) -> Result<&mut Self, InvalidRouteInfo> {
        self.duration = check_non_negative(duration, "duration must be a non-negative finite value")?;
        Ok(self)
    }

    pub fn set_sustainability(&mut self, sustainability: f64) -> Result<&mut Self, InvalidRouteInfo> {
        self.sustainability = check_finite(sustainability)?;
        Ok(self)
    }

    /// Copy with the duration multiplied by `factor`, which must be finite
    /// and non-negative.
    pub(crate) fn with_duration_scaled(mut self, factor: f64) -> Self {
        debug_assert!(factor.is_finite() && factor >= 0.0);
        self.duration *= factor;
        self
    }

    /// Sets the value of the given metric, with the same validation as the
    /// dedicated setters.
    pub fn set(&mut self, criteria: PathCriteria, value: f64) -> Result<&mut Self, InvalidRouteInfo> {
        match criteria {
            PathCriteria::Distance => self.set_distance(value),
            PathCriteria::Duration => self.set_duration(value),
            PathCriteria::Sustainability => self.set_sustainability(value),
        }
    }
}

impl fmt::Display for RouteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} {}, {:.0} {}, {:.2} {}",
            self.distance,
            PathCriteria::Distance.unit(),
            self.duration,
            PathCriteria::Duration.unit(),
            self.sustainability,
            PathCriteria::Sustainability.unit()
        )
    }
}

/// The payload of a route between two stops: one cost triple per mode offered.
///
/// Modes are kept in enumeration order. Equality is structural.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    modes: BTreeMap<TransportMode, RouteInfo>,
}

impl Route {
    /// Create a route offering no modes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Route::add_mode`].
    pub fn with_mode(mut self, mode: TransportMode, info: RouteInfo) -> Self {
        self.add_mode(mode, info);
        self
    }

    /// Add or replace the costs for a mode. Returns the replaced costs, if any.
    pub fn add_mode(&mut self, mode: TransportMode, info: RouteInfo) -> Option<RouteInfo> {
        self.modes.insert(mode, info)
    }

    /// Remove a mode. Returns its costs if the route offered it.
    pub fn remove_mode(&mut self, mode: TransportMode) -> Option<RouteInfo> {
        self.modes.remove(&mode)
    }

    pub fn info(&self, mode: TransportMode) -> Option<&RouteInfo> {
        self.modes.get(&mode)
    }

    pub fn has_mode(&self, mode: TransportMode) -> bool {
        self.modes.contains_key(&mode)
    }

    /// Modes offered, in enumeration order.
    pub fn modes(&self) -> impl Iterator<Item = TransportMode> + '_ {
        self.modes.keys().copied()
    }

    /// Mode/cost pairs, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (TransportMode, &RouteInfo)> {
        self.modes.iter().map(|(mode, info)| (*mode, info))
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }
}
