//! Populating a transport map from a JSON network document.
//!
//! ```json
//! {
//!   "stops":  [{ "code": "A", "name": "Alpha", "latitude": 51.5, "longitude": -0.1 }],
//!   "routes": [{ "origin": "A", "destination": "B",
//!                "modes": { "bus": { "distance": 10, "duration": 15, "sustainability": 2 } } }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::TransportMap;
use crate::domain::{InvalidRouteInfo, InvalidStop, Route, RouteInfo, Stop, StopCode, TransportMode};

/// Errors that can occur while loading network data.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed network document: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop record failed validation
    #[error("stop record {index}: {source}")]
    InvalidStop {
        index: usize,
        #[source]
        source: InvalidStop,
    },

    /// A route record carried invalid costs for one of its modes
    #[error("route {origin} -> {destination} ({mode}): {source}")]
    InvalidCosts {
        origin: String,
        destination: String,
        mode: TransportMode,
        #[source]
        source: InvalidRouteInfo,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

/// Raw cost triple for one mode; validated on import.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeCosts {
    pub distance: f64,
    pub duration: f64,
    pub sustainability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub origin: String,
    pub destination: String,
    /// Modes absent from this map are not offered on the route.
    #[serde(default)]
    pub modes: BTreeMap<TransportMode, ModeCosts>,
}

/// A whole network document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub stops: Vec<StopRecord>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
}

impl NetworkData {
    pub fn from_json_str(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json_str(&json)?;
        debug!(
            path = %path.display(),
            stops = data.stops.len(),
            routes = data.routes.len(),
            "read network document"
        );
        Ok(data)
    }
}

/// What a call to [`TransportMap::populate`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub stops_added: usize,
    pub routes_added: usize,
    /// Route records naming an unknown stop, or joining a stop to itself.
    pub routes_skipped: usize,
}

impl RouteRecord {
    fn to_route(&self) -> Result<Route, ImportError> {
        let mut route = Route::new();
        for (&mode, costs) in &self.modes {
            let info = RouteInfo::new(costs.distance, costs.duration, costs.sustainability)
                .map_err(|source| ImportError::InvalidCosts {
                    origin: self.origin.clone(),
                    destination: self.destination.clone(),
                    mode,
                    source,
                })?;
            route.add_mode(mode, info);
        }
        Ok(route)
    }
}

impl TransportMap {
    /// Insert every stop and route from `data`.
    ///
    /// Existing stops and routes are kept as they are, so importing the same
    /// document twice adds nothing the second time. Every record is checked
    /// before anything is inserted: invalid stop or cost data aborts the import
    /// and leaves the map untouched. Routes whose endpoints cannot be resolved
    /// are skipped and counted.
    pub fn populate(&mut self, data: &NetworkData) -> Result<ImportSummary, ImportError> {
        let stops = data
            .stops
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Stop::new(&record.code, &record.name, record.latitude, record.longitude)
                    .map_err(|source| ImportError::InvalidStop { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let routes = data
            .routes
            .iter()
            .map(|record| record.to_route().map(|route| (record, route)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut summary = ImportSummary::default();
        for stop in stops {
            let before = self.stop_count();
            self.insert_stop(stop);
            summary.stops_added += self.stop_count() - before;
        }

        for (record, route) in routes {
            let endpoints = StopCode::parse(&record.origin).and_then(|origin| {
                StopCode::parse(&record.destination).map(|destination| (origin, destination))
            });
            let Ok((origin, destination)) = endpoints else {
                warn!(origin = %record.origin, destination = %record.destination, "route with empty stop code skipped");
                summary.routes_skipped += 1;
                continue;
            };

            let before = self.route_count();
            match self.insert_route(&origin, &destination, route) {
                Ok(_) => summary.routes_added += self.route_count() - before,
                Err(err) => {
                    warn!(%origin, %destination, error = %err, "route skipped");
                    summary.routes_skipped += 1;
                }
            }
        }

        info!(
            stops_added = summary.stops_added,
            routes_added = summary.routes_added,
            routes_skipped = summary.routes_skipped,
            "populated transport map"
        );
        Ok(summary)
    }
}
