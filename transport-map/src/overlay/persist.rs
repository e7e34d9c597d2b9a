//! Saving and restoring an overlay across runs.
//!
//! Routes are recorded by the codes of their endpoint stops rather than by
//! handle, since the map may be rebuilt between runs.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{DEFAULT_BICYCLE_SCALE, Overlay, PersistError};
use crate::domain::{StopCode, TransportMode};
use crate::network::{RouteId, TransportMap};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StopPair {
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledModes {
    pub origin: String,
    pub destination: String,
    pub modes: BTreeSet<TransportMode>,
}

/// Serialized form of an [`Overlay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    #[serde(default = "default_scale")]
    pub bicycle_duration_scale: f64,
    #[serde(default)]
    pub disabled_routes: Vec<StopPair>,
    #[serde(default)]
    pub disabled_modes: Vec<DisabledModes>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

fn default_scale() -> f64 {
    DEFAULT_BICYCLE_SCALE
}

fn pair_of(map: &TransportMap, route: RouteId) -> Option<StopPair> {
    let (a, b) = map.endpoints(route)?;
    Some(StopPair {
        origin: map.stop(a)?.code().to_string(),
        destination: map.stop(b)?.code().to_string(),
    })
}

fn resolve(map: &TransportMap, origin: &str, destination: &str) -> Option<RouteId> {
    let origin = map.stop_id(&StopCode::parse(origin).ok()?)?;
    let destination = map.stop_id(&StopCode::parse(destination).ok()?)?;
    map.route_between(origin, destination)
}

impl OverlaySnapshot {
    /// Record an overlay against the map its route handles belong to.
    pub fn capture(overlay: &Overlay, map: &TransportMap) -> Self {
        let mut disabled_routes: Vec<_> = overlay
            .disabled_routes()
            .into_iter()
            .filter_map(|route| pair_of(map, route))
            .collect();
        disabled_routes.sort();

        let mut disabled_modes: Vec<_> = overlay
            .routes_with_disabled_modes()
            .into_iter()
            .filter_map(|(route, modes)| {
                let pair = pair_of(map, route)?;
                Some(DisabledModes {
                    origin: pair.origin,
                    destination: pair.destination,
                    modes: modes.clone(),
                })
            })
            .collect();
        disabled_modes.sort_by(|a, b| {
            (&a.origin, &a.destination).cmp(&(&b.origin, &b.destination))
        });

        Self {
            bicycle_duration_scale: overlay.bicycle_duration_scale(),
            disabled_routes,
            disabled_modes,
            saved_at: Some(Utc::now()),
        }
    }

    /// Rebuild an overlay against `map`.
    ///
    /// Entries naming stops or routes the map lacks are dropped. An
    /// out-of-range scale falls back to the default.
    pub fn restore(&self, map: &TransportMap) -> Overlay {
        let mut overlay = match Overlay::with_bicycle_scale(self.bicycle_duration_scale) {
            Ok(overlay) => overlay,
            Err(err) => {
                warn!(error = %err, "ignoring saved bicycle scale");
                Overlay::new()
            }
        };

        let mut dropped = 0;
        for pair in &self.disabled_routes {
            match resolve(map, &pair.origin, &pair.destination) {
                Some(route) => {
                    overlay.disable_route(route);
                }
                None => {
                    debug!(origin = %pair.origin, destination = %pair.destination, "dropping disabled route");
                    dropped += 1;
                }
            }
        }
        for entry in &self.disabled_modes {
            match resolve(map, &entry.origin, &entry.destination) {
                Some(route) => {
                    for &mode in &entry.modes {
                        overlay.disable_mode(route, mode);
                    }
                }
                None => {
                    debug!(origin = %entry.origin, destination = %entry.destination, "dropping disabled modes");
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            warn!(dropped, "overlay entries refer to routes not in the map");
        }
        overlay
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "saved overlay");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl Overlay {
    /// Save this overlay to `path`, naming routes by stop codes from `map`.
    pub fn save(&self, map: &TransportMap, path: impl AsRef<Path>) -> Result<(), PersistError> {
        OverlaySnapshot::capture(self, map).save(path)
    }

    /// Load an overlay from `path`, or start afresh.
    ///
    /// A missing file, unreadable file or malformed document yields a default
    /// overlay; nothing is propagated.
    pub fn load_or_default(path: impl AsRef<Path>, map: &TransportMap) -> Overlay {
        Self::load_or(path, map, Overlay::new())
    }

    /// Like [`Overlay::load_or_default`], starting from `fresh` when there is
    /// nothing usable at `path`.
    pub fn load_or(path: impl AsRef<Path>, map: &TransportMap, fresh: Overlay) -> Overlay {
        let path = path.as_ref();
        match OverlaySnapshot::load(path) {
            Ok(snapshot) => snapshot.restore(map),
            Err(PersistError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(path = %path.display(), "no saved overlay");
                fresh
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load overlay, starting fresh");
                fresh
            }
        }
    }
}
