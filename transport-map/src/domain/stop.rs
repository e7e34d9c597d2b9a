//! Stop identity and location types.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Error returned when a stop or stop code fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop: {reason}")]
pub struct InvalidStop {
    reason: &'static str,
}

/// The unique code identifying a stop (e.g. `SET014`).
///
/// Codes are opaque; the only rule is that they are non-empty.
///
/// # Examples
///
/// ```
/// use transport_map::domain::StopCode;
///
/// let code = StopCode::parse("SET014").unwrap();
/// assert_eq!(code.as_str(), "SET014");
///
/// assert!(StopCode::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopCode(String);

impl StopCode {
    /// Parse a stop code. Fails on an empty string.
    pub fn parse(s: &str) -> Result<Self, InvalidStop> {
        if s.is_empty() {
            return Err(InvalidStop {
                reason: "stop code must not be empty",
            });
        }
        Ok(StopCode(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopCode {
    type Error = InvalidStop;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(InvalidStop {
                reason: "stop code must not be empty",
            });
        }
        Ok(StopCode(value))
    }
}

impl From<StopCode> for String {
    fn from(code: StopCode) -> Self {
        code.0
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.0)
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stop in the transport network.
///
/// Identity is the code alone: two stops with the same code are equal even if
/// their names or coordinates differ.
#[derive(Debug, Clone)]
pub struct Stop {
    code: StopCode,
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Stop {
    /// Create a stop. Both code and name must be non-empty.
    pub fn new(code: &str, name: &str, latitude: f64, longitude: f64) -> Result<Self, InvalidStop> {
        let code = StopCode::parse(code)?;
        if name.is_empty() {
            return Err(InvalidStop {
                reason: "stop name must not be empty",
            });
        }
        Ok(Self {
            code,
            name: name.to_string(),
            latitude,
            longitude,
        })
    }

    pub fn code(&self) -> &StopCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
