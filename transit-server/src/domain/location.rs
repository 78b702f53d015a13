//! Location reference data.

use std::fmt;

/// Identifier of a stop location.
///
/// Location ids come from the upstream schedule data and are opaque to the
/// resolver; they only need to be cheap to copy, compare and hash.
///
/// # Examples
///
/// ```
/// use transit_server::domain::LocationId;
///
/// let chennai = LocationId(1);
/// let salem = LocationId(2);
/// assert_ne!(chennai, salem);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub u32);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic coordinates of a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A stop location. Immutable reference data for the lifetime of a snapshot.
#[derive(Debug, Clone)]
pub struct Location {
    /// Upstream identifier.
    pub id: LocationId,
    /// Display name (e.g., "Chennai CMBT").
    pub name: String,
    /// Coordinates, when the upstream data has them.
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// Create a location without coordinates.
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates: None,
        }
    }
}
