use serde::{Deserialize, Serialize};
use std::fmt;

/// Longitude bounds in degrees
const MAX_LONGITUDE: f64 = 180.0;
/// Latitude bounds in degrees
const MAX_LATITUDE: f64 = 90.0;

/// A WGS84 position.
///
/// Longitude comes first, matching the Mapbox APIs and the prediction
/// backend, and the wire form is the two element array `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Creates a new coordinate from longitude and latitude
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&self.lng)
            && (-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.lat)
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Same position with the longitude wrapped back onto the first world copy.
    ///
    /// Dragging a marker across the antimeridian yields longitudes outside
    /// [-180, 180].
    pub fn wrapped(&self) -> Self {
        Self::new(Self::wrap_lng(self.lng), self.lat)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self::new(lng, lat)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lng, coord.lat]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lng, self.lat)
    }
}
