use crate::core::{
    constants::{DEFAULT_CENTER, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM},
    geo::Coordinate,
};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center and zoom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: Coordinate,
    /// The current zoom level
    pub zoom: f64,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: Coordinate, zoom: f64) -> Self {
        let mut viewport = Self {
            center,
            zoom,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        };
        viewport.set_zoom(zoom);
        viewport
    }

    /// Restricts the zoom range, re-clamping the current zoom
    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        let zoom = self.zoom;
        self.set_zoom(zoom);
        self
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    /// Sets the zoom level, clamped to the allowed range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(self.min_zoom, self.max_zoom)
        } else {
            self.min_zoom
        };
    }

    /// Moves to `center` at `zoom` in one step
    pub fn set_view(&mut self, center: Coordinate, zoom: f64) {
        self.set_center(center);
        self.set_zoom(zoom);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}
