use crate::{
    core::{config::MapViewConfig, geo::Coordinate, viewport::Viewport},
    layers::marker::Marker,
    ui::traits::MapWidget,
    Result,
};

/// Map widget without a renderer, tracking view and marker state only
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    container: String,
    style: String,
    viewport: Viewport,
    marker: Marker,
}

impl HeadlessMap {
    pub fn new(config: &MapViewConfig) -> Self {
        Self {
            container: config.container.clone(),
            style: config.style.clone(),
            viewport: Viewport::new(config.default_center, config.default_zoom),
            marker: Marker::new("location", config.default_center).draggable(true),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Moves only the marker, as a pointer drag does before `dragend` fires
    pub fn drag_marker_to(&mut self, position: Coordinate) -> Result<()> {
        self.marker.drag_to(position)
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(&MapViewConfig::default())
    }
}

impl MapWidget for HeadlessMap {
    fn center(&self) -> Coordinate {
        self.viewport.center
    }

    fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    fn set_center(&mut self, center: Coordinate) {
        self.viewport.set_center(center);
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
    }

    fn marker_position(&self) -> Coordinate {
        self.marker.position()
    }

    fn set_marker_position(&mut self, position: Coordinate) {
        self.marker.set_position(position);
    }
}
