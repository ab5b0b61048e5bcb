use crate::{
    core::geo::Coordinate,
    data::geocoding::Suggestion,
    ui::elements::{BarStyle, MessageTone},
};

/// A map view carrying the location marker
pub trait MapWidget {
    fn center(&self) -> Coordinate;
    fn zoom(&self) -> f64;
    fn set_center(&mut self, center: Coordinate);
    fn set_zoom(&mut self, zoom: f64);

    fn marker_position(&self) -> Coordinate;
    fn set_marker_position(&mut self, position: Coordinate);

    /// Centers view and marker on `location` at `zoom`
    fn focus(&mut self, location: Coordinate, zoom: f64) {
        self.set_center(location);
        self.set_zoom(zoom);
        self.set_marker_position(location);
    }
}

/// The page elements the controller writes to, addressed by element id
pub trait UiSurface {
    /// Replaces the value of a text input
    fn set_input_value(&mut self, element_id: &str, value: &str);

    /// Replaces the content of a suggestion list
    fn show_suggestions(&mut self, element_id: &str, suggestions: &[Suggestion]);

    fn clear_suggestions(&mut self, element_id: &str) {
        self.show_suggestions(element_id, &[]);
    }

    fn set_text(&mut self, element_id: &str, text: &str);

    /// Sets a progress bar width (0-100) and fill style
    fn set_bar(&mut self, element_id: &str, percent: f64, style: BarStyle);

    /// Writes a status message with its tone
    fn set_message(&mut self, element_id: &str, text: &str, tone: MessageTone);
}
