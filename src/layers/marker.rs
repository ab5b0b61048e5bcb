use crate::{core::geo::Coordinate, MapError, Result};

/// The pin marking the selected location
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: String,
    position: Coordinate,
    draggable: bool,
}

impl Marker {
    pub fn new(id: impl Into<String>, position: Coordinate) -> Self {
        Self {
            id: id.into(),
            position,
            draggable: false,
        }
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn set_position(&mut self, position: Coordinate) {
        self.position = position;
    }

    /// Moves the marker the way a pointer drag would
    pub fn drag_to(&mut self, position: Coordinate) -> Result<()> {
        if !self.draggable {
            return Err(MapError::Validation(format!(
                "marker '{}' is not draggable",
                self.id
            )));
        }
        let position = position.wrapped();
        if !position.is_valid() {
            return Err(MapError::InvalidCoordinates(position.to_string()));
        }
        self.position = position;
        Ok(())
    }
}
