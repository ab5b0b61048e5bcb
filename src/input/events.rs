use crate::{
    core::geo::Coordinate,
    data::{
        geocoding::Suggestion,
        prediction::{ImageUpload, PredictionReport},
    },
};

/// User interactions the page forwards to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Search box content changed
    SearchInput { query: String },
    /// Search button clicked or Enter pressed in the search box
    SearchSubmit { query: String },
    /// An entry of the suggestion list was clicked
    SuggestionClicked { index: usize },
    /// The marker was released after a drag
    MarkerDragEnd,
    /// Satellite/weather prediction requested for the map center
    PredictClicked,
    /// Alert subscription form submitted
    AlertSubmitted { email: String },
    /// Camera form submitted
    ImageSubmitted { image: ImageUpload },
}

impl UiEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::SearchInput { .. } => "search_input",
            UiEvent::SearchSubmit { .. } => "search_submit",
            UiEvent::SuggestionClicked { .. } => "suggestion_clicked",
            UiEvent::MarkerDragEnd => "marker_drag_end",
            UiEvent::PredictClicked => "predict_clicked",
            UiEvent::AlertSubmitted { .. } => "alert_submitted",
            UiEvent::ImageSubmitted { .. } => "image_submitted",
        }
    }

    /// Checks if handling this event talks to a remote service
    pub fn is_network_bound(&self) -> bool {
        !matches!(
            self,
            UiEvent::SuggestionClicked { .. } | UiEvent::MarkerDragEnd
        )
    }
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

/// Events emitted by the controller once an interaction has been applied
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// Map and marker moved
    LocationChanged { location: Coordinate, zoom: f64 },
    /// A suggestion list was rendered
    SuggestionsShown {
        query: String,
        suggestions: Vec<Suggestion>,
    },
    /// Prediction results were rendered
    PredictionRendered { report: PredictionReport },
    /// The alert form finished, successfully or not
    AlertCompleted { success: bool, message: String },
    /// An interaction failed and an error message is on screen
    Failed {
        operation: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerEventKind {
    LocationChanged,
    SuggestionsShown,
    PredictionRendered,
    AlertCompleted,
    Failed,
}

impl ControllerEvent {
    pub fn kind(&self) -> ControllerEventKind {
        match self {
            ControllerEvent::LocationChanged { .. } => ControllerEventKind::LocationChanged,
            ControllerEvent::SuggestionsShown { .. } => ControllerEventKind::SuggestionsShown,
            ControllerEvent::PredictionRendered { .. } => ControllerEventKind::PredictionRendered,
            ControllerEvent::AlertCompleted { .. } => ControllerEventKind::AlertCompleted,
            ControllerEvent::Failed { .. } => ControllerEventKind::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_and_network_flags() {
        let input = UiEvent::SearchInput {
            query: "Yosemite".to_string(),
        };
        assert_eq!(input.name(), "search_input");
        assert!(input.is_network_bound());

        assert!(!UiEvent::MarkerDragEnd.is_network_bound());
        assert!(!UiEvent::SuggestionClicked { index: 0 }.is_network_bound());
        assert!(UiEvent::PredictClicked.is_network_bound());
    }

    #[test]
    fn test_controller_event_kind() {
        let event = ControllerEvent::LocationChanged {
            location: Coordinate::new(1.0, 2.0),
            zoom: 15.0,
        };
        assert_eq!(event.kind(), ControllerEventKind::LocationChanged);

        let event = ControllerEvent::Failed {
            operation: "predict",
            message: "boom".to_string(),
        };
        assert_eq!(event.kind(), ControllerEventKind::Failed);
    }
}
