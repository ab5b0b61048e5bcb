//! # firemap
//!
//! Interaction layer for a wildfire monitoring map page.
//!
//! A [`MapController`] binds a map widget with a draggable marker to user
//! input (search box, suggestion list, marker drag, prediction and alert
//! forms), resolves free-text queries through a geocoding service and submits
//! the selected location to the prediction and alert backends, rendering the
//! answers onto a [`UiSurface`].
//!
//! Both the map and the page are traits, so the same controller drives the
//! headless implementations used by tests and the terminal app, and the DOM /
//! Mapbox GL implementations enabled by the `wasm` feature. Built for
//! `wasm32` with that feature, the crate mounts itself on the alert,
//! satellite or camera page it is loaded into.

pub mod controller;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod services;
pub mod ui;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ControllerOptions, PageProfile},
    geo::Coordinate,
    viewport::Viewport,
};

pub use controller::MapController;

pub use data::{
    alert::{AlertRequest, AlertResponse},
    geocoding::Suggestion,
    prediction::{Channel, ImageUpload, PredictionReport, PredictionResult},
};

pub use input::{
    events::{ControllerEvent, ControllerEventKind, EventHandled, UiEvent},
    handler::EventManager,
};

pub use layers::marker::Marker;

pub use services::{
    backend::{HttpBackend, PredictionBackend},
    geocoding::{Geocoder, MapboxGeocoder},
};

pub use ui::{
    elements::{BarStyle, ElementIds, HeadlessUi, MessageTone},
    traits::{MapWidget, UiSurface},
    widget::HeadlessMap,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status} from {endpoint}")]
    Http { status: u16, endpoint: String },

    #[error("Request rejected: {}", message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Response #{ticket} superseded by request #{latest}")]
    Superseded { ticket: u64, latest: u64 },
}

impl MapError {
    /// Message shown to the user when this error ends an interaction.
    pub fn user_message(&self) -> String {
        match self {
            MapError::Validation(message) => message.clone(),
            MapError::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            MapError::InvalidCoordinates(_) => constants::MSG_INVALID_LOCATION.to_string(),
            _ => constants::MSG_GENERIC_FAILURE.to_string(),
        }
    }

    /// A newer request of the same kind made this response irrelevant.
    pub fn is_superseded(&self) -> bool {
        matches!(self, MapError::Superseded { .. })
    }
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_reason() {
        let err = MapError::Rejected {
            message: Some("This email is already subscribed to alerts.".to_string()),
        };
        assert_eq!(
            err.user_message(),
            "This email is already subscribed to alerts."
        );

        let err = MapError::Rejected { message: None };
        assert_eq!(err.user_message(), constants::MSG_GENERIC_FAILURE);

        let err = MapError::Rejected {
            message: Some("  ".to_string()),
        };
        assert_eq!(err.user_message(), constants::MSG_GENERIC_FAILURE);
    }

    #[test]
    fn test_user_message_for_transport_errors() {
        let err = MapError::Http {
            status: 502,
            endpoint: "/satellite_predict".to_string(),
        };
        assert_eq!(err.user_message(), constants::MSG_GENERIC_FAILURE);
        assert!(!err.is_superseded());

        let err = MapError::Superseded { ticket: 1, latest: 2 };
        assert!(err.is_superseded());
    }
}
