//! Prelude module for common firemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use firemap::prelude::*;`

pub use crate::core::{
    config::{ControllerOptions, EndpointConfig, FeatureSet, MapViewConfig, PageProfile},
    constants::{DEFAULT_ZOOM, FOCUSED_ZOOM},
    geo::Coordinate,
    viewport::Viewport,
};

pub use crate::controller::{sequence::RequestSequence, MapController};

pub use crate::data::{
    alert::{AlertRequest, AlertResponse},
    geocoding::Suggestion,
    prediction::{Channel, ImageUpload, PredictionReport, PredictionResult},
};

pub use crate::input::{
    events::{ControllerEvent, ControllerEventKind, EventHandled, UiEvent},
    handler::EventManager,
};

pub use crate::layers::marker::Marker;

pub use crate::services::{
    backend::{HttpBackend, PredictionBackend},
    geocoding::{Geocoder, MapboxGeocoder},
};

pub use crate::ui::{
    elements::{BarStyle, ChannelElements, ElementIds, HeadlessUi, MessageTone},
    traits::{MapWidget, UiSurface},
    widget::HeadlessMap,
};

#[cfg(feature = "wasm")]
pub use crate::ui::{dom::DomSurface, mapbox::MapboxWidget};

pub use crate::{MapError, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
