//! Clients for the remote collaborators: Mapbox geocoding and the prediction backend

pub mod backend;
pub mod client;
pub mod geocoding;

pub use backend::{HttpBackend, PredictionBackend};
pub use geocoding::{Geocoder, MapboxGeocoder};
