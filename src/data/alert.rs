use super::deserialize_flag;
use crate::core::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Body of `POST /alert`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl AlertRequest {
    pub fn new(email: impl Into<String>, location: Coordinate) -> Self {
        Self {
            email: email.into(),
            latitude: location.lat,
            longitude: location.lng,
        }
    }

    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }
}

/// Answer of `POST /alert`, sent with 200 as well as with 4xx/5xx
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertResponse {
    #[serde(deserialize_with = "deserialize_flag")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
