use super::deserialize_flag;
use crate::{
    core::{
        constants::{MAX_ZOOM, MIN_ZOOM},
        geo::Coordinate,
    },
    Result,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, path::Path};

/// One independent prediction source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Camera,
    Satellite,
    Weather,
    Combined,
}

impl Channel {
    /// Suffix shown after the verdict; the camera page has none
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Channel::Camera => None,
            Channel::Satellite => Some("SATELLITE"),
            Channel::Weather => Some("WEATHER"),
            Channel::Combined => Some("COMBINED"),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Camera => "camera",
            Channel::Satellite => "satellite",
            Channel::Weather => "weather",
            Channel::Combined => "combined",
        };
        f.write_str(name)
    }
}

/// Verdict and confidence of one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub status: bool,
    pub probability_percent: f64,
}

impl PredictionResult {
    pub fn new(status: bool, probability_percent: f64) -> Self {
        Self {
            status,
            probability_percent,
        }
    }

    /// Percentage usable as a bar width
    pub fn clamped_percent(&self) -> f64 {
        if self.probability_percent.is_finite() {
            self.probability_percent.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// Results of one request, keyed by channel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionReport {
    channels: BTreeMap<Channel, PredictionResult>,
}

impl PredictionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(channel: Channel, result: PredictionResult) -> Self {
        let mut report = Self::new();
        report.insert(channel, result);
        report
    }

    pub fn insert(&mut self, channel: Channel, result: PredictionResult) {
        self.channels.insert(channel, result);
    }

    pub fn get(&self, channel: Channel) -> Option<&PredictionResult> {
        self.channels.get(&channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &PredictionResult)> {
        self.channels.iter().map(|(channel, result)| (*channel, result))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Body of `POST /satellite_predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteRequest {
    pub location: Coordinate,
    pub zoom: u8,
}

impl SatelliteRequest {
    /// The backend fetches imagery at integral zoom levels
    pub fn new(location: Coordinate, zoom: f64) -> Self {
        Self {
            location,
            zoom: zoom.round().clamp(MIN_ZOOM, MAX_ZOOM) as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SatelliteResponse {
    pub satellite_probability: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub satellite_status: bool,
    pub weather_probability: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub weather_status: bool,
    pub average_probability: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub average_status: bool,
}

impl From<SatelliteResponse> for PredictionReport {
    fn from(response: SatelliteResponse) -> Self {
        let mut report = PredictionReport::new();
        report.insert(
            Channel::Satellite,
            PredictionResult::new(response.satellite_status, response.satellite_probability),
        );
        report.insert(
            Channel::Weather,
            PredictionResult::new(response.weather_status, response.weather_probability),
        );
        report.insert(
            Channel::Combined,
            PredictionResult::new(response.average_status, response.average_probability),
        );
        report
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraResponse {
    #[serde(deserialize_with = "deserialize_flag")]
    pub wildfire_prediction: bool,
    pub confidence: f64,
    #[serde(default)]
    pub prediction_percentage: Option<f64>,
}

impl From<CameraResponse> for PredictionResult {
    fn from(response: CameraResponse) -> Self {
        PredictionResult::new(response.wildfire_prediction, response.confidence)
    }
}

/// An image picked in the camera form
#[derive(Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads an image from disk, guessing its type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        Ok(Self::new(file_name, content_type_for(&extension), bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
