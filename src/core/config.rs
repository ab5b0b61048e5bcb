//! Configuration for one map page
//!
//! The alert, satellite and camera pages only differ in which forms they
//! carry, so a single [`ControllerOptions`] describes all of them and a
//! [`PageProfile`] preset picks the feature set.

use crate::{
    core::{constants::*, geo::Coordinate},
    ui::elements::ElementIds,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageProfile {
    /// Search + alert subscription form
    Alert,
    /// Search + satellite/weather prediction
    Satellite,
    /// Camera image upload only
    Camera,
    /// Everything enabled
    Full,
    Custom(ControllerOptions),
}

impl PageProfile {
    pub fn resolve(&self) -> ControllerOptions {
        let base = ControllerOptions::default();
        match self {
            Self::Alert => base.with_features(FeatureSet {
                search: true,
                alert: true,
                satellite: false,
                camera: false,
            }),
            Self::Satellite => base.with_features(FeatureSet {
                search: true,
                alert: false,
                satellite: true,
                camera: false,
            }),
            Self::Camera => base.with_features(FeatureSet {
                search: false,
                alert: false,
                satellite: false,
                camera: true,
            }),
            Self::Full => base.with_features(FeatureSet::all()),
            Self::Custom(options) => options.clone(),
        }
    }

    /// Recognises a page by its forms; `present` tells whether an element id exists
    pub fn detect(present: impl Fn(&str) -> bool) -> Option<Self> {
        let ids = ElementIds::default();
        if present(&ids.image_input) {
            Some(Self::Camera)
        } else if present(&ids.alert_form) {
            Some(Self::Alert)
        } else if present(&ids.predict_button) && present(DEFAULT_CONTAINER) {
            Some(Self::Satellite)
        } else {
            None
        }
    }
}

impl Default for PageProfile {
    fn default() -> Self {
        Self::Full
    }
}

impl FromStr for PageProfile {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alert" => Ok(Self::Alert),
            "satellite" => Ok(Self::Satellite),
            "camera" => Ok(Self::Camera),
            "full" => Ok(Self::Full),
            other => Err(MapError::Config(format!(
                "unknown page profile '{}', expected alert, satellite, camera or full",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerOptions {
    pub features: FeatureSet,
    pub endpoints: EndpointConfig,
    pub map: MapViewConfig,
    pub elements: ElementIds,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            features: FeatureSet::all(),
            endpoints: EndpointConfig::default(),
            map: MapViewConfig::default(),
            elements: ElementIds::default(),
        }
    }
}

impl ControllerOptions {
    /// Parses options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.backend_url = url.into();
        self
    }

    pub fn with_geocoding_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.geocoding_url = url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.endpoints.mapbox_token = Some(token.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        let map = &self.map;
        if !map.default_center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "default center {} is out of range",
                map.default_center
            )));
        }
        for (name, zoom) in [
            ("default_zoom", map.default_zoom),
            ("focused_zoom", map.focused_zoom),
        ] {
            if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
                return Err(MapError::Config(format!(
                    "{} {} is outside {}..={}",
                    name, zoom, MIN_ZOOM, MAX_ZOOM
                )));
            }
        }
        for url in [&self.endpoints.geocoding_url, &self.endpoints.backend_url] {
            reqwest::Url::parse(url).map_err(|e| MapError::InvalidUrl(format!("{}: {}", url, e)))?;
        }
        if self.endpoints.timeout_ms == 0 {
            return Err(MapError::Config("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

/// Which forms the page carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    pub search: bool,
    pub alert: bool,
    pub satellite: bool,
    pub camera: bool,
}

impl FeatureSet {
    pub fn all() -> Self {
        Self {
            search: true,
            alert: true,
            satellite: true,
            camera: true,
        }
    }

    /// The camera-only page has no map
    pub fn has_map(&self) -> bool {
        self.search || self.alert || self.satellite
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub geocoding_url: String,
    pub backend_url: String,
    /// Falls back to `MAPBOX_TOKEN` when unset
    pub mapbox_token: Option<String>,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            mapbox_token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl EndpointConfig {
    /// The configured token, or the one exported in the environment
    pub fn token(&self) -> Option<String> {
        self.mapbox_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                std::env::var(MAPBOX_TOKEN_ENV)
                    .ok()
                    .filter(|t| !t.trim().is_empty())
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    pub container: String,
    pub style: String,
    pub default_center: Coordinate,
    pub default_zoom: f64,
    pub focused_zoom: f64,
    pub min_query_chars: usize,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_string(),
            style: DEFAULT_MAP_STYLE.to_string(),
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            focused_zoom: FOCUSED_ZOOM,
            min_query_chars: MIN_QUERY_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_resolve_features() {
        let alert = PageProfile::Alert.resolve();
        assert!(alert.features.search && alert.features.alert);
        assert!(!alert.features.satellite && !alert.features.camera);

        let satellite = PageProfile::Satellite.resolve();
        assert!(satellite.features.search && satellite.features.satellite);
        assert!(!satellite.features.alert);

        let camera = PageProfile::Camera.resolve();
        assert!(camera.features.camera);
        assert!(!camera.features.search);
        assert!(!camera.features.has_map());
        assert!(alert.features.has_map());

        assert_eq!(PageProfile::default().resolve().features, FeatureSet::all());

        let custom = ControllerOptions::default().with_backend_url("http://backend:8080");
        assert_eq!(
            PageProfile::Custom(custom.clone()).resolve().endpoints.backend_url,
            "http://backend:8080"
        );
    }

    fn page(ids: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |id| ids.iter().any(|known| *known == id)
    }

    #[test]
    fn test_detect_page_from_markup() {
        assert_eq!(
            PageProfile::detect(page(&["imageInput", "predictBtn"])),
            Some(PageProfile::Camera)
        );
        assert_eq!(
            PageProfile::detect(page(&["map", "search", "alertForm", "email"])),
            Some(PageProfile::Alert)
        );
        assert_eq!(
            PageProfile::detect(page(&["map", "search", "predictBtn"])),
            Some(PageProfile::Satellite)
        );
        assert_eq!(PageProfile::detect(page(&["predictBtn"])), None);
        assert_eq!(PageProfile::detect(page(&[])), None);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("Satellite".parse::<PageProfile>().unwrap(), PageProfile::Satellite);
        assert!("weather".parse::<PageProfile>().is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let options = ControllerOptions::from_json(
            r#"{"endpoints": {"backend_url": "http://localhost:9000"}, "map": {"focused_zoom": 12}}"#,
        )
        .unwrap();
        assert_eq!(options.endpoints.backend_url, "http://localhost:9000");
        assert_eq!(options.endpoints.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(options.map.focused_zoom, 12.0);
        assert_eq!(options.map.default_zoom, DEFAULT_ZOOM);
        assert_eq!(options.features, FeatureSet::all());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut options = ControllerOptions::default();
        options.map.focused_zoom = 30.0;
        assert!(matches!(options.validate(), Err(MapError::Config(_))));

        let options = ControllerOptions::default().with_backend_url("not a url");
        assert!(matches!(options.validate(), Err(MapError::InvalidUrl(_))));

        let mut options = ControllerOptions::default();
        options.map.default_center = Coordinate::new(200.0, 0.0);
        assert!(matches!(
            options.validate(),
            Err(MapError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_explicit_token_wins() {
        let endpoints = ControllerOptions::default().with_token("pk.test").endpoints;
        assert_eq!(endpoints.token().as_deref(), Some("pk.test"));
    }
}
