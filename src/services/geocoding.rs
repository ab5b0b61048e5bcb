use crate::{
    core::config::EndpointConfig,
    data::geocoding::{GeocodingResponse, Suggestion},
    services::client::{build_client, read_json, HTTP_CLIENT},
    MapError, Result,
};
use async_trait::async_trait;
use reqwest::Url;

/// Resolves free text to candidate locations
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Vec<Suggestion>>;
}

/// Mapbox `mapbox.places` forward geocoding
#[derive(Debug, Clone)]
pub struct MapboxGeocoder {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl MapboxGeocoder {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            base_url: crate::core::constants::DEFAULT_GEOCODING_URL.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Builds a geocoder from endpoint settings; a token is mandatory
    pub fn from_endpoints(endpoints: &EndpointConfig) -> Result<Self> {
        let access_token = endpoints.token().ok_or_else(|| {
            MapError::Config(format!(
                "no Mapbox access token configured (set {})",
                crate::core::constants::MAPBOX_TOKEN_ENV
            ))
        })?;
        Ok(Self {
            client: build_client(endpoints)?,
            base_url: endpoints.geocoding_url.clone(),
            access_token,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// `{base}/geocoding/v5/mapbox.places/{query}.json?access_token={token}`
    ///
    /// The query is percent-encoded as one path segment.
    pub fn lookup_url(&self, query: &str) -> Result<Url> {
        let segment = format!("{}.json", query);
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| MapError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| MapError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places", segment.as_str()]);
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Geocoder for MapboxGeocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<Suggestion>> {
        let url = self.lookup_url(query)?;
        log::debug!("Geocoding '{}'", query);
        let response = self.client.get(url).send().await?;
        let body: GeocodingResponse = read_json(response).await?;
        let suggestions = body.into_suggestions();
        log::debug!("'{}' matched {} places", query, suggestions.len());
        Ok(suggestions)
    }
}
