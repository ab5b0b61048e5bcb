use crate::{
    core::{config::EndpointConfig, constants::*},
    data::{
        alert::{AlertRequest, AlertResponse},
        prediction::{CameraResponse, ImageUpload, SatelliteRequest, SatelliteResponse},
    },
    services::client::{build_client, endpoint_url, read_json, HTTP_CLIENT},
    MapError, Result,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

/// The wildfire prediction and alert backend
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PredictionBackend: Send + Sync {
    /// Satellite, weather and combined prediction for a location
    async fn predict_satellite(&self, request: &SatelliteRequest) -> Result<SatelliteResponse>;

    /// Classification of a camera image
    async fn predict_camera(&self, image: &ImageUpload) -> Result<CameraResponse>;

    /// Subscribes an email to alerts for a location.
    ///
    /// A `success: false` answer is returned as `MapError::Rejected`.
    async fn subscribe_alert(&self, request: &AlertRequest) -> Result<AlertResponse>;
}

/// JSON/multipart client for the backend routes
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            base_url: base_url.into(),
        }
    }

    pub fn from_endpoints(endpoints: &EndpointConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(endpoints)?,
            base_url: endpoints.backend_url.clone(),
        })
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PredictionBackend for HttpBackend {
    async fn predict_satellite(&self, request: &SatelliteRequest) -> Result<SatelliteResponse> {
        let url = endpoint_url(&self.base_url, SATELLITE_PREDICT_PATH)?;
        log::debug!(
            "Requesting satellite prediction at {} zoom {}",
            request.location,
            request.zoom
        );
        let response = self.client.post(url).json(request).send().await?;
        read_json(response).await
    }

    async fn predict_camera(&self, image: &ImageUpload) -> Result<CameraResponse> {
        let url = endpoint_url(&self.base_url, CAMERA_PREDICT_PATH)?;
        log::debug!(
            "Uploading {} ({} bytes) for camera prediction",
            image.file_name,
            image.bytes.len()
        );
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);
        let response = self.client.post(url).multipart(form).send().await?;
        read_json(response).await
    }

    async fn subscribe_alert(&self, request: &AlertRequest) -> Result<AlertResponse> {
        let url = endpoint_url(&self.base_url, ALERT_PATH)?;
        log::debug!("Subscribing {} at {}", request.email, request.location());
        let response = self.client.post(url).json(request).send().await?;

        // The route answers 400/500 with the same body shape, so read it first
        let status = response.status();
        let endpoint = response.url().path().to_string();
        let body = response.bytes().await?;
        match serde_json::from_slice::<AlertResponse>(&body) {
            Ok(answer) if answer.success && status.is_success() => Ok(answer),
            Ok(answer) if !answer.success => Err(MapError::Rejected {
                message: answer.message,
            }),
            Ok(_) => Err(MapError::Http {
                status: status.as_u16(),
                endpoint,
            }),
            Err(_) if !status.is_success() => Err(MapError::Http {
                status: status.as_u16(),
                endpoint,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Coordinate;
    use httpmock::prelude::*;
    use serde_json::json;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[tokio::test]
    async fn test_predict_satellite_posts_location_and_zoom() {
        init();
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/satellite_predict")
                    .header("content-type", "application/json")
                    .json_body(json!({"location": [-120.5, 38.25], "zoom": 15}));
                then.status(200).json_body(json!({
                    "satellite_probability": 91,
                    "satellite_status": 1,
                    "weather_probability": 70,
                    "weather_status": 1,
                    "average_probability": 80,
                    "average_status": 1
                }));
            })
            .await;

        let backend = HttpBackend::new(server.base_url());
        let request = SatelliteRequest::new(Coordinate::new(-120.5, 38.25), 15.0);
        let response = backend.predict_satellite(&request).await.unwrap();

        m.assert_async().await;
        assert_eq!(response.satellite_probability, 91.0);
        assert!(response.average_status);
    }

    #[tokio::test]
    async fn test_predict_satellite_server_error() {
        init();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/satellite_predict");
                then.status(500).body("Internal Server Error");
            })
            .await;

        let backend = HttpBackend::new(server.base_url());
        let request = SatelliteRequest::new(Coordinate::new(1.0, 2.0), 15.0);
        let err = backend.predict_satellite(&request).await.unwrap_err();
        assert!(matches!(err, MapError::Http { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_predict_camera_sends_multipart_image() {
        init();
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/camera_predict")
                    .header_exists("content-type")
                    .body_contains("name=\"image\"")
                    .body_contains("filename=\"ridge.jpg\"");
                then.status(200)
                    .json_body(json!({"wildfire_prediction": 0, "confidence": 77}));
            })
            .await;

        let backend = HttpBackend::new(server.base_url());
        let image = ImageUpload::new("ridge.jpg", "image/jpeg", b"fake jpeg payload".to_vec());
        let response = backend.predict_camera(&image).await.unwrap();

        m.assert_async().await;
        assert!(!response.wildfire_prediction);
        assert_eq!(response.confidence, 77.0);
    }

    #[tokio::test]
    async fn test_subscribe_alert_success() {
        init();
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(POST).path("/alert").json_body(json!({
                    "email": "ranger@example.org",
                    "latitude": 38.25,
                    "longitude": -120.5
                }));
                then.status(200).json_body(json!({
                    "success": true,
                    "message": "Alert subscription successful! You will now receive wildfire alerts."
                }));
            })
            .await;

        let backend = HttpBackend::new(server.base_url());
        let request = AlertRequest::new("ranger@example.org", Coordinate::new(-120.5, 38.25));
        let answer = backend.subscribe_alert(&request).await.unwrap();

        m.assert_async().await;
        assert!(answer.success);
    }

    #[tokio::test]
    async fn test_subscribe_alert_rejected_with_reason() {
        init();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/alert");
                then.status(400).json_body(json!({
                    "success": false,
                    "message": "This email is already subscribed to alerts."
                }));
            })
            .await;

        let backend = HttpBackend::new(server.base_url());
        let request = AlertRequest::new("ranger@example.org", Coordinate::new(-120.5, 38.25));
        let err = backend.subscribe_alert(&request).await.unwrap_err();
        match err {
            MapError::Rejected { message } => assert_eq!(
                message.as_deref(),
                Some("This email is already subscribed to alerts.")
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_subscribe_alert_garbage_on_error_status() {
        init();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/alert");
                then.status(502).body("Bad Gateway");
            })
            .await;

        let backend = HttpBackend::new(server.base_url());
        let request = AlertRequest::new("ranger@example.org", Coordinate::new(-120.5, 38.25));
        let err = backend.subscribe_alert(&request).await.unwrap_err();
        assert!(matches!(err, MapError::Http { status: 502, .. }));
        assert_eq!(err.user_message(), MSG_GENERIC_FAILURE);
    }
}
