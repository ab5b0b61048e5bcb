use crate::{core::config::EndpointConfig, core::constants::USER_AGENT, MapError, Result};
use once_cell::sync::Lazy;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

/// Shared async HTTP client for services built without explicit endpoint settings
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    let builder = reqwest::Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_millis(
            crate::core::constants::DEFAULT_TIMEOUT_MS,
        ));
    builder.build().unwrap_or_default()
});

/// Builds a client honouring the configured user agent and timeout
pub fn build_client(endpoints: &EndpointConfig) -> Result<reqwest::Client> {
    let builder = reqwest::Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder
        .user_agent(endpoints.user_agent.as_str())
        .timeout(endpoints.timeout());
    #[cfg(target_arch = "wasm32")]
    let _ = endpoints;
    Ok(builder.build()?)
}

/// Joins a base URL and an absolute path, keeping any path prefix of the base
pub(crate) fn endpoint_url(base: &str, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| MapError::InvalidUrl(format!("{}: {}", joined, e)))
}

/// Decodes a JSON body, turning non-2xx statuses into `MapError::Http`
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let endpoint = response.url().path().to_string();
    if !status.is_success() {
        log::warn!("HTTP {} from {}", status, endpoint);
        return Err(MapError::Http {
            status: status.as_u16(),
            endpoint,
        });
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_keeps_prefix() {
        let url = endpoint_url("http://localhost:5000/", "/alert").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/alert");

        let url = endpoint_url("https://fires.example.org/app", "/satellite_predict").unwrap();
        assert_eq!(url.as_str(), "https://fires.example.org/app/satellite_predict");
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        assert!(matches!(
            endpoint_url("not a url", "/alert"),
            Err(MapError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_build_client_from_defaults() {
        assert!(build_client(&EndpointConfig::default()).is_ok());
    }
}
