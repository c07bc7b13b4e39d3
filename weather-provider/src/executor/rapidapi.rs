use async_trait::async_trait;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde_json::Value;
use std::{fmt, time::Duration};
use tracing::{debug, warn};

use crate::{
    config::Config,
    endpoint::{HttpMethod, Payload},
    error::{ProviderError, Result, truncate_body},
    registry::EndpointRegistry,
};

use super::RequestExecutor;

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Executes endpoint calls against RapidAPI-hosted services.
#[derive(Clone)]
pub struct RapidApiClient {
    api_key: String,
    http: Client,
}

impl RapidApiClient {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }

    pub fn with_timeout(api_key: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::HttpClient)?;

        Ok(Self { api_key, http })
    }

    /// Build a client from the configured API key and request timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key().ok_or(ProviderError::MissingApiKey)?;
        Self::with_timeout(api_key.to_owned(), config.request_timeout())
    }
}

impl fmt::Debug for RapidApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RapidApiClient").field("api_key", &"<redacted>").finish()
    }
}

#[async_trait]
impl RequestExecutor for RapidApiClient {
    async fn call_endpoint(
        &self,
        registry: &EndpointRegistry,
        route_name: &str,
        payload: &Payload,
    ) -> Result<Value> {
        let endpoint = registry.resolve(route_name)?;
        let url = registry.url_for(route_name)?;
        let host = rapidapi_host(registry.base_url())?;

        debug!(host = %host, route = %endpoint.route, method = %endpoint.method, "calling endpoint");

        let request = match endpoint.method {
            HttpMethod::Get => self.http.get(&url).query(payload),
            HttpMethod::Post => self.http.post(&url).json(payload),
        };

        let res = request
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(API_HOST_HEADER, host.as_str())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| ProviderError::Transport { url: url.clone(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ProviderError::Transport { url: url.clone(), source })?;

        if !status.is_success() {
            warn!(host = %host, route = %endpoint.route, %status, "endpoint returned an error status");
            return Err(ProviderError::Status { url, status, body: truncate_body(&body) });
        }

        debug!(host = %host, route = %endpoint.route, %status, bytes = body.len(), "endpoint responded");

        serde_json::from_str(&body).map_err(|source| ProviderError::Decode { url, source })
    }
}

/// Value of the `x-rapidapi-host` header: the authority of the base URL.
fn rapidapi_host(base_url: &str) -> Result<String> {
    let url = Url::parse(base_url).map_err(|_| ProviderError::InvalidBaseUrl(base_url.into()))?;
    let host = url
        .host_str()
        .ok_or_else(|| ProviderError::InvalidBaseUrl(base_url.into()))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_is_taken_from_base_url() {
        let host = rapidapi_host("https://weather-api167.p.rapidapi.com").unwrap();
        assert_eq!(host, "weather-api167.p.rapidapi.com");
    }

    #[test]
    fn host_keeps_explicit_port() {
        assert_eq!(rapidapi_host("http://127.0.0.1:8080").unwrap(), "127.0.0.1:8080");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = rapidapi_host("not a url").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidBaseUrl(_)));
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = RapidApiClient::from_config(&Config::default()).unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey));
    }

    #[test]
    fn debug_output_redacts_key() {
        let client = RapidApiClient::new("SECRET".into());
        let out = format!("{client:?}");

        assert!(!out.contains("SECRET"));
        assert!(out.contains("redacted"));
    }
}
