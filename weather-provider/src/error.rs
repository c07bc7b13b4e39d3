use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while resolving or executing a data-provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Endpoint '{name}' not found. Available endpoints: {available}.")]
    UnknownEndpoint { name: String, available: String },

    #[error("Unknown service '{0}'. Supported services: {1}.")]
    UnknownService(String, String),

    #[error(
        "No RapidAPI key configured.\n\
         Hint: run `rapid-weather configure` or set the RAPID_API_KEY environment variable."
    )]
    MissingApiKey,

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to send request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse JSON response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("{\"ok\":true}"), "{\"ok\":true}");
    }

    #[test]
    fn long_body_is_truncated_on_char_boundary() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }

    #[test]
    fn unknown_endpoint_lists_alternatives() {
        let err = ProviderError::UnknownEndpoint {
            name: "forecast".into(),
            available: "current_weather".into(),
        };

        let msg = err.to_string();
        assert!(msg.contains("'forecast' not found"));
        assert!(msg.contains("current_weather"));
    }
}
