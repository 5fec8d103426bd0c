//! AirVisual (IQAir) API client
//!
//! This module fetches the air quality reading for the caller's nearest city
//! from the AirVisual `nearest_city` endpoint. The upstream geolocates the
//! request by IP, so the only query parameter is the API key.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::AirQualityReport;

/// Default URL of the `nearest_city` endpoint
pub const DEFAULT_ENDPOINT: &str = "http://api.airvisual.com/v2/nearest_city";

/// Errors that can occur when fetching air quality data
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Upstream answered 429 Too Many Requests
    #[error("Rate limited by the AirVisual API (HTTP 429), try again later")]
    RateLimited,

    /// Upstream answered with a non-2xx status
    #[error("AirVisual API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Upstream answered 2xx but reported `"status": "fail"`
    #[error("AirVisual API reported failure: {0}")]
    Failed(String),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Shape of an upstream error body, e.g. `{"status":"fail","data":{"message":"incorrect_api_key"}}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FailureBody {
    data: FailureData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FailureData {
    message: String,
}

/// Client for fetching air quality data from the AirVisual API
#[derive(Debug, Clone)]
pub struct AirVisualClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl AirVisualClient {
    /// Creates a new AirVisualClient
    ///
    /// # Arguments
    /// * `api_key` - AirVisual API key, sent as the `key` query parameter
    /// * `endpoint` - URL of the `nearest_city` endpoint
    /// * `timeout` - Whole-request timeout; `None` waits indefinitely
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder =
            Client::builder().user_agent(concat!("tmux-aqi/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Fetch the current reading for the nearest city
    ///
    /// # Returns
    /// * `Ok(AirQualityReport)` - The decoded upstream payload
    /// * `Err(FetchError)` - On transport failure, non-2xx status, upstream
    ///   failure status or an undecodable body
    pub async fn fetch_nearest_city(&self) -> Result<AirQualityReport, FetchError> {
        debug!(endpoint = %self.endpoint, "fetching nearest city air quality");

        // The request URL carries the API key, keep it out of error messages.
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::RequestFailed(e.without_url()))?;

        debug!(status = status.as_u16(), bytes = body.len(), "received upstream response");
        parse_response(status, &body)
    }
}

/// Turn an HTTP status and body into a report or the matching error
fn parse_response(status: StatusCode, body: &str) -> Result<AirQualityReport, FetchError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimited);
    }

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            message: failure_message(body),
        });
    }

    let report: AirQualityReport = serde_json::from_str(body)?;
    if report.status == "fail" {
        return Err(FetchError::Failed(failure_message(body)));
    }

    Ok(report)
}

/// Extract `data.message` from an upstream error body
fn failure_message(body: &str) -> String {
    serde_json::from_str::<FailureBody>(body)
        .ok()
        .map(|failure| failure.data.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| "no message".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let body = concat!(
            r#"{"status":"success","#,
            r#""data":{"city":"Testville","current":{"pollution":{"aqius":42}}}}"#,
        );
        let report = parse_response(StatusCode::OK, body).expect("Should parse");

        assert_eq!(report.city(), "Testville");
        assert_eq!(report.aqi_us(), 42);
    }

    #[test]
    fn test_parse_response_without_status_field() {
        let body = r#"{"data":{"city":"Testville","current":{"pollution":{"aqius":42}}}}"#;
        let report = parse_response(StatusCode::OK, body).expect("Should parse");

        assert_eq!(report.aqi_us(), 42);
    }

    #[test]
    fn test_too_many_requests_is_rate_limited() {
        let body = r#"{"status":"fail","data":{"message":"call_limit_reached"}}"#;
        let result = parse_response(StatusCode::TOO_MANY_REQUESTS, body);

        assert!(matches!(result, Err(FetchError::RateLimited)));
    }

    #[test]
    fn test_non_success_status_carries_upstream_message() {
        let body = r#"{"status":"fail","data":{"message":"incorrect_api_key"}}"#;
        let err = parse_response(StatusCode::UNAUTHORIZED, body).unwrap_err();

        match err {
            FetchError::Status { status, ref message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "incorrect_api_key");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_non_success_status_with_html_body() {
        let err = parse_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap_err();

        match err {
            FetchError::Status { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "no message");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fail_status_in_success_response() {
        let body = r#"{"status":"fail","data":{"message":"city_not_found"}}"#;
        let err = parse_response(StatusCode::OK, body).unwrap_err();

        assert!(matches!(err, FetchError::Failed(ref m) if m == "city_not_found"));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let result = parse_response(StatusCode::OK, "{\"data\": {\"city\": ");
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_failed() {
        // Bind then drop to get a local port with nothing listening on it
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = AirVisualClient::new(
            "secret-key",
            format!("http://127.0.0.1:{port}/v2/nearest_city"),
            Some(Duration::from_secs(2)),
        )
        .expect("Client should build");

        let err = client.fetch_nearest_city().await.unwrap_err();

        assert!(matches!(err, FetchError::RequestFailed(_)));
        assert!(!err.to_string().contains("secret-key"));
    }
}
