// ABOUTME: Shared outbound HTTP plumbing for the adapters - client construction,
// ABOUTME: a single retry on transient transport errors, JSON decoding.

use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::warn;

use crate::config::HttpConfig;
use crate::error::ConfigError;
use crate::tool::ToolFailure;

/// Build the HTTP client shared by all adapters.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("wayfarer/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ConfigError::HttpClient)
}

/// Why an upstream call did not produce a usable body.
#[derive(Debug)]
pub(crate) enum HttpFailure {
    /// The upstream answered with a non-success status.
    Status { status: StatusCode, body: String },
    /// The request never completed.
    Transport(reqwest::Error),
    /// The body was not valid JSON.
    Decode(String),
}

impl HttpFailure {
    /// Map to the tool failure taxonomy, naming the service in the detail.
    pub(crate) fn into_failure(self, service: &str) -> ToolFailure {
        match self {
            HttpFailure::Status { status, .. } => ToolFailure::upstream_unavailable(format!(
                "{} service returned HTTP {}",
                service,
                status.as_u16()
            )),
            HttpFailure::Transport(e) if e.is_timeout() => {
                ToolFailure::upstream_unavailable(format!("{} service timed out", service))
            }
            HttpFailure::Transport(e) => ToolFailure::upstream_unavailable(format!(
                "{} service could not be reached: {}",
                service, e
            )),
            HttpFailure::Decode(detail) => ToolFailure::upstream_format(format!(
                "{} service returned an unreadable response: {}",
                service, detail
            )),
        }
    }
}

fn is_transient(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

/// Send `request`, retrying once on connect errors and timeouts.
///
/// HTTP error statuses are returned as [`HttpFailure::Status`] without retry.
pub(crate) async fn send(request: RequestBuilder) -> Result<reqwest::Response, HttpFailure> {
    let retry = request.try_clone();

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) if is_transient(&e) => match retry {
            Some(retry) => {
                warn!(error = %e, "transient upstream failure, retrying once");
                retry.send().await.map_err(HttpFailure::Transport)?
            }
            None => return Err(HttpFailure::Transport(e)),
        },
        Err(e) => return Err(HttpFailure::Transport(e)),
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(HttpFailure::Status { status, body });
    }

    Ok(response)
}

/// Send `request` and decode the body as JSON.
pub(crate) async fn get_json(request: RequestBuilder) -> Result<Value, HttpFailure> {
    let response = send(request).await?;
    let bytes = response.bytes().await.map_err(HttpFailure::Transport)?;
    serde_json::from_slice(&bytes).map_err(|e| HttpFailure::Decode(e.to_string()))
}
