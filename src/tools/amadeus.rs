// ABOUTME: Client-credentials token exchange shared by the flight and hotel
// ABOUTME: adapters, which talk to the same OAuth-protected travel API.

use serde::Deserialize;
use tracing::{debug, error};

use super::http;
use crate::config::OAuthServiceConfig;
use crate::tool::ToolFailure;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange the configured client id/secret for a bearer token.
pub(crate) async fn access_token(
    client: &reqwest::Client,
    config: &OAuthServiceConfig,
    service: &str,
) -> Result<String, ToolFailure> {
    let url = format!("{}/v1/security/oauth2/token", config.base_url);
    debug!(service, %url, "requesting access token");

    let request = client.post(&url).form(&[
        ("grant_type", "client_credentials"),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
    ]);

    let body = http::get_json(request).await.map_err(|e| {
        let failure = e.into_failure(service);
        error!(service, error = %failure, "access token request failed");
        failure
    })?;

    serde_json::from_value::<TokenResponse>(body)
        .map(|t| t.access_token)
        .map_err(|e| {
            ToolFailure::upstream_format(format!(
                "{} token response missing access_token: {}",
                service, e
            ))
        })
}
