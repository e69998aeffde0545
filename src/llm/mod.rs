// ABOUTME: LLM module - client abstraction for reasoning engine providers.
// ABOUTME: Defines types, the client trait, and the OpenAI/Ollama clients.

mod client;
mod ollama;
mod openai;
mod types;

use std::sync::Arc;

pub use client::*;
pub use ollama::*;
pub use openai::*;
pub use types::*;

use crate::config::{LlmConfig, LlmProvider};
use crate::error::LlmError;

/// Build the configured reasoning engine client.
pub fn client_from_config(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    let http = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| LlmError::Configuration(format!("failed to build HTTP client: {}", e)))?;

    Ok(match &config.provider {
        LlmProvider::Ollama { base_url } => Arc::new(
            OllamaClient::with_base_url(base_url, &config.model).with_http_client(http),
        ),
        LlmProvider::OpenAI { api_key, base_url } => Arc::new(
            OpenAIClient::new(api_key.clone())
                .with_base_url(base_url.clone())
                .with_http_client(http),
        ),
    })
}

#[cfg(test)]
mod types_test;
