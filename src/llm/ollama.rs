// ABOUTME: Ollama client for local inference over its OpenAI-compatible API.
// ABOUTME: Connects to localhost:11434 by default with a placeholder API key.

use super::openai::{post_chat, OpenAIRequest};
use super::{Request, Response};
use crate::config::DEFAULT_OLLAMA_MODEL;
use crate::error::LlmError;
use async_trait::async_trait;

/// Base URL for Ollama's OpenAI-compatible API.
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";

/// Client for Ollama API.
/// Ollama runs LLMs locally and exposes an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    http: reqwest::Client,
    default_model: String,
}

impl OllamaClient {
    /// Create a new Ollama client connecting to localhost:11434.
    pub fn new(model: &str) -> Self {
        Self::with_base_url(OLLAMA_BASE_URL, model)
    }

    /// Create a new Ollama client with a custom base URL.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Ollama server (e.g., "http://gpu-box:11434/v1")
    /// * `model` - The default model to use (e.g., "qwen2.5:7b", "llama3.2")
    pub fn with_base_url(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            http: reqwest::Client::new(),
            default_model: if model.is_empty() {
                DEFAULT_OLLAMA_MODEL.to_string()
            } else {
                model.to_string()
            },
        }
    }

    /// Use a preconfigured HTTP client, e.g. one with a request timeout.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_MODEL)
    }
}

#[async_trait]
impl super::client::LlmClient for OllamaClient {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        let mut openai_req = OpenAIRequest::from(req);

        // Use default model if none specified
        if openai_req.model.is_empty() {
            openai_req.model = self.default_model.clone();
        }

        // Ollama ignores the API key but expects the header shape
        post_chat(&self.http, &self.base_url, "ollama", &openai_req).await
    }
}
