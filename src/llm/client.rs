// ABOUTME: Defines the LlmClient trait - the seam between the agent core and
// ABOUTME: whichever reasoning engine backend is configured (Ollama, OpenAI).

use async_trait::async_trait;

use super::{Request, Response};
use crate::error::LlmError;

/// Trait for reasoning engine client implementations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the transcript, system instructions and tool definitions; return
    /// the engine's text and/or tool calls.
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError>;
}
