// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use wayfarer::prelude::*;` to get started quickly.

pub use crate::agent::{
    AgentCore, AgentDefinition, Assistant, HealthReport, HealthStatus, MemorySessionStore,
    QueryResponse, Session, SessionStore,
};
pub use crate::config::{Config, RetryPolicy};
pub use crate::contract::ToolPayload;
pub use crate::error::{AgentError, ConfigError, LlmError};
pub use crate::llm::{
    ContentBlock, LlmClient, Message, OllamaClient, OpenAIClient, Request, Response, Role,
    StopReason, ToolCall, ToolDefinition, Usage,
};
pub use crate::tool::{
    ContractTool, FailureKind, Registry, Tool, ToolAdapter, ToolFailure, ToolResult, ToolSpec,
};
pub use crate::tools::default_registry;
