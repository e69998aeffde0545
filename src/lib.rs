// ABOUTME: Root module for wayfarer - a tool-orchestrating travel and finance assistant.
// ABOUTME: Re-exports the public API from submodules.

pub mod agent;
pub mod config;
pub mod contract;
pub mod error;
pub mod llm;
pub mod prelude;
pub mod tool;
pub mod tools;

pub use error::{AgentError, ConfigError, LlmError};
