// ABOUTME: Agent definition - the model, prompt override, sampling settings and
// ABOUTME: retry policy one AgentCore runs with.

use crate::config::RetryPolicy;

/// Static settings for an [`AgentCore`](super::AgentCore).
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    /// Model to request from the reasoning engine (e.g., "qwen2.5:7b", "gpt-4o-mini").
    pub model: String,

    /// Fixed system instructions. If None, instructions are built from the
    /// registry on every invocation.
    pub system_prompt: Option<String>,

    /// Maximum tokens per engine reply.
    pub max_tokens: u32,

    /// Sampling temperature; None leaves the engine default.
    pub temperature: Option<f64>,

    /// Attempt and iteration bounds.
    pub retry: RetryPolicy,
}

impl AgentDefinition {
    /// Create a new agent definition for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: None,
            max_tokens: 1024,
            temperature: Some(0.0),
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the generated system instructions.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens per reply.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_builder() {
        let def = AgentDefinition::new("qwen2.5:7b")
            .system_prompt("Be brief")
            .max_tokens(256)
            .temperature(None)
            .retry(RetryPolicy::new(3, 6).unwrap());

        assert_eq!(def.model, "qwen2.5:7b");
        assert_eq!(def.system_prompt.as_deref(), Some("Be brief"));
        assert_eq!(def.max_tokens, 256);
        assert!(def.temperature.is_none());
        assert_eq!(def.retry.max_attempts, 3);
        assert_eq!(def.retry.max_iterations, 6);
    }

    #[test]
    fn test_definition_defaults() {
        let def = AgentDefinition::new("m");
        assert!(def.system_prompt.is_none());
        assert_eq!(def.retry, RetryPolicy::default());
    }
}
