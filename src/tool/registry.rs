// ABOUTME: Implements the Registry - the name-to-tool map the agent core
// ABOUTME: dispatches through. Built once at startup, then shared immutably.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::{Tool, ToolFailure, ToolResult};
use crate::error::ConfigError;
use crate::llm::ToolDefinition;

/// A registry of tools keyed by unique name.
#[derive(Default, Clone)]
pub struct Registry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names must be unique.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), ConfigError> {
        self.register_arc(Arc::new(tool))
    }

    /// Register a tool from an Arc.
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<(), ConfigError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ConfigError::DuplicateTool(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names, sorted alphabetically.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered tools.
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Convert all tools to LLM tool definitions, sorted by name.
    pub fn to_definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<_> = self
            .tools
            .values()
            .map(|t| t.spec().to_definition())
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Resolve `name` and call it. Unknown names yield an `UnknownTool` failure.
    pub async fn dispatch(&self, name: &str, args: &Value) -> ToolResult {
        match self.tools.get(name) {
            Some(tool) => tool.call(args).await,
            None => ToolFailure::unknown_tool(name).into(),
        }
    }
}
