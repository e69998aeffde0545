// ABOUTME: Defines the Tool trait the core dispatches through, plus the typed
// ABOUTME: Contract/ToolAdapter pair that ContractTool wires together.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{validate, ToolFailure, ToolResult, ToolSpec};

/// A tool the agent core can dispatch to by name.
///
/// `call` never fails: every outcome, including bad arguments, is a
/// [`ToolResult`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// The immutable `ToolSpec` this tool was registered with.
    fn spec(&self) -> &ToolSpec;

    /// Validate `args` and execute.
    async fn call(&self, args: &Value) -> ToolResult;

    fn name(&self) -> &str {
        self.spec().name
    }
}

/// A typed request schema for one capability.
pub trait Contract: DeserializeOwned + Send + Sync + 'static {
    /// The specification requests of this type are validated against.
    fn spec() -> ToolSpec;
}

/// An adapter over one external capability, operating on validated requests.
#[async_trait]
pub trait ToolAdapter: Send + Sync {
    type Request: Contract;

    async fn execute(&self, request: Self::Request) -> ToolResult;
}

/// Binds an adapter to its contract: validate, execute, check the result shape.
pub struct ContractTool<A: ToolAdapter> {
    spec: ToolSpec,
    adapter: A,
}

impl<A: ToolAdapter> ContractTool<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            spec: A::Request::spec(),
            adapter,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}

#[async_trait]
impl<A: ToolAdapter> Tool for ContractTool<A> {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn call(&self, args: &Value) -> ToolResult {
        let canonical = match validate(&self.spec, args) {
            Ok(map) => map,
            Err(failure) => return failure.into(),
        };

        let request: A::Request = match serde_json::from_value(Value::Object(canonical)) {
            Ok(request) => request,
            Err(e) => return ToolFailure::invalid_arguments(e.to_string()).into(),
        };

        match self.adapter.execute(request).await {
            ToolResult::Success(payload) if payload.schema() != self.spec.result => {
                ToolFailure::upstream_format(format!(
                    "{} produced a {:?} payload, expected {:?}",
                    self.spec.name,
                    payload.schema(),
                    self.spec.result
                ))
                .into()
            }
            other => other,
        }
    }
}
