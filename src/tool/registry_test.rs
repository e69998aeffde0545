// ABOUTME: Tests for the tool Registry and ContractTool - registration,
// ABOUTME: duplicate rejection, dispatch, validation and result-shape checks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::*;
use crate::contract::{ConvertedAmount, NewsArticle, ResultSchema};
use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
struct EchoRequest {
    amount: f64,
}

impl Contract for EchoRequest {
    fn spec() -> ToolSpec {
        ToolSpec::new("echo", "Echoes the amount back", ResultSchema::Conversion)
            .param(ParamSpec::number("amount", "Amount").required())
    }
}

/// Adapter that echoes the amount, counting calls.
#[derive(Default)]
struct EchoAdapter {
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl ToolAdapter for EchoAdapter {
    type Request = EchoRequest;

    async fn execute(&self, request: EchoRequest) -> ToolResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ToolResult::success(ConvertedAmount {
            final_amount: request.amount,
        })
    }
}

/// Adapter whose payload does not match its declared schema.
struct MismatchedAdapter;

#[async_trait::async_trait]
impl ToolAdapter for MismatchedAdapter {
    type Request = EchoRequest;

    async fn execute(&self, _request: EchoRequest) -> ToolResult {
        let article = NewsArticle::parse("Title", "https://example.com").unwrap();
        ToolResult::success(vec![article])
    }
}

#[test]
fn test_register_and_get() {
    let mut registry = Registry::new();
    registry.register(ContractTool::new(EchoAdapter::default())).unwrap();

    let tool = registry.get("echo");
    assert!(tool.is_some());
    assert_eq!(tool.unwrap().name(), "echo");
    assert!(registry.contains("echo"));
}

#[test]
fn test_get_nonexistent() {
    let registry = Registry::new();
    assert!(registry.get("nonexistent").is_none());
}

#[test]
fn test_duplicate_name_rejected() {
    let mut registry = Registry::new();
    registry.register(ContractTool::new(EchoAdapter::default())).unwrap();

    let err = registry
        .register(ContractTool::new(EchoAdapter::default()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateTool(name) if name == "echo"));
    assert_eq!(registry.count(), 1);
}

#[test]
fn test_to_definitions() {
    let mut registry = Registry::new();
    registry.register(ContractTool::new(EchoAdapter::default())).unwrap();

    let defs = registry.to_definitions();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, "echo");
    assert_eq!(defs[0].description, "Echoes the amount back");
    assert_eq!(defs[0].input_schema["required"], json!(["amount"]));
}

#[tokio::test]
async fn test_dispatch_unknown_tool() {
    let registry = Registry::new();
    let result = registry.dispatch("teleport", &json!({})).await;
    assert_eq!(
        result.failure().map(|f| f.kind),
        Some(FailureKind::UnknownTool)
    );
}

#[tokio::test]
async fn test_dispatch_validates_before_executing() {
    let adapter = EchoAdapter::default();
    let calls = Arc::clone(&adapter.calls);
    let mut registry = Registry::new();
    registry.register(ContractTool::new(adapter)).unwrap();

    let result = registry.dispatch("echo", &json!({"amount": "lots"})).await;
    assert_eq!(
        result.failure().map(|f| f.kind),
        Some(FailureKind::SchemaViolation)
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let result = registry.dispatch("echo", &json!({"amount": 7})).await;
    assert_eq!(result.to_observation(), "final_amount: 7.00");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_mismatched_payload_becomes_upstream_format() {
    let mut registry = Registry::new();
    registry.register(ContractTool::new(MismatchedAdapter)).unwrap();

    let result = registry.dispatch("echo", &json!({"amount": 1})).await;
    assert_eq!(
        result.failure().map(|f| f.kind),
        Some(FailureKind::UpstreamFormat)
    );
}

#[test]
fn test_clone_shares_tools() {
    let mut registry = Registry::new();
    registry.register(ContractTool::new(EchoAdapter::default())).unwrap();
    let clone = registry.clone();
    assert_eq!(clone.list(), vec!["echo"]);
}
