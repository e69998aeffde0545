// ABOUTME: Tests for LLM types - serialization, builders, response helpers.
// ABOUTME: Verifies the engine-facing message shapes the agent core relies on.

use super::*;

#[test]
fn test_role_serialization() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    assert_eq!(
        serde_json::to_string(&Role::Assistant).unwrap(),
        "\"assistant\""
    );
}

#[test]
fn test_content_block_tool_use_deserialization() {
    let json = r#"{
        "type": "tool_use",
        "id": "call_9",
        "name": "convert_currency",
        "input": {"amount": 100, "to_currency": "eur"}
    }"#;
    let block: ContentBlock = serde_json::from_str(json).unwrap();
    match block {
        ContentBlock::ToolUse { id, name, input } => {
            assert_eq!(id, "call_9");
            assert_eq!(name, "convert_currency");
            assert_eq!(input["to_currency"], "eur");
        }
        _ => panic!("Expected ToolUse"),
    }
}

#[test]
fn test_tool_error_block() {
    let block = ContentBlock::tool_error("call_1", "Error: unsupported");
    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(json["type"], "tool_result");
    assert_eq!(json["is_error"], true);
}

#[test]
fn test_request_builder() {
    let req = Request::new("qwen2.5:7b")
        .system("You are a travel assistant")
        .messages(vec![Message::user("Hi"), Message::assistant("Hello!")])
        .tool(ToolDefinition {
            name: "get_news".to_string(),
            description: "News".to_string(),
            input_schema: serde_json::json!({"type": "object"}),
        })
        .max_tokens(512)
        .temperature(0.0);

    assert_eq!(req.model, "qwen2.5:7b");
    assert_eq!(req.messages.len(), 2);
    assert_eq!(req.tools.len(), 1);
    assert_eq!(req.system.as_deref(), Some("You are a travel assistant"));
    assert_eq!(req.max_tokens, Some(512));
    assert_eq!(req.temperature, Some(0.0));
}

#[test]
fn test_response_tool_calls_in_order() {
    let response = Response {
        id: "r1".to_string(),
        content: vec![
            ContentBlock::text("Let me check."),
            ContentBlock::ToolUse {
                id: "a".to_string(),
                name: "get_weather".to_string(),
                input: serde_json::json!({"city": "Paris"}),
            },
            ContentBlock::ToolUse {
                id: "b".to_string(),
                name: "get_news".to_string(),
                input: serde_json::json!({"location": "Paris"}),
            },
        ],
        stop_reason: StopReason::ToolUse,
        model: "m".to_string(),
        usage: Usage::default(),
    };

    assert!(response.has_tool_use());
    assert_eq!(response.text(), "Let me check.");
    let names: Vec<_> = response.tool_calls().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["get_weather", "get_news"]);
}
