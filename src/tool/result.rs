// ABOUTME: Defines ToolResult - the tagged outcome every tool returns:
// ABOUTME: a typed payload, an empty-but-valid answer, or a structured failure.

use std::fmt;

use crate::contract::ToolPayload;

/// Category of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Arguments did not satisfy the tool's parameter schema.
    SchemaViolation,
    /// The engine asked for a tool that is not registered.
    UnknownTool,
    /// The upstream answered, but not in the shape we expected.
    UpstreamFormat,
    /// The upstream could not be reached or answered with an error status.
    UpstreamUnavailable,
    /// The request is well-formed but the upstream cannot serve it.
    Unsupported,
}

impl FailureKind {
    /// Stable machine code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::SchemaViolation => "schema_violation",
            FailureKind::UnknownTool => "unknown_tool",
            FailureKind::UpstreamFormat => "upstream_format",
            FailureKind::UpstreamUnavailable => "upstream_unavailable",
            FailureKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A structured tool failure, carried as data rather than raised.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct ToolFailure {
    pub kind: FailureKind,
    pub detail: String,
    /// Offending parameter, for schema violations.
    pub field: Option<String>,
}

impl ToolFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            field: None,
        }
    }

    /// A schema violation on a named parameter.
    pub fn invalid_field(field: impl Into<String>, reason: impl fmt::Display) -> Self {
        let field = field.into();
        Self {
            kind: FailureKind::SchemaViolation,
            detail: format!("'{}' {}", field, reason),
            field: Some(field),
        }
    }

    /// A schema violation not attributable to one parameter.
    pub fn invalid_arguments(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::SchemaViolation, detail)
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new(
            FailureKind::UnknownTool,
            format!("no tool named '{}' is available", name),
        )
    }

    pub fn upstream_format(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::UpstreamFormat, detail)
    }

    pub fn upstream_unavailable(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::UpstreamUnavailable, detail)
    }

    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Unsupported, detail)
    }
}

/// Outcome of a single tool call.
#[derive(Debug, Clone)]
pub enum ToolResult {
    Success(ToolPayload),
    /// Valid request with nothing to report, e.g. no flights on that route.
    Empty(String),
    Failure(ToolFailure),
}

impl ToolResult {
    pub fn success(payload: impl Into<ToolPayload>) -> Self {
        Self::Success(payload.into())
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::Empty(message.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ToolResult::Failure(_))
    }

    pub fn failure(&self) -> Option<&ToolFailure> {
        match self {
            ToolResult::Failure(f) => Some(f),
            _ => None,
        }
    }

    /// Text fed back to the reasoning engine as the tool observation.
    pub fn to_observation(&self) -> String {
        match self {
            ToolResult::Success(payload) => payload.to_string(),
            ToolResult::Empty(message) => message.clone(),
            ToolResult::Failure(failure) => format!("Error: {}", failure),
        }
    }
}

impl From<ToolFailure> for ToolResult {
    fn from(failure: ToolFailure) -> Self {
        ToolResult::Failure(failure)
    }
}
