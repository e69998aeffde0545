// ABOUTME: Declarative tool specifications - parameter schema, constraints,
// ABOUTME: defaults, and the result schema each tool promises to return.

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::contract::ResultSchema;
use crate::llm::ToolDefinition;

/// JSON type a parameter is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
}

impl ParamType {
    fn json_type(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
        }
    }
}

/// Case normalisation applied to string parameters before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    Upper,
    Lower,
}

/// Value used when the caller omits a parameter.
#[derive(Debug, Clone)]
pub enum ParamDefault {
    Value(Value),
    /// Today's UTC date as `YYYY-MM-DD`, resolved at validation time.
    TodayUtc,
}

impl ParamDefault {
    pub(crate) fn resolve(&self) -> Value {
        match self {
            ParamDefault::Value(v) => v.clone(),
            ParamDefault::TodayUtc => {
                Value::String(chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string())
            }
        }
    }
}

/// A single validation rule on a parameter value.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// String must contain at least one non-whitespace character.
    NonBlank,
    /// String must be exactly `n` ASCII letters.
    Letters(usize),
    /// String must match the pattern; `hint` is shown on violation.
    Pattern {
        regex: &'static Regex,
        hint: &'static str,
    },
    /// Numeric value must be strictly greater than the bound.
    GreaterThan(f64),
    /// Numeric value must be at least the bound.
    AtLeast(f64),
    /// Numeric value must lie in the inclusive range.
    Range { min: f64, max: f64 },
    /// String must equal one of the options, ignoring case.
    OneOf(&'static [&'static str]),
}

impl Constraint {
    /// Check `value`, returning a human-readable reason on violation.
    pub(crate) fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            Constraint::NonBlank => match value.as_str() {
                Some(s) if !s.trim().is_empty() => Ok(()),
                _ => Err("must not be empty or whitespace".to_string()),
            },
            Constraint::Letters(n) => match value.as_str() {
                Some(s) if s.chars().count() == *n && s.chars().all(|c| c.is_ascii_alphabetic()) => {
                    Ok(())
                }
                _ => Err(format!("must be exactly {} letters", n)),
            },
            Constraint::Pattern { regex, hint } => match value.as_str() {
                Some(s) if regex.is_match(s) => Ok(()),
                _ => Err(format!("must match {}", hint)),
            },
            Constraint::GreaterThan(bound) => match value.as_f64() {
                Some(n) if n > *bound => Ok(()),
                _ => Err(format!("must be greater than {}", bound)),
            },
            Constraint::AtLeast(bound) => match value.as_f64() {
                Some(n) if n >= *bound => Ok(()),
                _ => Err(format!("must be at least {}", bound)),
            },
            Constraint::Range { min, max } => match value.as_f64() {
                Some(n) if n >= *min && n <= *max => Ok(()),
                _ => Err(format!("must be between {} and {}", min, max)),
            },
            Constraint::OneOf(options) => match value.as_str() {
                Some(s) if options.iter().any(|o| o.eq_ignore_ascii_case(s)) => Ok(()),
                _ => Err(format!("must be one of {}", options.join(", "))),
            },
        }
    }

    fn annotate(&self, schema: &mut Map<String, Value>) {
        match self {
            Constraint::NonBlank => {
                schema.insert("minLength".into(), json!(1));
            }
            Constraint::Letters(n) => {
                schema.insert("minLength".into(), json!(n));
                schema.insert("maxLength".into(), json!(n));
            }
            Constraint::Pattern { regex, .. } => {
                schema.insert("pattern".into(), json!(regex.as_str()));
            }
            Constraint::GreaterThan(bound) => {
                schema.insert("exclusiveMinimum".into(), json!(bound));
            }
            Constraint::AtLeast(bound) => {
                schema.insert("minimum".into(), json!(bound));
            }
            Constraint::Range { min, max } => {
                schema.insert("minimum".into(), json!(min));
                schema.insert("maximum".into(), json!(max));
            }
            Constraint::OneOf(options) => {
                schema.insert("enum".into(), json!(options));
            }
        }
    }
}

/// Schema for one named parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamType,
    pub required: bool,
    pub default: Option<ParamDefault>,
    pub normalize: Option<Normalize>,
    pub constraints: Vec<Constraint>,
}

impl ParamSpec {
    fn new(name: &'static str, kind: ParamType, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            default: None,
            normalize: None,
            constraints: Vec::new(),
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::String, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Integer, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Number, description)
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Default value used when the parameter is omitted.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(ParamDefault::Value(value.into()));
        self
    }

    /// Default to today's UTC date when omitted.
    pub fn default_today(mut self) -> Self {
        self.default = Some(ParamDefault::TodayUtc);
        self
    }

    pub fn normalize(mut self, normalize: Normalize) -> Self {
        self.normalize = Some(normalize);
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn json_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.kind.json_type()));
        schema.insert("description".into(), json!(self.description));
        if let Some(ParamDefault::Value(v)) = &self.default {
            schema.insert("default".into(), v.clone());
        }
        for constraint in &self.constraints {
            constraint.annotate(&mut schema);
        }
        Value::Object(schema)
    }
}

/// Immutable description of a tool: name, purpose, parameters, result shape.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub result: ResultSchema,
}

impl ToolSpec {
    pub fn new(name: &'static str, description: &'static str, result: ResultSchema) -> Self {
        Self {
            name,
            description,
            params: Vec::new(),
            result,
        }
    }

    /// Append a parameter. Order is preserved in the rendered schema.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Render as a JSON-schema tool definition for the reasoning engine.
    pub fn to_definition(&self) -> ToolDefinition {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            properties.insert(param.name.to_string(), param.json_schema());
            if param.required {
                required.push(json!(param.name));
            }
        }

        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToolSpec {
        ToolSpec::new("sample", "A sample tool", ResultSchema::Conversion)
            .param(
                ParamSpec::string("code", "Three letter code")
                    .required()
                    .constraint(Constraint::Letters(3)),
            )
            .param(
                ParamSpec::integer("count", "How many")
                    .default_value(1)
                    .constraint(Constraint::Range { min: 1.0, max: 14.0 }),
            )
    }

    #[test]
    fn test_definition_lists_required_params() {
        let def = sample().to_definition();
        assert_eq!(def.name, "sample");
        assert_eq!(def.input_schema["required"], json!(["code"]));
        assert_eq!(def.input_schema["properties"]["code"]["maxLength"], 3);
        assert_eq!(def.input_schema["properties"]["count"]["default"], 1);
        assert_eq!(def.input_schema["properties"]["count"]["maximum"], 14.0);
    }

    #[test]
    fn test_letters_constraint() {
        let c = Constraint::Letters(3);
        assert!(c.check(&json!("CDG")).is_ok());
        assert!(c.check(&json!("CD")).is_err());
        assert!(c.check(&json!("C1G")).is_err());
        assert!(c.check(&json!(123)).is_err());
    }

    #[test]
    fn test_one_of_ignores_case() {
        let c = Constraint::OneOf(&["KM", "MI"]);
        assert!(c.check(&json!("mi")).is_ok());
        assert!(c.check(&json!("miles")).is_err());
    }

    #[test]
    fn test_pattern_constraint() {
        static DATE: std::sync::LazyLock<Regex> =
            std::sync::LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
        let c = Constraint::Pattern {
            regex: &DATE,
            hint: "YYYY-MM-DD",
        };
        assert!(c.check(&json!("2025-03-01")).is_ok());
        let err = c.check(&json!("March 1st")).unwrap_err();
        assert!(err.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_today_default_is_iso_date() {
        let value = ParamDefault::TodayUtc.resolve();
        let text = value.as_str().unwrap();
        assert!(chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok());
    }
}
