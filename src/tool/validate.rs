// ABOUTME: Validates engine-produced arguments against a ToolSpec.
// ABOUTME: Applies defaults, lax numeric coercion, normalisation and constraints.

use serde_json::{Map, Number, Value};

use super::{Normalize, ParamSpec, ParamType, ToolFailure, ToolSpec};

/// Validate `args` against `spec`, returning the canonical argument map.
///
/// `null` is treated as an empty object. Keys `spec` does not declare are
/// dropped. Every declared parameter with a value or default is present in
/// the returned map, already coerced to its declared type.
pub fn validate(spec: &ToolSpec, args: &Value) -> Result<Map<String, Value>, ToolFailure> {
    let empty = Map::new();
    let provided = match args {
        Value::Object(map) => map,
        Value::Null => &empty,
        Value::String(_) => {
            return Err(ToolFailure::invalid_arguments(
                "arguments were not valid JSON; send a JSON object",
            ));
        }
        other => {
            return Err(ToolFailure::invalid_arguments(format!(
                "arguments must be a JSON object, got {}",
                type_name(other)
            )));
        }
    };

    let mut canonical = Map::new();
    for param in &spec.params {
        let raw = match provided.get(param.name) {
            Some(Value::Null) | None => match &param.default {
                Some(default) => default.resolve(),
                None if param.required => {
                    return Err(ToolFailure::invalid_field(param.name, "is required"));
                }
                None => continue,
            },
            Some(value) => value.clone(),
        };

        let value = coerce(param, raw)?;
        for constraint in &param.constraints {
            constraint
                .check(&value)
                .map_err(|reason| ToolFailure::invalid_field(param.name, reason))?;
        }
        canonical.insert(param.name.to_string(), value);
    }

    Ok(canonical)
}

fn coerce(param: &ParamSpec, value: Value) -> Result<Value, ToolFailure> {
    match param.kind {
        ParamType::String => match value {
            Value::String(s) => Ok(Value::String(match param.normalize {
                Some(Normalize::Upper) => s.trim().to_uppercase(),
                Some(Normalize::Lower) => s.trim().to_lowercase(),
                None => s,
            })),
            other => Err(ToolFailure::invalid_field(
                param.name,
                format!("must be a string, got {}", type_name(&other)),
            )),
        },
        ParamType::Integer => {
            let n = match &value {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            n.map(|n| Value::Number(n.into()))
                .ok_or_else(|| ToolFailure::invalid_field(param.name, "must be an integer"))
        }
        ParamType::Number => {
            let n = match &value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            n.and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| ToolFailure::invalid_field(param.name, "must be a number"))
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
