//! Argument Coercion
//!
//! Transforms the raw `arguments` mapping of a `tools/call` request into
//! typed tool arguments validated against the tool's declared input schema.
//! Coercion is all-or-nothing: either every required parameter is present
//! with the declared type, or the call fails before any backing operation
//! runs.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use super::models::{ParamSpec, ParamType};

/// A single coerced argument value.
///
/// Tool signatures only declare `string` and `integer` parameters, so every
/// raw JSON value ends up in one of these two variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArgValue {
    Str(String),
    Int(i32),
}

/// Typed arguments for one tool call, keyed by parameter name.
///
/// Produced by [`coerce_arguments`], consumed immediately by the backing
/// operation, and discarded with the request.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ToolArguments {
    values: HashMap<String, ToolArgValue>,
}

impl ToolArguments {
    /// Returns a string argument, if present.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ToolArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns an integer argument, if present.
    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.values.get(key) {
            Some(ToolArgValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Number of coerced arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no arguments were coerced.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validation failure raised while coercing raw arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoerceError {
    #[error("missing required argument: {key}")]
    MissingRequired { key: String },

    #[error("argument {key} must be an integer")]
    NotAnInteger { key: String },
}

/// Coerces a raw argument mapping against a tool's parameter declarations.
///
/// Raw keys that do not appear in the schema are ignored; optional
/// parameters may be absent. The first violation aborts coercion, so no
/// partial argument set ever reaches a backing operation.
pub fn coerce_arguments(
    params: &[ParamSpec],
    raw: &Map<String, Value>,
) -> Result<ToolArguments, CoerceError> {
    let mut values = HashMap::new();

    for spec in params {
        match raw.get(spec.name) {
            Some(value) => {
                values.insert(spec.name.to_string(), coerce_value(spec, value)?);
            }
            None if spec.required => {
                return Err(CoerceError::MissingRequired {
                    key: spec.name.to_string(),
                });
            }
            None => {}
        }
    }

    Ok(ToolArguments { values })
}

fn coerce_value(spec: &ParamSpec, value: &Value) -> Result<ToolArgValue, CoerceError> {
    match spec.ty {
        ParamType::Integer => coerce_integer(spec.name, value),
        ParamType::String => Ok(ToolArgValue::Str(match value {
            Value::String(s) => s.clone(),
            other => stringify_fallback(other),
        })),
    }
}

/// Interprets a raw value as a 32-bit integer.
///
/// Accepts numeric JSON values (fractional input truncates toward zero) and
/// strings that parse as integers. Everything else, including numbers
/// outside the `i32` range, is a validation error naming the key.
fn coerce_integer(key: &str, value: &Value) -> Result<ToolArgValue, CoerceError> {
    let err = || CoerceError::NotAnInteger {
        key: key.to_string(),
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).map(ToolArgValue::Int).map_err(|_| err())
            } else if let Some(f) = n.as_f64() {
                if f >= i32::MIN as f64 && f <= i32::MAX as f64 {
                    Ok(ToolArgValue::Int(f as i32))
                } else {
                    Err(err())
                }
            } else {
                Err(err())
            }
        }
        Value::String(s) => s.trim().parse::<i32>().map(ToolArgValue::Int).map_err(|_| err()),
        _ => Err(err()),
    }
}

/// Loose rendering for string parameters fed a non-string value.
///
/// Numbers, booleans, null, arrays, and objects all become their JSON text.
/// The policy lives behind one named function so tests can target it
/// directly.
pub fn stringify_fallback(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
