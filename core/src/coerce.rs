//! Coercion resolver for type-tagged parameter trees
//!
//! Declarative documents can only express strings, so parameter trees carry
//! single-key markers (`{"Type::Int": "300"}`) where a typed scalar is meant.
//! [`coerce`] rewrites an arbitrary tree of mappings, sequences and scalars
//! into an equivalent tree with every marker replaced by the parsed scalar,
//! preserving all other structure unchanged.
//!
//! A mapping is treated as a marker only when it has exactly one key and that
//! key is one of the three recognized names. Mappings with additional keys,
//! or an unrecognized single key such as `Type::Custom`, are ordinary data
//! and pass through untouched so keys the external API itself understands
//! survive the rewrite.

use crate::error::HookError;
use serde_json::{Map, Value};

/// The three recognized marker kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Int,
    Float,
    Bool,
}

impl Marker {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "Type::Int" => Some(Self::Int),
            "Type::Float" => Some(Self::Float),
            "Type::Bool" => Some(Self::Bool),
            _ => None,
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Int => "Type::Int",
            Self::Float => "Type::Float",
            Self::Bool => "Type::Bool",
        }
    }

    fn resolve(self, inner: Value) -> Result<Value, HookError> {
        let Value::String(literal) = inner else {
            return Err(self.error(&inner.to_string(), "marker value must be a string"));
        };

        match self {
            Self::Int => literal
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| self.error(&literal, &e.to_string())),
            Self::Float => {
                let parsed = literal
                    .parse::<f64>()
                    .map_err(|e| self.error(&literal, &e.to_string()))?;
                serde_json::Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| self.error(&literal, "not representable as a JSON number"))
            }
            Self::Bool => {
                if literal.eq_ignore_ascii_case("true") {
                    Ok(Value::Bool(true))
                } else if literal.eq_ignore_ascii_case("false") {
                    Ok(Value::Bool(false))
                } else {
                    Err(self.error(&literal, "expected 'true' or 'false'"))
                }
            }
        }
    }

    fn error(self, value: &str, message: &str) -> HookError {
        HookError::Coercion {
            marker: self.key().to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }
}

/// Resolve every coercion marker in `value`, recursively
///
/// Pure transform: no side effects, terminates on any finite input.
///
/// # Errors
///
/// Returns [`HookError::Coercion`] when a marker's string value does not
/// parse as the declared type, or when a marker value is not a string.
pub fn coerce(value: Value) -> Result<Value, HookError> {
    match value {
        Value::Object(map) => coerce_map(map),
        Value::Array(items) => Ok(Value::Array(
            items.into_iter().map(coerce).collect::<Result<_, _>>()?,
        )),
        scalar => Ok(scalar),
    }
}

fn coerce_map(mut map: Map<String, Value>) -> Result<Value, HookError> {
    // Single-key maps are marker candidates; everything else is data.
    if map.len() == 1 {
        let marker = map.keys().next().and_then(|k| Marker::from_key(k));
        if let Some(marker) = marker {
            let inner = map
                .values_mut()
                .next()
                .map(Value::take)
                .unwrap_or(Value::Null);
            return marker.resolve(inner);
        }
    }

    let resolved = map
        .into_iter()
        .map(|(k, v)| Ok((k, coerce(v)?)))
        .collect::<Result<Map<_, _>, HookError>>()?;
    Ok(Value::Object(resolved))
}
