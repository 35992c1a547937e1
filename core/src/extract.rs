//! Identity extraction from operation response trees
//!
//! A handler configuration may carry a path expression (for example
//! `Account.Name` or `ChangeInfo.Id`) that derives the durable identity of
//! the external object from the operation's response. Expressions are
//! evaluated as JSONPath queries; bare dotted expressions are addressed
//! relative to the document root.
//!
//! When no expression is supplied, the identity falls back to the request id
//! so every resource always has *some* identity. When an expression **is**
//! supplied it must resolve to exactly one scalar: a missing path, an empty
//! result or a structured value is an error, never a silent fallback, since
//! that would mask data-shape drift in the external API's response.

use crate::error::HookError;
use jsonpath_rust::JsonPathQuery;
use serde_json::Value;

/// Derive the identity string for an invocation result
///
/// # Errors
///
/// Returns [`HookError::Extraction`] when a supplied expression fails to
/// parse, matches no value, matches more than one value, or matches a value
/// that is not a scalar.
pub fn extract_identity(
    expression: Option<&str>,
    fallback: &str,
    response: &Value,
) -> Result<String, HookError> {
    let Some(expression) = expression else {
        return Ok(fallback.to_string());
    };

    let query = root_query(expression);
    let matches = response
        .clone()
        .path(&query)
        .map_err(|e| extraction_error(expression, &format!("query error: {e}")))?;

    let mut items = match matches {
        Value::Array(items) => items,
        single => vec![single],
    };

    if items.len() > 1 {
        return Err(extraction_error(
            expression,
            &format!("matched {} values, expected exactly one", items.len()),
        ));
    }

    match items.pop() {
        Some(Value::String(s)) => Ok(s),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => Ok(scalar.to_string()),
        Some(other) => Err(extraction_error(
            expression,
            &format!("resolved to a non-scalar value: {other}"),
        )),
        None => Err(extraction_error(expression, "matched no value in the response")),
    }
}

/// Root a bare dotted expression at `$`; pass explicit JSONPath through
fn root_query(expression: &str) -> String {
    if expression.starts_with('$') {
        expression.to_string()
    } else {
        format!("$.{expression}")
    }
}

fn extraction_error(expression: &str, message: &str) -> HookError {
    HookError::Extraction {
        expression: expression.to_string(),
        message: message.to_string(),
    }
}
