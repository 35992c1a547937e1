//! Callable operation types stored in the operation registry
//!
//! Operations are the statically-registered replacement for reflective SDK
//! dispatch: the registry maps a `(client, method)` pair to an `OperationFn`,
//! and the dispatcher invokes it with already-coerced parameters. The
//! operation returns the raw response tree or an `InvocationError` wrapping
//! whatever the external API raised (authentication, throttling, validation,
//! service fault). Operations never retry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Result of invoking an external operation
pub type OperationResult = Result<Value, InvocationError>;

/// Boxed future returned by an operation
pub type OperationFuture = Pin<Box<dyn Future<Output = OperationResult> + Send>>;

/// A callable operation: coerced parameter tree in, raw response tree out
pub type OperationFn = Arc<dyn Fn(Value) -> OperationFuture + Send + Sync>;

/// Failure raised by the external operation itself
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvocationError {
    /// Error message from the external API
    pub message: String,
}

impl std::fmt::Display for InvocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InvocationError {}

impl InvocationError {
    /// Create an invocation error from any displayable cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invocation_error_display() {
        let err = InvocationError::new("AccessDenied: not authorized");
        assert_eq!(err.to_string(), "AccessDenied: not authorized");
    }

    #[tokio::test]
    async fn test_operation_fn_shape() {
        let op: OperationFn = Arc::new(|params: Value| {
            Box::pin(async move { Ok(json!({ "Echo": params })) }) as OperationFuture
        });

        let result = op(json!({"Name": "acct-1"})).await.expect("should succeed");
        assert_eq!(result["Echo"]["Name"], "acct-1");
    }
}
