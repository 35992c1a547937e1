//! Error types shared across the stackhook workspace

use crate::operation::InvocationError;
use thiserror::Error;

/// Failures that can abort a lifecycle stage
///
/// All four kinds are caught at the dispatcher boundary and converted into a
/// FAILED signal outcome carrying the display string as the reason. None of
/// them are retried.
#[derive(Debug, Error)]
pub enum HookError {
    /// A coercion marker held a string that does not parse as the declared type
    #[error("cannot coerce {value:?} via {marker}: {message}")]
    Coercion {
        /// The marker key (`Type::Int`, `Type::Float` or `Type::Bool`)
        marker: String,
        /// The string value that failed to parse
        value: String,
        /// Parser error detail
        message: String,
    },

    /// No operation is registered under the requested client/method pair
    #[error("operation '{client}.{method}' is not registered")]
    OperationNotFound {
        /// Symbolic client name from the handler configuration
        client: String,
        /// Method name from the handler configuration
        method: String,
    },

    /// The external operation itself failed
    #[error("operation failed: {0}")]
    Invocation(#[from] InvocationError),

    /// The identity expression did not resolve to a single scalar
    #[error("identity expression '{expression}' failed: {message}")]
    Extraction {
        /// The path expression that was evaluated
        expression: String,
        /// What went wrong (missing path, wrong arity, non-scalar result)
        message: String,
    },
}

/// Transport failure while delivering a signal outcome
///
/// This error cannot be converted into another outcome: delivery is attempted
/// exactly once, and a dropped signal leaves recovery to the orchestrator's
/// own timeout.
#[derive(Debug, Error)]
#[error("signal delivery failed: {message}")]
pub struct SignalDeliveryError {
    /// Transport-level detail (connection failure, unexpected status)
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_error_display() {
        let err = HookError::OperationNotFound {
            client: "route53".to_string(),
            method: "change_resource_record_sets".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'route53.change_resource_record_sets' is not registered"
        );
    }

    #[test]
    fn test_invocation_error_converts() {
        let err: HookError = InvocationError {
            message: "throttled".to_string(),
        }
        .into();
        assert!(matches!(err, HookError::Invocation(_)));
        assert_eq!(err.to_string(), "operation failed: throttled");
    }

    #[test]
    fn test_signal_delivery_error_display() {
        let err = SignalDeliveryError {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "signal delivery failed: connection refused");
    }
}
