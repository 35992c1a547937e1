//! Capability registry for external operations
//!
//! The registry is a lookup over names only: it maps a `(client, method)`
//! pair to an [`OperationFn`] registered at startup, performs no marshaling
//! and never retries. The caller supplies already-coerced parameters and
//! receives the raw response tree, or an invocation error propagated
//! unchanged from the operation.

use stackhook_core::{HookError, OperationFn};
use std::collections::HashMap;

/// Registry mapping symbolic client/method names to callable operations
///
/// Populated once at process start through [`register`](Self::register) and
/// read-only afterwards; callers share it behind an `Arc`.
#[derive(Default)]
pub struct OperationRegistry {
    operations: HashMap<(String, String), OperationFn>,
}

impl OperationRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Register an operation under a client/method pair
    ///
    /// Returns `true` when an existing operation was replaced.
    pub fn register(
        &mut self,
        client: impl Into<String>,
        method: impl Into<String>,
        operation: OperationFn,
    ) -> bool {
        self.operations
            .insert((client.into(), method.into()), operation)
            .is_some()
    }

    /// Resolve a client/method pair to its operation
    ///
    /// # Errors
    ///
    /// Returns [`HookError::OperationNotFound`] when no operation is
    /// registered under the pair.
    pub fn resolve(&self, client: &str, method: &str) -> Result<OperationFn, HookError> {
        self.operations
            .get(&(client.to_string(), method.to_string()))
            .cloned()
            .ok_or_else(|| HookError::OperationNotFound {
                client: client.to_string(),
                method: method.to_string(),
            })
    }

    /// Whether an operation is registered under the pair
    #[must_use]
    pub fn contains(&self, client: &str, method: &str) -> bool {
        self.operations
            .contains_key(&(client.to_string(), method.to_string()))
    }

    /// All registered operations as `client.method`, sorted alphabetically
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .operations
            .keys()
            .map(|(client, method)| format!("{client}.{method}"))
            .collect();
        names.sort();
        names
    }

    /// Number of registered operations
    #[must_use]
    pub fn count(&self) -> usize {
        self.operations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stackhook_testing::mocks::{canned_operation, failing_operation};

    #[test]
    fn test_registry_new_is_empty() {
        let registry = OperationRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = OperationRegistry::new();
        let replaced = registry.register(
            "organizations",
            "create_account",
            canned_operation(json!({"Ok": true})),
        );
        assert!(!replaced);
        assert!(registry.contains("organizations", "create_account"));
        assert!(registry.resolve("organizations", "create_account").is_ok());
    }

    #[test]
    fn test_register_replace() {
        let mut registry = OperationRegistry::new();
        registry.register("s3", "put_object", canned_operation(json!(1)));
        let replaced = registry.register("s3", "put_object", canned_operation(json!(2)));
        assert!(replaced);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_resolve_unknown_pair_fails() {
        let registry = OperationRegistry::new();
        let err = registry
            .resolve("route53", "change_resource_record_sets")
            .err()
            .expect("should fail");
        assert!(matches!(err, HookError::OperationNotFound { .. }));
        assert!(err.to_string().contains("route53.change_resource_record_sets"));
    }

    #[test]
    fn test_list_is_sorted() {
        let mut registry = OperationRegistry::new();
        registry.register("s3", "put_object", canned_operation(json!(null)));
        registry.register("iam", "create_role", failing_operation("nope"));
        assert_eq!(registry.list(), vec!["iam.create_role", "s3.put_object"]);
    }

    #[tokio::test]
    async fn test_resolved_operation_invokes() {
        let mut registry = OperationRegistry::new();
        registry.register("sts", "get_caller_identity", canned_operation(json!({"Arn": "a"})));
        let op = registry
            .resolve("sts", "get_caller_identity")
            .expect("registered");
        let response = op(json!({})).await.expect("should succeed");
        assert_eq!(response["Arn"], "a");
    }
}
